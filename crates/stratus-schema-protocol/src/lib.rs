//! Data structures for reading and writing Stratus provider schema documents.
//!
//! A provider schema document declares the identity, category, and localized
//! help content of one provider integration. The hub catalog loads these
//! documents and serves them to clients; this crate owns the document
//! contract so consumers depend on types instead of raw YAML.

mod errors;
mod locale;
mod schema_doc;

pub mod builtin;
pub mod constants;

pub use errors::{Error, Result};
pub use locale::Locale;
pub use schema_doc::{FieldSchema, HelpText, ProviderSchema, SchemaOptions, SchemaType};
pub use schema_doc::SchemaVersion;
pub use schema_doc::{validate_allowedchars, validate_noleading_punct};
