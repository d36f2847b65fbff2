//! Schema documents shipped with the crate.
//!
//! The hub seeds its catalog from these on first boot. Each document is
//! embedded at compile time so consumers never depend on an install layout.

use tracing::debug;

use crate::errors::Result;
use crate::schema_doc::ProviderSchema;

/// raw YAML of the Kubernetes Service Account provider schema
pub const KUBERNETES_SERVICE_ACCOUNT: &str =
    include_str!("../schemas/kubernetes_service_account.yaml");

/// the parsed Kubernetes Service Account schema document
pub fn kubernetes_service_account() -> Result<ProviderSchema> {
    let schema = ProviderSchema::from_yaml_str(KUBERNETES_SERVICE_ACCOUNT)?;
    schema.integrity_check()?;
    Ok(schema)
}

/// every schema document shipped with this crate
pub fn all() -> Result<Vec<ProviderSchema>> {
    debug!("loading built-in schema documents");
    Ok(vec![kubernetes_service_account()?])
}

#[cfg(test)]
mod test {
    use crate::schema_doc::SchemaType;

    #[test]
    fn builtin_documents_pass_integrity() {
        let docs = super::all().expect("built-in document failed to load");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].schema_type, SchemaType::ServiceAccount);
    }
}
