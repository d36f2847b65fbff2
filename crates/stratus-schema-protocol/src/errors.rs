#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse schema document")]
    DocumentParse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Schema document verify: {0}")]
    SchemaVerify(String),
    #[error("Invalid locale code: {0}")]
    InvalidLocale(String),
    #[error("Invalid schema version: {0}")]
    InvalidSchemaVersion(String),
    #[error("Invalid qualified schema name: {0}")]
    InvalidQualifiedName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
