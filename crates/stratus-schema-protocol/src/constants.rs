use const_format::concatcp;

pub const SCHEMA_DOC_EXT: &str = "yaml";

/// locale used when a requested help locale is not declared
pub const DEFAULT_HELP_LOCALE: &str = "en";

/// documents shipped with the crate live under this directory
pub const BUILTIN_SCHEMA_DIR: &str = "schemas";
pub const KUBERNETES_SERVICE_ACCOUNT_FILE: &str = "kubernetes_service_account.yaml";
pub const KUBERNETES_SERVICE_ACCOUNT_PATH: &str =
    concatcp!(BUILTIN_SCHEMA_DIR, "/", KUBERNETES_SERVICE_ACCOUNT_FILE);
