use pretty_assertions::assert_eq;

use stratus_schema_protocol::builtin;
use stratus_schema_protocol::constants::KUBERNETES_SERVICE_ACCOUNT_PATH;
use stratus_schema_protocol::Locale;
use stratus_schema_protocol::ProviderSchema;
use stratus_schema_protocol::SchemaType;
use stratus_schema_protocol::SchemaVersion;

fn shipped_document_path() -> String {
    format!(
        "{}/{KUBERNETES_SERVICE_ACCOUNT_PATH}",
        env!("CARGO_MANIFEST_DIR")
    )
}

#[test]
fn test_read_from_yaml_file() {
    //given
    let path = shipped_document_path();

    //when
    let doc = ProviderSchema::from_yaml_file(path).unwrap();

    //then
    assert_eq!(doc.schema_id, "kubernetes-service-account");
    assert_eq!(doc.name, "Kubernetes Service Account");
    assert_eq!(doc.schema_type, SchemaType::ServiceAccount);
    assert_eq!(doc.version, SchemaVersion::parse("1.0.0").unwrap());
    assert_eq!(doc.provider, "kubernetes");
    assert!(doc.schema.is_empty());
}

#[test]
fn test_shipped_document_declares_three_locales() {
    //given
    let doc = ProviderSchema::from_yaml_file(shipped_document_path()).unwrap();

    //when
    let locales: Vec<&str> = doc
        .options
        .help
        .keys()
        .map(|locale| locale.as_str())
        .collect();

    //then
    assert_eq!(locales, vec!["en", "jp", "ko"]);
    for text in doc.options.help.values() {
        assert!(!text.trim().is_empty());
    }
}

#[test]
fn test_shipped_document_passes_integrity_check() {
    //given
    let doc = ProviderSchema::from_yaml_file(shipped_document_path()).unwrap();

    //when
    let res = doc.integrity_check();

    //then
    assert!(res.is_ok());
}

#[test]
fn test_round_trip_preserves_structure() {
    //given
    let doc = ProviderSchema::from_yaml_file(shipped_document_path()).unwrap();

    //when
    let yaml = doc.to_yaml_string().unwrap();
    let reparsed = ProviderSchema::from_yaml_str(&yaml).unwrap();

    //then
    assert_eq!(doc, reparsed);
}

#[test]
fn test_write_to_yaml_file() {
    //given
    let file = tempfile::NamedTempFile::new().unwrap();
    let doc = ProviderSchema::from_yaml_file(shipped_document_path()).unwrap();

    //when
    doc.to_yaml_file(file.as_ref()).unwrap();
    let written = ProviderSchema::from_yaml_file(file.as_ref()).unwrap();

    //then
    assert_eq!(doc, written);
}

#[test]
fn test_builtin_matches_shipped_file() {
    //given
    let from_file = ProviderSchema::from_yaml_file(shipped_document_path()).unwrap();

    //when
    let from_builtin = builtin::kubernetes_service_account().unwrap();

    //then
    assert_eq!(from_file, from_builtin);
}

#[test]
fn test_help_text_lookup() {
    //given
    let doc = builtin::kubernetes_service_account().unwrap();

    //when
    let jp_help = doc.help_text(&"jp".parse::<Locale>().unwrap()).unwrap();
    let undeclared = doc.help_text(&"de".parse::<Locale>().unwrap()).unwrap();

    //then
    assert!(jp_help.contains("Kubernetes"));
    // undeclared locales are served the English text
    assert!(undeclared.starts_with("# Help for Kubernetes Integration"));
}

#[test]
fn test_qualified_name_round_trips_to_path() {
    //given
    let doc = builtin::kubernetes_service_account().unwrap();

    //when
    let qualified = doc.qualified_name();
    let path = ProviderSchema::path_from_qualified_name(&qualified).unwrap();

    //then
    assert_eq!(qualified, "kubernetes/kubernetes-service-account@1.0.0");
    assert_eq!(path, "kubernetes/kubernetes-service-account-1.0.0.yaml");
}
