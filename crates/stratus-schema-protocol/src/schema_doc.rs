use std::collections::BTreeMap;
use std::ops::Deref;

use openapiv3::{AnySchema, ReferenceOr, Schema, SchemaKind, Type};
use semver::Version as SemVersion;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::constants::SCHEMA_DOC_EXT;
use crate::errors::{Error, Result};
use crate::locale::Locale;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
/// defines a provider schema document
pub struct ProviderSchema {
    pub schema_id: String,
    pub name: String,
    pub schema_type: SchemaType,
    pub version: SchemaVersion, // SemVer, document version
    #[serde(default)]
    pub schema: FieldSchema, // field definitions, may be empty
    pub provider: String,
    pub options: SchemaOptions,
}

/// category tag of a schema document, `SERVICE_ACCOUNT` and friends on the wire
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    #[default]
    ServiceAccount,
    TrustedAccount,
    Secret,
    TrustingSecret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion(SemVersion);

impl SchemaVersion {
    pub fn parse(version: &str) -> Result<Self> {
        let version = SemVersion::parse(version)
            .map_err(|err| Error::InvalidSchemaVersion(err.to_string()))?;
        Ok(Self(version))
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self(SemVersion::new(1, 0, 0))
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OpenAPI-style definitions of the fields a consumer renders for account
/// creation. The Kubernetes document ships this empty: the cluster is named
/// at account creation and the agent carries its own credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldSchema {
    #[serde(flatten)]
    pub schema: Option<Schema>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Default, Clone)]
pub struct SchemaOptions {
    pub help: HelpText,
}

/// localized Markdown help, keyed by locale code
#[derive(Serialize, Deserialize, PartialEq, Debug, Default, Clone)]
pub struct HelpText(BTreeMap<Locale, String>);

impl Default for ProviderSchema {
    fn default() -> ProviderSchema {
        ProviderSchema {
            schema_id: "name-of-the-schema".into(),
            name: "NameOfTheSchema".into(),
            schema_type: SchemaType::ServiceAccount,
            version: SchemaVersion::default(),
            schema: FieldSchema::default(),
            provider: "name-of-provider".into(),
            options: SchemaOptions::default(),
        }
    }
}

impl ProviderSchema {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!(path = %path_ref.display(), "loading schema document");
        let content = std::fs::read_to_string(path_ref)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_yaml_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    /// Retrieves the qualified name of this document. Eg: `kubernetes/kubernetes-service-account@1.0.0`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}@{}", self.provider, self.schema_id, self.version)
    }

    /// the document file name as defined by the schema metadata
    pub fn document_file_name(&self) -> String {
        self.schema_id.clone() + "-" + &self.version.to_string() + "." + SCHEMA_DOC_EXT
    }

    /// Builds the catalog storage path from the provided qualified name.
    ///
    /// A storage path is structured as `{provider}/{schema_id}-{version}.yaml`,
    /// built from a qualified name holding the same data in the format
    /// `{provider}/{schema_id}@{version}`.
    pub fn path_from_qualified_name(qualified: &str) -> Result<String> {
        let parts = qualified.split('/').collect::<Vec<&str>>();

        if parts.len() != 2 {
            error!("The provided name is not a qualified schema name: {qualified}");
            return Err(Error::InvalidQualifiedName(qualified.into()));
        }

        let id_version = parts[1].split('@').collect::<Vec<&str>>();

        if id_version.len() != 2 {
            error!("The provided name is not a qualified schema name: {qualified}");
            return Err(Error::InvalidQualifiedName(qualified.into()));
        }

        Ok(format!(
            "{}/{}-{}.{SCHEMA_DOC_EXT}",
            parts[0], id_version[0], id_version[1]
        ))
    }

    /// Localized help for the given locale, falling back to English when the
    /// document does not declare the requested one.
    pub fn help_text(&self, locale: &Locale) -> Option<&str> {
        self.options
            .help
            .get(locale)
            .or_else(|| self.options.help.get(&Locale::default()))
            .map(String::as_str)
    }

    /// structural check of the document itself, not a data validation
    pub fn integrity_check(&self) -> Result<()> {
        let mut advice = String::new();

        advice.push_str(&validate_lowercase(&self.schema_id, "schema id"));
        advice.push_str(&validate_allowedchars(&self.schema_id, "schema id"));
        advice.push_str(&validate_notempty(&self.schema_id, "schema id"));
        advice.push_str(&validate_noleading_punct(&self.schema_id, "schema id"));

        advice.push_str(&validate_lowercase(&self.provider, "provider"));
        advice.push_str(&validate_allowedchars(&self.provider, "provider"));
        advice.push_str(&validate_notempty(&self.provider, "provider"));

        advice.push_str(&validate_notempty(&self.name, "display name"));

        if self.options.help.is_empty() {
            advice.push_str("help text declares no locales\n");
        }
        for (locale, text) in self.options.help.iter() {
            if text.trim().is_empty() {
                advice.push_str(&format!("help text for locale {locale} is empty\n"));
            }
        }

        if !advice.is_empty() {
            Err(Error::SchemaVerify(advice))
        } else {
            Ok(())
        }
    }
}

impl FieldSchema {
    /// no fields declared, or an object schema with no properties
    pub fn is_empty(&self) -> bool {
        match &self.schema {
            None => true,
            Some(schema) => match &schema.schema_kind {
                SchemaKind::Any(any) => any.properties.is_empty() && any.required.is_empty(),
                _ => false,
            },
        }
    }

    pub fn new<S, P, R>(properties: P, required: R) -> Self
    where
        S: Into<String>,
        P: IntoIterator<Item = (S, Type)>,
        R: IntoIterator<Item = S>,
    {
        Self::with(
            properties.into_iter().map(|(n, t)| {
                (
                    n,
                    Schema {
                        schema_data: Default::default(),
                        schema_kind: SchemaKind::Type(t),
                    },
                )
            }),
            required,
        )
    }

    pub fn with<S, P, R>(properties: P, required: R) -> Self
    where
        S: Into<String>,
        P: IntoIterator<Item = (S, Schema)>,
        R: IntoIterator<Item = S>,
    {
        let schema = Schema {
            schema_data: Default::default(),
            schema_kind: SchemaKind::Any(AnySchema {
                properties: FromIterator::from_iter(
                    properties
                        .into_iter()
                        .map(|(n, schema)| (n.into(), ReferenceOr::Item(Box::new(schema)))),
                ),
                required: required.into_iter().map(Into::into).collect(),
                ..Default::default()
            }),
        };
        Self {
            schema: Some(schema),
        }
    }
}

impl Deref for FieldSchema {
    type Target = Option<Schema>;

    fn deref(&self) -> &Self::Target {
        &self.schema
    }
}

impl From<Schema> for FieldSchema {
    fn from(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

impl Deref for HelpText {
    type Target = BTreeMap<Locale, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BTreeMap<Locale, String>> for HelpText {
    fn from(help: BTreeMap<Locale, String>) -> Self {
        Self(help)
    }
}

// this ends up mostly for any cli tools printing out the status
impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let lbl = match self {
            SchemaType::ServiceAccount => "service-account",
            SchemaType::TrustedAccount => "trusted-account",
            SchemaType::Secret => "secret",
            SchemaType::TrustingSecret => "trusting-secret",
        };
        write!(f, "{lbl}")
    }
}

pub fn validate_notempty(val: &str, name: &str) -> String {
    if val.is_empty() {
        format!("{name} is empty\n")
    } else {
        String::new()
    }
}

pub fn validate_lowercase(val: &str, name: &str) -> String {
    if val.to_lowercase() != val {
        format!("{name} {val} should be lowercase\n")
    } else {
        String::new()
    }
}

pub fn validate_allowedchars(val: &str, name: &str) -> String {
    let good_chars = val
        .chars()
        .all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-' | '_'));

    if !good_chars {
        format!("{name} {val} should be alphanumeric, '-' or '_'\n")
    } else {
        String::new()
    }
}

pub fn validate_noleading_punct(val: &str, name: &str) -> String {
    if let Some(c) = val.chars().next() {
        if matches!(c, '_' | '-') {
            return format!("{name} {val} no leading punctuation allowed '-' or '_'\n");
        }
    }
    String::new()
}

#[cfg(test)]
fn sample_help() -> SchemaOptions {
    let help = BTreeMap::from([
        ("en".parse().unwrap(), "# Help\nConnect the account.".to_string()),
        ("ko".parse().unwrap(), "# 도움말\n어카운트를 연결합니다.".to_string()),
    ]);
    SchemaOptions {
        help: HelpText::from(help),
    }
}

#[test]
fn builds_doc_path_from_qualified_name() {
    let qualified_names = vec![
        "kubernetes/kubernetes-service-account@1.0.0",
        "aws/aws-access-key@1.1.0",
        "google/google-oauth2-credentials@2.0.0",
        "azure/azure-client-secret@1.0.2",
    ];
    let doc_paths = vec![
        "kubernetes/kubernetes-service-account-1.0.0.yaml",
        "aws/aws-access-key-1.1.0.yaml",
        "google/google-oauth2-credentials-2.0.0.yaml",
        "azure/azure-client-secret-1.0.2.yaml",
    ];

    for (idx, name) in qualified_names.iter().enumerate() {
        assert_eq!(
            &ProviderSchema::path_from_qualified_name(name).unwrap(),
            doc_paths.get(idx).unwrap()
        );
    }
}

#[test]
fn rejects_unqualified_names() {
    for name in ["kubernetes-service-account", "a/b/c@1.0.0", "a/b", "a/b@1@2"] {
        assert!(ProviderSchema::path_from_qualified_name(name).is_err());
    }
}

#[test]
fn schema_qualified_name() {
    let doc = ProviderSchema {
        provider: "kubernetes".into(),
        schema_id: "kubernetes-service-account".into(),
        version: SchemaVersion::parse("1.0.0").unwrap(),
        ..ProviderSchema::default()
    };

    assert_eq!(
        "kubernetes/kubernetes-service-account@1.0.0",
        doc.qualified_name()
    );
    assert_eq!(
        "kubernetes-service-account-1.0.0.yaml",
        doc.document_file_name()
    );
}

#[test]
fn schema_integrity_check() {
    let allow = vec![
        ProviderSchema {
            schema_id: "dasher".into(),
            provider: "sleigh".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        ProviderSchema {
            schema_id: "rudolph-nose".into(),
            provider: "sleigh".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        ProviderSchema {
            schema_id: "sack_gift1".into(),
            provider: "halloween-pumpkin".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
    ];
    for doc in allow {
        let res = doc.integrity_check();
        assert!(res.is_ok(), "Denied an allowed schema document {doc:?}");
    }

    let deny = vec![
        ProviderSchema {
            schema_id: "Coal.com".into(),
            provider: "sleigh".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        ProviderSchema {
            schema_id: "tricks@eggs".into(),
            provider: "halloween".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        ProviderSchema {
            schema_id: "-leading".into(),
            provider: "halloween".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        ProviderSchema {
            schema_id: "thevoid".into(),
            provider: "".into(),
            options: sample_help(),
            ..ProviderSchema::default()
        },
        // declares no help at all
        ProviderSchema {
            schema_id: "helpless".into(),
            provider: "sleigh".into(),
            ..ProviderSchema::default()
        },
        // declares a locale with blank text
        ProviderSchema {
            schema_id: "blank-help".into(),
            provider: "sleigh".into(),
            options: SchemaOptions {
                help: HelpText::from(BTreeMap::from([(
                    "en".parse().unwrap(),
                    "   ".to_string(),
                )])),
            },
            ..ProviderSchema::default()
        },
    ];
    for doc in deny {
        let res = doc.integrity_check();
        assert!(res.is_err(), "Allowed a denied schema document {doc:?}");
    }
}

#[test]
fn help_text_falls_back_to_english() {
    let doc = ProviderSchema {
        options: sample_help(),
        ..ProviderSchema::default()
    };

    let ko = "ko".parse().unwrap();
    let jp = "jp".parse().unwrap();
    assert_eq!(
        doc.help_text(&ko).unwrap(),
        "# 도움말\n어카운트를 연결합니다."
    );
    // jp is not declared by sample_help, en text is served instead
    assert_eq!(doc.help_text(&jp).unwrap(), "# Help\nConnect the account.");
}

#[test]
fn field_schema_round_trip() {
    let doc = ProviderSchema {
        schema_id: "aws-access-key".into(),
        name: "AWS Access Key".into(),
        provider: "aws".into(),
        schema: FieldSchema::new(
            [
                ("account_id", Type::String(Default::default())),
                ("access_key_id", Type::String(Default::default())),
            ],
            ["account_id", "access_key_id"],
        ),
        options: sample_help(),
        ..ProviderSchema::default()
    };
    assert!(!doc.schema.is_empty());

    let yaml = doc.to_yaml_string().unwrap();
    let reparsed = ProviderSchema::from_yaml_str(&yaml).unwrap();

    assert_eq!(doc, reparsed);
}

#[test]
fn rejects_invalid_locale_key() {
    let input = r#"
schema_id: sample-account
name: Sample Account
schema_type: SERVICE_ACCOUNT
version: 1.0.0
provider: sample
options:
  help:
    en-US: not a valid locale key
"#;

    let res = ProviderSchema::from_yaml_str(input);
    assert!(res.is_err());
}

#[test]
fn missing_schema_key_defaults_to_empty() {
    let input = r#"
schema_id: sample-account
name: Sample Account
schema_type: TRUSTED_ACCOUNT
version: 1.2.0
provider: sample
options:
  help:
    en: some help
"#;

    let doc = ProviderSchema::from_yaml_str(input).unwrap();
    assert!(doc.schema.is_empty());
    assert_eq!(doc.schema_type, SchemaType::TrustedAccount);
}
