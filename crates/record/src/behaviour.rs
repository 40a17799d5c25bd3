//! Identifier assignment on record lifecycle events.
//!
//! An [`IdentifierBehaviour`] is built once from a [`BehaviourConfig`] and then asked to
//! [`handle`](IdentifierBehaviour::handle) lifecycle events. Configuration is validated at
//! construction so that a misconfigured name-based behaviour fails at startup rather than on
//! the first insert.
//!
//! Example configuration (YAML):
//!
//! ```yaml
//! attribute: id
//! version: v5
//! namespace: dns
//! name_attribute: email
//! events: [before_insert]
//! ```

use crate::{BehaviourError, BehaviourResult, Record};
use rfcuuid::namespace::resolve_alias;
use rfcuuid::{is_valid, CanonicalUuid, UuidVersion};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribute that receives the identifier when none is configured.
pub const DEFAULT_ATTRIBUTE: &str = "id";

/// A point in a record's lifecycle at which the behaviour may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordEvent {
    BeforeInsert,
    BeforeUpdate,
}

/// Configuration for [`IdentifierBehaviour`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviourConfig {
    /// Attribute the generated identifier is written to.
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Generation algorithm.
    #[serde(default)]
    pub version: UuidVersion,
    /// Namespace UUID (or alias such as `dns`) for v3/v5.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Attribute whose value is used as the name for v3/v5.
    #[serde(default)]
    pub name_attribute: Option<String>,
    /// Events that trigger assignment.
    #[serde(default = "default_events")]
    pub events: Vec<RecordEvent>,
}

fn default_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_owned()
}

fn default_events() -> Vec<RecordEvent> {
    vec![RecordEvent::BeforeInsert]
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            version: UuidVersion::V4,
            namespace: None,
            name_attribute: None,
            events: default_events(),
        }
    }
}

/// Where identifiers come from, resolved from configuration.
#[derive(Clone, Debug)]
enum Source {
    Random,
    Named {
        version: UuidVersion,
        namespace: String,
        name_attribute: String,
    },
}

/// Assigns a UUID to a record attribute on configured lifecycle events.
#[derive(Clone, Debug)]
pub struct IdentifierBehaviour {
    attribute: String,
    events: Vec<RecordEvent>,
    source: Source,
}

impl IdentifierBehaviour {
    /// Validates `config` and builds the behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::Config`] if:
    /// - `attribute` is empty or `events` is empty
    /// - a v3/v5 configuration is missing `namespace` or `name_attribute`
    /// - the namespace is neither a known alias nor a valid UUID
    pub fn new(config: BehaviourConfig) -> BehaviourResult<Self> {
        if config.attribute.trim().is_empty() {
            return Err(BehaviourError::Config("attribute cannot be empty".into()));
        }

        if config.events.is_empty() {
            return Err(BehaviourError::Config(
                "at least one event must be configured".into(),
            ));
        }

        let namespace = config
            .namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty());
        let name_attribute = config
            .name_attribute
            .as_deref()
            .map(str::trim)
            .filter(|attr| !attr.is_empty());

        let source = match config.version {
            UuidVersion::V4 => {
                if namespace.is_some() || name_attribute.is_some() {
                    tracing::warn!(
                        attribute = %config.attribute,
                        "namespace and name_attribute are ignored for v4 identifiers"
                    );
                }
                Source::Random
            }
            version @ (UuidVersion::V3 | UuidVersion::V5) => {
                let (namespace, name_attribute) =
                    namespace.zip(name_attribute).ok_or_else(|| {
                        BehaviourError::Config(format!(
                            "fields \"namespace\" and \"name_attribute\" must be set for {}",
                            version
                        ))
                    })?;

                let namespace = resolve_alias(namespace);
                if !is_valid(namespace) {
                    return Err(BehaviourError::Config(format!(
                        "namespace '{}' is not a valid UUID",
                        namespace
                    )));
                }

                Source::Named {
                    version,
                    namespace: CanonicalUuid::parse(namespace)?.to_string(),
                    name_attribute: name_attribute.to_owned(),
                }
            }
        };

        Ok(Self {
            attribute: config.attribute,
            events: config.events,
            source,
        })
    }

    /// Parses a YAML [`BehaviourConfig`] and builds the behaviour.
    pub fn from_yaml_str(yaml: &str) -> BehaviourResult<Self> {
        let config: BehaviourConfig =
            serde_yaml::from_str(yaml).map_err(BehaviourError::ConfigParse)?;
        Self::new(config)
    }

    /// Reads a YAML [`BehaviourConfig`] from `path` and builds the behaviour.
    pub fn from_yaml_file(path: &Path) -> BehaviourResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(BehaviourError::ConfigRead)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn version(&self) -> UuidVersion {
        match &self.source {
            Source::Random => UuidVersion::V4,
            Source::Named { version, .. } => *version,
        }
    }

    /// Returns true if the behaviour runs on `event`.
    pub fn handles(&self, event: RecordEvent) -> bool {
        self.events.contains(&event)
    }

    /// Computes the identifier for `record` without assigning it.
    ///
    /// # Errors
    ///
    /// - [`BehaviourError::MissingNameAttribute`] if a name-based behaviour finds no value for
    ///   its name attribute.
    /// - [`BehaviourError::Uuid`] if generation fails.
    pub fn value_for<R: Record + ?Sized>(&self, record: &R) -> BehaviourResult<String> {
        match &self.source {
            Source::Random => Ok(rfcuuid::v4()?),
            Source::Named {
                version,
                namespace,
                name_attribute,
            } => {
                let name = record
                    .attribute(name_attribute)
                    .ok_or_else(|| BehaviourError::MissingNameAttribute(name_attribute.clone()))?;
                Ok(version.generate(Some(namespace.as_str()), Some(name))?)
            }
        }
    }

    /// Runs the behaviour for `event`.
    ///
    /// Returns the assigned identifier, or `None` if the behaviour is not configured for
    /// `event` (the record is left untouched).
    pub fn handle<R: Record + ?Sized>(
        &self,
        event: RecordEvent,
        record: &mut R,
    ) -> BehaviourResult<Option<String>> {
        if !self.handles(event) {
            return Ok(None);
        }

        let value = self.value_for(record)?;
        tracing::debug!(
            attribute = %self.attribute,
            version = %self.version(),
            ?event,
            "assigned identifier"
        );
        record.set_attribute(&self.attribute, value.clone());
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfcuuid::{is_canonical, NAMESPACE_DNS};
    use std::collections::HashMap;
    use std::io::Write;

    fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn named_config(version: UuidVersion) -> BehaviourConfig {
        BehaviourConfig {
            version,
            namespace: Some(NAMESPACE_DNS.into()),
            name_attribute: Some("domain".into()),
            ..BehaviourConfig::default()
        }
    }

    #[test]
    fn test_default_assigns_v4_before_insert() {
        let behaviour = IdentifierBehaviour::new(BehaviourConfig::default()).unwrap();
        let mut rec = record(&[("title", "hello")]);

        let assigned = behaviour
            .handle(RecordEvent::BeforeInsert, &mut rec)
            .unwrap()
            .unwrap();

        assert!(is_canonical(&assigned));
        assert_eq!(rec.get("id"), Some(&assigned));
        assert_eq!(assigned.as_bytes()[14], b'4');
    }

    #[test]
    fn test_unconfigured_event_leaves_record_untouched() {
        let behaviour = IdentifierBehaviour::new(BehaviourConfig::default()).unwrap();
        let mut rec = record(&[("id", "keep-me")]);

        let result = behaviour.handle(RecordEvent::BeforeUpdate, &mut rec).unwrap();

        assert_eq!(result, None);
        assert_eq!(rec.get("id").map(String::as_str), Some("keep-me"));
    }

    #[test]
    fn test_v5_derives_from_name_attribute_value() {
        let behaviour = IdentifierBehaviour::new(named_config(UuidVersion::V5)).unwrap();
        let mut rec = record(&[("domain", "example.com")]);

        behaviour.handle(RecordEvent::BeforeInsert, &mut rec).unwrap();

        assert_eq!(
            rec.get("id").map(String::as_str),
            Some("cfbff0d1-9375-5685-968c-48ce8b15ae17")
        );
    }

    #[test]
    fn test_v3_derives_from_name_attribute_value() {
        let behaviour = IdentifierBehaviour::new(named_config(UuidVersion::V3)).unwrap();
        let rec = record(&[("domain", "example.com")]);

        assert_eq!(
            behaviour.value_for(&rec).unwrap(),
            "9073926b-929f-31c2-abc9-fad77ae3e8eb"
        );
    }

    #[test]
    fn test_name_based_is_stable_across_records() {
        let behaviour = IdentifierBehaviour::new(named_config(UuidVersion::V5)).unwrap();

        let a = behaviour.value_for(&record(&[("domain", "a.example")])).unwrap();
        let b = behaviour.value_for(&record(&[("domain", "a.example")])).unwrap();
        let c = behaviour.value_for(&record(&[("domain", "b.example")])).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_missing_name_attribute_value() {
        let behaviour = IdentifierBehaviour::new(named_config(UuidVersion::V5)).unwrap();
        let mut rec = record(&[]);

        let result = behaviour.handle(RecordEvent::BeforeInsert, &mut rec);

        match result {
            Err(BehaviourError::MissingNameAttribute(attr)) => assert_eq!(attr, "domain"),
            _ => panic!("Expected MissingNameAttribute error"),
        }
        assert!(rec.is_empty());
    }

    #[test]
    fn test_name_based_requires_namespace_and_name_attribute() {
        let configs = [
            BehaviourConfig {
                namespace: None,
                ..named_config(UuidVersion::V3)
            },
            BehaviourConfig {
                name_attribute: Some("  ".into()),
                ..named_config(UuidVersion::V5)
            },
        ];

        for config in configs {
            match IdentifierBehaviour::new(config) {
                Err(BehaviourError::Config(msg)) => {
                    assert!(msg.contains("\"namespace\" and \"name_attribute\" must be set"));
                }
                _ => panic!("Expected Config error"),
            }
        }
    }

    #[test]
    fn test_rejects_invalid_namespace() {
        let config = BehaviourConfig {
            namespace: Some("not-a-uuid".into()),
            ..named_config(UuidVersion::V5)
        };

        match IdentifierBehaviour::new(config) {
            Err(BehaviourError::Config(msg)) => assert!(msg.contains("not a valid UUID")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_rejects_empty_attribute_and_events() {
        let no_attribute = BehaviourConfig {
            attribute: " ".into(),
            ..BehaviourConfig::default()
        };
        let no_events = BehaviourConfig {
            events: Vec::new(),
            ..BehaviourConfig::default()
        };

        assert!(matches!(
            IdentifierBehaviour::new(no_attribute),
            Err(BehaviourError::Config(_))
        ));
        assert!(matches!(
            IdentifierBehaviour::new(no_events),
            Err(BehaviourError::Config(_))
        ));
    }

    #[test]
    fn test_namespace_alias_and_braces_are_normalised() {
        let aliased = IdentifierBehaviour::new(BehaviourConfig {
            namespace: Some("DNS".into()),
            ..named_config(UuidVersion::V5)
        })
        .unwrap();
        let braced = IdentifierBehaviour::new(BehaviourConfig {
            namespace: Some("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}".into()),
            ..named_config(UuidVersion::V5)
        })
        .unwrap();
        let rec = record(&[("domain", "example.com")]);

        assert_eq!(
            aliased.value_for(&rec).unwrap(),
            braced.value_for(&rec).unwrap()
        );
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
attribute: uuid
version: v5
namespace: dns
name_attribute: domain
events: [before_insert, before_update]
"#;
        let behaviour = IdentifierBehaviour::from_yaml_str(yaml).unwrap();
        let mut rec = record(&[("domain", "example.com")]);

        assert_eq!(behaviour.attribute(), "uuid");
        assert_eq!(behaviour.version(), UuidVersion::V5);
        assert!(behaviour.handles(RecordEvent::BeforeUpdate));

        behaviour.handle(RecordEvent::BeforeUpdate, &mut rec).unwrap();
        assert_eq!(
            rec.get("uuid").map(String::as_str),
            Some("cfbff0d1-9375-5685-968c-48ce8b15ae17")
        );
    }

    #[test]
    fn test_from_yaml_str_defaults() {
        let behaviour = IdentifierBehaviour::from_yaml_str("{}").unwrap();

        assert_eq!(behaviour.attribute(), DEFAULT_ATTRIBUTE);
        assert_eq!(behaviour.version(), UuidVersion::V4);
        assert!(behaviour.handles(RecordEvent::BeforeInsert));
        assert!(!behaviour.handles(RecordEvent::BeforeUpdate));
    }

    #[test]
    fn test_from_yaml_str_rejects_unknown_version() {
        let result = IdentifierBehaviour::from_yaml_str("version: v1");

        assert!(matches!(result, Err(BehaviourError::ConfigParse(_))));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version: v3").unwrap();
        writeln!(file, "namespace: {}", NAMESPACE_DNS).unwrap();
        writeln!(file, "name_attribute: domain").unwrap();

        let behaviour = IdentifierBehaviour::from_yaml_file(file.path()).unwrap();

        assert_eq!(behaviour.version(), UuidVersion::V3);
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = IdentifierBehaviour::from_yaml_file(&dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(BehaviourError::ConfigRead(_))));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = named_config(UuidVersion::V3);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"version\":\"v3\""));

        let back: BehaviourConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
