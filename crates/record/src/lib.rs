//! # rfcuuid record adapters
//!
//! Glue between [`rfcuuid`] and code that stores records:
//! - [`IdentifierBehaviour`] fills an identifier attribute when a record is about to be
//!   inserted (or updated, if configured).
//! - [`UuidValidator`] checks that an attribute holds a canonical UUID string and reports a
//!   message key when it does not.
//!
//! **No persistence concerns**: records are anything implementing [`Record`]. Saving them,
//! firing lifecycle events and rendering messages for users belong to the caller.

pub mod behaviour;
pub mod validator;

use std::collections::{BTreeMap, HashMap};

pub use behaviour::{BehaviourConfig, IdentifierBehaviour, RecordEvent};
pub use validator::{UuidValidator, ValidationFailure, DEFAULT_MESSAGE};

/// Attribute access the adapters need from a record.
pub trait Record {
    /// Returns the current value of `name`, if set.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Sets `name` to `value`, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: String);
}

impl Record for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.insert(name.to_owned(), value);
    }
}

impl Record for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.insert(name.to_owned(), value);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BehaviourError {
    #[error("invalid behaviour configuration: {0}")]
    Config(String),
    #[error("record has no value for name attribute '{0}'")]
    MissingNameAttribute(String),
    #[error("uuid error: {0}")]
    Uuid(#[from] rfcuuid::UuidError),
    #[error("failed to read behaviour configuration: {0}")]
    ConfigRead(std::io::Error),
    #[error("failed to parse behaviour configuration: {0}")]
    ConfigParse(serde_yaml::Error),
}

pub type BehaviourResult<T> = std::result::Result<T, BehaviourError>;
