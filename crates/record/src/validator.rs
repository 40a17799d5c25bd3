//! Field validation for externally supplied identifiers.
//!
//! Unlike [`rfcuuid::is_valid`], which tolerates braces, missing hyphens and uppercase, this
//! validator only accepts the canonical form checked by [`rfcuuid::is_canonical`].

use crate::Record;
use std::collections::BTreeMap;

/// Message key reported when validation fails. `{attribute}` is a placeholder.
pub const DEFAULT_MESSAGE: &str = "{attribute} is not UUID string";

/// A failed validation: a message key plus the parameters to render it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message_key: String,
    pub params: BTreeMap<String, String>,
}

impl ValidationFailure {
    /// Substitutes every `{name}` placeholder in the message key with its parameter.
    pub fn render(&self) -> String {
        self.params
            .iter()
            .fold(self.message_key.clone(), |message, (name, value)| {
                message.replace(&format!("{{{}}}", name), value)
            })
    }
}

/// Validates that a value is a canonical UUID string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UuidValidator {
    message: String,
}

impl Default for UuidValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidValidator {
    pub fn new() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }

    /// Replaces the message key reported on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validates a bare value.
    ///
    /// `None` stands for a missing or non-string value and is always invalid.
    ///
    /// # Returns
    ///
    /// `None` when the value is valid, otherwise the failure with no parameters bound.
    pub fn validate_value(&self, value: Option<&str>) -> Option<ValidationFailure> {
        match value {
            Some(v) if rfcuuid::is_canonical(v) => None,
            _ => Some(ValidationFailure {
                message_key: self.message.clone(),
                params: BTreeMap::new(),
            }),
        }
    }

    /// Validates `attribute` of `record`, binding `{attribute}` in the failure parameters.
    pub fn validate_attribute<R: Record + ?Sized>(
        &self,
        record: &R,
        attribute: &str,
    ) -> Option<ValidationFailure> {
        let mut failure = self.validate_value(record.attribute(attribute))?;
        failure
            .params
            .insert("attribute".to_owned(), attribute.to_owned());
        tracing::debug!(attribute, "attribute is not a canonical uuid");
        Some(failure)
    }
}
