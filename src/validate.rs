//! Structural and naming validation of an attribute-set schema.
//!
//! Checks run in a fixed order and short-circuit on the first failure, so
//! error messages are deterministic and testable. Validation performs no I/O
//! and always runs before any filesystem effect.

use crate::ident::{KeywordTable, is_valid_identifier};
use crate::schema::{AttributeKind, AttributeSetSchema};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// A schema rule violation. The message carries the offending value; this is
/// the only externally observable failure of this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("attribute set class name must not be empty")]
    EmptyClassName,

    #[error("attribute set class name '{0}' is not a valid identifier")]
    InvalidClassName(String),

    #[error("schema must declare at least one attribute")]
    NoAttributes,

    #[error("attribute #{index} has an empty name")]
    EmptyAttributeName { index: usize },

    #[error("duplicate attribute name '{name}' (names are compared case-insensitively)")]
    DuplicateAttributeName { name: String },

    #[error("attribute name '{name}' is not a valid identifier")]
    InvalidAttributeName { name: String },

    #[error("attribute name '{name}' is a reserved keyword of the target language")]
    ReservedKeyword { name: String },

    #[error("attribute '{name}' has unsupported kind '{kind}' (supported: float, int32)")]
    UnsupportedKind { name: String, kind: String },
}

/// Validate `schema` against the structural and naming rules.
pub fn validate(schema: &AttributeSetSchema, keywords: &KeywordTable) -> Result<(), ValidationError> {
    if schema.class_name.is_empty() {
        return Err(ValidationError::EmptyClassName);
    }
    if !is_valid_identifier(&schema.class_name) {
        return Err(ValidationError::InvalidClassName(schema.class_name.clone()));
    }
    if schema.attributes.is_empty() {
        return Err(ValidationError::NoAttributes);
    }

    // Lower-cased names recorded as each attribute is checked.
    let mut seen = HashSet::new();
    for (index, attr) in schema.attributes.iter().enumerate() {
        if attr.name.is_empty() {
            return Err(ValidationError::EmptyAttributeName { index });
        }
        if !seen.insert(attr.name.to_ascii_lowercase()) {
            return Err(ValidationError::DuplicateAttributeName {
                name: attr.name.clone(),
            });
        }
        if !is_valid_identifier(&attr.name) {
            return Err(ValidationError::InvalidAttributeName {
                name: attr.name.clone(),
            });
        }
        if keywords.contains(&attr.name) {
            return Err(ValidationError::ReservedKeyword {
                name: attr.name.clone(),
            });
        }
        if AttributeKind::from_str(&attr.kind).is_err() {
            return Err(ValidationError::UnsupportedKind {
                name: attr.name.clone(),
                kind: attr.kind.clone(),
            });
        }
    }

    Ok(())
}
