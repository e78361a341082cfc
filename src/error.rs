//! Error taxonomy for the generator.
//!
//! Validation and I/O problems abort generation and are returned as values;
//! per-artifact write failures and auxiliary asset failures are recorded in
//! the [`GenerationSummary`](crate::generate::GenerationSummary) instead, so
//! a partial success stays observable without becoming a hard failure.
//! Nothing is thrown past the top-level command handler.

use crate::validate::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Schema is structurally or semantically invalid. Always detected
    /// before any filesystem effect.
    #[error("schema validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Output directory could not be prepared.
    #[error("failed to prepare output location {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template rendering failed.
    #[error("template rendering failed")]
    Render(#[source] anyhow::Error),
}

impl GeneratorError {
    /// Stable category label for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Io { .. } => "io_error",
            Self::Render(_) => "render_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_and_categorize() {
        let err = GeneratorError::from(ValidationError::NoAttributes);
        assert_eq!(err.category(), "validation_error");
        assert!(err.to_string().contains("at least one attribute"));
    }
}
