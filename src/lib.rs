//! attrgen — schema-driven attribute set source generator.
//!
//! Given a declarative schema of named, typed attributes with replication
//! metadata, attrgen renders a declaration file and a definition file for an
//! attribute set class, and regenerates them without destroying hand-written
//! code: only the marker-delimited guarded regions are machine-owned, and
//! the merge engine replaces exactly those.
//!
//! Data flows one way: schema file → validated [`AttributeSetSchema`] →
//! rendered text → extracted regions → merged text → persisted artifact.
//! Each run is single-threaded and short-lived; the filesystem is the only
//! state that survives an invocation, and concurrent runs against the same
//! output paths are not coordinated.

pub mod assets;
pub mod config;
pub mod error;
pub mod generate;
pub mod ident;
pub mod logging;
pub mod region;
pub mod render;
pub mod schema;
pub mod validate;

pub use config::{CliArgs, GeneratorConfig};
pub use error::GeneratorError;
pub use generate::{GenerationSummary, Generator, output_paths};
pub use ident::{KeywordTable, is_valid_identifier};
pub use logging::{LoggingConfig, init_logging};
pub use region::{GuardedRegion, MergeOutcome, extract_regions, merge};
pub use render::{RenderedArtifacts, render};
pub use schema::{AttributeDefinition, AttributeSetSchema};
pub use validate::{ValidationError, validate};

use anyhow::{Context, Result};

/// Run one generation from a resolved configuration: load the schema,
/// compose the output paths and drive the [`Generator`].
pub fn run(config: GeneratorConfig) -> Result<GenerationSummary> {
    let schema = AttributeSetSchema::load(&config.schema_path)
        .with_context(|| format!("failed to load schema {:?}", config.schema_path))?;

    let (declaration_path, definition_path) = output_paths(&config.output_root, &schema);

    let mut generator = Generator::new().with_keywords(config.keywords.clone());
    if config.skip_assets {
        generator = generator.without_assets();
    }

    let summary = generator.generate(&schema, &declaration_path, &definition_path)?;
    Ok(summary)
}
