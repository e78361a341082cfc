//! Command-line and file-based configuration.
//!
//! CLI flags win over config-file values, which win over defaults. The core
//! command surface is a single schema path; everything else is optional.

use crate::ident::KeywordTable;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "attrgen",
    about = "Schema-driven attribute set source generator",
    version
)]
pub struct CliArgs {
    #[arg(
        value_name = "SCHEMA",
        help = "Path to the attribute set schema (JSON or YAML)"
    )]
    pub schema: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "ATTRGEN_OUTPUT_ROOT",
        value_name = "DIR",
        help = "Root directory the module/directory output paths are composed under"
    )]
    pub output_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Skip auxiliary asset creation even when the schema requests it"
    )]
    pub skip_assets: bool,
}

/// Fully resolved configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub schema_path: PathBuf,
    pub output_root: PathBuf,
    pub skip_assets: bool,
    pub keywords: KeywordTable,
}

impl GeneratorConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            schema,
            config,
            output_root: cli_output_root,
            skip_assets: cli_skip_assets,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let output_root = cli_output_root
            .or(file_config.output_root)
            .unwrap_or_else(|| PathBuf::from("."));

        let keywords = match file_config.reserved_keywords {
            Some(words) => {
                anyhow::ensure!(
                    !words.is_empty(),
                    "reserved_keywords must not be an empty list"
                );
                KeywordTable::new(words)
            }
            None => KeywordTable::cpp(),
        };

        anyhow::ensure!(schema.exists(), "schema file {:?} does not exist", schema);
        anyhow::ensure!(schema.is_file(), "schema path {:?} is not a file", schema);

        Ok(Self {
            schema_path: schema,
            output_root,
            skip_assets: cli_skip_assets || file_config.skip_assets.unwrap_or(false),
            keywords,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    output_root: Option<PathBuf>,
    skip_assets: Option<bool>,
    /// Replaces the built-in C++ table when set, retargeting validation to a
    /// different output language.
    reserved_keywords: Option<Vec<String>>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
