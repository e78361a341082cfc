//! Attribute-set schema model and file loading.
//!
//! Field names in serialized form follow the original schema files
//! (`AttributeSetClassName`, `bReplicates`, ...). Unset fields fall back to
//! the documented defaults, so a minimal schema only needs a class name and
//! attribute names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumString};

/// Supported attribute kinds. Unsupported kind strings are rejected by the
/// validator, not by deserialization, so error reporting stays in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum AttributeKind {
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "int32")]
    Int32,
}

/// Replication condition passed to the registration macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum RepCondition {
    #[default]
    #[strum(serialize = "COND_None")]
    None,
    #[strum(serialize = "COND_InitialOnly")]
    InitialOnly,
    #[strum(serialize = "COND_OwnerOnly")]
    OwnerOnly,
    #[strum(serialize = "COND_SkipOwner")]
    SkipOwner,
    #[strum(serialize = "COND_SimulatedOnly")]
    SimulatedOnly,
    #[strum(serialize = "COND_AutonomousOnly")]
    AutonomousOnly,
}

/// Notification policy passed to the registration macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum RepNotifyPolicy {
    #[default]
    #[strum(serialize = "REPNOTIFY_Always")]
    Always,
    #[strum(serialize = "REPNOTIFY_OnChanged")]
    OnChanged,
}

/// One named, typed attribute with replication and validation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AttributeDefinition {
    /// Attribute name; must be a legal identifier unique within the schema.
    #[serde(rename = "AttributeName")]
    pub name: String,

    /// Kind string; must name an [`AttributeKind`] ("float" or "int32").
    #[serde(rename = "AttributeType")]
    pub kind: String,

    /// Base/current value set by the generated constructor.
    pub default_value: f64,

    /// Minimum allowed value. Informational at this layer; no
    /// min <= default <= max invariant is enforced here.
    pub min_value: f64,

    /// Maximum allowed value. Informational at this layer.
    pub max_value: f64,

    /// Whether the attribute is network-synchronized.
    #[serde(rename = "bReplicates")]
    pub replicates: bool,

    /// Whether a change-notification hook is generated. Meaningful only when
    /// `replicates` is true.
    #[serde(rename = "bRepNotify")]
    pub rep_notify: bool,

    /// Replication condition for the registration statement.
    #[serde(rename = "ReplicationCondition")]
    pub condition: RepCondition,

    /// Notification policy for the registration statement.
    #[serde(rename = "RepNotifyPolicy")]
    pub notify_policy: RepNotifyPolicy,

    /// Free text used only for generated comments and metadata rows.
    pub description: String,
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: "float".to_string(),
            default_value: 0.0,
            min_value: 0.0,
            max_value: 100.0,
            replicates: true,
            rep_notify: true,
            condition: RepCondition::default(),
            notify_policy: RepNotifyPolicy::default(),
            description: String::new(),
        }
    }
}

/// Declarative description of one attribute set to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AttributeSetSchema {
    /// Base name of the generated class and its source files.
    #[serde(rename = "AttributeSetClassName")]
    pub class_name: String,

    /// Module the sources are generated into (path composition only).
    pub target_module: String,

    /// Directory relative to the module (path composition only).
    pub target_directory: String,

    /// Ordered attribute list; order determines declaration order in the
    /// generated text. Must contain at least one entry.
    pub attributes: Vec<AttributeDefinition>,

    /// Whether to create the metadata lookup table asset.
    #[serde(rename = "bGenerateMetadataTable")]
    pub generate_metadata_table: bool,

    /// Whether to create the initialization effect asset.
    #[serde(rename = "bGenerateInitGameplayEffect")]
    pub generate_init_effect: bool,

    /// Free text used only for the generated class comment.
    pub description: String,
}

impl Default for AttributeSetSchema {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            target_module: "GasXRuntime".to_string(),
            target_directory: "Public/Attributes".to_string(),
            attributes: Vec::new(),
            generate_metadata_table: true,
            generate_init_effect: true,
            description: String::new(),
        }
    }
}

impl AttributeSetSchema {
    /// Load a schema from a JSON or YAML file, dispatching on the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file {:?}", path))?;
        let ext = path
            .extension()
            .and_then(|os| os.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let schema = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("failed to parse YAML schema {:?}", path))?,
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON schema {:?}", path))?,
            other => anyhow::bail!("unsupported schema extension: {other}"),
        };
        Ok(schema)
    }
}
