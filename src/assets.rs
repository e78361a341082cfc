//! Auxiliary data assets derived from the schema.
//!
//! The engine-side asset database is an external collaborator; this module
//! only defines the interface plus a plain-file implementation that writes
//! the same shapes the engine importer consumes: a metadata table with one
//! row per attribute, and an initialization effect with one override per
//! replicating attribute. Asset failures are never fatal to the primary
//! generation.

use crate::schema::AttributeSetSchema;
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Collaborator that persists auxiliary artifacts for a validated schema.
pub trait AssetSink {
    fn write_metadata_table(&self, schema: &AttributeSetSchema, path: &Path) -> Result<()>;
    fn write_init_effect(&self, schema: &AttributeSetSchema, path: &Path) -> Result<()>;
}

/// File-based sink writing importer-ready JSON next to the generated sources.
#[derive(Debug, Default)]
pub struct JsonAssetSink;

impl AssetSink for JsonAssetSink {
    fn write_metadata_table(&self, schema: &AttributeSetSchema, path: &Path) -> Result<()> {
        let rows: Vec<_> = schema
            .attributes
            .iter()
            .map(|attr| {
                json!({
                    "Name": attr.name,
                    "BaseValue": attr.default_value,
                    "MinValue": attr.min_value,
                    "MaxValue": attr.max_value,
                    "Description": attr.description,
                })
            })
            .collect();
        let payload = serde_json::to_string_pretty(&rows)?;
        fs::write(path, payload + "\n")
            .with_context(|| format!("failed to write metadata table {:?}", path))
    }

    fn write_init_effect(&self, schema: &AttributeSetSchema, path: &Path) -> Result<()> {
        let modifiers: Vec<_> = schema
            .attributes
            .iter()
            .filter(|attr| attr.replicates)
            .map(|attr| {
                json!({
                    "Attribute": format!("{}.{}", schema.class_name, attr.name),
                    "Override": attr.default_value,
                })
            })
            .collect();
        let payload = serde_json::to_string_pretty(&json!({
            "EffectName": format!("GE_{}_Init", schema.class_name),
            "Modifiers": modifiers,
        }))?;
        fs::write(path, payload + "\n")
            .with_context(|| format!("failed to write init effect {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeDefinition;
    use tempfile::TempDir;

    fn schema() -> AttributeSetSchema {
        AttributeSetSchema {
            class_name: "Vitals".to_string(),
            attributes: vec![
                AttributeDefinition {
                    name: "Health".to_string(),
                    default_value: 100.0,
                    max_value: 250.0,
                    description: "Health of the unit".to_string(),
                    ..AttributeDefinition::default()
                },
                AttributeDefinition {
                    name: "Seed".to_string(),
                    replicates: false,
                    ..AttributeDefinition::default()
                },
            ],
            ..AttributeSetSchema::default()
        }
    }

    #[test]
    fn metadata_table_has_one_row_per_attribute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VitalsMetadata.json");
        JsonAssetSink.write_metadata_table(&schema(), &path).unwrap();

        let rows: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], "Health");
        assert_eq!(rows[0]["BaseValue"], 100.0);
        assert_eq!(rows[0]["MaxValue"], 250.0);
        assert_eq!(rows[0]["Description"], "Health of the unit");
    }

    #[test]
    fn init_effect_covers_only_replicating_attributes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GE_Vitals_Init.json");
        JsonAssetSink.write_init_effect(&schema(), &path).unwrap();

        let effect: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(effect["EffectName"], "GE_Vitals_Init");
        let modifiers = effect["Modifiers"].as_array().unwrap();
        assert_eq!(modifiers.len(), 1);
        assert_eq!(modifiers[0]["Attribute"], "Vitals.Health");
        assert_eq!(modifiers[0]["Override"], 100.0);
    }
}
