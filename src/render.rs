//! Deterministic rendering of the attribute set declaration and definition.
//!
//! The fixed prologues and file skeletons live in raw tera templates; the
//! per-attribute fragments are assembled in Rust and injected as complete
//! guarded-region blocks. The templates contain no control flow, so repeated
//! rendering of an unchanged schema is byte-identical — that property is the
//! regeneration idempotence contract and the merge engine depends on it.

use crate::region::{REGION_BEGIN, REGION_END};
use crate::schema::{AttributeDefinition, AttributeSetSchema};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tera::Tera;

/// Stable region names. Renaming any of these breaks merging against files
/// generated by earlier releases.
pub const PROPERTIES_REGION: &str = "Attribute Properties";
pub const ACCESSORS_REGION: &str = "Attribute Accessors";
pub const ONREP_DECL_REGION: &str = "OnRep Functions";
pub const CONSTRUCTOR_REGION: &str = "Constructor Initialization";
pub const ONREP_IMPL_REGION: &str = "OnRep Implementations";
pub const REPLICATION_REGION: &str = "Replication Setup";

const HEADER_TEMPLATE: &str = r#"// Copyright Epic Games, Inc.

#pragma once

#include "CoreMinimal.h"
#include "AttributeSet.h"
#include "AbilitySystemComponent.h"
#include "{{ class_name }}.generated.h"

#define ATTRIBUTE_ACCESSORS(ClassName, PropertyName) \
	GAMEPLAYATTRIBUTE_PROPERTY_GETTER(ClassName, PropertyName) \
	GAMEPLAYATTRIBUTE_VALUE_GETTER(PropertyName) \
	GAMEPLAYATTRIBUTE_VALUE_SETTER(PropertyName) \
	GAMEPLAYATTRIBUTE_VALUE_INITTER(PropertyName)

{{ class_comment }}UCLASS()
class U{{ class_name }} : public UAttributeSet
{
	GENERATED_BODY()

public:
	U{{ class_name }}();

{{ properties_region }}

{{ accessors_region }}

{{ onrep_region }}

	virtual void GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const override;
};
"#;

const SOURCE_TEMPLATE: &str = r#"// Copyright Epic Games, Inc.

#include "{{ class_name }}.h"

#include "Net/UnrealNetwork.h"

{{ constructor_region }}

{{ onrep_region }}

{{ replication_region }}
"#;

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template("attribute_set.h", HEADER_TEMPLATE)
        .expect("declaration template parses");
    tera.add_raw_template("attribute_set.cpp", SOURCE_TEMPLATE)
        .expect("definition template parses");
    tera
});

/// The two rendered text artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub declaration: String,
    pub definition: String,
}

/// Render `schema` into declaration and definition text. Pure: no I/O, no
/// clock, no randomness.
pub fn render(schema: &AttributeSetSchema) -> Result<RenderedArtifacts> {
    let mut ctx = tera::Context::new();
    ctx.insert("class_name", &schema.class_name);
    ctx.insert("class_comment", &class_comment(schema));
    ctx.insert(
        "properties_region",
        &wrap_region(PROPERTIES_REGION, &properties_block(schema)),
    );
    ctx.insert(
        "accessors_region",
        &wrap_region(ACCESSORS_REGION, &accessors_block(schema)),
    );
    ctx.insert(
        "onrep_region",
        &wrap_region(ONREP_DECL_REGION, &onrep_declarations_block(schema)),
    );

    let declaration = TEMPLATES
        .render("attribute_set.h", &ctx)
        .context("failed to render declaration template")?;

    let mut ctx = tera::Context::new();
    ctx.insert("class_name", &schema.class_name);
    ctx.insert(
        "constructor_region",
        &wrap_region(CONSTRUCTOR_REGION, &constructor_block(schema)),
    );
    ctx.insert(
        "onrep_region",
        &wrap_region(ONREP_IMPL_REGION, &onrep_implementations_block(schema)),
    );
    ctx.insert(
        "replication_region",
        &wrap_region(REPLICATION_REGION, &replication_block(schema)),
    );

    let definition = TEMPLATES
        .render("attribute_set.cpp", &ctx)
        .context("failed to render definition template")?;

    Ok(RenderedArtifacts {
        declaration,
        definition,
    })
}

/// Fixed numeric formatting for generated literals: exactly two fractional
/// digits plus the `f` suffix, regardless of magnitude.
fn format_value(value: f64) -> String {
    format!("{value:.2}f")
}

fn wrap_region(name: &str, body: &str) -> String {
    format!("{REGION_BEGIN}{name}\n{body}{REGION_END}{name}")
}

fn notifies(attr: &AttributeDefinition) -> bool {
    attr.replicates && attr.rep_notify
}

fn class_comment(schema: &AttributeSetSchema) -> String {
    if schema.description.is_empty() {
        String::new()
    } else {
        format!("/**\n * {}\n */\n", schema.description)
    }
}

fn properties_block(schema: &AttributeSetSchema) -> String {
    let mut block = String::new();
    for (index, attr) in schema.attributes.iter().enumerate() {
        if index > 0 {
            block.push('\n');
        }
        if !attr.description.is_empty() {
            block.push_str(&format!("\t/** {} */\n", attr.description));
        }
        if notifies(attr) {
            block.push_str(&format!(
                "\tUPROPERTY(BlueprintReadOnly, Category = \"Attributes\", ReplicatedUsing = OnRep_{})\n",
                attr.name
            ));
        } else if attr.replicates {
            block.push_str("\tUPROPERTY(BlueprintReadOnly, Category = \"Attributes\", Replicated)\n");
        } else {
            block.push_str("\tUPROPERTY(BlueprintReadOnly, Category = \"Attributes\")\n");
        }
        block.push_str(&format!("\tFGameplayAttributeData {};\n", attr.name));
    }
    block
}

fn accessors_block(schema: &AttributeSetSchema) -> String {
    let mut block = String::new();
    for attr in &schema.attributes {
        block.push_str(&format!(
            "\tATTRIBUTE_ACCESSORS(U{}, {});\n",
            schema.class_name, attr.name
        ));
    }
    block
}

// Emitted even when empty so the region keeps existing on disk; merge never
// inserts region kinds that are missing from a previously generated file.
fn onrep_declarations_block(schema: &AttributeSetSchema) -> String {
    let mut block = String::new();
    for attr in schema.attributes.iter().filter(|attr| notifies(attr)) {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str("\tUFUNCTION()\n");
        block.push_str(&format!(
            "\tvoid OnRep_{}(const FGameplayAttributeData& OldValue);\n",
            attr.name
        ));
    }
    block
}

fn constructor_block(schema: &AttributeSetSchema) -> String {
    let class = &schema.class_name;
    let mut block = format!("U{class}::U{class}()\n{{\n");
    for attr in &schema.attributes {
        let value = format_value(attr.default_value);
        block.push_str(&format!("\t{}.SetBaseValue({value});\n", attr.name));
        block.push_str(&format!("\t{}.SetCurrentValue({value});\n", attr.name));
    }
    block.push_str("}\n");
    block
}

fn onrep_implementations_block(schema: &AttributeSetSchema) -> String {
    let class = &schema.class_name;
    let mut block = String::new();
    for attr in schema.attributes.iter().filter(|attr| notifies(attr)) {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str(&format!(
            "void U{class}::OnRep_{}(const FGameplayAttributeData& OldValue)\n",
            attr.name
        ));
        block.push_str("{\n");
        block.push_str(&format!(
            "\tGAMEPLAYATTRIBUTE_REPNOTIFY(U{class}, {}, OldValue);\n",
            attr.name
        ));
        block.push_str("}\n");
    }
    block
}

fn replication_block(schema: &AttributeSetSchema) -> String {
    let class = &schema.class_name;
    let mut block = format!(
        "void U{class}::GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const\n{{\n\tSuper::GetLifetimeReplicatedProps(OutLifetimeProps);\n"
    );
    let replicating: Vec<_> = schema
        .attributes
        .iter()
        .filter(|attr| attr.replicates)
        .collect();
    if !replicating.is_empty() {
        block.push('\n');
        for attr in replicating {
            block.push_str(&format!(
                "\tDOREPLIFETIME_CONDITION_NOTIFY(U{class}, {}, {}, {});\n",
                attr.name, attr.condition, attr.notify_policy
            ));
        }
    }
    block.push_str("}\n");
    block
}
