//! Offline registry commands: `resources`, `data-sources`, `schema`.

use serde::Serialize;
use tabled::Tabled;

use fortios_core::{DataSourceDef, Provider, ResourceDef};

use crate::cli::{GlobalOpts, SchemaArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TypeInfo {
    name: String,
    kind: String,
    api_path: String,
    mkey: Option<String>,
    description: String,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "API path")]
    api_path: String,
    #[tabled(rename = "Key")]
    mkey: String,
}

fn row(t: &TypeInfo) -> TypeRow {
    TypeRow {
        name: t.name.clone(),
        kind: t.kind.clone(),
        api_path: t.api_path.clone(),
        mkey: t.mkey.clone().unwrap_or_else(|| "-".into()),
    }
}

fn api_path(def: &ResourceDef) -> String {
    format!("cmdb/{}/{}", def.path, def.name)
}

fn resource_info(def: &ResourceDef) -> TypeInfo {
    TypeInfo {
        name: def.terraform_name(),
        kind: if def.is_singleton() { "singleton" } else { "table" }.into(),
        api_path: api_path(def),
        mkey: def.mkey.map(|key| format!("{} ({})", key.attribute, key.kind)),
        description: def.description.into(),
    }
}

fn data_source_info(ds: &DataSourceDef) -> TypeInfo {
    TypeInfo {
        name: ds.terraform_name(),
        kind: ds.kind.to_string(),
        api_path: api_path(ds.resource),
        mkey: ds.resource.mkey.map(|key| key.attribute.to_owned()),
        description: ds.resource.description.into(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn resources(global: &GlobalOpts) -> Result<(), CliError> {
    let infos: Vec<TypeInfo> = Provider::resources()
        .iter()
        .copied()
        .map(resource_info)
        .collect();
    let out = output::render_list(global.output, &infos, row, |t| t.name.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn data_sources(global: &GlobalOpts) -> Result<(), CliError> {
    let infos: Vec<TypeInfo> = Provider::data_sources()
        .iter()
        .map(data_source_info)
        .collect();
    let out = output::render_list(global.output, &infos, row, |t| t.name.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Schemas are JSON documents; table and plain output print them as
/// pretty JSON.
pub fn schema(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let doc = match (&args.type_name, args.data_source) {
        (None, _) => Provider::schema_document(),
        (Some(name), false) => Provider::resource_def(name)?.schema_json(),
        (Some(name), true) => Provider::data_source_def(name)?.schema_json(),
    };
    let pretty = |v: &serde_json::Value| serde_json::to_string_pretty(v).unwrap_or_default();
    let out = output::render_single(global.output, &doc, pretty, pretty);
    output::print_output(&out, global.quiet);
    Ok(())
}
