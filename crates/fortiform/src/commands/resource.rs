//! Resource lifecycle handlers: create, read, update, delete, import.

use serde_json::{Map, Value};

use fortios_core::{Provider, ResourceData};

use crate::cli::{CreateArgs, GlobalOpts, ImportArgs, ObjectArgs, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn not_found(type_name: &str, id: &str) -> CliError {
    CliError::NotFound {
        message: format!("{type_name} '{id}' not found"),
    }
}

fn print_state(data: &ResourceData, global: &GlobalOpts) {
    let color = output::should_color(global.color);
    let out = output::render_state(global.output, &data.to_state(), color);
    output::print_output(&out, global.quiet);
}

fn with_id(id: &str, values: Map<String, Value>) -> Value {
    let mut state = Map::with_capacity(values.len() + 1);
    state.insert("id".into(), Value::String(id.to_owned()));
    state.extend(values);
    Value::Object(state)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn create(
    provider: &Provider,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config = util::read_json_object(&args.from_file)?;
    let data = provider.create(&args.type_name, config).await?;

    let color = output::should_color(global.color);
    output::print_success(
        &format!("Created {} '{}'", args.type_name, data.id()),
        global.quiet,
        color,
    );
    print_state(&data, global);
    Ok(())
}

/// Reads every nested table so the output is the full object.
pub async fn read(
    provider: &Provider,
    args: ObjectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let state = provider
        .current_state(&args.type_name, &args.id)
        .await?
        .ok_or_else(|| not_found(&args.type_name, &args.id))?;

    let color = output::should_color(global.color);
    let out = output::render_state(global.output, &with_id(&args.id, state), color);
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The live object serves as the prior state, so attributes dropped from
/// the file are cleared on the FortiGate.
pub async fn update(
    provider: &Provider,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config = util::read_json_object(&args.from_file)?;
    let prior = provider
        .current_state(&args.type_name, &args.id)
        .await?
        .ok_or_else(|| not_found(&args.type_name, &args.id))?;

    let data = provider
        .update(&args.type_name, &args.id, config, prior)
        .await?;

    let color = output::should_color(global.color);
    let message = if data.id() == args.id {
        format!("Updated {} '{}'", args.type_name, data.id())
    } else {
        format!(
            "Replaced {} '{}' with '{}'",
            args.type_name,
            args.id,
            data.id()
        )
    };
    output::print_success(&message, global.quiet, color);
    print_state(&data, global);
    Ok(())
}

pub async fn delete(
    provider: &Provider,
    args: ObjectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let def = Provider::resource_def(&args.type_name)?;
    let prompt = format!("Delete {} '{}'?", def.terraform_name(), args.id);
    if !util::confirm(&prompt, "delete", global.yes)? {
        eprintln!("Aborted.");
        return Ok(());
    }

    provider.delete(&args.type_name, &args.id, Map::new()).await?;

    let color = output::should_color(global.color);
    let message = if def.is_singleton() {
        format!(
            "{} is a singleton; nothing was removed from the FortiGate",
            def.terraform_name()
        )
    } else {
        format!("Deleted {} '{}'", args.type_name, args.id)
    };
    output::print_success(&message, global.quiet, color);
    Ok(())
}

pub async fn import(
    provider: &Provider,
    args: ImportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let data = provider.import(&args.type_name, &args.id).await?;

    let color = output::should_color(global.color);
    output::print_success(
        &format!("Imported {} '{}'", args.type_name, data.id()),
        global.quiet,
        color,
    );
    print_state(&data, global);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_output_leads_with_id() {
        let values = json!({"name": "web", "subnet": "10.0.0.0/24"});
        let state = with_id("web", values.as_object().cloned().unwrap_or_default());
        let keys: Vec<&String> = state
            .as_object()
            .map(|o| o.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, ["id", "name", "subnet"]);
    }
}
