//! Data source handler.

use serde_json::{Map, Value};

use fortios_core::{DataSourceDef, DataSourceKind, MKeyKind, Provider};

use crate::cli::{DataArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Build the data source configuration from positional key and flags.
fn data_config(ds: &DataSourceDef, args: &DataArgs) -> Result<Map<String, Value>, CliError> {
    let mut config = Map::new();

    match (ds.kind, ds.resource.mkey, &args.key) {
        (DataSourceKind::Single, Some(mkey), Some(key)) => {
            let value = match mkey.kind {
                MKeyKind::Int => key
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| CliError::Validation {
                        field: mkey.attribute.into(),
                        reason: format!("expected an integer, got '{key}'"),
                    })?,
                MKeyKind::String => Value::String(key.clone()),
            };
            config.insert(mkey.attribute.into(), value);
        }
        (DataSourceKind::Single, Some(mkey), None) => {
            return Err(CliError::Validation {
                field: mkey.attribute.into(),
                reason: format!("{} needs the object key", ds.terraform_name()),
            });
        }
        (DataSourceKind::Single, None, Some(_)) | (DataSourceKind::List, _, Some(_)) => {
            return Err(CliError::Validation {
                field: "key".into(),
                reason: format!("{} takes no key", ds.terraform_name()),
            });
        }
        _ => {}
    }

    if let Some(ref filter) = args.filter {
        if ds.kind != DataSourceKind::List {
            return Err(CliError::Validation {
                field: "filter".into(),
                reason: "--filter applies to list data sources".into(),
            });
        }
        config.insert("filter".into(), Value::String(filter.clone()));
    }
    if let Some(ref vdom) = args.vdomparam {
        config.insert("vdomparam".into(), Value::String(vdom.clone()));
    }
    Ok(config)
}

pub async fn handle(
    provider: &Provider,
    args: DataArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ds = Provider::data_source_def(&args.type_name)?;
    let config = data_config(&ds, &args)?;
    let data = provider.read_data_source(&args.type_name, config).await?;

    let color = output::should_color(global.color);
    let out = output::render_state(global.output, &data.to_state(), color);
    output::print_output(&out, global.quiet);
    Ok(())
}
