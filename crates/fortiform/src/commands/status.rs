//! `status`: FortiGate system status.

use serde_json::{Value, json};

use fortios_core::{Provider, SystemStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn status_json(provider: &Provider, status: &SystemStatus) -> Value {
    let vdom = if provider.vdom().is_empty() {
        "(default)"
    } else {
        provider.vdom()
    };
    json!({
        "url": provider.client().base_url().as_str(),
        "hostname": status.results.hostname,
        "model": status.results.model_name.as_ref().or(status.results.model.as_ref()),
        "serial": status.serial,
        "version": status.version,
        "build": status.build,
        "vdom": vdom,
    })
}

pub async fn handle(provider: &Provider, global: &GlobalOpts) -> Result<(), CliError> {
    let status = provider.system_status().await?;
    let doc = status_json(provider, &status);

    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &doc,
        |d| output::render_state(crate::cli::OutputFormat::Table, d, color),
        |d| d.get("serial").map(output::scalar_text).unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
