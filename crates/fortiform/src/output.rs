//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render one serde-serializable item. `detail_fn` provides the table view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Render resource state (`{"id": ..., attrs...}`).
///
/// The table view lists one attribute per line; nested tables are shown as
/// compact JSON. Plain prints the id.
pub fn render_state(format: OutputFormat, state: &Value, color: bool) -> String {
    render_single(
        format,
        state,
        |s| state_detail(s, color),
        |s| s.get("id").map(scalar_text).unwrap_or_default(),
    )
}

fn state_detail(state: &Value, color: bool) -> String {
    let Some(obj) = state.as_object() else {
        return scalar_text(state);
    };
    let width = obj.keys().map(String::len).max().unwrap_or(0);
    obj.iter()
        .map(|(key, value)| {
            let padded = format!("{key:<width$}");
            let label = if color {
                padded.cyan().bold().to_string()
            } else {
                padded
            };
            format!("{label}  {}", scalar_text(value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text for one value in table/plain output.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => render_json(other, true),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Status line on stderr, e.g. "✓ Created firewall_address web".
pub fn print_success(message: &str, quiet: bool, color: bool) {
    if quiet {
        return;
    }
    let tick = if color {
        "✓".green().to_string()
    } else {
        "✓".to_owned()
    };
    eprintln!("{tick} {message}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_detail_aligns_keys_and_compacts_tables() {
        let state = json!({
            "id": "web",
            "subnet": "10.0.0.0/24",
            "tagging": [{"name": "t1"}],
            "comment": null,
        });
        let text = render_state(OutputFormat::Table, &state, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id       web");
        assert_eq!(lines[1], "subnet   10.0.0.0/24");
        assert_eq!(lines[2], r#"tagging  [{"name":"t1"}]"#);
        assert_eq!(lines[3], "comment  -");
    }

    #[test]
    fn plain_state_prints_id() {
        let state = json!({"id": "SystemGlobal", "hostname": "fw01"});
        assert_eq!(
            render_state(OutputFormat::Plain, &state, false),
            "SystemGlobal"
        );
    }

    #[test]
    fn compact_json_is_single_line() {
        let state = json!({"id": "3", "fosid": 3});
        let out = render_state(OutputFormat::JsonCompact, &state, false);
        assert_eq!(out, r#"{"id":"3","fosid":3}"#);
    }
}
