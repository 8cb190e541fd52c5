// ── Shared conversion helpers ──
//
// Small value-level utilities used by expand/flatten: field-name mapping,
// API presence checks, integer coercion, IP/mask normalisation and
// sub-table sorting.

use std::cmp::Ordering;
use std::net::Ipv4Addr;

use serde_json::Value;
use strum::{Display, EnumString};

/// Environment switch controlling whether imports pull nested tables.
pub const IMPORT_TABLE_ENV: &str = "FORTIOS_IMPORT_TABLE";

// ── Field names ──────────────────────────────────────────────────────

/// `hash_type` → `hash-type`; `fosid` → `id`.
pub fn api_field_name(state_name: &str) -> String {
    if state_name == "fosid" {
        return "id".to_owned();
    }
    state_name.replace('_', "-")
}

/// `hash-type` → `hash_type`; `id` → `fosid`.
pub fn state_field_name(api_name: &str) -> String {
    if api_name == "id" {
        return "fosid".to_owned();
    }
    api_name.replace('-', "_")
}

// ── Presence and coercion ────────────────────────────────────────────

/// Whether the API actually returned a usable value for a field.
pub fn forti_api_patch(value: Option<&Value>) -> bool {
    matches!(
        value,
        Some(Value::String(_) | Value::Number(_) | Value::Array(_))
    )
}

/// Coerce an API value into an integer where FortiOS is inconsistent
/// (numbers as floats, or numbers as strings). Unparseable strings become 0.
pub fn convintf2i(value: &Value) -> Value {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
            None => n.as_f64().map_or(Value::from(0), |f| Value::from(f as i64)),
        },
        Value::String(s) => Value::from(s.trim().parse::<i64>().unwrap_or(0)),
        other => other.clone(),
    }
}

/// Prefix length of a contiguous netmask, 0 when the mask has holes.
fn mask_prefix_len(mask: Ipv4Addr) -> u32 {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    let canonical = if ones == 0 { 0 } else { u32::MAX << (32 - ones) };
    if bits == canonical { ones } else { 0 }
}

/// Keep the configured `ip/len` form when the API returned the same
/// network as `ip mask`; otherwise the API value wins.
pub fn validate_conv_ip_mask_to_cidr(configured: &str, api: &str) -> String {
    if configured != api && configured.contains('/') && api.contains(' ') {
        let mut parts = api.split_whitespace();
        if let (Some(ip), Some(mask)) = (parts.next(), parts.next()) {
            if let Ok(mask) = mask.parse::<Ipv4Addr>() {
                let cidr = format!("{ip}/{}", mask_prefix_len(mask));
                if cidr == configured {
                    return cidr;
                }
            }
        }
    }
    api.to_owned()
}

/// Whether imports should flatten nested tables (`FORTIOS_IMPORT_TABLE`,
/// anything but `false` enables it).
pub fn is_import_table() -> bool {
    import_table_from(std::env::var(IMPORT_TABLE_ENV).ok().as_deref())
}

pub fn import_table_from(raw: Option<&str>) -> bool {
    raw != Some("false")
}

/// Go-style zero value check used for "is this attribute set".
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// ── Sub-table sorting ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum SortMode {
    #[default]
    #[strum(serialize = "false")]
    Off,
    #[strum(serialize = "true")]
    Lexical,
    #[strum(serialize = "natural")]
    Natural,
}

impl SortMode {
    pub fn from_setting(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

fn sort_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Compare strings treating runs of digits as numbers (`port2 < port10`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let mut ldigits = String::new();
                while let Some(c) = left.next_if(char::is_ascii_digit) {
                    ldigits.push(c);
                }
                let mut rdigits = String::new();
                while let Some(c) = right.next_if(char::is_ascii_digit) {
                    rdigits.push(c);
                }
                let lnum = ldigits.trim_start_matches('0');
                let rnum = rdigits.trim_start_matches('0');
                let ord = lnum
                    .len()
                    .cmp(&rnum.len())
                    .then_with(|| lnum.cmp(rnum))
                    .then_with(|| ldigits.len().cmp(&rdigits.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

/// Sort a flattened sub-table on `field` according to `mode`.
pub fn dynamic_sort_subtable(items: &mut [Value], field: &str, mode: SortMode) {
    match mode {
        SortMode::Off => {}
        SortMode::Lexical => {
            items.sort_by_cached_key(|item| sort_text(item.get(field)));
        }
        SortMode::Natural => {
            items.sort_by(|a, b| natural_cmp(&sort_text(a.get(field)), &sort_text(b.get(field))));
        }
    }
}
