// ── Configuration validation ──
//
// Checks a configuration document against the attribute list before any
// request is built. Every problem is reported, not only the first one.

use std::fmt;

use serde_json::{Map, Value};

use crate::schema::{AttrKind, Attribute, Requiredness, Validator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Attribute path, e.g. `member[1].name`.
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub fn validate_config(attrs: &[Attribute], config: &Map<String, Value>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block("", attrs, config, &mut diagnostics);
    diagnostics
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_block(
    prefix: &str,
    attrs: &[Attribute],
    config: &Map<String, Value>,
    out: &mut Vec<Diagnostic>,
) {
    for key in config.keys() {
        if !attrs.iter().any(|a| a.name == key) {
            out.push(Diagnostic::new(
                &join(prefix, key),
                "An argument with this name is not expected here",
            ));
        }
    }

    for attr in attrs {
        let path = join(prefix, attr.name);
        let value = config.get(attr.name).filter(|v| !v.is_null());

        match (attr.requiredness, value) {
            (Requiredness::Required, None) => {
                out.push(Diagnostic::new(&path, "The argument is required"));
            }
            (Requiredness::Computed, Some(_)) => {
                out.push(Diagnostic::new(&path, "Cannot set a value for a computed attribute"));
            }
            (_, Some(value)) => validate_value(&path, attr, value, out),
            _ => {}
        }
    }
}

fn validate_value(path: &str, attr: &Attribute, value: &Value, out: &mut Vec<Diagnostic>) {
    match attr.kind {
        AttrKind::String => {
            let Some(s) = value.as_str() else {
                out.push(Diagnostic::new(path, "Expected a string"));
                return;
            };
            check_string(path, attr.validator, s, out);
        }
        AttrKind::Int => {
            let Some(n) = value.as_i64() else {
                out.push(Diagnostic::new(path, "Expected an integer"));
                return;
            };
            if let Some(Validator::IntBetween { min, max }) = attr.validator {
                if !(min..=max).contains(&n) {
                    out.push(Diagnostic::new(
                        path,
                        format!("Expected to be in the range ({min} - {max}), got {n}"),
                    ));
                }
            }
        }
        AttrKind::Bool => {
            if !value.is_boolean() {
                out.push(Diagnostic::new(path, "Expected a boolean"));
            }
        }
        AttrKind::StringList => {
            let ok = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !ok {
                out.push(Diagnostic::new(path, "Expected a list of strings"));
            }
        }
        AttrKind::IntList => {
            let ok = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_i64));
            if !ok {
                out.push(Diagnostic::new(path, "Expected a list of integers"));
            }
        }
        AttrKind::List(children) => {
            let Some(items) = value.as_array() else {
                out.push(Diagnostic::new(path, "Expected a list of blocks"));
                return;
            };
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                match item.as_object() {
                    Some(block) => validate_block(&item_path, children, block, out),
                    None => out.push(Diagnostic::new(&item_path, "Expected a block")),
                }
            }
        }
    }
}

fn check_string(path: &str, validator: Option<Validator>, s: &str, out: &mut Vec<Diagnostic>) {
    match validator {
        Some(Validator::StringLenBetween { min, max }) => {
            let len = s.chars().count();
            if len < min || len > max {
                out.push(Diagnostic::new(
                    path,
                    format!("Expected length to be in the range ({min} - {max}), got {len}"),
                ));
            }
        }
        Some(Validator::OneOf(allowed)) => {
            if !allowed.contains(&s) {
                out.push(Diagnostic::new(
                    path,
                    format!("Expected to be one of [{}], got {s}", allowed.join(", ")),
                ));
            }
        }
        Some(Validator::IntBetween { .. }) | None => {}
    }
}
