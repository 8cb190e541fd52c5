// ── Expand / flatten ──
//
// `expand_object` turns resource state into the JSON object sent to the
// CMDB; `flatten_object` maps an API object back onto state. Both walk the
// static attribute list of a `ResourceDef`.

use serde_json::{Map, Value};

use crate::data::ResourceData;
use crate::helpers::{
    SortMode, convintf2i, dynamic_sort_subtable, forti_api_patch, is_zero,
    validate_conv_ip_mask_to_cidr,
};
use crate::schema::{AttrKind, Attribute, Requiredness, ResourceDef};

/// How a read should treat nested tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenMode {
    /// Regular refresh: only configured tables, unless `get_all_tables`.
    Refresh,
    /// Import; `tables` is the `FORTIOS_IMPORT_TABLE` switch.
    Import { tables: bool },
    /// Data source read: every table, no configured values to compare.
    DataSource,
}

// ── Expand ───────────────────────────────────────────────────────────

/// Build the request body for create (`for_update == false`) or update.
///
/// Unset and zero values are left out unless the attribute allows zero.
/// On update, attributes removed since the prior state are sent as `null`
/// (lists as `[]`) so FortiOS resets them.
pub fn expand_object(
    def: &ResourceDef,
    data: &ResourceData,
    for_update: bool,
) -> Map<String, Value> {
    let mut obj = Map::new();

    for attr in def.attributes {
        if !attr.requiredness.is_settable() {
            continue;
        }
        let field = attr.api_field();

        if let Some(children) = attr.children() {
            match data.get(attr.name).and_then(Value::as_array) {
                Some(items) if !items.is_empty() => {
                    obj.insert(field, Value::Array(expand_items(children, items)));
                }
                _ if for_update && data.has_change(attr.name) => {
                    obj.insert(field, Value::Array(Vec::new()));
                }
                _ => {}
            }
            continue;
        }

        if let Some(value) = expandable(attr, data.get(attr.name)) {
            obj.insert(field, value.clone());
        } else if for_update && resets_on_removal(attr) && data.has_change(attr.name) {
            obj.insert(field, Value::Null);
        }
    }

    obj
}

fn expandable<'a>(attr: &Attribute, value: Option<&'a Value>) -> Option<&'a Value> {
    if attr.allow_zero {
        value
    } else {
        value.filter(|v| !is_zero(v))
    }
}

/// Optional+computed attributes keep the server value when unset.
fn resets_on_removal(attr: &Attribute) -> bool {
    matches!(
        attr.requiredness,
        Requiredness::Required | Requiredness::Optional
    )
}

fn expand_items(children: &[Attribute], items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let mut out = Map::new();
            for child in children {
                if !child.requiredness.is_settable() {
                    continue;
                }
                if let Some(nested) = child.children() {
                    if let Some(list) = item.get(child.name).and_then(Value::as_array) {
                        if !list.is_empty() {
                            out.insert(child.api_field(), Value::Array(expand_items(nested, list)));
                        }
                    }
                } else {
                    let value = item.get(child.name).filter(|v| !v.is_null());
                    if let Some(value) = expandable(child, value) {
                        out.insert(child.api_field(), value.clone());
                    }
                }
            }
            Value::Object(out)
        })
        .collect()
}

// ── Flatten ──────────────────────────────────────────────────────────

/// Refresh `data` from an API object.
///
/// Sensitive attributes keep their configured value; FortiOS only ever
/// returns them encrypted.
pub fn flatten_object(
    def: &ResourceDef,
    obj: &Map<String, Value>,
    data: &mut ResourceData,
    mode: FlattenMode,
) {
    let sort = SortMode::from_setting(data.get_str("dynamic_sort_subtable"));
    let all_tables = match mode {
        FlattenMode::Refresh => data.get_str("get_all_tables") == Some("true"),
        FlattenMode::Import { tables } => tables,
        FlattenMode::DataSource => true,
    };

    for attr in def.attributes {
        if attr.sensitive {
            continue;
        }
        let api_value = obj.get(&attr.api_field());

        if let Some(children) = attr.children() {
            let configured = data.get_ok(attr.name).is_some();
            if !(all_tables || configured) {
                continue;
            }
            let prior_items = data
                .get(attr.name)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let mut items = flatten_items(children, api_value, &prior_items, sort);
            if let Some(key) = attr.sort_key {
                dynamic_sort_subtable(&mut items, key, sort);
            }
            data.set(attr.name, Value::Array(items));
            continue;
        }

        match api_value {
            Some(value) if is_present(attr, value) => {
                let flattened = flatten_scalar(attr, value, data.get(attr.name));
                data.set(attr.name, flattened);
            }
            _ => {
                data.remove(attr.name);
            }
        }
    }
}

fn is_present(attr: &Attribute, value: &Value) -> bool {
    forti_api_patch(Some(value)) || (attr.kind == AttrKind::Bool && value.is_boolean())
}

fn flatten_scalar(attr: &Attribute, value: &Value, configured: Option<&Value>) -> Value {
    match attr.kind {
        AttrKind::Int => convintf2i(value),
        AttrKind::String => {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            match configured.and_then(Value::as_str) {
                Some(cfg) if attr.ip_mask_cidr => {
                    Value::from(validate_conv_ip_mask_to_cidr(cfg, &text))
                }
                _ => Value::from(text),
            }
        }
        AttrKind::IntList => match value {
            Value::Array(items) => Value::Array(items.iter().map(convintf2i).collect()),
            other => other.clone(),
        },
        AttrKind::Bool | AttrKind::StringList | AttrKind::List(_) => value.clone(),
    }
}

fn flatten_items(
    children: &[Attribute],
    api_value: Option<&Value>,
    prior_items: &[Value],
    sort: SortMode,
) -> Vec<Value> {
    let Some(Value::Array(api_items)) = api_value else {
        return Vec::new();
    };

    api_items
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(index, item)| {
            let prior = prior_items.get(index).and_then(Value::as_object);
            let mut out = Map::new();
            for child in children {
                let Some(value) = item.get(&child.api_field()).filter(|v| !v.is_null()) else {
                    continue;
                };
                if let Some(nested) = child.children() {
                    let nested_prior = prior
                        .and_then(|p| p.get(child.name))
                        .and_then(Value::as_array)
                        .map_or(&[][..], Vec::as_slice);
                    let mut list = flatten_items(nested, Some(value), nested_prior, sort);
                    if let Some(key) = child.sort_key {
                        dynamic_sort_subtable(&mut list, key, sort);
                    }
                    out.insert(child.name.to_owned(), Value::Array(list));
                } else if child.sensitive {
                    if let Some(kept) = prior.and_then(|p| p.get(child.name)) {
                        out.insert(child.name.to_owned(), kept.clone());
                    }
                } else {
                    let configured = prior.and_then(|p| p.get(child.name));
                    out.insert(child.name.to_owned(), flatten_scalar(child, value, configured));
                }
            }
            Value::Object(out)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::MKey;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MEMBER: &[Attribute] = &[Attribute::string("name").max_len(79)];

    const DEF: ResourceDef = ResourceDef {
        type_name: "firewall_addrgrp",
        object: "FirewallAddrgrp",
        path: "firewall",
        name: "addrgrp",
        mkey: Some(MKey::string("name")),
        attributes: &[
            Attribute::string("name").max_len(79).optional_computed(),
            Attribute::string("uuid").optional_computed(),
            Attribute::string("comment").max_len(255),
            Attribute::int("color").between(0, 32),
            Attribute::int("fosid").allow_zero(),
            Attribute::string("subnet").ip_mask_cidr(),
            Attribute::string("passwd").sensitive(),
            Attribute::list("member", "name", MEMBER),
        ],
        description: "",
    };

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn expand_renames_and_skips_zero_values() {
        let data = ResourceData::new(map(json!({
            "name": "grp",
            "comment": "",
            "color": 0,
            "fosid": 0,
            "member": [{ "name": "a" }, { "name": "b" }],
            "vdomparam": "root",
        })));

        let obj = expand_object(&DEF, &data, false);
        assert_eq!(
            Value::Object(obj),
            json!({
                "name": "grp",
                "id": 0,
                "member": [{ "name": "a" }, { "name": "b" }],
            })
        );
    }

    #[test]
    fn update_resets_removed_attributes() {
        let data = ResourceData::new(map(json!({ "name": "grp" }))).with_prior(map(json!({
            "name": "grp",
            "uuid": "5a1c",
            "comment": "old",
            "member": [{ "name": "a" }],
        })));

        let obj = expand_object(&DEF, &data, true);
        assert_eq!(
            Value::Object(obj),
            json!({ "name": "grp", "comment": null, "member": [] })
        );
    }

    #[test]
    fn flatten_coerces_and_normalises() {
        let mut data = ResourceData::new(map(json!({
            "name": "grp",
            "subnet": "10.0.0.0/24",
            "passwd": "hunter2",
        })));
        let api = map(json!({
            "name": "grp",
            "q_origin_key": "grp",
            "uuid": "5a1c",
            "id": "7",
            "color": 3.0,
            "subnet": "10.0.0.0 255.255.255.0",
            "passwd": "ENC XXXX",
            "member": [{ "name": "a", "q_origin_key": "a" }],
        }));

        flatten_object(&DEF, &api, &mut data, FlattenMode::Refresh);

        assert_eq!(
            Value::Object(data.values().clone()),
            json!({
                "name": "grp",
                "subnet": "10.0.0.0/24",
                "passwd": "hunter2",
                "uuid": "5a1c",
                "color": 3,
                "fosid": 7,
            })
        );
    }

    #[test]
    fn flatten_clears_values_the_api_no_longer_returns() {
        let mut data = ResourceData::new(map(json!({
            "name": "grp",
            "comment": "stale",
            "color": 4,
        })));
        let api = map(json!({ "name": "grp", "color": null }));

        flatten_object(&DEF, &api, &mut data, FlattenMode::Refresh);
        assert_eq!(Value::Object(data.values().clone()), json!({ "name": "grp" }));
    }

    #[test]
    fn flatten_tables_when_configured_or_requested() {
        let api = map(json!({ "name": "grp", "member": [{ "name": "b" }, { "name": "a" }] }));

        let mut configured = ResourceData::new(map(json!({ "member": [{ "name": "a" }] })));
        flatten_object(&DEF, &api, &mut configured, FlattenMode::Refresh);
        assert_eq!(configured.get("member").unwrap().as_array().unwrap().len(), 2);

        let mut all = ResourceData::new(map(json!({ "get_all_tables": "true" })));
        flatten_object(&DEF, &api, &mut all, FlattenMode::Refresh);
        assert!(all.get("member").is_some());

        let mut import = ResourceData::for_import("grp");
        flatten_object(&DEF, &api, &mut import, FlattenMode::Import { tables: false });
        assert!(import.get("member").is_none());
        flatten_object(&DEF, &api, &mut import, FlattenMode::Import { tables: true });
        assert!(import.get("member").is_some());
    }

    #[test]
    fn flatten_sorts_tables_on_request() {
        let api = map(json!({
            "member": [{ "name": "port10" }, { "name": "port2" }, { "name": "port1" }],
        }));
        let mut data = ResourceData::new(map(json!({
            "dynamic_sort_subtable": "natural",
            "member": [{ "name": "port1" }],
        })));

        flatten_object(&DEF, &api, &mut data, FlattenMode::Refresh);
        assert_eq!(
            data.get("member").unwrap(),
            &json!([{ "name": "port1" }, { "name": "port2" }, { "name": "port10" }])
        );
    }

    #[test]
    fn flatten_of_expand_is_identity() {
        let state = map(json!({
            "name": "grp",
            "comment": "lab",
            "color": 6,
            "fosid": 12,
            "subnet": "192.168.10.0/24",
            "member": [{ "name": "x" }, { "name": "y" }],
        }));
        let data = ResourceData::new(state.clone());

        let mut api = expand_object(&DEF, &data, false);
        // FortiOS answers subnets in `ip mask` form.
        api.insert("subnet".into(), json!("192.168.10.0 255.255.255.0"));

        let mut refreshed = ResourceData::new(state.clone());
        flatten_object(&DEF, &api, &mut refreshed, FlattenMode::Refresh);
        assert_eq!(refreshed.values(), &state);
    }
}
