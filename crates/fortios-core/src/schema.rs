// ── Resource schema model ──
//
// Every FortiOS object type is described by a static `ResourceDef`: where
// it lives in the CMDB, what its primary key is, and the ordered list of
// attributes. The engine in `mapping` and `resource` interprets these
// tables; nothing is generated per object type.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString};

// ── Attribute model ──────────────────────────────────────────────────

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    String,
    Int,
    Bool,
    /// List of plain strings (only used by computed data-source outputs).
    StringList,
    IntList,
    /// Repeated nested block, e.g. `member { name = "..." }`.
    List(&'static [Attribute]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requiredness {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

impl Requiredness {
    pub fn is_settable(self) -> bool {
        !matches!(self, Self::Computed)
    }
}

/// Value constraints checked before anything is sent to the FortiGate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    StringLenBetween { min: usize, max: usize },
    IntBetween { min: i64, max: i64 },
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttrKind,
    pub requiredness: Requiredness,
    pub sensitive: bool,
    pub force_new: bool,
    /// Send zero values (`0`, `""`) instead of treating them as unset.
    pub allow_zero: bool,
    /// API answers `ip mask`, configuration may use `ip/len`.
    pub ip_mask_cidr: bool,
    /// Overrides the hyphenated API field name.
    pub api_name: Option<&'static str>,
    pub validator: Option<Validator>,
    /// Field used by `dynamic_sort_subtable` for nested blocks.
    pub sort_key: Option<&'static str>,
    pub description: &'static str,
}

impl Attribute {
    const fn new(name: &'static str, kind: AttrKind) -> Self {
        Self {
            name,
            kind,
            requiredness: Requiredness::Optional,
            sensitive: false,
            force_new: false,
            allow_zero: false,
            ip_mask_cidr: false,
            api_name: None,
            validator: None,
            sort_key: None,
            description: "",
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, AttrKind::String)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, AttrKind::Int)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, AttrKind::Bool)
    }

    pub const fn string_list(name: &'static str) -> Self {
        Self::new(name, AttrKind::StringList)
    }

    pub const fn int_list(name: &'static str) -> Self {
        Self::new(name, AttrKind::IntList)
    }

    /// Nested block sorted on `sort_key` when `dynamic_sort_subtable` asks for it.
    pub const fn list(
        name: &'static str,
        sort_key: &'static str,
        children: &'static [Attribute],
    ) -> Self {
        let mut attr = Self::new(name, AttrKind::List(children));
        attr.sort_key = Some(sort_key);
        attr
    }

    pub const fn required(mut self) -> Self {
        self.requiredness = Requiredness::Required;
        self
    }

    pub const fn computed(mut self) -> Self {
        self.requiredness = Requiredness::Computed;
        self
    }

    pub const fn optional_computed(mut self) -> Self {
        self.requiredness = Requiredness::OptionalComputed;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn allow_zero(mut self) -> Self {
        self.allow_zero = true;
        self
    }

    pub const fn ip_mask_cidr(mut self) -> Self {
        self.ip_mask_cidr = true;
        self
    }

    pub const fn with_api_name(mut self, name: &'static str) -> Self {
        self.api_name = Some(name);
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.validator = Some(Validator::StringLenBetween { min: 0, max });
        self
    }

    pub const fn between(mut self, min: i64, max: i64) -> Self {
        self.validator = Some(Validator::IntBetween { min, max });
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.validator = Some(Validator::OneOf(values));
        self
    }

    pub const fn describe(mut self, text: &'static str) -> Self {
        self.description = text;
        self
    }

    /// FortiOS field name for this attribute.
    pub fn api_field(&self) -> String {
        match self.api_name {
            Some(name) => name.to_owned(),
            None => crate::helpers::api_field_name(self.name),
        }
    }

    pub fn children(&self) -> Option<&'static [Attribute]> {
        match self.kind {
            AttrKind::List(children) => Some(children),
            _ => None,
        }
    }
}

// ── Meta-arguments ───────────────────────────────────────────────────

/// Virtual domain override for a single resource.
pub const VDOMPARAM: Attribute = Attribute::string("vdomparam")
    .describe("Specifies the vdom to which the resource will be applied.");

/// Sort nested tables: `false`, `true` (lexical) or `natural`.
pub const DYNAMIC_SORT_SUBTABLE: Attribute = Attribute::string("dynamic_sort_subtable")
    .one_of(&["false", "true", "natural"])
    .describe("Sort sub-tables in the state by their key.");

/// Refresh every nested table, not only the configured ones.
pub const GET_ALL_TABLES: Attribute = Attribute::string("get_all_tables")
    .one_of(&["false", "true"])
    .describe("Get all sub-tables including unconfigured tables.");

const META_NAMES: [&str; 3] = ["vdomparam", "dynamic_sort_subtable", "get_all_tables"];

/// Meta-arguments never reach the FortiOS API.
pub fn is_meta_attribute(name: &str) -> bool {
    META_NAMES.contains(&name)
}

// ── Resource definition ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MKeyKind {
    String,
    Int,
}

/// Primary key of a table object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MKey {
    /// Attribute carrying the key (`name`, `fosid`, ...).
    pub attribute: &'static str,
    pub kind: MKeyKind,
}

impl MKey {
    pub const fn string(attribute: &'static str) -> Self {
        Self {
            attribute,
            kind: MKeyKind::String,
        }
    }

    pub const fn int(attribute: &'static str) -> Self {
        Self {
            attribute,
            kind: MKeyKind::Int,
        }
    }
}

/// One FortiOS configuration object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDef {
    /// Type name without the `fortios_` prefix, e.g. `firewall_address`.
    pub type_name: &'static str,
    /// CamelCase object name used in messages and singleton ids.
    pub object: &'static str,
    /// CMDB path, e.g. `firewall` or `system.snmp`.
    pub path: &'static str,
    /// CMDB table name, e.g. `address` or `user`.
    pub name: &'static str,
    /// `None` for singleton objects (`system global`).
    pub mkey: Option<MKey>,
    pub attributes: &'static [Attribute],
    pub description: &'static str,
}

pub const PROVIDER_PREFIX: &str = "fortios_";

impl ResourceDef {
    pub fn terraform_name(&self) -> String {
        format!("{PROVIDER_PREFIX}{}", self.type_name)
    }

    pub fn is_singleton(&self) -> bool {
        self.mkey.is_none()
    }

    pub fn has_tables(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| matches!(a.kind, AttrKind::List(_)))
    }

    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Object attributes followed by the meta-arguments that apply.
    pub fn all_attributes(&self) -> Vec<Attribute> {
        let mut attrs = self.attributes.to_vec();
        if self.has_tables() {
            attrs.push(DYNAMIC_SORT_SUBTABLE);
            attrs.push(GET_ALL_TABLES);
        }
        attrs.push(VDOMPARAM);
        attrs
    }

    pub fn mkey_attribute(&self) -> Option<&'static Attribute> {
        self.mkey.and_then(|key| self.attribute(key.attribute))
    }

    /// Schema document in the shape of `terraform providers schema -json`.
    pub fn schema_json(&self) -> Value {
        render_schema(self.description, &self.all_attributes(), false)
    }
}

// ── Schema rendering ─────────────────────────────────────────────────

#[derive(Serialize)]
struct SchemaDoc<'a> {
    version: u32,
    block: BlockDoc<'a>,
}

#[derive(Serialize)]
struct BlockDoc<'a> {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<&'a str, AttributeDoc<'a>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    block_types: IndexMap<&'a str, BlockTypeDoc<'a>>,
    #[serde(skip_serializing_if = "is_blank")]
    description: &'a str,
}

#[derive(Serialize)]
struct AttributeDoc<'a> {
    #[serde(rename = "type")]
    attr_type: Value,
    #[serde(skip_serializing_if = "is_blank")]
    description: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    computed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    sensitive: bool,
}

#[derive(Serialize)]
struct BlockTypeDoc<'a> {
    nesting_mode: &'static str,
    block: BlockDoc<'a>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_blank(s: &&str) -> bool {
    s.is_empty()
}

fn block_doc<'a>(
    description: &'a str,
    attrs: &[Attribute],
    nested: bool,
    computed_nested: bool,
) -> BlockDoc<'a> {
    let mut attributes = IndexMap::new();
    let mut block_types = IndexMap::new();

    for attr in attrs {
        match attr.kind {
            AttrKind::List(children) => {
                block_types.insert(
                    attr.name,
                    BlockTypeDoc {
                        nesting_mode: "list",
                        block: block_doc(attr.description, children, true, computed_nested),
                    },
                );
            }
            kind => {
                let attr_type = match kind {
                    AttrKind::Int => Value::from("number"),
                    AttrKind::Bool => Value::from("bool"),
                    AttrKind::StringList => serde_json::json!(["list", "string"]),
                    AttrKind::IntList => serde_json::json!(["list", "number"]),
                    AttrKind::String | AttrKind::List(_) => Value::from("string"),
                };
                let requiredness = if nested && computed_nested {
                    Requiredness::Computed
                } else {
                    attr.requiredness
                };
                attributes.insert(
                    attr.name,
                    AttributeDoc {
                        attr_type,
                        description: attr.description,
                        required: requiredness == Requiredness::Required,
                        optional: matches!(
                            requiredness,
                            Requiredness::Optional | Requiredness::OptionalComputed
                        ),
                        computed: matches!(
                            requiredness,
                            Requiredness::Computed | Requiredness::OptionalComputed
                        ),
                        sensitive: attr.sensitive,
                    },
                );
            }
        }
    }

    BlockDoc {
        attributes,
        block_types,
        description,
    }
}

/// `computed_nested` renders every attribute inside nested blocks as
/// computed (data sources).
pub(crate) fn render_schema(
    description: &str,
    attrs: &[Attribute],
    computed_nested: bool,
) -> Value {
    let doc = SchemaDoc {
        version: 0,
        block: block_doc(description, attrs, false, computed_nested),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MEMBER: &[Attribute] = &[Attribute::string("name").max_len(79)];

    const GROUP: ResourceDef = ResourceDef {
        type_name: "firewall_addrgrp",
        object: "FirewallAddrgrp",
        path: "firewall",
        name: "addrgrp",
        mkey: Some(MKey::string("name")),
        attributes: &[
            Attribute::string("name").max_len(79).optional_computed(),
            Attribute::list("member", "name", MEMBER).required(),
            Attribute::string("uuid").computed(),
        ],
        description: "Configure IPv4 address groups.",
    };

    #[test]
    fn meta_arguments_follow_object_attributes() {
        let names: Vec<_> = GROUP.all_attributes().iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "member",
                "uuid",
                "dynamic_sort_subtable",
                "get_all_tables",
                "vdomparam"
            ]
        );
    }

    #[test]
    fn schema_json_splits_blocks_from_attributes() {
        let doc = GROUP.schema_json();
        let block = &doc["block"];
        assert_eq!(block["attributes"]["uuid"]["computed"], true);
        assert_eq!(block["attributes"]["name"]["optional"], true);
        assert_eq!(block["attributes"]["name"]["computed"], true);
        assert_eq!(block_type_mode(block, "member"), "list");
        assert!(block["attributes"].get("member").is_none());
    }

    fn block_type_mode<'a>(block: &'a Value, name: &str) -> &'a str {
        block["block_types"][name]["nesting_mode"].as_str().unwrap()
    }

    #[test]
    fn fosid_maps_to_id() {
        assert_eq!(Attribute::int("fosid").api_field(), "id");
        assert_eq!(Attribute::string("start_ip").api_field(), "start-ip");
        assert_eq!(
            Attribute::string("x").with_api_name("x_raw").api_field(),
            "x_raw"
        );
    }
}
