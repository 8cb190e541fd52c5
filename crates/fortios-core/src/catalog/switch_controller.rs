// ── switch-controller ──

use super::ENABLE_DISABLE;
use crate::schema::{Attribute, MKey, ResourceDef};

const VLAN_REF: &[Attribute] = &[Attribute::string("vlan_name").max_len(79)];

/// `switch-controller vlan-policy`
pub static VLAN_POLICY: ResourceDef = ResourceDef {
    type_name: "switchcontroller_vlanpolicy",
    object: "SwitchControllerVlanPolicy",
    path: "switch-controller",
    name: "vlan-policy",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(63)
            .force_new()
            .optional_computed(),
        Attribute::string("description").max_len(63),
        Attribute::string("fortilink").max_len(15),
        Attribute::string("vlan").max_len(15),
        Attribute::list("allowed_vlans", "vlan_name", VLAN_REF),
        Attribute::list("untagged_vlans", "vlan_name", VLAN_REF),
        Attribute::string("allowed_vlans_all")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("discard_mode")
            .one_of(&["none", "all-untagged", "all-tagged"])
            .optional_computed(),
    ],
    description: "Configure VLAN policy to be applied on the managed FortiSwitch ports.",
};
