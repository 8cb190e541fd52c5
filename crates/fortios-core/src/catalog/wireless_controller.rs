// ── wireless-controller ──

use crate::schema::{Attribute, MKey, ResourceDef};

const POLICY_LIST: &[Attribute] = &[
    Attribute::int("policy_id").between(1, 2048),
    Attribute::string("description").max_len(63),
    Attribute::string("from_vlan").max_len(63).optional_computed(),
    Attribute::string("to_vlan").max_len(63).optional_computed(),
    Attribute::string("services").optional_computed(),
];

/// `wireless-controller bonjour-profile`
pub static BONJOUR_PROFILE: ResourceDef = ResourceDef {
    type_name: "wirelesscontroller_bonjourprofile",
    object: "WirelessControllerBonjourProfile",
    path: "wireless-controller",
    name: "bonjour-profile",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(35)
            .force_new()
            .optional_computed(),
        Attribute::string("comment").max_len(63),
        Attribute::list("policy_list", "policy_id", POLICY_LIST)
            .describe("Bonjour policy list."),
    ],
    description: "Configure Bonjour profiles.",
};
