// ── router.bgp ──

use super::ENABLE_DISABLE;
use crate::schema::{Attribute, MKey, ResourceDef};

/// `router.bgp network`, keyed by a numeric id.
pub static BGP_NETWORK: ResourceDef = ResourceDef {
    type_name: "routerbgp_network",
    object: "RouterBgpNetwork",
    path: "router.bgp",
    name: "network",
    mkey: Some(MKey::int("fosid")),
    attributes: &[
        Attribute::int("fosid")
            .between(0, 4_294_967_295)
            .force_new()
            .optional_computed(),
        Attribute::string("prefix").ip_mask_cidr().optional_computed(),
        Attribute::string("network_import_check")
            .one_of(&["global", "enable", "disable"])
            .optional_computed(),
        Attribute::string("backdoor")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("route_map").max_len(35),
        Attribute::string("prefix_name").max_len(79),
    ],
    description: "BGP network table.",
};
