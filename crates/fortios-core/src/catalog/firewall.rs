// ── firewall ──

use super::{ENABLE_DISABLE, NAME_REF, TAGGING};
use crate::schema::{Attribute, MKey, ResourceDef};

const MACADDR: &[Attribute] = &[Attribute::string("macaddr").max_len(127)];

/// `firewall address`
pub static ADDRESS: ResourceDef = ResourceDef {
    type_name: "firewall_address",
    object: "FirewallAddress",
    path: "firewall",
    name: "address",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(79)
            .force_new()
            .optional_computed()
            .describe("Address name."),
        Attribute::string("uuid").optional_computed(),
        Attribute::string("subnet")
            .ip_mask_cidr()
            .optional_computed()
            .describe("IP address and subnet mask of address."),
        Attribute::string("type")
            .one_of(&[
                "ipmask",
                "iprange",
                "fqdn",
                "geography",
                "wildcard",
                "dynamic",
                "interface-subnet",
                "mac",
            ])
            .optional_computed(),
        Attribute::string("sub_type")
            .one_of(&["sdn", "clearpass-spt", "fsso", "ems-tag", "swc-tag"])
            .optional_computed(),
        Attribute::string("start_ip").optional_computed(),
        Attribute::string("end_ip").optional_computed(),
        Attribute::string("fqdn").max_len(255),
        Attribute::string("country").max_len(2).optional_computed(),
        Attribute::string("wildcard_fqdn").max_len(255),
        Attribute::int("cache_ttl").between(0, 86400).optional_computed(),
        Attribute::string("wildcard").optional_computed(),
        Attribute::string("interface").max_len(35),
        Attribute::string("comment").max_len(255),
        Attribute::string("visibility")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("associated_interface").max_len(35),
        Attribute::int("color").between(0, 32).optional_computed(),
        Attribute::string("allow_routing")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("fabric_object")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::list("macaddr", "macaddr", MACADDR),
        Attribute::list("tagging", "name", TAGGING),
    ],
    description: "Configure IPv4 addresses.",
};

/// `firewall multicast-address`
pub static MULTICAST_ADDRESS: ResourceDef = ResourceDef {
    type_name: "firewall_multicastaddress",
    object: "FirewallMulticastAddress",
    path: "firewall",
    name: "multicast-address",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(79)
            .force_new()
            .optional_computed(),
        Attribute::string("type")
            .one_of(&["multicastrange", "broadcastmask"])
            .optional_computed(),
        Attribute::string("subnet").ip_mask_cidr().optional_computed(),
        Attribute::string("start_ip").optional_computed(),
        Attribute::string("end_ip").optional_computed(),
        Attribute::string("comment").max_len(255),
        Attribute::string("visibility")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("associated_interface").max_len(35),
        Attribute::int("color").between(0, 32).optional_computed(),
        Attribute::list("tagging", "name", TAGGING),
    ],
    description: "Configure multicast addresses.",
};

/// `firewall addrgrp`
pub static ADDRGRP: ResourceDef = ResourceDef {
    type_name: "firewall_addrgrp",
    object: "FirewallAddrgrp",
    path: "firewall",
    name: "addrgrp",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(79)
            .force_new()
            .optional_computed(),
        Attribute::string("type")
            .one_of(&["default", "folder"])
            .optional_computed(),
        Attribute::string("category")
            .one_of(&["default", "ztna-ems-tag", "ztna-geo-tag"])
            .optional_computed(),
        Attribute::string("uuid").optional_computed(),
        Attribute::list("member", "name", NAME_REF)
            .required()
            .describe("Address objects contained within the group."),
        Attribute::string("comment").max_len(255),
        Attribute::string("exclude")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::list("exclude_member", "name", NAME_REF),
        Attribute::int("color").between(0, 32).optional_computed(),
        Attribute::list("tagging", "name", TAGGING),
        Attribute::string("allow_routing")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("fabric_object")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
    ],
    description: "Configure IPv4 address groups.",
};
