// ── firewall.service ──

use super::{ENABLE_DISABLE, NAME_REF};
use crate::schema::{Attribute, MKey, ResourceDef};

const ID_REF: &[Attribute] = &[Attribute::int("fosid")];

/// `firewall.service custom`
///
/// `icmptype` and `icmpcode` accept zero (echo reply, network
/// unreachable), so they are sent even when `0`.
pub static CUSTOM: ResourceDef = ResourceDef {
    type_name: "firewallservice_custom",
    object: "FirewallServiceCustom",
    path: "firewall.service",
    name: "custom",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(79)
            .force_new()
            .optional_computed(),
        Attribute::string("uuid").optional_computed(),
        Attribute::string("proxy")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("category").max_len(63).optional_computed(),
        Attribute::string("protocol")
            .one_of(&[
                "TCP/UDP/SCTP",
                "ICMP",
                "ICMP6",
                "IP",
                "HTTP",
                "FTP",
                "CONNECT",
                "SOCKS-TCP",
                "SOCKS-UDP",
                "ALL",
            ])
            .optional_computed(),
        Attribute::string("helper")
            .one_of(&[
                "auto", "disable", "ftp", "tftp", "ras", "h323", "tns", "mms", "sip", "pptp",
                "rtsp", "dns-udp", "dns-tcp", "pmap", "rsh", "dcerpc", "mgcp",
            ])
            .optional_computed(),
        Attribute::string("iprange").optional_computed(),
        Attribute::string("fqdn").max_len(255),
        Attribute::int("protocol_number")
            .between(0, 254)
            .optional_computed(),
        Attribute::int("icmptype").between(0, 4_294_967_295).allow_zero(),
        Attribute::int("icmpcode").between(0, 255).allow_zero(),
        Attribute::string("tcp_portrange"),
        Attribute::string("udp_portrange"),
        Attribute::string("sctp_portrange"),
        Attribute::int("tcp_halfclose_timer")
            .between(0, 86400)
            .optional_computed(),
        Attribute::int("tcp_halfopen_timer")
            .between(0, 86400)
            .optional_computed(),
        Attribute::int("tcp_timewait_timer")
            .between(0, 300)
            .optional_computed(),
        Attribute::int("udp_idle_timer")
            .between(0, 86400)
            .optional_computed(),
        Attribute::string("session_ttl").optional_computed(),
        Attribute::string("check_reset_range")
            .one_of(&["disable", "strict", "default"])
            .optional_computed(),
        Attribute::string("comment").max_len(255),
        Attribute::int("color").between(0, 32).optional_computed(),
        Attribute::string("visibility")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("app_service_type")
            .one_of(&["disable", "app-id", "app-category"])
            .optional_computed(),
        Attribute::list("app_category", "fosid", ID_REF),
        Attribute::list("application", "fosid", ID_REF),
        Attribute::string("fabric_object")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
    ],
    description: "Configure custom services.",
};

/// `firewall.service group`
pub static GROUP: ResourceDef = ResourceDef {
    type_name: "firewallservice_group",
    object: "FirewallServiceGroup",
    path: "firewall.service",
    name: "group",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(79)
            .force_new()
            .optional_computed(),
        Attribute::string("uuid").optional_computed(),
        Attribute::string("proxy")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::list("member", "name", NAME_REF),
        Attribute::string("comment").max_len(255),
        Attribute::int("color").between(0, 32).optional_computed(),
        Attribute::string("fabric_object")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
    ],
    description: "Configure service groups.",
};
