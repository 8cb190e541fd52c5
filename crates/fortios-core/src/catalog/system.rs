// ── system, system.snmp ──

use super::{ENABLE_DISABLE, NAME_REF, TAGGING};
use crate::schema::{Attribute, MKey, ResourceDef};

const ZONE_INTERFACE: &[Attribute] = &[Attribute::string("interface_name").max_len(79)];

const DNS_SERVER_HOSTNAME: &[Attribute] = &[Attribute::string("hostname").max_len(127)];

const DNS_DOMAIN: &[Attribute] = &[Attribute::string("domain").max_len(79)];

/// `system.snmp user`
pub static SNMP_USER: ResourceDef = ResourceDef {
    type_name: "systemsnmp_user",
    object: "SystemSnmpUser",
    path: "system.snmp",
    name: "user",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(32)
            .force_new()
            .optional_computed(),
        Attribute::string("status")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("trap_status")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::int("trap_lport")
            .between(1, 65535)
            .optional_computed(),
        Attribute::int("trap_rport")
            .between(1, 65535)
            .optional_computed(),
        Attribute::string("queries")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::int("query_port")
            .between(1, 65535)
            .optional_computed(),
        Attribute::string("notify_hosts"),
        Attribute::string("notify_hosts6"),
        Attribute::string("source_ip").optional_computed(),
        Attribute::string("source_ipv6").optional_computed(),
        Attribute::string("ha_direct")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("events").optional_computed(),
        Attribute::string("mib_view").max_len(32),
        Attribute::list("vdoms", "name", NAME_REF),
        Attribute::string("security_level")
            .one_of(&["no-auth-no-priv", "auth-no-priv", "auth-priv"])
            .optional_computed(),
        Attribute::string("auth_proto")
            .one_of(&["md5", "sha", "sha224", "sha256", "sha384", "sha512"])
            .optional_computed(),
        Attribute::string("auth_pwd").max_len(128).sensitive(),
        Attribute::string("priv_proto")
            .one_of(&["aes", "des", "aes256", "aes256cisco"])
            .optional_computed(),
        Attribute::string("priv_pwd").max_len(128).sensitive(),
        Attribute::string("interface_select_method")
            .one_of(&["auto", "sdwan", "specify"])
            .optional_computed(),
        Attribute::string("interface").max_len(15),
    ],
    description: "SNMP user configuration.",
};

/// `system zone`
pub static ZONE: ResourceDef = ResourceDef {
    type_name: "system_zone",
    object: "SystemZone",
    path: "system",
    name: "zone",
    mkey: Some(MKey::string("name")),
    attributes: &[
        Attribute::string("name")
            .max_len(35)
            .force_new()
            .optional_computed(),
        Attribute::list("tagging", "name", TAGGING),
        Attribute::string("description").max_len(127),
        Attribute::string("intrazone")
            .one_of(&["allow", "deny"])
            .optional_computed(),
        Attribute::list("interface", "interface_name", ZONE_INTERFACE),
    ],
    description: "Configure zones to group two or more interfaces.",
};

/// `system global`, a singleton.
pub static GLOBAL: ResourceDef = ResourceDef {
    type_name: "system_global",
    object: "SystemGlobal",
    path: "system",
    name: "global",
    mkey: None,
    attributes: &[
        Attribute::string("hostname").max_len(35).optional_computed(),
        Attribute::string("alias").max_len(35).optional_computed(),
        Attribute::string("timezone").optional_computed(),
        Attribute::string("language")
            .one_of(&[
                "english",
                "french",
                "spanish",
                "portuguese",
                "japanese",
                "trach",
                "simch",
                "korean",
            ])
            .optional_computed(),
        Attribute::int("admintimeout")
            .between(1, 480)
            .optional_computed(),
        Attribute::int("admin_port")
            .between(1, 65535)
            .optional_computed(),
        Attribute::int("admin_sport")
            .between(1, 65535)
            .optional_computed(),
        Attribute::int("admin_ssh_port")
            .between(1, 65535)
            .optional_computed(),
        Attribute::string("admin_https_redirect")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("gui_theme")
            .one_of(&[
                "jade", "neutrino", "mariner", "graphite", "melongene", "jet-stream",
                "security-fabric", "retro", "dark-matter", "onyx", "eclipse",
            ])
            .optional_computed(),
        Attribute::string("switch_controller")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("fgd_alert_subscription").optional_computed(),
        Attribute::int("refresh").between(0, 4_294_967_295).allow_zero(),
    ],
    description: "Configure global attributes.",
};

/// `system dns`, a singleton.
pub static DNS: ResourceDef = ResourceDef {
    type_name: "system_dns",
    object: "SystemDns",
    path: "system",
    name: "dns",
    mkey: None,
    attributes: &[
        Attribute::string("primary").optional_computed(),
        Attribute::string("secondary").optional_computed(),
        Attribute::string("protocol").optional_computed(),
        Attribute::string("ssl_certificate").max_len(35).optional_computed(),
        Attribute::list("server_hostname", "hostname", DNS_SERVER_HOSTNAME),
        Attribute::list("domain", "domain", DNS_DOMAIN),
        Attribute::string("ip6_primary").optional_computed(),
        Attribute::string("ip6_secondary").optional_computed(),
        Attribute::int("timeout").between(1, 10).optional_computed(),
        Attribute::int("retry").between(0, 5).allow_zero(),
        Attribute::int("dns_cache_limit").optional_computed(),
        Attribute::int("dns_cache_ttl")
            .between(60, 86400)
            .optional_computed(),
        Attribute::string("cache_notfound_responses")
            .one_of(ENABLE_DISABLE)
            .optional_computed(),
        Attribute::string("source_ip").optional_computed(),
        Attribute::string("interface_select_method")
            .one_of(&["auto", "sdwan", "specify"])
            .optional_computed(),
        Attribute::string("interface").max_len(15),
        Attribute::string("server_select_method")
            .one_of(&["least-rtt", "failover"])
            .optional_computed(),
    ],
    description: "Configure DNS.",
};
