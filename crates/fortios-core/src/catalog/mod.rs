// ── Resource catalog ──
//
// Static definitions of the FortiOS objects exposed as resources. Each
// definition also yields the matching data sources.

pub mod firewall;
pub mod firewall_service;
pub mod router;
pub mod switch_controller;
pub mod system;
pub mod wireless_controller;

use crate::schema::{Attribute, ResourceDef};

pub(crate) const ENABLE_DISABLE: &[&str] = &["enable", "disable"];

const TAGS: &[Attribute] = &[Attribute::string("name").max_len(79)];

/// `tagging` block shared by address-like objects.
pub(crate) const TAGGING: &[Attribute] = &[
    Attribute::string("name").max_len(63),
    Attribute::string("category").max_len(63),
    Attribute::list("tags", "name", TAGS),
];

/// Single `name` reference, as used by `member` tables.
pub(crate) const NAME_REF: &[Attribute] = &[Attribute::string("name").max_len(79)];

pub static RESOURCES: &[&ResourceDef] = &[
    &firewall::ADDRESS,
    &firewall::MULTICAST_ADDRESS,
    &firewall::ADDRGRP,
    &firewall_service::CUSTOM,
    &firewall_service::GROUP,
    &system::SNMP_USER,
    &router::BGP_NETWORK,
    &system::ZONE,
    &wireless_controller::BONJOUR_PROFILE,
    &switch_controller::VLAN_POLICY,
    &system::GLOBAL,
    &system::DNS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{api_field_name, state_field_name};
    use crate::schema::{AttrKind, MKeyKind, Requiredness};
    use std::collections::HashSet;

    fn walk(attrs: &[Attribute], visit: &mut dyn FnMut(&Attribute)) {
        for attr in attrs {
            visit(attr);
            if let Some(children) = attr.children() {
                walk(children, visit);
            }
        }
    }

    #[test]
    fn type_names_are_unique() {
        let mut seen = HashSet::new();
        for def in RESOURCES {
            assert!(seen.insert(def.type_name), "duplicate {}", def.type_name);
        }
    }

    #[test]
    fn field_names_map_both_ways() {
        for def in RESOURCES {
            walk(def.attributes, &mut |attr| {
                if attr.api_name.is_none() {
                    assert_eq!(state_field_name(&api_field_name(attr.name)), attr.name);
                }
            });
        }
    }

    #[test]
    fn mkey_attribute_exists_and_matches_kind() {
        for def in RESOURCES {
            let Some(key) = def.mkey else { continue };
            let attr = def
                .mkey_attribute()
                .unwrap_or_else(|| panic!("{} has no {}", def.type_name, key.attribute));
            let expected = match key.kind {
                MKeyKind::String => AttrKind::String,
                MKeyKind::Int => AttrKind::Int,
            };
            assert_eq!(attr.kind, expected, "{}", def.type_name);
            assert_ne!(attr.requiredness, Requiredness::Computed, "{}", def.type_name);
        }
    }

    #[test]
    fn tables_have_sort_keys_among_their_children() {
        for def in RESOURCES {
            walk(def.attributes, &mut |attr| {
                if let (Some(children), Some(key)) = (attr.children(), attr.sort_key) {
                    assert!(
                        children.iter().any(|c| c.name == key),
                        "{}.{} sorts on missing {key}",
                        def.type_name,
                        attr.name
                    );
                }
            });
        }
    }

    #[test]
    fn no_object_attribute_shadows_a_meta_argument() {
        for def in RESOURCES {
            for attr in def.attributes {
                assert!(!crate::schema::is_meta_attribute(attr.name), "{}", attr.name);
            }
        }
    }
}
