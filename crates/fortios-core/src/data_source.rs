// ── Data sources ──
//
// Every resource definition yields a read-only data source for one object
// and, for table objects, a `<name>list` data source returning the keys of
// all objects matching an optional filter.

use fortios_api::FortiClient;
use serde_json::Value;
use strum::Display;
use tracing::{debug, warn};

use crate::data::ResourceData;
use crate::error::CoreError;
use crate::helpers::convintf2i;
use crate::mapping::{FlattenMode, flatten_object};
use crate::resource::resolve_vdom;
use crate::schema::{
    AttrKind, Attribute, MKey, MKeyKind, Requiredness, ResourceDef, VDOMPARAM, render_schema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DataSourceKind {
    /// One object, looked up by its mkey.
    Single,
    /// Keys of every object in the table.
    List,
}

const FILTER: Attribute = Attribute::string("filter")
    .describe("Filter expression, e.g. `name=@web` or `name==dmz`.");

fn list_attribute(mkey: MKey) -> Attribute {
    let name = match mkey.attribute {
        "fosid" => "fosidlist",
        "name" => "namelist",
        _ => "mkeylist",
    };
    let attr = match mkey.kind {
        MKeyKind::Int => Attribute::int_list(name),
        MKeyKind::String => Attribute::string_list(name),
    };
    attr.computed()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceDef {
    pub resource: &'static ResourceDef,
    pub kind: DataSourceKind,
}

impl DataSourceDef {
    pub fn single(resource: &'static ResourceDef) -> Self {
        Self {
            resource,
            kind: DataSourceKind::Single,
        }
    }

    /// `None` for singletons, which have nothing to list.
    pub fn list(resource: &'static ResourceDef) -> Option<Self> {
        resource.mkey.map(|_| Self {
            resource,
            kind: DataSourceKind::List,
        })
    }

    /// `firewall_address` or `firewall_addresslist`.
    pub fn type_name(&self) -> String {
        match self.kind {
            DataSourceKind::Single => self.resource.type_name.to_owned(),
            DataSourceKind::List => format!("{}list", self.resource.type_name),
        }
    }

    pub fn terraform_name(&self) -> String {
        format!("{}{}", crate::schema::PROVIDER_PREFIX, self.type_name())
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attrs = match (self.kind, self.resource.mkey) {
            (DataSourceKind::List, Some(mkey)) => vec![FILTER, list_attribute(mkey)],
            (DataSourceKind::List, None) => Vec::new(),
            (DataSourceKind::Single, mkey) => self
                .resource
                .attributes
                .iter()
                .map(|attr| {
                    let mut attr = *attr;
                    if mkey.is_some_and(|key| key.attribute == attr.name) {
                        attr.requiredness = Requiredness::Required;
                        attr.force_new = false;
                    } else {
                        attr.requiredness = Requiredness::Computed;
                        attr.validator = None;
                    }
                    attr
                })
                .collect(),
        };
        attrs.push(VDOMPARAM);
        attrs
    }

    pub fn schema_json(&self) -> Value {
        let description = match self.kind {
            DataSourceKind::Single => self.resource.description,
            DataSourceKind::List => "Provides a list of object keys.",
        };
        render_schema(description, &self.attributes(), true)
    }

    pub async fn read(
        &self,
        client: &FortiClient,
        default_vdom: &str,
        data: &mut ResourceData,
    ) -> Result<(), CoreError> {
        match self.kind {
            DataSourceKind::Single => self.read_single(client, default_vdom, data).await,
            DataSourceKind::List => self.read_list(client, default_vdom, data).await,
        }
    }

    async fn read_single(
        &self,
        client: &FortiClient,
        default_vdom: &str,
        data: &mut ResourceData,
    ) -> Result<(), CoreError> {
        let def = self.resource;
        let vdom = resolve_vdom(data, default_vdom);

        let mkey = match def.mkey {
            None => String::new(),
            Some(key) => match data.get(key.attribute) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(CoreError::MissingId {
                        object: def.object.to_owned(),
                    }
                    .describing(def.object));
                }
            },
        };

        let obj = client
            .read_object(def.path, def.name, &mkey, &vdom)
            .await
            .map_err(|e| CoreError::from(e).describing(def.object))?;

        let Some(obj) = obj else {
            warn!(data_source = %self.terraform_name(), %mkey, "object not found");
            data.set_id("");
            return Ok(());
        };

        flatten_object(def, &obj, data, FlattenMode::DataSource);
        let id = if def.is_singleton() {
            def.object.to_owned()
        } else {
            mkey
        };
        debug!(data_source = %self.terraform_name(), %id, "read");
        data.set_id(id);
        Ok(())
    }

    async fn read_list(
        &self,
        client: &FortiClient,
        default_vdom: &str,
        data: &mut ResourceData,
    ) -> Result<(), CoreError> {
        let def = self.resource;
        let Some(mkey) = def.mkey else {
            return Err(CoreError::UnknownDataSource {
                type_name: self.terraform_name(),
            });
        };
        let vdom = resolve_vdom(data, default_vdom);
        let filter = data.get_str("filter").unwrap_or_default().to_owned();

        let objects = client
            .list_objects(
                def.path,
                def.name,
                Some(filter.as_str()).filter(|f| !f.is_empty()),
                &vdom,
            )
            .await
            .map_err(|e| CoreError::from(e).describing(&format!("{}List", def.object)))?;

        let list_attr = list_attribute(mkey);
        let field = def
            .mkey_attribute()
            .map_or_else(|| crate::helpers::api_field_name(mkey.attribute), Attribute::api_field);
        let keys: Vec<Value> = objects
            .iter()
            .filter_map(|obj| obj.get(&field))
            .map(|key| match list_attr.kind {
                AttrKind::IntList => convintf2i(key),
                _ => key.clone(),
            })
            .collect();

        debug!(data_source = %self.terraform_name(), count = keys.len(), "listed");
        data.set(list_attr.name, Value::Array(keys));
        data.set_id(format!("DataSource{}List{filter}", def.object));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::firewall::ADDRESS;
    use crate::catalog::router::BGP_NETWORK;
    use crate::catalog::system::GLOBAL;

    #[test]
    fn single_data_source_requires_only_the_key() {
        let ds = DataSourceDef::single(&ADDRESS);
        assert_eq!(ds.terraform_name(), "fortios_firewall_address");
        for attr in ds.attributes() {
            match attr.name {
                "name" => assert_eq!(attr.requiredness, Requiredness::Required),
                "vdomparam" => assert_eq!(attr.requiredness, Requiredness::Optional),
                _ => assert_eq!(attr.requiredness, Requiredness::Computed, "{}", attr.name),
            }
        }
    }

    #[test]
    fn list_data_source_names_follow_the_key() {
        let ds = DataSourceDef::list(&BGP_NETWORK);
        let names: Vec<_> = ds
            .map(|d| d.attributes().iter().map(|a| a.name).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["filter", "fosidlist", "vdomparam"]);
        assert_eq!(
            DataSourceDef::list(&ADDRESS).map(|d| d.type_name()),
            Some("firewall_addresslist".to_owned())
        );
    }

    #[test]
    fn singletons_have_no_list_data_source() {
        assert!(DataSourceDef::list(&GLOBAL).is_none());
    }

    #[test]
    fn nested_blocks_render_computed() {
        let doc = DataSourceDef::single(&crate::catalog::firewall::ADDRGRP).schema_json();
        let member = &doc["block"]["block_types"]["member"]["block"]["attributes"]["name"];
        assert_eq!(member["computed"], true);
        assert!(member.get("optional").is_none());
    }
}
