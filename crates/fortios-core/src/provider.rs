// ── Provider facade ──
//
// Owns the FortiOS client and the provider-wide defaults, resolves type
// names against the catalog, and validates configuration before handing
// it to the resource and data-source engines.

use fortios_api::{Credentials, FortiClient, SystemStatus};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::catalog;
use crate::config::ProviderConfig;
use crate::data::ResourceData;
use crate::data_source::DataSourceDef;
use crate::error::CoreError;
use crate::helpers::is_import_table;
use crate::resource::ResourceHandler;
use crate::schema::{Attribute, PROVIDER_PREFIX, Requiredness, ResourceDef, render_schema};
use crate::validate::validate_config;

/// Registry address used in the schema document.
pub const PROVIDER_SOURCE: &str = "registry.terraform.io/fortinetdev/fortios";

const PROVIDER_ATTRIBUTES: &[Attribute] = &[
    Attribute::string("hostname").describe("The hostname or IP address of the FortiGate."),
    Attribute::string("token")
        .sensitive()
        .describe("The token of the REST API administrator."),
    Attribute::boolean("insecure").describe("Skip TLS certificate verification."),
    Attribute::string("cabundlefile").describe("CA bundle file used to verify the FortiGate."),
    Attribute::string("vdom").describe("Default vdom for every resource."),
    Attribute::string("http_proxy").describe("HTTP(S) proxy for API requests."),
    Attribute::int("retries").describe("Extra attempts for transient failures."),
];

fn strip_prefix(type_name: &str) -> &str {
    type_name.strip_prefix(PROVIDER_PREFIX).unwrap_or(type_name)
}

fn validated(attrs: &[Attribute], config: &Map<String, Value>) -> Result<(), CoreError> {
    let diagnostics = validate_config(attrs, config);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation { diagnostics })
    }
}

/// Optional+computed attributes left out of the configuration keep the
/// value already in state.
fn plan_update(
    def: &ResourceDef,
    mut config: Map<String, Value>,
    prior: &Map<String, Value>,
) -> Map<String, Value> {
    for attr in def.attributes {
        if attr.requiredness != Requiredness::OptionalComputed {
            continue;
        }
        let unset = config.get(attr.name).is_none_or(Value::is_null);
        if unset {
            if let Some(value) = prior.get(attr.name).filter(|v| !v.is_null()) {
                config.insert(attr.name.to_owned(), value.clone());
            }
        }
    }
    config
}

/// Attributes marked `force_new` whose value differs from the prior state.
fn replace_reasons(
    def: &ResourceDef,
    planned: &Map<String, Value>,
    prior: &Map<String, Value>,
) -> Vec<&'static str> {
    def.attributes
        .iter()
        .filter(|attr| attr.force_new)
        .filter(|attr| {
            let old = prior.get(attr.name).filter(|v| !v.is_null());
            let new = planned.get(attr.name).filter(|v| !v.is_null());
            old != new
        })
        .map(|attr| attr.name)
        .collect()
}

pub struct Provider {
    client: FortiClient,
    vdom: String,
    import_table: bool,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("client", &self.client)
            .field("vdom", &self.vdom)
            .field("import_table", &self.import_table)
            .finish()
    }
}

impl Provider {
    pub fn new(config: &ProviderConfig) -> Result<Self, CoreError> {
        let credentials =
            Credentials::api_token(config.token.clone()).with_placement(config.token_placement);
        let client = FortiClient::new(&config.hostname, credentials, &config.transport())?;
        let import_table = config.import_table.unwrap_or_else(is_import_table);

        info!(
            url = %client.base_url(),
            vdom = %config.vdom,
            "provider configured"
        );
        Ok(Self::with_client(client, config.vdom.clone(), import_table))
    }

    pub fn with_client(client: FortiClient, vdom: impl Into<String>, import_table: bool) -> Self {
        Self {
            client,
            vdom: vdom.into(),
            import_table,
        }
    }

    pub fn client(&self) -> &FortiClient {
        &self.client
    }

    pub fn vdom(&self) -> &str {
        &self.vdom
    }

    // ── Registry ─────────────────────────────────────────────────────

    /// Look up a resource, with or without the `fortios_` prefix.
    pub fn resource_def(type_name: &str) -> Result<&'static ResourceDef, CoreError> {
        let short = strip_prefix(type_name);
        catalog::RESOURCES
            .iter()
            .copied()
            .find(|def| def.type_name == short)
            .ok_or_else(|| CoreError::UnknownResource {
                type_name: type_name.to_owned(),
            })
    }

    pub fn data_source_def(type_name: &str) -> Result<DataSourceDef, CoreError> {
        let short = strip_prefix(type_name);
        Self::data_sources()
            .into_iter()
            .find(|ds| ds.type_name() == short)
            .ok_or_else(|| CoreError::UnknownDataSource {
                type_name: type_name.to_owned(),
            })
    }

    pub fn resources() -> &'static [&'static ResourceDef] {
        catalog::RESOURCES
    }

    pub fn data_sources() -> Vec<DataSourceDef> {
        catalog::RESOURCES
            .iter()
            .copied()
            .flat_map(|def| {
                std::iter::once(DataSourceDef::single(def)).chain(DataSourceDef::list(def))
            })
            .collect()
    }

    /// Schema of the provider and every type, in the shape of
    /// `terraform providers schema -json`.
    pub fn schema_document() -> Value {
        let resources: Map<String, Value> = Self::resources()
            .iter()
            .map(|def| (def.terraform_name(), def.schema_json()))
            .collect();
        let data_sources: Map<String, Value> = Self::data_sources()
            .iter()
            .map(|ds| (ds.terraform_name(), ds.schema_json()))
            .collect();

        json!({
            "format_version": "1.0",
            "provider_schemas": {
                PROVIDER_SOURCE: {
                    "provider": render_schema("", PROVIDER_ATTRIBUTES, false),
                    "resource_schemas": resources,
                    "data_source_schemas": data_sources,
                }
            }
        })
    }

    pub fn handler(&self, type_name: &str) -> Result<ResourceHandler<'_>, CoreError> {
        let def = Self::resource_def(type_name)?;
        Ok(ResourceHandler::new(
            def,
            &self.client,
            &self.vdom,
            self.import_table,
        ))
    }

    // ── Resource lifecycle ───────────────────────────────────────────

    pub async fn create(
        &self,
        type_name: &str,
        config: Map<String, Value>,
    ) -> Result<ResourceData, CoreError> {
        let handler = self.handler(type_name)?;
        validated(&handler.def().all_attributes(), &config)?;

        let mut data = ResourceData::new(config);
        handler.create(&mut data).await?;
        Ok(data)
    }

    /// Refresh `state` for `id`. The returned data has an empty id when
    /// the object is gone.
    pub async fn read(
        &self,
        type_name: &str,
        id: &str,
        state: Map<String, Value>,
    ) -> Result<ResourceData, CoreError> {
        let handler = self.handler(type_name)?;
        let mut data = ResourceData::new(state).with_id(id);
        handler.read(&mut data).await?;
        Ok(data)
    }

    /// Current server-side state including every nested table, or `None`
    /// when the object does not exist.
    pub async fn current_state(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<Option<Map<String, Value>>, CoreError> {
        let mut state = Map::new();
        state.insert("get_all_tables".into(), Value::from("true"));
        let mut data = self.read(type_name, id, state).await?;
        if data.is_gone() {
            return Ok(None);
        }
        data.remove("get_all_tables");
        Ok(Some(data.into_values()))
    }

    /// Apply `config` to an existing object. Changing a `force_new`
    /// attribute deletes the object and recreates it from `config` alone.
    pub async fn update(
        &self,
        type_name: &str,
        id: &str,
        config: Map<String, Value>,
        prior: Map<String, Value>,
    ) -> Result<ResourceData, CoreError> {
        let handler = self.handler(type_name)?;
        let def = handler.def();
        validated(&def.all_attributes(), &config)?;

        let planned = plan_update(def, config.clone(), &prior);
        let reasons = replace_reasons(def, &planned, &prior);
        if !reasons.is_empty() {
            info!(
                resource = %def.terraform_name(),
                %id,
                attributes = ?reasons,
                "attribute forces replacement"
            );
            let mut old = ResourceData::new(prior).with_id(id);
            handler.delete(&mut old).await?;
            // Computed values belong to the destroyed object.
            let mut data = ResourceData::new(config);
            handler.create(&mut data).await?;
            return Ok(data);
        }

        let mut data = ResourceData::new(planned).with_id(id).with_prior(prior);
        handler.update(&mut data).await?;
        Ok(data)
    }

    pub async fn delete(
        &self,
        type_name: &str,
        id: &str,
        state: Map<String, Value>,
    ) -> Result<(), CoreError> {
        let handler = self.handler(type_name)?;
        let mut data = ResourceData::new(state).with_id(id);
        handler.delete(&mut data).await
    }

    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData, CoreError> {
        self.handler(type_name)?.import(id).await
    }

    // ── Data sources ─────────────────────────────────────────────────

    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: Map<String, Value>,
    ) -> Result<ResourceData, CoreError> {
        let ds = Self::data_source_def(type_name)?;
        validated(&ds.attributes(), &config)?;

        let mut data = ResourceData::new(config);
        ds.read(&self.client, &self.vdom, &mut data).await?;
        Ok(data)
    }

    pub async fn system_status(&self) -> Result<SystemStatus, CoreError> {
        Ok(self.client.system_status().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::firewall::ADDRESS;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn lookup_accepts_both_name_forms() {
        assert!(Provider::resource_def("fortios_firewall_address").is_ok());
        assert!(Provider::resource_def("firewall_address").is_ok());
        assert!(Provider::data_source_def("fortios_firewall_addresslist").is_ok());
        assert!(matches!(
            Provider::resource_def("fortios_firewall_nope"),
            Err(CoreError::UnknownResource { .. })
        ));
    }

    #[test]
    fn every_resource_has_a_schema() {
        let doc = Provider::schema_document();
        let schemas = &doc["provider_schemas"][PROVIDER_SOURCE];
        for def in Provider::resources() {
            assert!(
                schemas["resource_schemas"].get(def.terraform_name()).is_some(),
                "{}",
                def.type_name
            );
        }
        assert_eq!(schemas["provider"]["block"]["attributes"]["token"]["sensitive"], true);
        assert!(
            schemas["data_source_schemas"]
                .get("fortios_system_globallist")
                .is_none()
        );
    }

    #[test]
    fn plan_keeps_server_assigned_values() {
        let prior = map(json!({ "name": "web", "uuid": "5a1c", "comment": "x" }));
        let planned = plan_update(&ADDRESS, map(json!({ "name": "web" })), &prior);
        assert_eq!(planned.get("uuid"), Some(&json!("5a1c")));
        assert_eq!(planned.get("comment"), None);
    }

    #[test]
    fn changing_a_force_new_attribute_requires_replacement() {
        let prior = map(json!({ "name": "web", "type": "ipmask" }));
        let planned = map(json!({ "name": "web2", "type": "iprange" }));
        assert_eq!(replace_reasons(&ADDRESS, &planned, &prior), vec!["name"]);
        assert!(replace_reasons(&ADDRESS, &prior, &prior).is_empty());
    }
}
