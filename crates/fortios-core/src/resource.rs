// ── Resource lifecycle ──
//
// Create / Read / Update / Delete / Import for one resource type, driven by
// its `ResourceDef`. Every API failure is wrapped with the action and the
// object name before it leaves this module.

use fortios_api::{CmdbResponse, FortiClient};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::data::ResourceData;
use crate::error::CoreError;
use crate::mapping::{FlattenMode, expand_object, flatten_object};
use crate::schema::ResourceDef;

/// `vdomparam` wins; otherwise the provider vdom, recorded in state.
pub(crate) fn resolve_vdom(data: &mut ResourceData, default_vdom: &str) -> String {
    if let Some(vdom) = data.get_str("vdomparam").filter(|v| !v.is_empty()) {
        return vdom.to_owned();
    }
    if !default_vdom.is_empty() {
        data.set("vdomparam", Value::from(default_vdom));
    }
    default_vdom.to_owned()
}

/// CRUD handler bound to a client and the provider's defaults.
#[derive(Debug, Clone, Copy)]
pub struct ResourceHandler<'a> {
    def: &'static ResourceDef,
    client: &'a FortiClient,
    default_vdom: &'a str,
    import_table: bool,
}

impl<'a> ResourceHandler<'a> {
    pub fn new(
        def: &'static ResourceDef,
        client: &'a FortiClient,
        default_vdom: &'a str,
        import_table: bool,
    ) -> Self {
        Self {
            def,
            client,
            default_vdom,
            import_table,
        }
    }

    pub fn def(&self) -> &'static ResourceDef {
        self.def
    }

    fn resolve_vdom(&self, data: &mut ResourceData) -> String {
        resolve_vdom(data, self.default_vdom)
    }

    /// API key of the current object; always empty for singletons.
    fn mkey<'d>(&self, data: &'d ResourceData) -> Result<&'d str, CoreError> {
        if self.def.is_singleton() {
            return Ok("");
        }
        if data.is_gone() {
            return Err(CoreError::MissingId {
                object: self.def.object.to_owned(),
            });
        }
        Ok(data.id())
    }

    fn id_from_response(&self, resp: &CmdbResponse) -> String {
        resp.mkey_string()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.def.object.to_owned())
    }

    pub async fn create(&self, data: &mut ResourceData) -> Result<(), CoreError> {
        let def = self.def;
        let vdom = self.resolve_vdom(data);
        let body = Value::Object(expand_object(def, data, false));

        let resp = if def.is_singleton() {
            self.client
                .update_object(def.path, def.name, "", &body, &vdom)
                .await
        } else {
            self.client
                .create_object(def.path, def.name, &body, &vdom)
                .await
        }
        .map_err(|e| CoreError::from(e).during("creating", def.object))?;

        let id = self.id_from_response(&resp);
        info!(resource = %def.terraform_name(), %id, "created");
        data.set_id(id);

        self.read(data).await
    }

    /// Refresh `data` from the FortiGate. An object that no longer exists
    /// leaves `data` with an empty id.
    pub async fn read(&self, data: &mut ResourceData) -> Result<(), CoreError> {
        let def = self.def;
        let vdom = self.resolve_vdom(data);
        let mkey = self
            .mkey(data)
            .map_err(|e| e.during("reading", def.object))?
            .to_owned();

        let obj = self
            .client
            .read_object(def.path, def.name, &mkey, &vdom)
            .await
            .map_err(|e| CoreError::from(e).during("reading", def.object))?;

        let Some(obj) = obj else {
            warn!(
                resource = %def.terraform_name(),
                id = %data.id(),
                "object not found on FortiGate, removing from state"
            );
            data.set_id("");
            return Ok(());
        };

        let mode = if data.is_importing() {
            FlattenMode::Import {
                tables: self.import_table,
            }
        } else {
            FlattenMode::Refresh
        };
        flatten_object(def, &obj, data, mode);
        debug!(resource = %def.terraform_name(), id = %data.id(), "refreshed");
        Ok(())
    }

    pub async fn update(&self, data: &mut ResourceData) -> Result<(), CoreError> {
        let def = self.def;
        let vdom = self.resolve_vdom(data);
        let mkey = self
            .mkey(data)
            .map_err(|e| e.during("updating", def.object))?
            .to_owned();
        let body = Value::Object(expand_object(def, data, true));

        let resp = self
            .client
            .update_object(def.path, def.name, &mkey, &body, &vdom)
            .await
            .map_err(|e| CoreError::from(e).during("updating", def.object))?;

        let id = self.id_from_response(&resp);
        info!(resource = %def.terraform_name(), %id, "updated");
        data.set_id(id);

        self.read(data).await
    }

    /// Delete the object. Singletons cannot be deleted; they are only
    /// dropped from state.
    pub async fn delete(&self, data: &mut ResourceData) -> Result<(), CoreError> {
        let def = self.def;
        if !def.is_singleton() {
            let vdom = self.resolve_vdom(data);
            let mkey = self
                .mkey(data)
                .map_err(|e| e.during("deleting", def.object))?
                .to_owned();
            self.client
                .delete_object(def.path, def.name, &mkey, &vdom)
                .await
                .map_err(|e| CoreError::from(e).during("deleting", def.object))?;
        }

        info!(resource = %def.terraform_name(), id = %data.id(), "deleted");
        data.set_id("");
        Ok(())
    }

    /// Read an existing object into fresh state.
    pub async fn import(&self, id: &str) -> Result<ResourceData, CoreError> {
        let mut data = ResourceData::for_import(id);
        self.read(&mut data).await?;
        if data.is_gone() {
            return Err(CoreError::NotFound {
                object: self.def.object.to_owned(),
                id: id.to_owned(),
            });
        }
        info!(resource = %self.def.terraform_name(), %id, "imported");
        Ok(data)
    }
}
