// ── Resource state ──
//
// `ResourceData` mirrors one resource instance: the id (the object's mkey,
// empty when the object is absent) and the underscored attribute values.
// A prior snapshot is kept during updates for change detection.

use serde_json::{Map, Value};

use crate::helpers::is_zero;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    values: Map<String, Value>,
    prior: Option<Map<String, Value>>,
    importing: bool,
}

impl ResourceData {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Empty state carrying only the id to import.
    pub fn for_import(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            importing: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach the previously stored state so updates can detect removals.
    #[must_use]
    pub fn with_prior(mut self, prior: Map<String, Value>) -> Self {
        self.prior = Some(prior);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// `true` once a read found nothing (or before the object exists).
    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Value only when set to something other than its zero value.
    pub fn get_ok(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !is_zero(v))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    /// Whether `name` differs from the prior state. Always `false` without
    /// a prior snapshot.
    pub fn has_change(&self, name: &str) -> bool {
        let Some(prior) = &self.prior else {
            return false;
        };
        let old = prior.get(name).filter(|v| !v.is_null());
        old != self.get(name)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }

    /// State document with the id first, as written to state files.
    pub fn to_state(&self) -> Value {
        let mut state = Map::with_capacity(self.values.len() + 1);
        state.insert("id".into(), Value::from(self.id.clone()));
        for (k, v) in &self.values {
            state.insert(k.clone(), v.clone());
        }
        Value::Object(state)
    }
}
