//! Result Projector: writes a resolved record back into the caller's state.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// The caller's persisted state for one data source instance: an opaque
/// identity plus named attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceState {
    id: Option<String>,
    attributes: BTreeMap<String, Value>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

/// Maps a resolved record onto [`ResourceState`].
///
/// Projection is infallible and runs only after a successful resolution, so a
/// failed lookup never leaves the state half written.
pub trait Project {
    fn project(&self, state: &mut ResourceState);
}
