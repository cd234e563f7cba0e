//! Concrete lookup types and the registry that dispatches to them.

pub mod image;
pub mod resgroup;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{Candidate, CatalogClient};
use crate::projector::{Project, ResourceState};
use crate::resolver::{Criteria, LookupError, Resolver, ValidationError};

pub use image::{ImageCriteria, ImageLookup};
pub use resgroup::{ResGroupCriteria, ResGroupLookup};

/// One read-only data source: raw host config in, state written back on success.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn read(
        &self,
        config: &Value,
        catalog: &CatalogClient,
        state: &mut ResourceState,
    ) -> Result<(), LookupError>;
}

/// Lookup types keyed by their identifier, built once at startup and passed by
/// reference.
pub struct LookupRegistry {
    sources: BTreeMap<&'static str, Box<dyn DataSource>>,
}

impl LookupRegistry {
    pub fn empty() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    /// Registry with every built-in lookup, sharing one resolver policy.
    pub fn with_defaults(resolver: Resolver) -> Self {
        let mut registry = Self::empty();
        registry.register(ImageLookup::new(resolver));
        registry.register(ResGroupLookup::new(resolver));
        registry
    }

    /// Later registrations under the same type name replace earlier ones.
    pub fn register(&mut self, source: impl DataSource + 'static) {
        self.sources.insert(source.type_name(), Box::new(source));
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.sources.keys().copied().collect()
    }

    pub async fn read(
        &self,
        type_name: &str,
        config: &Value,
        catalog: &CatalogClient,
        state: &mut ResourceState,
    ) -> Result<(), LookupError> {
        let source = self
            .sources
            .get(type_name)
            .ok_or_else(|| LookupError::UnknownLookup(type_name.to_string()))?;
        debug!(type_name, "dispatching lookup");
        source.read(config, catalog, state).await
    }
}

/// Decode the host's raw criteria object. `null` reads as an empty object.
pub(crate) fn parse_config<T>(config: &Value) -> Result<T, ValidationError>
where
    T: for<'de> Deserialize<'de>,
{
    let empty = Value::Object(serde_json::Map::new());
    let config = if config.is_null() { &empty } else { config };
    T::deserialize(config).map_err(|e| ValidationError::new("config", e.to_string()))
}

/// Resolve and, only on success, project into `state`.
pub(crate) async fn resolve_into<R, C>(
    resolver: &Resolver,
    criteria: &C,
    catalog: &CatalogClient,
    state: &mut ResourceState,
) -> Result<(), LookupError>
where
    R: Candidate + Project,
    C: Criteria<R>,
{
    let record: R = resolver.resolve(criteria, catalog).await?;
    record.project(state);
    Ok(())
}
