use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{DataSource, parse_config, resolve_into};
use crate::catalog::{CatalogClient, CatalogScope, ResGroupRecord};
use crate::projector::{Project, ResourceState};
use crate::resolver::criteria::{optional_id, required_string};
use crate::resolver::{Criteria, LookupError, Resolver, ValidationError};

pub const TYPE_NAME: &str = "decs_resgroup";

const NAME_MAX_LEN: usize = 128;

#[derive(Debug, Default, Deserialize)]
struct RawResGroupConfig {
    name: Option<String>,
    tenant_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResGroupCriteria {
    name: String,
    tenant_id: Option<i64>,
}

impl ResGroupCriteria {
    pub fn new(name: Option<String>, tenant_id: Option<i64>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_string("name", name, NAME_MAX_LEN)?,
            tenant_id: optional_id("tenant_id", tenant_id)?,
        })
    }

    pub fn from_config(config: &Value) -> Result<Self, ValidationError> {
        let raw: RawResGroupConfig = parse_config(config)?;
        Self::new(raw.name, raw.tenant_id)
    }

    pub fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }
}

impl Criteria<ResGroupRecord> for ResGroupCriteria {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> CatalogScope {
        CatalogScope::new(self.tenant_id, None)
    }

    fn matches(&self, record: &ResGroupRecord) -> bool {
        self.tenant_id.is_none_or(|id| id == record.tenant_id())
    }
}

impl Project for ResGroupRecord {
    fn project(&self, state: &mut ResourceState) {
        state.set_id(self.id().to_string());
        state.set("tenant_id", self.tenant_id());
        state.set("tenant_name", self.tenant_name());
    }
}

pub struct ResGroupLookup {
    resolver: Resolver,
}

impl ResGroupLookup {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DataSource for ResGroupLookup {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn read(
        &self,
        config: &Value,
        catalog: &CatalogClient,
        state: &mut ResourceState,
    ) -> Result<(), LookupError> {
        let criteria = ResGroupCriteria::from_config(config)?;
        resolve_into::<ResGroupRecord, _>(&self.resolver, &criteria, catalog, state).await
    }
}
