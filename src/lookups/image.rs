use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{DataSource, parse_config, resolve_into};
use crate::catalog::{CatalogClient, CatalogScope, ImageRecord};
use crate::projector::{Project, ResourceState};
use crate::resolver::criteria::{optional_id, optional_string, required_string};
use crate::resolver::{Criteria, LookupError, Resolver, ValidationError};

pub const TYPE_NAME: &str = "decs_image";

const NAME_MAX_LEN: usize = 128;
const POOL_MAX_LEN: usize = 64;

#[derive(Debug, Default, Deserialize)]
struct RawImageConfig {
    name: Option<String>,
    pool: Option<String>,
    sep_id: Option<i64>,
    tenant_id: Option<i64>,
    rgid: Option<i64>,
}

/// Filters for an OS image lookup. Construction validates every bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCriteria {
    name: String,
    pool: Option<String>,
    sep_id: Option<i64>,
    tenant_id: Option<i64>,
    rgid: Option<i64>,
}

impl ImageCriteria {
    pub fn new(
        name: Option<String>,
        pool: Option<String>,
        sep_id: Option<i64>,
        tenant_id: Option<i64>,
        rgid: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_string("name", name, NAME_MAX_LEN)?,
            pool: optional_string("pool", pool, POOL_MAX_LEN)?,
            sep_id: optional_id("sep_id", sep_id)?,
            tenant_id: optional_id("tenant_id", tenant_id)?,
            rgid: optional_id("rgid", rgid)?,
        })
    }

    /// Name-only criteria.
    pub fn named(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Some(name.into()), None, None, None, None)
    }

    pub fn from_config(config: &Value) -> Result<Self, ValidationError> {
        let raw: RawImageConfig = parse_config(config)?;
        Self::new(raw.name, raw.pool, raw.sep_id, raw.tenant_id, raw.rgid)
    }

    pub fn pool(&self) -> Option<&str> {
        self.pool.as_deref()
    }

    pub fn sep_id(&self) -> Option<i64> {
        self.sep_id
    }

    pub fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }

    pub fn rgid(&self) -> Option<i64> {
        self.rgid
    }
}

impl Criteria<ImageRecord> for ImageCriteria {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> CatalogScope {
        CatalogScope::new(self.tenant_id, self.rgid)
    }

    fn matches(&self, record: &ImageRecord) -> bool {
        self.pool.as_deref().is_none_or(|pool| pool == record.pool())
            && self.sep_id.is_none_or(|sep_id| sep_id == record.sep_id())
    }
}

// The criteria may have left pool / sep_id unset; persisting the effective
// values keeps the next refresh from reporting a diff.
impl Project for ImageRecord {
    fn project(&self, state: &mut ResourceState) {
        state.set_id(self.id().to_string());
        state.set("sep_id", self.sep_id());
        state.set("pool", self.pool());
    }
}

pub struct ImageLookup {
    resolver: Resolver,
}

impl ImageLookup {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DataSource for ImageLookup {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn read(
        &self,
        config: &Value,
        catalog: &CatalogClient,
        state: &mut ResourceState,
    ) -> Result<(), LookupError> {
        let criteria = ImageCriteria::from_config(config)?;
        resolve_into::<ImageRecord, _>(&self.resolver, &criteria, catalog, state).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::lookups::test_support::FakeTransport;
    use crate::resolver::MatchPolicy;

    const CATALOG: &str = r#"[
        {"id": 10, "name": "A", "pool": "p1", "sepid": 1},
        {"id": 11, "name": "A", "pool": "p2", "sepid": 2},
        {"id": 12, "name": "ubuntu", "pool": "ssd", "sepid": 7},
        {"id": 13, "name": "ubuntu", "pool": "hdd", "sepid": 7}
    ]"#;

    async fn read(config: Value) -> (Result<(), LookupError>, ResourceState, FakeTransport) {
        let transport = FakeTransport::new(CATALOG);
        let catalog = CatalogClient::new(transport.clone());
        let mut state = ResourceState::new();
        let result = ImageLookup::new(Resolver::default())
            .read(&config, &catalog, &mut state)
            .await;
        (result, state, transport)
    }

    #[tokio::test]
    async fn duplicate_names_resolve_to_first() {
        let (result, state, _) = read(json!({"name": "A"})).await;
        result.unwrap();
        assert_eq!(state.id(), Some("10"));
        assert_eq!(state.get("pool"), Some(&json!("p1")));
    }

    #[tokio::test]
    async fn pool_disambiguates() {
        let (result, state, _) = read(json!({"name": "A", "pool": "p2"})).await;
        result.unwrap();
        assert_eq!(state.id(), Some("11"));
    }

    #[tokio::test]
    async fn sep_id_filters_after_pool() {
        let (result, _, _) = read(json!({"name": "A", "pool": "p2", "sep_id": 1})).await;
        assert!(matches!(result, Err(LookupError::NotFound { .. })));

        let (result, state, _) = read(json!({"name": "A", "sep_id": 2})).await;
        result.unwrap();
        assert_eq!(state.id(), Some("11"));
    }

    #[tokio::test]
    async fn missing_name_reports_searched_name_and_leaves_state_untouched() {
        let (result, state, _) = read(json!({"name": "Z"})).await;
        let err = result.unwrap_err();
        assert!(matches!(err, LookupError::NotFound { ref name, .. } if name == "Z"));
        assert!(err.to_string().contains("\"Z\""));
        assert_eq!(state, ResourceState::new());
    }

    #[tokio::test]
    async fn validation_runs_before_any_fetch() {
        let (result, _, transport) = read(json!({"name": ""})).await;
        assert!(matches!(result, Err(LookupError::Validation(ref v)) if v.field() == "name"));
        assert_eq!(transport.calls(), 0);

        let (result, _, transport) = read(json!({"name": "A", "tenant_id": -1})).await;
        assert!(matches!(result, Err(LookupError::Validation(ref v)) if v.field() == "tenant_id"));
        assert_eq!(transport.calls(), 0);

        let (result, _, transport) = read(json!({"pool": "p1"})).await;
        assert!(matches!(result, Err(LookupError::Validation(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn writes_back_effective_pool_and_sep() {
        let (result, state, _) = read(json!({"name": "ubuntu"})).await;
        result.unwrap();
        assert_eq!(state.id(), Some("12"));
        assert_eq!(state.get("sep_id"), Some(&json!(7)));
        assert_eq!(state.get("pool"), Some(&json!("ssd")));
    }

    #[tokio::test]
    async fn repeated_reads_write_identical_state() {
        let config = json!({"name": "ubuntu", "sep_id": 7});
        let (first, state_a, _) = read(config.clone()).await;
        let (second, state_b, _) = read(config).await;
        first.unwrap();
        second.unwrap();
        assert_eq!(state_a, state_b);
    }

    #[tokio::test]
    async fn zero_values_are_unset_and_scope_is_forwarded() {
        let (result, state, transport) =
            read(json!({"name": "ubuntu", "pool": "", "sep_id": 0, "tenant_id": 4, "rgid": 0})).await;
        result.unwrap();
        assert_eq!(state.id(), Some("12"));
        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "/restmachine/cloudapi/images/list");
        assert_eq!(seen[0].1, CatalogScope::new(Some(4), None));
    }

    #[tokio::test]
    async fn strict_policy_surfaces_ambiguity() {
        let transport = FakeTransport::new(CATALOG);
        let catalog = CatalogClient::new(transport);
        let mut state = ResourceState::new();
        let err = ImageLookup::new(Resolver::new(MatchPolicy::Strict))
            .read(&json!({"name": "ubuntu"}), &catalog, &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Ambiguous { matches: 2, .. }));
        assert!(state.id().is_none());
    }

    #[test]
    fn criteria_bounds() {
        assert!(ImageCriteria::named("x".repeat(128)).is_ok());
        assert!(ImageCriteria::named("x".repeat(129)).is_err());
        let criteria = ImageCriteria::new(Some("n".into()), Some("ssd".into()), Some(3), None, Some(8)).unwrap();
        assert_eq!(criteria.pool(), Some("ssd"));
        assert_eq!(criteria.sep_id(), Some(3));
        assert_eq!(criteria.scope(), CatalogScope::new(None, Some(8)));
    }
}
