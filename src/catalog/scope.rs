/// Server-side narrowing hints forwarded with a listing call.
///
/// These are hints only: the controller may ignore them, so the resolver still
/// applies every criterion client-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogScope {
    pub tenant_id: Option<i64>,
    pub resource_group_id: Option<i64>,
}

impl CatalogScope {
    pub fn new(tenant_id: Option<i64>, resource_group_id: Option<i64>) -> Self {
        Self {
            tenant_id,
            resource_group_id,
        }
    }

    /// Query pairs in the controller's wire naming, only for the hints that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(tenant_id) = self.tenant_id {
            pairs.push(("accountId", tenant_id.to_string()));
        }
        if let Some(rgid) = self.resource_group_id {
            pairs.push(("cloudspaceId", rgid.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_has_no_pairs() {
        assert!(CatalogScope::default().query_pairs().is_empty());
    }

    #[test]
    fn pairs_use_wire_names() {
        let scope = CatalogScope::new(Some(12), Some(345));
        assert_eq!(
            scope.query_pairs(),
            vec![("accountId", "12".to_string()), ("cloudspaceId", "345".to_string())]
        );
        assert_eq!(
            CatalogScope::new(None, Some(9)).query_pairs(),
            vec![("cloudspaceId", "9".to_string())]
        );
    }
}
