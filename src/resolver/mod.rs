//! Resolver Engine: turns a validated criteria set and a candidate list into
//! exactly one record or a typed failure.
//!
//! Every lookup type goes through the same steps. It fetches once, matches
//! the name exactly, then applies the lookup's optional filters in order. The
//! [`MatchPolicy`] decides what happens when several candidates survive.

pub mod criteria;
mod error;

pub use error::{HttpStatus, LookupError, ValidationError};

use tracing::{debug, info};

use crate::catalog::{Candidate, CatalogClient, CatalogScope};

/// A validated filter set for records of type `R`.
pub trait Criteria<R: Candidate>: Send + Sync {
    /// Exact, case-sensitive name the record must carry.
    fn name(&self) -> &str;

    /// Server-side narrowing hints for the listing call.
    fn scope(&self) -> CatalogScope {
        CatalogScope::default()
    }

    /// Optional filters beyond the name. Called only for name matches.
    fn matches(&self, record: &R) -> bool;
}

/// What to do when more than one candidate satisfies all active criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Earliest candidate in controller order wins; later ones are never examined.
    #[default]
    FirstMatch,
    /// Scan the full list and fail with [`LookupError::Ambiguous`] on more than one match.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: MatchPolicy,
}

impl Resolver {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Fetch candidates once and select the single match.
    ///
    /// Transport and decode failures surface unchanged; nothing is retried.
    pub async fn resolve<R, C>(&self, criteria: &C, client: &CatalogClient) -> Result<R, LookupError>
    where
        R: Candidate,
        C: Criteria<R>,
    {
        let candidates: Vec<R> = client.list_candidates(&criteria.scope()).await?;
        self.select(criteria, candidates)
    }

    /// Pure matching step over an already fetched candidate list.
    pub fn select<R, C>(&self, criteria: &C, candidates: Vec<R>) -> Result<R, LookupError>
    where
        R: Candidate,
        C: Criteria<R>,
    {
        let total = candidates.len();
        debug!(kind = R::KIND, name = criteria.name(), total, "traversing candidates");

        let mut survivors = candidates
            .into_iter()
            .enumerate()
            .filter(|(_, record)| record.name() == criteria.name() && criteria.matches(record));

        let Some((index, found)) = survivors.next() else {
            return Err(LookupError::NotFound {
                kind: R::KIND,
                name: criteria.name().to_string(),
            });
        };

        if self.policy == MatchPolicy::Strict {
            let extra = survivors.count();
            if extra > 0 {
                return Err(LookupError::Ambiguous {
                    kind: R::KIND,
                    name: criteria.name().to_string(),
                    matches: extra + 1,
                });
            }
        }

        info!(kind = R::KIND, index, name = criteria.name(), "matched");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageRecord;

    struct ByPool {
        name: &'static str,
        pool: Option<&'static str>,
    }

    impl Criteria<ImageRecord> for ByPool {
        fn name(&self) -> &str {
            self.name
        }

        fn matches(&self, record: &ImageRecord) -> bool {
            self.pool.is_none_or(|p| p == record.pool())
        }
    }

    fn two_a() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new(1, "A", "p1", 1),
            ImageRecord::new(2, "A", "p2", 2),
        ]
    }

    #[test]
    fn first_match_wins_over_later_duplicates() {
        let found = Resolver::default()
            .select(&ByPool { name: "A", pool: None }, two_a())
            .unwrap();
        assert_eq!(found.pool(), "p1");
    }

    #[test]
    fn optional_filter_disambiguates() {
        let found = Resolver::default()
            .select(&ByPool { name: "A", pool: Some("p2") }, two_a())
            .unwrap();
        assert_eq!(found.id(), 2);
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let err = Resolver::default()
            .select(&ByPool { name: "a", pool: None }, two_a())
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound { ref name, .. } if name == "a"));
    }

    #[test]
    fn not_found_references_searched_name() {
        let err = Resolver::default()
            .select(&ByPool { name: "Z", pool: None }, two_a())
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot find OS Image name \"Z\"");
    }

    #[test]
    fn strict_policy_rejects_ambiguity() {
        let strict = Resolver::new(MatchPolicy::Strict);
        let err = strict.select(&ByPool { name: "A", pool: None }, two_a()).unwrap_err();
        assert!(matches!(err, LookupError::Ambiguous { matches: 2, .. }));

        let found = strict
            .select(&ByPool { name: "A", pool: Some("p1") }, two_a())
            .unwrap();
        assert_eq!(found.id(), 1);
    }

    #[test]
    fn selection_is_deterministic() {
        let criteria = ByPool { name: "A", pool: None };
        let resolver = Resolver::default();
        let first = resolver.select(&criteria, two_a()).unwrap();
        for _ in 0..5 {
            assert_eq!(resolver.select(&criteria, two_a()).unwrap(), first);
        }
    }
}
