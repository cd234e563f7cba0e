use async_trait::async_trait;
use tracing::debug;

use super::{Candidate, CatalogScope};
use crate::resolver::LookupError;

/// Raw access to the controller's listing endpoints.
///
/// Implementations own transport and authentication; they return the response
/// body verbatim on success and map every network or HTTP failure to
/// [`LookupError::Transport`].
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn post(&self, api: &str, scope: &CatalogScope) -> Result<String, LookupError>;
}

/// Remote Catalog Client: one listing call, decoded into candidate records.
pub struct CatalogClient {
    transport: Box<dyn CatalogTransport>,
}

impl CatalogClient {
    pub fn new(transport: impl CatalogTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// List every candidate of type `R` visible under `scope`, in the order the
    /// controller returned them.
    pub async fn list_candidates<R: Candidate>(&self, scope: &CatalogScope) -> Result<Vec<R>, LookupError> {
        let body = self.transport.post(R::LIST_API, scope).await?;
        debug!(api = R::LIST_API, bytes = body.len(), "decoding candidate list");
        decode_candidates(R::LIST_API, &body)
    }
}

fn decode_candidates<R: Candidate>(api: &str, body: &str) -> Result<Vec<R>, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::decode(api, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageRecord;

    struct Canned(&'static str);

    #[async_trait]
    impl CatalogTransport for Canned {
        async fn post(&self, _api: &str, _scope: &CatalogScope) -> Result<String, LookupError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl CatalogTransport for Failing {
        async fn post(&self, api: &str, _scope: &CatalogScope) -> Result<String, LookupError> {
            Err(LookupError::transport(api, Some(500), "internal error"))
        }
    }

    #[tokio::test]
    async fn decodes_in_controller_order() {
        let client = CatalogClient::new(Canned(
            r#"[{"id": 2, "name": "b"}, {"id": 1, "name": "a"}]"#,
        ));
        let records: Vec<ImageRecord> = client.list_candidates(&CatalogScope::default()).await.unwrap();
        let ids: Vec<i64> = records.iter().map(ImageRecord::id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let client = CatalogClient::new(Canned(r#"{"not": "an array"}"#));
        let err = client
            .list_candidates::<ImageRecord>(&CatalogScope::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Decode { ref api, .. } if api == ImageRecord::LIST_API));
    }

    #[tokio::test]
    async fn transport_error_is_propagated_unchanged() {
        let client = CatalogClient::new(Failing);
        let err = client
            .list_candidates::<ImageRecord>(&CatalogScope::default())
            .await
            .unwrap_err();
        match err {
            LookupError::Transport { status, body, .. } => {
                assert_eq!(status.0, Some(500));
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
