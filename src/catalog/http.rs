use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};
use url::Url;

use super::{CatalogScope, CatalogTransport};
use crate::controller::{ControllerConfig, ControllerError};
use crate::resolver::LookupError;

/// Ceiling for a single read on the connection.
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);
/// Ceiling for the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("decs-lookup/", env!("CARGO_PKG_VERSION"));

/// [`CatalogTransport`] backed by `reqwest`, talking to a DECS controller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &ControllerConfig) -> Result<Self, ControllerError> {
        let mut default_headers = header::HeaderMap::new();
        if let Some(jwt) = config.jwt() {
            let value = header::HeaderValue::from_str(&format!("bearer {jwt}"))
                .map_err(|e| ControllerError::InvalidJwt(e.to_string()))?;
            default_headers.insert(header::AUTHORIZATION, value);
        }

        if config.allow_unverified_ssl() {
            warn!(controller = config.controller_url(), "TLS certificate verification is disabled");
        }

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(USER_AGENT)
            .read_timeout(READ_TIMEOUT)
            .timeout(DEFAULT_TIMEOUT)
            .danger_accept_invalid_certs(config.allow_unverified_ssl())
            .build()
            .map_err(|e| ControllerError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.controller_url().to_string(),
            http,
        })
    }

    fn endpoint(&self, api: &str, scope: &CatalogScope) -> Result<Url, LookupError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, api))
            .map_err(|e| LookupError::transport(api, None, format!("invalid endpoint URL: {e}")))?;
        let pairs = scope.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn post(&self, api: &str, scope: &CatalogScope) -> Result<String, LookupError> {
        let url = self.endpoint(api, scope)?;
        debug!(%url, "POST");

        let res = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| LookupError::transport(api, None, e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::transport(api, Some(status.as_u16()), format!("read body: {e}")))?;

        if !status.is_success() {
            return Err(LookupError::transport(api, Some(status.as_u16()), body));
        }
        Ok(body)
    }
}
