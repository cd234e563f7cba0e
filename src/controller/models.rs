use serde::{Deserialize, Serialize};

/// Connection settings for the DECS controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub(crate) controller_url: String,
    #[serde(default)]
    pub(crate) jwt: Option<String>,
    #[serde(default)]
    pub(crate) allow_unverified_ssl: bool,
}

impl ControllerConfig {
    pub fn new(controller_url: impl Into<String>) -> Self {
        Self {
            controller_url: controller_url.into(),
            jwt: None,
            allow_unverified_ssl: false,
        }
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn with_unverified_ssl(mut self, allow: bool) -> Self {
        self.allow_unverified_ssl = allow;
        self
    }

    /// Base URL without a trailing slash.
    pub fn controller_url(&self) -> &str {
        self.controller_url.trim_end_matches('/')
    }

    pub fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }

    pub fn allow_unverified_ssl(&self) -> bool {
        self.allow_unverified_ssl
    }
}
