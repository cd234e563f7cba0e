mod models;

use std::{fs, path::Path};

use url::Url;

pub use models::ControllerConfig; // Re-export the model type to callers.

pub const ENV_CONTROLLER_URL: &str = "DECS_CONTROLLER_URL";
pub const ENV_JWT: &str = "DECS_JWT";
pub const ENV_ALLOW_UNVERIFIED_SSL: &str = "DECS_ALLOW_UNVERIFIED_SSL";

// ---- Public API (serde hidden from callers) ----

/// Load from a JSON file path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ControllerConfig, ControllerError> {
    let data = fs::read_to_string(path).map_err(ControllerError::Io)?;
    load_from_json_str(&data)
}

/// Load from a JSON string.
pub fn load_from_json_str(json: &str) -> Result<ControllerConfig, ControllerError> {
    let parsed: ControllerConfig = serde_json::from_str(json).map_err(ControllerError::Json)?;
    validate(parsed)
}

/// Load from `DECS_CONTROLLER_URL`, `DECS_JWT` and `DECS_ALLOW_UNVERIFIED_SSL`.
pub fn load_from_env() -> Result<ControllerConfig, ControllerError> {
    load_from_lookup(|var| std::env::var(var).ok())
}

fn load_from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<ControllerConfig, ControllerError> {
    let url = get(ENV_CONTROLLER_URL).ok_or_else(|| ControllerError::MissingEnv(ENV_CONTROLLER_URL.to_string()))?;
    let mut config = ControllerConfig::new(url);
    if let Some(jwt) = get(ENV_JWT).filter(|t| !t.is_empty()) {
        config = config.with_jwt(jwt);
    }
    let allow = get(ENV_ALLOW_UNVERIFIED_SSL)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false);
    validate(config.with_unverified_ssl(allow))
}

fn validate(config: ControllerConfig) -> Result<ControllerConfig, ControllerError> {
    let parsed = Url::parse(config.controller_url())
        .map_err(|e| ControllerError::InvalidUrl(format!("'{}': {e}", config.controller_url())))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ControllerError::InvalidUrl(format!(
            "'{}': scheme must be http or https",
            config.controller_url()
        )));
    }
    Ok(config)
}

// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error("missing env var: {0}")]
    MissingEnv(String),
    #[error("invalid controller URL {0}")]
    InvalidUrl(String),
    #[error("invalid JWT: {0}")]
    InvalidJwt(String),
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
