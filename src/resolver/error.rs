use std::fmt;

/// A criteria field that failed its static bounds check.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for '{field}': {reason}")]
pub struct ValidationError {
    field: &'static str,
    reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// HTTP status of a failed call, or the absence of one when the request never
/// got a response (connect / timeout errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatus(pub Option<u16>);

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "HTTP {code}"),
            None => f.write_str("no response"),
        }
    }
}

// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("API call {api} failed ({status}): {body}")]
    Transport {
        api: String,
        status: HttpStatus,
        body: String,
    },
    #[error("cannot decode response of {api}: {source}")]
    Decode {
        api: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot find {kind} name {name:?}")]
    NotFound { kind: &'static str, name: String },
    #[error("{matches} {kind} records match name {name:?}; narrow the criteria")]
    Ambiguous {
        kind: &'static str,
        name: String,
        matches: usize,
    },
    #[error("unknown lookup type '{0}'")]
    UnknownLookup(String),
}

impl LookupError {
    pub fn transport(api: &str, status: Option<u16>, body: impl Into<String>) -> Self {
        LookupError::Transport {
            api: api.to_string(),
            status: HttpStatus(status),
            body: body.into(),
        }
    }

    pub fn decode(api: &str, source: serde_json::Error) -> Self {
        LookupError::Decode {
            api: api.to_string(),
            source,
        }
    }
}
