use thiserror::Error;

/// Top-level error type for the `crestron-api` crate.
///
/// Every failure carries the name of the operation that produced it
/// (`list_lights`, `set_light_levels`, ...) so a host application can report
/// which call failed without re-deriving context. Mutation errors that can be
/// pinned to a single record also carry the offending id.
#[derive(Debug, Error)]
pub enum Error {
    // ── Caller input ────────────────────────────────────────────────
    /// Caller-supplied input violates a documented range or shape.
    /// Detected before any network call is issued.
    #[error("invalid input to {operation} (id {id}): {message}")]
    Validation {
        operation: &'static str,
        id: u32,
        message: String,
    },

    // ── Authentication ──────────────────────────────────────────────
    /// The credential was rejected, or the login response was malformed
    /// (non-200, missing or empty `authkey`).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response, or a body whose shape prevents distinguishing
    /// success from hub-side failure. Also the terminal error when a
    /// replayed request fails authentication a second time.
    #[error("API error during {operation} (HTTP {status}): {message}")]
    Api {
        operation: &'static str,
        status: u16,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The response parsed as JSON but a required field is missing or of
    /// the wrong semantic type. A contract error, never retried.
    #[error("schema error in {operation} response: {message}")]
    Schema {
        operation: &'static str,
        message: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// No response within the configured deadline. A transport failure,
    /// not an auth failure; never retried automatically.
    #[error("{operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: &'static str,
        timeout_secs: u64,
    },

    /// Network-level failure below the HTTP layer (connection refused,
    /// DNS failure, TLS handshake, ...).
    #[error("transport error during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or HTTP client construction failure.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` if this error indicates the session or credential was
    /// rejected and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error a host application may
    /// reasonably retry. The client itself never retries these.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }

    /// The id of the record that caused a validation failure, if any.
    pub fn offending_id(&self) -> Option<u32> {
        match self {
            Self::Validation { id, .. } => Some(*id),
            _ => None,
        }
    }
}
