// Credential and session types.
//
// The long-lived API token is operator-provisioned (Crestron Home app:
// Settings > System Control Options > Web API Settings) and is only ever
// used to obtain a short-lived session key via `GET /login`. The session
// key then rides on every authenticated call. The hub enforces an
// undocumented expiry on the key; expiry is handled reactively by the
// client, not by interval-based renewal.

use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};

/// Request header carrying the long-lived token on `GET /login`.
pub(crate) const AUTH_TOKEN_HEADER: &str = "Crestron-RestAPI-AuthToken";

/// Request header carrying the session key on every authenticated call.
pub(crate) const AUTH_KEY_HEADER: &str = "Crestron-RestAPI-AuthKey";

/// Long-lived, operator-issued API token.
///
/// Immutable for the process lifetime and never logged in full — the inner
/// secret is only exposed at the point of header insertion.
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().into())
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Short-lived authorization derived from a [`Credential`].
///
/// Exactly one session is active per client instance. Sessions are replaced
/// (a single `Arc` swap), never mutated, so concurrent readers observe
/// either the old or the new key and nothing in between.
#[derive(Debug)]
pub struct Session {
    key: String,
    acquired_at: Instant,
}

impl Session {
    pub(crate) fn new(key: String) -> Self {
        Self {
            key,
            acquired_at: Instant::now(),
        }
    }

    /// The opaque session key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// How long ago this session was acquired.
    pub fn age(&self) -> std::time::Duration {
        self.acquired_at.elapsed()
    }
}

/// Classifies hub responses as "session expired".
///
/// The hub's exact signal for an expired key versus a malformed request is
/// not documented and varies across firmware, so the set of status codes
/// treated as expiry is configurable. The default matches observed behavior:
/// HTTP 401.
#[derive(Debug, Clone)]
pub struct ExpiryClassifier {
    statuses: Vec<u16>,
}

impl Default for ExpiryClassifier {
    fn default() -> Self {
        Self {
            statuses: vec![401],
        }
    }
}

impl ExpiryClassifier {
    /// Treat the given HTTP status codes as session expiry.
    pub fn from_statuses(statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
        }
    }

    /// Returns `true` if the status indicates the session key was rejected.
    pub fn is_expired(&self, status: reqwest::StatusCode) -> bool {
        self.statuses.contains(&status.as_u16())
    }
}
