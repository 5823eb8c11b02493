// Session-authenticated HTTP client for the hub's CWS REST API.
//
// Owns the long-lived credential and exactly one short-lived session.
// Endpoint modules (lights, sensors, etc.) are implemented as inherent
// methods via separate files to keep this module focused on transport
// mechanics: URL construction, auth-header attachment, expiry detection,
// and the single re-authenticate-and-replay cycle.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AUTH_KEY_HEADER, AUTH_TOKEN_HEADER, Credential, ExpiryClassifier, Session};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::wire::LoginResponse;

/// Async client for a Crestron Home hub.
///
/// Construction does not touch the network; the first authenticated call
/// (or an explicit [`authenticate`](Self::authenticate)) performs the
/// login. The client is reusable indefinitely: no failure leaves it in a
/// terminal state.
pub struct HomeClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
    classifier: ExpiryClassifier,
    /// The one active session. Replaced wholesale (`Arc` swap) on renewal;
    /// readers see either the old or the new session, never a partial one.
    session: RwLock<Option<Arc<Session>>>,
    /// Single-flight gate for renewal. A caller arriving mid-renewal waits
    /// here and is handed the freshly installed session instead of issuing
    /// a redundant login.
    renew_gate: tokio::sync::Mutex<()>,
    timeout: Duration,
}

impl HomeClient {
    /// Create a client for the hub at `host` with default transport
    /// settings (30s timeout, self-signed certs accepted).
    pub fn new(host: &str, credential: Credential) -> Result<Self, Error> {
        Self::with_transport(host, credential, &TransportConfig::default())
    }

    /// Create a client with explicit transport settings.
    pub fn with_transport(
        host: &str,
        credential: Credential,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{host}/cws/api"))?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credential,
            classifier: ExpiryClassifier::default(),
            session: RwLock::new(None),
            renew_gate: tokio::sync::Mutex::new(()),
            timeout: transport.timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and explicit base
    /// URL (including the `/cws/api` root). Useful for tests against a
    /// mock hub.
    pub fn with_client(base_url: Url, credential: Credential, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url,
            credential,
            classifier: ExpiryClassifier::default(),
            session: RwLock::new(None),
            renew_gate: tokio::sync::Mutex::new(()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override how "session expired" responses are recognized.
    ///
    /// The hub's exact expiry marker is undocumented and varies across
    /// firmware; the default treats HTTP 401 as expiry.
    pub fn with_expiry_classifier(mut self, classifier: ExpiryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The hub API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The current session, if one has been acquired.
    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.read().expect("session lock poisoned").clone()
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Exchange the credential for a fresh session key, replacing any
    /// current session.
    ///
    /// Succeeds only if the hub answers `GET /login` with a 200 carrying a
    /// non-empty `authkey`; any other shape is an
    /// [`Error::Authentication`]. Calling this explicitly is optional —
    /// every operation acquires a session on demand.
    pub async fn authenticate(&self) -> Result<Arc<Session>, Error> {
        let _gate = self.renew_gate.lock().await;
        self.login().await
    }

    /// Renew the session unless another task already did.
    ///
    /// `stale` is the session the caller observed failing (or `None` on a
    /// cold start). If, once the gate is acquired, the installed session
    /// differs from `stale`, a concurrent renewal already happened and the
    /// installed session is returned without a login round trip.
    async fn renew_session(&self, stale: Option<&Arc<Session>>) -> Result<Arc<Session>, Error> {
        let _gate = self.renew_gate.lock().await;
        if let Some(current) = self.session() {
            let already_renewed = match stale {
                Some(observed) => !Arc::ptr_eq(&current, observed),
                None => true,
            };
            if already_renewed {
                return Ok(current);
            }
        }
        self.login().await
    }

    /// One login round trip. Callers must hold `renew_gate`.
    async fn login(&self) -> Result<Arc<Session>, Error> {
        const OP: &str = "authenticate";
        let url = self.api_url("login");
        debug!(%url, "acquiring session key");

        let resp = self
            .http
            .get(url)
            .header(AUTH_TOKEN_HEADER, self.credential.expose())
            .send()
            .await
            .map_err(|e| self.map_send_error(OP, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {}", preview(&body)),
            });
        }

        let body = resp.text().await.map_err(|e| Error::Transport {
            operation: OP,
            source: e,
        })?;
        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| Error::Authentication {
            message: format!("malformed login response: {e}"),
        })?;

        match login.authkey {
            Some(key) if !key.is_empty() => {
                let session = Arc::new(Session::new(key));
                *self.session.write().expect("session lock poisoned") =
                    Some(Arc::clone(&session));
                debug!("session key installed");
                Ok(session)
            }
            _ => Err(Error::Authentication {
                message: "login response is missing a non-empty `authkey`".into(),
            }),
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and parse the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, Error> {
        self.request_json(operation, Method::GET, path, None).await
    }

    /// Send an authenticated POST (optional JSON body) and parse the
    /// JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, Error> {
        self.request_json(operation, Method::POST, path, body).await
    }

    /// Core call path: attach the session key, dispatch, and on a response
    /// the classifier deems expired, re-authenticate exactly once and
    /// replay the request once. A replay that is rejected again surfaces
    /// as [`Error::Api`]; non-auth failures are never retried.
    async fn request_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, Error> {
        let session = match self.session() {
            Some(s) => s,
            None => self.renew_session(None).await?,
        };

        let mut resp = self
            .dispatch(operation, &method, path, body, &session)
            .await?;

        if self.classifier.is_expired(resp.status()) {
            warn!(operation, "session key rejected, re-authenticating and replaying once");
            let fresh = self.renew_session(Some(&session)).await?;
            resp = self
                .dispatch(operation, &method, path, body, &fresh)
                .await?;

            if self.classifier.is_expired(resp.status()) {
                return Err(Error::Api {
                    operation,
                    status: resp.status().as_u16(),
                    message: "hub rejected a freshly acquired session key".into(),
                });
            }
        }

        self.parse_json(operation, resp).await
    }

    /// One HTTP round trip with the given session key attached.
    async fn dispatch(
        &self,
        operation: &'static str,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
        session: &Session,
    ) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path);
        debug!(%method, %url, operation, "dispatching");

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(AUTH_KEY_HEADER, session.key());
        if let Some(json) = body {
            builder = builder.json(json);
        }

        builder
            .send()
            .await
            .map_err(|e| self.map_send_error(operation, e))
    }

    /// Parse a response body, classifying failures:
    /// non-2xx -> `Api`, unparseable body -> `Api`, wrong shape -> `Schema`.
    async fn parse_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                operation,
                status: status.as_u16(),
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let body = resp.text().await.map_err(|e| Error::Transport {
            operation,
            source: e,
        })?;

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| Error::Api {
            operation,
            status: status.as_u16(),
            message: format!("malformed JSON body: {e} (preview: {})", preview(&body)),
        })?;

        serde_json::from_value(value).map_err(|e| Error::Schema {
            operation,
            message: e.to_string(),
        })
    }

    fn map_send_error(&self, operation: &'static str, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                operation,
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport {
                operation,
                source: err,
            }
        }
    }

    /// Build `{base}/{path}` under the API root.
    fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid API URL")
    }
}

impl std::fmt::Debug for HomeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.session().is_some())
            .finish_non_exhaustive()
    }
}

/// Truncate a body for error messages without splitting UTF-8.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
