// FortiOS REST API client
//
// Wraps `reqwest::Client` with CMDB URL construction, token placement,
// vdom scoping, envelope parsing and the static retry count. Every
// configuration object goes through the same five verbs; resource-specific
// knowledge (paths, field names) lives in `fortios-core`.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::{Credentials, TokenPlacement};
use crate::error::Error;
use crate::models::{CmdbResponse, SystemStatus};
use crate::transport::TransportConfig;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Human-readable text for the FortiOS error numbers seen most often.
fn describe_error_code(code: i64) -> Option<&'static str> {
    match code {
        -1 => Some("Invalid length of value"),
        -3 => Some("Entry not found"),
        -5 => Some("A duplicate entry already exists"),
        -8 => Some("Invalid IP address"),
        -9 => Some("Invalid IP netmask"),
        -15 => Some("Entry is in use"),
        -651 => Some("Input value is invalid"),
        _ => None,
    }
}

/// Async client for the FortiOS REST API.
///
/// Objects are addressed as `/api/v2/cmdb/{path}/{name}[/{mkey}]`, e.g.
/// `firewall` / `address` / `web-server`. Singleton objects such as
/// `system/global` are addressed with an empty mkey.
pub struct FortiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    retries: u32,
}

impl std::fmt::Debug for FortiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token_placement", &self.credentials.placement())
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

impl FortiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a hostname or URL, credentials and transport config.
    ///
    /// A bare hostname (`192.168.1.99`, `fgt.lab:8443`) is assumed to be HTTPS.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
            retries: transport.retries,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
        retries: u32,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
            retries,
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let raw = raw.trim();
        let mut url = if raw.contains("://") {
            Url::parse(raw)?
        } else {
            Url::parse(&format!("https://{raw}"))?
        };

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The FortiGate base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/v2/cmdb/{path}/{name}[/{mkey}]`, with the mkey
    /// percent-encoded as a single segment.
    pub(crate) fn cmdb_url(&self, path: &str, name: &str, mkey: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments
                .pop_if_empty()
                .extend(["api", "v2", "cmdb"])
                .extend(path.split('/'))
                .extend(name.split('/'));
            if !mkey.is_empty() {
                segments.push(mkey);
            }
        }
        Ok(url)
    }

    fn monitor_url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("api/v2/monitor/{endpoint}"))?)
    }

    fn query(&self, vdom: &str, filter: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !vdom.is_empty() {
            params.push(("vdom", vdom.to_owned()));
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.push(("filter", filter.to_owned()));
        }
        if self.credentials.placement() == TokenPlacement::Query {
            params.push(("access_token", self.credentials.token().to_owned()));
        }
        params
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        match self.credentials.placement() {
            TokenPlacement::Header => {
                let mut value = HeaderValue::from_str(&self.credentials.bearer()).map_err(|e| {
                    Error::Authentication {
                        message: format!("invalid API token header value: {e}"),
                    }
                })?;
                value.set_sensitive(true);
                Ok(builder.header(AUTHORIZATION, value))
            }
            TokenPlacement::Query => Ok(builder),
        }
    }

    /// Send a request, retrying transient failures up to `retries` times.
    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let mut attempt: u32 = 0;
        loop {
            debug!("{method} {url}");

            let mut builder = self.authorize(self.http.request(method.clone(), url.clone()))?;
            builder = builder.query(query);
            if let Some(body) = body {
                trace!(%body, "request body");
                builder = builder.json(body);
            }

            let result = builder.send().await.map_err(Error::from);
            let retryable = match &result {
                Ok(resp) => matches!(
                    resp.status(),
                    StatusCode::BAD_GATEWAY
                        | StatusCode::SERVICE_UNAVAILABLE
                        | StatusCode::GATEWAY_TIMEOUT
                ),
                Err(e) => e.is_transient(),
            };

            if retryable && attempt < self.retries {
                attempt += 1;
                warn!(%url, attempt, "transient failure, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }

            return result;
        }
    }

    // ── Response handling ────────────────────────────────────────────

    fn api_error(status: u16, envelope: &CmdbResponse) -> Error {
        let message = envelope
            .cli_error
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| {
                envelope.error.map(|code| match describe_error_code(code) {
                    Some(text) => format!("{text} (error {code})"),
                    None => format!("error {code}"),
                })
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        Error::Api {
            status,
            code: envelope.error,
            message,
        }
    }

    async fn read_body(status: StatusCode, resp: reqwest::Response) -> Result<String, Error> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidToken);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "insufficient permissions (HTTP 403)".into(),
            });
        }
        Ok(resp.text().await?)
    }

    async fn handle_cmdb(resp: reqwest::Response) -> Result<CmdbResponse, Error> {
        let status = resp.status();
        let body = Self::read_body(status, resp).await?;
        trace!(%body, "response body");

        let parsed = serde_json::from_str::<CmdbResponse>(&body);

        if !status.is_success() {
            return Err(match parsed {
                Ok(envelope) => Self::api_error(status.as_u16(), &envelope),
                Err(_) => Error::Api {
                    status: status.as_u16(),
                    code: None,
                    message: if body.is_empty() {
                        status.to_string()
                    } else {
                        preview(&body).to_owned()
                    },
                },
            });
        }

        let envelope = parsed.map_err(|e| {
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            }
        })?;

        if envelope.is_error() {
            let status = envelope.http_status.unwrap_or(status.as_u16());
            return Err(Self::api_error(status, &envelope));
        }

        Ok(envelope)
    }

    async fn handle_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = Self::read_body(status, resp).await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                code: None,
                message: preview(&body).to_owned(),
            });
        }
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `POST /api/v2/cmdb/{path}/{name}`.
    pub async fn create_object(
        &self,
        path: &str,
        name: &str,
        body: &Value,
        vdom: &str,
    ) -> Result<CmdbResponse, Error> {
        let url = self.cmdb_url(path, name, "")?;
        let resp = self
            .send(Method::POST, url, &self.query(vdom, None), Some(body))
            .await?;
        Self::handle_cmdb(resp).await
    }

    /// `GET /api/v2/cmdb/{path}/{name}/{mkey}`.
    ///
    /// Returns `Ok(None)` when the object does not exist.
    pub async fn read_object(
        &self,
        path: &str,
        name: &str,
        mkey: &str,
        vdom: &str,
    ) -> Result<Option<Map<String, Value>>, Error> {
        let url = self.cmdb_url(path, name, mkey)?;
        let resp = self
            .send(Method::GET, url, &self.query(vdom, None), None)
            .await?;

        match Self::handle_cmdb(resp).await {
            Ok(envelope) => Ok(envelope.into_first_result()),
            Err(e) if e.is_not_found() => {
                debug!(path, name, mkey, "object not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `PUT /api/v2/cmdb/{path}/{name}[/{mkey}]`.
    pub async fn update_object(
        &self,
        path: &str,
        name: &str,
        mkey: &str,
        body: &Value,
        vdom: &str,
    ) -> Result<CmdbResponse, Error> {
        let url = self.cmdb_url(path, name, mkey)?;
        let resp = self
            .send(Method::PUT, url, &self.query(vdom, None), Some(body))
            .await?;
        Self::handle_cmdb(resp).await
    }

    /// `DELETE /api/v2/cmdb/{path}/{name}/{mkey}`.
    pub async fn delete_object(
        &self,
        path: &str,
        name: &str,
        mkey: &str,
        vdom: &str,
    ) -> Result<(), Error> {
        let url = self.cmdb_url(path, name, mkey)?;
        let resp = self
            .send(Method::DELETE, url, &self.query(vdom, None), None)
            .await?;
        Self::handle_cmdb(resp).await.map(|_| ())
    }

    /// `GET /api/v2/cmdb/{path}/{name}` with an optional FortiOS filter
    /// expression (e.g. `name=@web`).
    pub async fn list_objects(
        &self,
        path: &str,
        name: &str,
        filter: Option<&str>,
        vdom: &str,
    ) -> Result<Vec<Map<String, Value>>, Error> {
        let url = self.cmdb_url(path, name, "")?;
        let resp = self
            .send(Method::GET, url, &self.query(vdom, filter), None)
            .await?;
        Ok(Self::handle_cmdb(resp).await?.into_results())
    }

    /// `GET /api/v2/monitor/system/status`.
    pub async fn system_status(&self) -> Result<SystemStatus, Error> {
        let url = self.monitor_url("system/status")?;
        let resp = self
            .send(Method::GET, url, &self.query("", None), None)
            .await?;
        Self::handle_json(resp).await
    }
}
