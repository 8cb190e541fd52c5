use thiserror::Error;

/// FortiOS returns `-3` in the `error` field when an entry does not exist.
pub const FORTIOS_ENTRY_NOT_FOUND: i64 = -3;

/// Top-level error type for the `fortios-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, and the FortiOS response envelope.
/// `fortios-core` maps these into provider diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Request rejected for lack of permissions (profile or trusthost).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The API token was rejected by the FortiGate.
    #[error("Invalid API token")]
    InvalidToken,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    ///
    /// Built through `From<reqwest::Error>`, which masks an `access_token`
    /// query parameter in the embedded URL.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── FortiOS API ─────────────────────────────────────────────────
    /// Error reported by FortiOS, either through the HTTP status or the
    /// `{"status": "error", "error": N}` envelope.
    #[error("FortiOS API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// FortiOS internal error number (e.g. `-3` for "entry not found").
        code: Option<i64>,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let redacted = err.url().and_then(redact_token);
        match redacted {
            Some(url) => Self::Transport(err.with_url(url)),
            None => Self::Transport(err),
        }
    }
}

/// Copy of `url` with the `access_token` value masked, or `None` when the
/// URL carries no token.
fn redact_token(url: &url::Url) -> Option<url::Url> {
    if !url.query_pairs().any(|(k, _)| k == "access_token") {
        return None;
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "access_token" { "********".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    Some(redacted)
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status, code, .. } => {
                *status == 404 || *code == Some(FORTIOS_ENTRY_NOT_FOUND)
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            // FortiOS reports validation failures as HTTP 500, so only gateway
            // errors count.
            Self::Api { status, .. } => (502..=504).contains(status),
            _ => false,
        }
    }

    /// Extract the FortiOS error number, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn redact_token_masks_only_the_token() {
        let url = url::Url::parse(
            "https://fw.lan/api/v2/cmdb/firewall/address/web?vdom=root&access_token=SUPERSECRET",
        )
        .unwrap();
        let redacted = redact_token(&url).unwrap();
        assert!(!redacted.as_str().contains("SUPERSECRET"));
        assert!(redacted.as_str().contains("vdom=root"));
        assert!(redacted.as_str().contains("access_token=********"));
    }

    #[test]
    fn redact_token_leaves_plain_urls_alone() {
        let url = url::Url::parse("https://fw.lan/api/v2/cmdb/firewall/address?vdom=root").unwrap();
        assert!(redact_token(&url).is_none());
    }

    #[test]
    fn entry_not_found_code_counts_as_not_found() {
        let err = Error::Api {
            status: 500,
            code: Some(FORTIOS_ENTRY_NOT_FOUND),
            message: "Entry not found".into(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            status: 503,
            code: None,
            message: "busy".into(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn validation_failures_are_not_transient() {
        let err = Error::Api {
            status: 500,
            code: Some(-651),
            message: "Input value is invalid".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Api {
            status: 400,
            code: Some(-5),
            message: "invalid value".into(),
        };
        assert!(!err.is_transient());
        assert_eq!(err.api_error_code(), Some(-5));
    }
}
