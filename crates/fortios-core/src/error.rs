// ── Core error types ──
//
// Errors surfaced by the provider engine. Transport-level failures from
// `fortios-api` are translated by the `From` impl; every CRUD failure is
// additionally wrapped in `Operation` naming the action and object type.

use thiserror::Error;

use crate::validate::Diagnostic;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to FortiGate at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Registry / input errors ──────────────────────────────────────
    #[error("Unknown resource type: {type_name}")]
    UnknownResource { type_name: String },

    #[error("Unknown data source: {type_name}")]
    UnknownDataSource { type_name: String },

    #[error("Invalid configuration: {}", render_diagnostics(.diagnostics))]
    Validation { diagnostics: Vec<Diagnostic> },

    #[error("{object} has no id; the resource is not in state")]
    MissingId { object: String },

    #[error("Cannot import non-existent remote object: {object} {id}")]
    NotFound { object: String, id: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// FortiOS error number, e.g. `-651` for invalid input.
        code: Option<i64>,
        status: Option<u16>,
    },

    /// `error creating FirewallAddress resource: ...`
    #[error("error {action} {object} resource: {source}")]
    Operation {
        action: &'static str,
        object: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("error describing {object}: {source}")]
    Describe {
        object: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CoreError {
    pub(crate) fn during(self, action: &'static str, object: &str) -> Self {
        Self::Operation {
            action,
            object: object.to_owned(),
            source: Box::new(self),
        }
    }

    pub(crate) fn describing(self, object: &str) -> Self {
        Self::Describe {
            object: object.to_owned(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping operation wrappers.
    pub fn root(&self) -> &CoreError {
        match self {
            Self::Operation { source, .. } | Self::Describe { source, .. } => source.root(),
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fortios_api::Error> for CoreError {
    fn from(err: fortios_api::Error) -> Self {
        match err {
            fortios_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            fortios_api::Error::InvalidToken => CoreError::AuthenticationFailed {
                message: "Invalid API token".into(),
            },
            fortios_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fortios_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fortios_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            fortios_api::Error::Api {
                status,
                code,
                message,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            fortios_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_wrap_names_action_and_object() {
        let err = CoreError::from(fortios_api::Error::Api {
            status: 500,
            code: Some(-651),
            message: "Invalid input".into(),
        })
        .during("creating", "FirewallAddress");

        assert_eq!(
            err.to_string(),
            "error creating FirewallAddress resource: Invalid input"
        );
        assert!(matches!(err.root(), CoreError::Api { code: Some(-651), .. }));
    }

    #[test]
    fn invalid_token_is_an_authentication_failure() {
        let err = CoreError::from(fortios_api::Error::InvalidToken);
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
