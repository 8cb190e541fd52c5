//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fortios_config::ConfigError;
use fortios_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(fortiform::connection_failed),
        help(
            "Check that the FortiGate is reachable and the REST API is enabled.\n\
             URL: {url}\n\
             Try: fortiform status --insecure"
        )
    )]
    ConnectionFailed { url: String, message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(fortiform::auth_failed),
        help(
            "Verify the REST API administrator token and its trusted hosts.\n\
             Run: fortiform config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(fortiform::no_credentials),
        help(
            "Store one with: fortiform config set-token --profile {profile}\n\
             Or set the FORTIOS_ACCESS_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Types and objects ────────────────────────────────────────────
    #[error("Unknown {kind} type '{type_name}'")]
    #[diagnostic(
        code(fortiform::unknown_type),
        help("Run: fortiform {list_command} to see supported types")
    )]
    UnknownType {
        kind: &'static str,
        type_name: String,
        list_command: &'static str,
    },

    #[error("{message}")]
    #[diagnostic(code(fortiform::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(fortiform::invalid_config),
        help("Run: fortiform schema <TYPE> to see the accepted attributes")
    )]
    InvalidConfig { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(fortiform::api_error), help("FortiOS error code: {code}"))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fortiform::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(fortiform::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: fortiform config set hostname <ADDRESS> --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No FortiGate configured")]
    #[diagnostic(
        code(fortiform::no_config),
        help(
            "Pass --hostname, set FORTIOS_ACCESS_HOSTNAME, or add a profile.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Keyring error: {message}")]
    #[diagnostic(code(fortiform::keyring))]
    Keyring { message: String },

    #[error(transparent)]
    #[diagnostic(code(fortiform::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(fortiform::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(fortiform::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::Keyring { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::UnknownType { .. }
            | Self::InvalidConfig { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        // Keep the outer "error creating X resource: ..." wording; classify
        // by the innermost cause.
        let message = err.to_string();
        match err.root() {
            CoreError::ConnectionFailed { url, .. } => CliError::ConnectionFailed {
                url: url.clone(),
                message,
            },

            CoreError::AuthenticationFailed { .. } => CliError::AuthFailed { message },

            CoreError::UnknownResource { type_name } => CliError::UnknownType {
                kind: "resource",
                type_name: type_name.clone(),
                list_command: "resources",
            },

            CoreError::UnknownDataSource { type_name } => CliError::UnknownType {
                kind: "data source",
                type_name: type_name.clone(),
                list_command: "data-sources",
            },

            CoreError::Validation { .. } | CoreError::MissingId { .. } => {
                CliError::InvalidConfig { message }
            }

            CoreError::NotFound { .. } => CliError::NotFound { message },

            CoreError::Api { code, .. } => CliError::ApiError {
                code: code.map_or_else(|| "none".into(), |c| c.to_string()),
                message,
            },

            CoreError::Config { .. } => CliError::Validation {
                field: "provider".into(),
                reason: message,
            },

            CoreError::Operation { .. } | CoreError::Describe { .. } | CoreError::Internal(_) => {
                CliError::ApiError {
                    code: "internal".into(),
                    message,
                }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_api_error_keeps_outer_message() {
        let err = CoreError::Operation {
            action: "creating",
            object: "FirewallAddress".into(),
            source: Box::new(CoreError::Api {
                message: "Invalid input".into(),
                code: Some(-651),
                status: Some(500),
            }),
        };
        let cli: CliError = err.into();
        assert_eq!(
            cli.to_string(),
            "error creating FirewallAddress resource: Invalid input"
        );
        assert!(matches!(cli, CliError::ApiError { ref code, .. } if code == "-651"));
        assert_eq!(cli.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn unknown_type_is_a_usage_error() {
        let cli: CliError = CoreError::UnknownResource {
            type_name: "firewall_bogus".into(),
        }
        .into();
        assert_eq!(cli.exit_code(), exit_code::USAGE);
        assert_eq!(cli.to_string(), "Unknown resource type 'firewall_bogus'");
    }

    #[test]
    fn missing_import_target_maps_to_not_found() {
        let cli: CliError = CoreError::NotFound {
            object: "FirewallAddress".into(),
            id: "web".into(),
        }
        .into();
        assert_eq!(cli.exit_code(), exit_code::NOT_FOUND);
    }
}
