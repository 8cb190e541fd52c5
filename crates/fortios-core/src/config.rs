// ── Runtime provider configuration ──
//
// Describes how to reach one FortiGate. The CLI builds a `ProviderConfig`
// from its profiles and hands it in; core never reads config files.

use std::path::PathBuf;
use std::time::Duration;

use fortios_api::{TlsMode, TokenPlacement, TransportConfig};
use secrecy::SecretString;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// CA bundle file (`cabundlefile`).
    CustomCa(PathBuf),
    /// Skip verification (`insecure = true`).
    DangerAcceptInvalid,
}

impl From<TlsVerification> for TlsMode {
    fn from(tls: TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// FortiGate address, with or without scheme (`192.168.1.99:8443`).
    pub hostname: String,
    pub token: SecretString,
    pub token_placement: TokenPlacement,
    pub tls: TlsVerification,
    pub timeout: Duration,
    pub retries: u32,
    pub http_proxy: Option<String>,
    /// Default vdom; `vdomparam` on a resource overrides it.
    pub vdom: String,
    /// Flatten nested tables on import. `None` falls back to
    /// `FORTIOS_IMPORT_TABLE`.
    pub import_table: Option<bool>,
}

impl ProviderConfig {
    pub fn new(hostname: impl Into<String>, token: SecretString) -> Self {
        let transport = TransportConfig::default();
        Self {
            hostname: hostname.into(),
            token,
            token_placement: TokenPlacement::default(),
            tls: TlsVerification::default(),
            timeout: transport.timeout,
            retries: transport.retries,
            http_proxy: None,
            vdom: String::new(),
            import_table: None,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone().into(),
            timeout: self.timeout,
            retries: self.retries,
            http_proxy: self.http_proxy.clone(),
        }
    }
}
