// Shared transport configuration for building reqwest::Client instances.
//
// TLS, timeout, proxy and the static retry count live here so the CMDB
// client only deals with URL construction and envelope parsing.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

/// Retry count applied uniformly to every request.
pub const DEFAULT_RETRIES: u32 = 1;

/// TLS verification mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA bundle from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (FortiGates ship with self-signed certs).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Extra attempts after the first one for transient failures.
    pub retries: u32,
    /// Optional HTTP(S) proxy URL.
    pub http_proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(250),
            retries: DEFAULT_RETRIES,
            http_proxy: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("fortiform/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA bundle: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA bundle: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref proxy) = self.http_proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Tls(format!("invalid HTTP proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
