//! Profile-based configuration for fortiform.
//!
//! Handles TOML config loading, named FortiGate profiles, token resolution
//! (env var → keyring → plaintext), and translation to
//! [`fortios_core::ProviderConfig`]. Core never reads config files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fortios_core::{ProviderConfig, TlsVerification, TokenPlacement};

/// Keyring service name for stored API tokens.
pub const KEYRING_SERVICE: &str = "fortiform";

/// Environment variables understood by the Terraform provider.
pub mod env {
    pub const HOSTNAME: &str = "FORTIOS_ACCESS_HOSTNAME";
    pub const TOKEN: &str = "FORTIOS_ACCESS_TOKEN";
    pub const INSECURE: &str = "FORTIOS_INSECURE";
    pub const CA_BUNDLE: &str = "FORTIOS_CA_CABUNDLE";
    pub const VDOM: &str = "FORTIOS_VDOM";
    pub const HTTP_PROXY: &str = "FORTIOS_HTTP_PROXY";
}

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("No API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the active profile: the explicit one, else the configured
    /// default, else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a named profile, listing the alternatives on a miss.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.to_owned(),
                available: self.profiles.keys().cloned().collect(),
            })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    250
}
fn default_retries() -> u32 {
    1
}

/// One FortiGate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Address of the FortiGate, e.g. `192.168.1.99` or `fw.lan:8443`.
    #[serde(default)]
    pub hostname: String,

    /// Plaintext API token. Prefer `token_env` or the keyring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Name of an environment variable holding the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Send the token as `access_token=` instead of a Bearer header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_in_query: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdom: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabundlefile: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Flatten nested tables on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_table: Option<bool>,
}

// ── Paths and loading ───────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fortiform", "fortiform").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("fortiform");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the config from the default path, layered with `FORTIOS_*` env.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path`. A missing file yields the defaults.
///
/// Environment keys use `__` as the nesting separator, e.g.
/// `FORTIOS_DEFAULTS__TIMEOUT=60` or `FORTIOS_DEFAULT_PROFILE=lab`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = file_figment(path)
        .merge(Env::prefixed("FORTIOS_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load only what is stored in the config file, without env overrides.
/// Commands that write the file back start from this.
pub fn load_stored_config() -> Result<Config, ConfigError> {
    load_stored_config_from(&config_path())
}

pub fn load_stored_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(file_figment(path).extract()?)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Write `cfg` to the default path, creating parent directories.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Credentials ─────────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/token"),
    )?)
}

/// Store a token for `profile_name` in the system keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

/// Resolve the API token: `token_env` → `FORTIOS_ACCESS_TOKEN` → keyring →
/// plaintext.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(source = %env_name, "token from profile env var");
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var(env::TOKEN) {
        debug!(source = env::TOKEN, "token from environment");
        return Ok(SecretString::from(val));
    }

    if let Ok(secret) =
        keyring_entry(profile_name).and_then(|e| e.get_password().map_err(ConfigError::from))
    {
        debug!(profile = %profile_name, "token from keyring");
        return Ok(SecretString::from(secret));
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Profile → ProviderConfig ────────────────────────────────────────

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| v == "true")
}

/// Translate a profile into a [`ProviderConfig`].
///
/// Unset profile fields fall back to the provider's `FORTIOS_*` variables,
/// then to `defaults`.
pub fn profile_to_provider_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ProviderConfig, ConfigError> {
    provider_config_with_token(profile, profile_name, defaults, None)
}

/// Like [`profile_to_provider_config`], with an explicit token (e.g. from a
/// `--token` flag) that bypasses the credential chain.
pub fn provider_config_with_token(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    token: Option<SecretString>,
) -> Result<ProviderConfig, ConfigError> {
    let hostname = if profile.hostname.is_empty() {
        std::env::var(env::HOSTNAME).unwrap_or_default()
    } else {
        profile.hostname.clone()
    };
    if hostname.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "hostname".into(),
            reason: format!(
                "profile '{profile_name}' has no hostname and {} is unset",
                env::HOSTNAME
            ),
        });
    }

    let token = match token {
        Some(token) => token,
        None => resolve_token(profile, profile_name)?,
    };

    let insecure = profile
        .insecure
        .or_else(|| env_flag(env::INSECURE))
        .unwrap_or(defaults.insecure);
    let cabundle = profile
        .cabundlefile
        .clone()
        .or_else(|| std::env::var(env::CA_BUNDLE).ok().map(PathBuf::from));
    let tls = match (insecure, cabundle) {
        (true, _) => TlsVerification::DangerAcceptInvalid,
        (false, Some(path)) => TlsVerification::CustomCa(path),
        (false, None) => TlsVerification::SystemDefaults,
    };

    let http_proxy = profile
        .http_proxy
        .clone()
        .or_else(|| std::env::var(env::HTTP_PROXY).ok());
    if let Some(ref proxy) = http_proxy {
        url::Url::parse(proxy).map_err(|e| ConfigError::Validation {
            field: "http_proxy".into(),
            reason: format!("invalid URL '{proxy}': {e}"),
        })?;
    }

    let vdom = profile
        .vdom
        .clone()
        .or_else(|| std::env::var(env::VDOM).ok())
        .unwrap_or_default();

    let mut config = ProviderConfig::new(hostname, token);
    config.token_placement = if profile.token_in_query.unwrap_or(false) {
        TokenPlacement::Query
    } else {
        TokenPlacement::Header
    };
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.retries = profile.retries.unwrap_or(defaults.retries);
    config.http_proxy = http_proxy;
    config.vdom = vdom;
    config.import_table = profile.import_table;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::result_large_err)]
mod tests {
    use super::*;
    use figment::Jail;
    use secrecy::ExposeSecret;

    fn lab_profile() -> Profile {
        Profile {
            hostname: "192.168.1.99".into(),
            token: Some("plain-token".into()),
            vdom: Some("root".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 250);
        assert_eq!(cfg.defaults.retries, 1);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.default_profile = Some("lab".into());
        cfg.profiles.insert("lab".into(), lab_profile());
        save_config_to(&cfg, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[profiles.lab]"));
        assert!(!written.contains("token_env"));

        let loaded = load_config_from(&path).unwrap();
        let lab = loaded.profile("lab").unwrap();
        assert_eq!(lab.hostname, "192.168.1.99");
        assert_eq!(lab.vdom.as_deref(), Some("root"));
        assert_eq!(loaded.active_profile_name(None), "lab");
        assert_eq!(loaded.active_profile_name(Some("prod")), "prod");
    }

    #[test]
    fn stored_config_ignores_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[defaults]\ntimeout = 30\n")?;
            jail.set_env("FORTIOS_DEFAULTS__TIMEOUT", "90");

            let stored = load_stored_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(stored.defaults.timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.lab\nhostname = \"fw\"\n").unwrap();

        assert!(load_config_from(&path).is_err());
        assert!(load_stored_config_from(&path).is_err());
    }

    #[test]
    fn unknown_profile_lists_available() {
        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), lab_profile());
        match cfg.profile("prod") {
            Err(ConfigError::UnknownProfile { name, available }) => {
                assert_eq!(name, "prod");
                assert_eq!(available, vec!["lab".to_string()]);
            }
            other => panic!("expected UnknownProfile, got {other:?}"),
        }
    }

    #[test]
    fn env_overrides_nested_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "default_profile = \"lab\"\n\n[defaults]\ntimeout = 30\n",
            )?;
            jail.set_env("FORTIOS_DEFAULTS__TIMEOUT", "90");
            jail.set_env("FORTIOS_ACCESS_TOKEN", "ignored-by-config");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
            assert_eq!(cfg.defaults.timeout, 90);
            Ok(())
        });
    }

    #[test]
    fn token_env_takes_precedence() {
        Jail::expect_with(|jail| {
            jail.set_env("LAB_TOKEN", "from-profile-env");
            jail.set_env(env::TOKEN, "from-provider-env");

            let profile = Profile {
                token_env: Some("LAB_TOKEN".into()),
                ..lab_profile()
            };
            let token = resolve_token(&profile, "lab").unwrap();
            assert_eq!(token.expose_secret(), "from-profile-env");
            Ok(())
        });
    }

    #[test]
    fn provider_env_token_beats_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "from-provider-env");
            let token = resolve_token(&lab_profile(), "lab").unwrap();
            assert_eq!(token.expose_secret(), "from-provider-env");
            Ok(())
        });
    }

    #[test]
    fn profile_translates_to_provider_config() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "secret");
            let profile = Profile {
                insecure: Some(true),
                timeout: Some(60),
                token_in_query: Some(true),
                import_table: Some(true),
                ..lab_profile()
            };
            let config =
                profile_to_provider_config(&profile, "lab", &Defaults::default()).unwrap();

            assert_eq!(config.hostname, "192.168.1.99");
            assert_eq!(config.vdom, "root");
            assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
            assert_eq!(config.timeout, Duration::from_secs(60));
            assert_eq!(config.retries, 1);
            assert_eq!(config.token_placement, TokenPlacement::Query);
            assert_eq!(config.import_table, Some(true));
            assert_eq!(config.token.expose_secret(), "secret");
            Ok(())
        });
    }

    #[test]
    fn hostname_and_ca_bundle_fall_back_to_env() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "secret");
            jail.set_env(env::HOSTNAME, "fw.example.net:8443");
            jail.set_env(env::CA_BUNDLE, "/etc/ssl/forti.pem");
            jail.set_env(env::VDOM, "tenant1");

            let config =
                profile_to_provider_config(&Profile::default(), "default", &Defaults::default())
                    .unwrap();
            assert_eq!(config.hostname, "fw.example.net:8443");
            assert_eq!(
                config.tls,
                TlsVerification::CustomCa(PathBuf::from("/etc/ssl/forti.pem"))
            );
            assert_eq!(config.vdom, "tenant1");
            Ok(())
        });
    }

    #[test]
    fn explicit_token_bypasses_chain() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "from-provider-env");
            let config = provider_config_with_token(
                &lab_profile(),
                "lab",
                &Defaults::default(),
                Some(SecretString::from("from-flag")),
            )
            .unwrap();
            assert_eq!(config.token.expose_secret(), "from-flag");
            Ok(())
        });
    }

    #[test]
    fn missing_hostname_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "secret");
            let err = profile_to_provider_config(&Profile::default(), "lab", &Defaults::default())
                .unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "hostname"));
            Ok(())
        });
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env(env::TOKEN, "secret");
            let profile = Profile {
                http_proxy: Some("not a url".into()),
                ..lab_profile()
            };
            let err = profile_to_provider_config(&profile, "lab", &Defaults::default()).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "http_proxy"));
            Ok(())
        });
    }
}
