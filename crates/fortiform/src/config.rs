//! Translation from profiles + global flags to a `ProviderConfig`.
//!
//! Flags win over the profile, the profile wins over `FORTIOS_*`
//! variables, and those win over `[defaults]`.

use secrecy::SecretString;

use fortios_config::{Config, Profile};
use fortios_core::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Layer `--hostname`, `--vdom`, `--insecure` and `--timeout` over a profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref hostname) = global.hostname {
        profile.hostname.clone_from(hostname);
    }
    if let Some(ref vdom) = global.vdom {
        profile.vdom = Some(vdom.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

/// Build a `ProviderConfig` from the config file, profile, and CLI overrides.
pub fn build_provider_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let cfg = fortios_config::load_config()?;
    build_from(&cfg, global)
}

fn build_from(cfg: &Config, global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => cfg.profile(&profile_name)?.clone(),
        None => {
            let has_host = global.hostname.is_some()
                || std::env::var(fortios_config::env::HOSTNAME).is_ok();
            if !has_host {
                return Err(CliError::NoConfig {
                    path: fortios_config::config_path().display().to_string(),
                });
            }
            Profile::default()
        }
    };
    apply_overrides(&mut profile, global);

    let token = global.token.clone().map(SecretString::from);
    Ok(fortios_config::provider_config_with_token(
        &profile,
        &profile_name,
        &cfg.defaults,
        token,
    )?)
}
