//! Config subcommand handlers.

use fortios_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply `config set KEY VALUE` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key.replace('-', "_").as_str() {
        "hostname" => profile.hostname = value,
        "token" => profile.token = Some(value),
        "token_env" => profile.token_env = Some(value),
        "token_in_query" => {
            profile.token_in_query = Some(parse_value(key, &value, "'true' or 'false'")?);
        }
        "vdom" => profile.vdom = Some(value),
        "insecure" => profile.insecure = Some(parse_value(key, &value, "'true' or 'false'")?),
        "cabundlefile" => profile.cabundlefile = Some(value.into()),
        "http_proxy" => profile.http_proxy = Some(value),
        "timeout" => profile.timeout = Some(parse_value(key, &value, "a number (seconds)")?),
        "retries" => profile.retries = Some(parse_value(key, &value, "a number")?),
        "import_table" => {
            profile.import_table = Some(parse_value(key, &value, "'true' or 'false'")?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: hostname, token, token_env, \
                     token_in_query, vdom, insecure, cabundlefile, http_proxy, timeout, \
                     retries, import_table"
                ),
            });
        }
    }
    Ok(())
}

/// Copy of `cfg` with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(MASK.into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&fortios_config::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&fortios_config::load_config()?);
            let out = output::render_single(
                global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| c.profiles.keys().cloned().collect::<Vec<_>>().join("\n"),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = fortios_config::load_stored_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_value(profile, &key, value)?;

            fortios_config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = fortios_config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: fortiform config set hostname <ADDRESS>");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = fortios_config::load_stored_config()?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            fortios_config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetToken { profile } => {
            let cfg = fortios_config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let token = rpassword::prompt_password(format!("API token for '{profile_name}': "))
                .map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            fortios_config::store_token(&profile_name, &token)?;
            eprintln!("✓ Token for profile '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_dashed_keys_and_parses_values() {
        let mut profile = Profile::default();
        set_profile_value(&mut profile, "hostname", "fw.lan".into()).unwrap();
        set_profile_value(&mut profile, "import-table", "true".into()).unwrap();
        set_profile_value(&mut profile, "timeout", "60".into()).unwrap();
        assert_eq!(profile.hostname, "fw.lan");
        assert_eq!(profile.import_table, Some(true));
        assert_eq!(profile.timeout, Some(60));
    }

    #[test]
    fn set_rejects_bad_values_and_keys() {
        let mut profile = Profile::default();
        assert!(set_profile_value(&mut profile, "insecure", "maybe".into()).is_err());
        assert!(set_profile_value(&mut profile, "site", "default".into()).is_err());
    }

    #[test]
    fn show_masks_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                token: Some("s3cret".into()),
                ..Profile::default()
            },
        );
        let shown = redacted(&cfg);
        assert_eq!(shown.profiles["lab"].token.as_deref(), Some(MASK));
    }
}
