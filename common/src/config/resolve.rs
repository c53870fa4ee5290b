use std::fmt;

use super::error::SettingsError;
use super::file::{load_file_settings, FileSettings};

/// Values given on the command line. `None` (or `false`) means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api: Option<String>,
    pub no_verify: bool,
}

/// Fully resolved API connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    username: String,
    password: String,
    api: String,
    no_verify: bool,
}

impl ApiConfig {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    /// Whether TLS certificate validation is disabled.
    pub fn no_verify(&self) -> bool {
        self.no_verify
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("username", &self.username)
            .field("password", &"<set>")
            .field("api", &self.api)
            .field("no_verify", &self.no_verify)
            .finish()
    }
}

/// Loads the config file and merges the command line on top of it.
pub fn resolve_config(
    config_path: Option<&str>,
    overrides: Overrides,
) -> Result<ApiConfig, SettingsError> {
    let file = load_file_settings(config_path);
    resolve(file, overrides)
}

/// Merges file settings and command line overrides.
///
/// A non-empty command line value always wins. `--no-verify` can only turn
/// verification off; a file that sets `no_verify=true` cannot be overridden
/// back to `false` from the command line.
pub(crate) fn resolve(file: FileSettings, overrides: Overrides) -> Result<ApiConfig, SettingsError> {
    let username = pick(overrides.username, file.username).ok_or(SettingsError::MissingUsername)?;
    let password = pick(overrides.password, file.password).ok_or(SettingsError::MissingPassword)?;
    let api = pick(overrides.api, file.api).ok_or(SettingsError::MissingApi)?;

    Ok(ApiConfig {
        username,
        password,
        api,
        no_verify: overrides.no_verify || file.no_verify.unwrap_or(false),
    })
}

fn pick(cli: Option<String>, file: Option<String>) -> Option<String> {
    cli.filter(|value| !value.is_empty())
        .or_else(|| file.filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_settings() -> FileSettings {
        FileSettings {
            username: Some("fileuser".to_string()),
            password: Some("filepass".to_string()),
            api: Some("https://file.example.com/".to_string()),
            no_verify: None,
        }
    }

    fn full_overrides() -> Overrides {
        Overrides {
            username: Some("cliuser".to_string()),
            password: Some("clipass".to_string()),
            api: Some("https://cli.example.com/".to_string()),
            no_verify: false,
        }
    }

    #[test]
    fn test_file_values_used_without_overrides() {
        let config = resolve(file_settings(), Overrides::default()).unwrap();
        assert_eq!(config.username(), "fileuser");
        assert_eq!(config.password(), "filepass");
        assert_eq!(config.api(), "https://file.example.com/");
        assert!(!config.no_verify());
    }

    #[test]
    fn test_command_line_wins() {
        let config = resolve(file_settings(), full_overrides()).unwrap();
        assert_eq!(config.username(), "cliuser");
        assert_eq!(config.password(), "clipass");
        assert_eq!(config.api(), "https://cli.example.com/");
    }

    #[test]
    fn test_partial_overrides_mix_sources() {
        let overrides = Overrides {
            password: Some("clipass".to_string()),
            ..Overrides::default()
        };

        let config = resolve(file_settings(), overrides).unwrap();
        assert_eq!(config.username(), "fileuser");
        assert_eq!(config.password(), "clipass");
    }

    #[test]
    fn test_empty_override_does_not_clear_file_value() {
        let overrides = Overrides {
            username: Some(String::new()),
            ..Overrides::default()
        };

        let config = resolve(file_settings(), overrides).unwrap();
        assert_eq!(config.username(), "fileuser");
    }

    #[test]
    fn test_command_line_alone_is_enough() {
        let config = resolve(FileSettings::default(), full_overrides()).unwrap();
        assert_eq!(config.username(), "cliuser");
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = resolve(FileSettings::default(), Overrides::default()).unwrap_err();
        assert_eq!(err, SettingsError::MissingUsername);
        assert_eq!(err.to_string(), "API User not set");

        let overrides = Overrides {
            username: Some("u".to_string()),
            ..Overrides::default()
        };
        let err = resolve(FileSettings::default(), overrides.clone()).unwrap_err();
        assert_eq!(err.to_string(), "API Password not set");

        let overrides = Overrides {
            password: Some("p".to_string()),
            ..overrides
        };
        let err = resolve(FileSettings::default(), overrides).unwrap_err();
        assert_eq!(err.to_string(), "API URL is not set");
    }

    #[test]
    fn test_empty_file_value_counts_as_missing() {
        let file = FileSettings {
            api: Some(String::new()),
            ..file_settings()
        };

        let err = resolve(file, Overrides::default()).unwrap_err();
        assert_eq!(err, SettingsError::MissingApi);
    }

    #[test]
    fn test_no_verify_sources() {
        let config = resolve(file_settings(), Overrides { no_verify: true, ..full_overrides() }).unwrap();
        assert!(config.no_verify());

        let file = FileSettings {
            no_verify: Some(true),
            ..file_settings()
        };
        // The command line has no way to switch verification back on.
        let config = resolve(file, full_overrides()).unwrap();
        assert!(config.no_verify());
    }

    #[test]
    fn test_bad_no_verify_in_file_does_not_block_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zbx.conf");
        std::fs::write(&path, "[Zabbix API]\nno_verify=maybe\n").unwrap();

        let config = resolve_config(path.to_str(), full_overrides()).unwrap();
        assert_eq!(config.username(), "cliuser");
        assert!(!config.no_verify());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = resolve(file_settings(), Overrides::default()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("filepass"));
        assert!(rendered.contains("fileuser"));
    }
}
