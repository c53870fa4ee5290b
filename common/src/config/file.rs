use config::{Config, ConfigError, File, Map, Value};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::format::LiteralIni;

/// INI section holding the API connection settings.
pub(crate) const SECTION: &str = "Zabbix API";

/// Config file tried when no explicit path is given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "~/.zbx.conf";

/// Settings read from the config file. A key missing from the file stays `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FileSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api: Option<String>,
    pub no_verify: Option<bool>,
}

/// Loads the `[Zabbix API]` section from the config file.
///
/// The file at `explicit` (or [`DEFAULT_CONFIG_PATH`] when `None`) is only
/// read when it is a readable regular file; otherwise the file step is
/// skipped and empty settings are returned. A file that exists but cannot be
/// parsed is logged and skipped as well, and so is a `no_verify` value that
/// is not a recognised boolean token.
pub(crate) fn load_file_settings(explicit: Option<&str>) -> FileSettings {
    let path = config_path(explicit);

    if !is_readable_file(&path) {
        debug!("Config file {} not readable, skipping", path.display());
        return FileSettings::default();
    }

    let section = match read_section(&path) {
        Ok(Some(section)) => section,
        Ok(None) => {
            debug!("No [{}] section in {}", SECTION, path.display());
            return FileSettings::default();
        }
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            return FileSettings::default();
        }
    };

    debug!("Loaded [{}] from {}", SECTION, path.display());

    let no_verify = lookup(&section, "no_verify").and_then(|raw| {
        let parsed = parse_bool(&raw);
        if parsed.is_none() {
            warn!("Ignoring no_verify={:?} in {}: not a boolean", raw, path.display());
        }
        parsed
    });

    FileSettings {
        username: lookup(&section, "username"),
        password: lookup(&section, "password"),
        api: lookup(&section, "api"),
        no_verify,
    }
}

/// Parses the boolean tokens accepted in the config file.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn config_path(explicit: Option<&str>) -> PathBuf {
    let raw = explicit.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

/// Parses the file as INI and returns the API section, if present.
fn read_section(path: &Path) -> Result<Option<Map<String, Value>>, ConfigError> {
    let name = path
        .to_str()
        .ok_or_else(|| ConfigError::Message(format!("non UTF-8 path {}", path.display())))?;
    let sections: Map<String, Value> = Config::builder()
        .add_source(File::new(name, LiteralIni).required(true))
        .build()?
        .try_deserialize()?;

    sections
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(SECTION))
        .map(|(_, value)| value.into_table())
        .transpose()
}

// Option names are matched case-insensitively, like INI readers usually do.
fn lookup(section: &Map<String, Value>, key: &str) -> Option<String> {
    let Some((_, value)) = section.iter().find(|(name, _)| name.eq_ignore_ascii_case(key)) else {
        debug!("Key {} not set in [{}]", key, SECTION);
        return None;
    };

    match value.clone().into_string() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Key {} in [{}] unusable: {}", key, SECTION, e);
            None
        }
    }
}
