use config::{FileStoredFormat, Format, Map, Value, ValueKind};
use ini::{Ini, ParseOption};
use std::error::Error;

/// INI format that hands values over exactly as written.
///
/// The stock `config` INI format strips surrounding quotes and expands
/// backslash escapes, which corrupts passwords such as `"secret"` or `a\nb`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LiteralIni;

impl Format for LiteralIni {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> Result<Map<String, Value>, Box<dyn Error + Send + Sync>> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)?;

        let mut map = Map::new();
        for (section, properties) in ini.iter() {
            let entries: Map<String, Value> = properties
                .iter()
                .map(|(key, value)| {
                    (key.to_string(), Value::new(uri, ValueKind::String(value.to_string())))
                })
                .collect();

            match section {
                Some(section) => {
                    map.insert(section.to_string(), Value::new(uri, ValueKind::Table(entries)));
                }
                None => map.extend(entries),
            }
        }

        Ok(map)
    }
}

impl FileStoredFormat for LiteralIni {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["ini", "conf"]
    }
}
