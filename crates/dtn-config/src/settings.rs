//! Flat key=value settings store with dotted-namespace keys.
//!
//! Does not implement the `[a; b; c;]` run-sweep expansion or the
//! `%%Name.path%%` substitution syntax — both are documented-only gaps (see
//! `DESIGN.md`); a sweep or substitution value is loaded as a literal string
//! and will fail typed lookups with [`ConfigError::Malformed`].

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, ConfigResult};

/// Raw `key = value` settings, as read from a settings file.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    values: FxHashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings text: one `key = value` per line. Blank lines and
    /// lines starting with `#` are ignored.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut values = FxHashMap::default();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| ConfigError::ParseLine(lineno + 1, raw_line.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::ParseLine(lineno + 1, raw_line.to_string()));
            }
            values.insert(key.to_string(), value.trim().to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> ConfigResult<&str> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn get_bool(&self, key: &str) -> ConfigResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => match v {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                other => Err(ConfigError::Malformed {
                    key: key.to_string(),
                    value: other.to_string(),
                    reason: "expected a boolean (true/false/1/0)".into(),
                }),
            },
        }
    }

    pub fn get_u64(&self, key: &str) -> ConfigResult<Option<u64>> {
        self.get(key)
            .map(|v| {
                v.parse::<u64>().map_err(|_| ConfigError::Malformed {
                    key: key.to_string(),
                    value: v.to_string(),
                    reason: "expected an integer".into(),
                })
            })
            .transpose()
    }

    pub fn get_f64(&self, key: &str) -> ConfigResult<Option<f64>> {
        self.get(key)
            .map(|v| {
                v.parse::<f64>().map_err(|_| ConfigError::Malformed {
                    key: key.to_string(),
                    value: v.to_string(),
                    reason: "expected a floating-point number".into(),
                })
            })
            .transpose()
    }

    /// Parse a byte-size value with optional `k`/`M` suffix (e.g. `"500k"`,
    /// `"2M"`, or a bare integer for exact bytes).
    pub fn get_bytes(&self, key: &str) -> ConfigResult<Option<u64>> {
        let Some(raw) = self.get(key) else { return Ok(None) };
        parse_byte_size(raw)
            .map(Some)
            .map_err(|reason| ConfigError::Malformed {
                key: key.to_string(),
                value: raw.to_string(),
                reason,
            })
    }

    /// Comma-separated list, e.g. `Group[0].interface1`'s `"interface1,interface2"`.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
    }

    /// All keys beginning with `prefix` (e.g. `"Group[0]."`), with the
    /// prefix stripped from the returned key.
    pub fn subsection(&self, prefix: &str) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().filter_map(move |(k, v)| {
            k.strip_prefix(prefix).map(|suffix| (suffix, v.as_str()))
        })
    }

    /// Distinct base names of every key ending in `.{suffix}` — used to
    /// discover interface names, since an interface's base name is an
    /// arbitrary user-chosen identifier (e.g. `"btInterface"`), not an index.
    pub fn base_names_with_suffix(&self, suffix: &str) -> Vec<String> {
        let needle = format!(".{suffix}");
        let mut names: Vec<String> = self
            .values
            .keys()
            .filter_map(|k| k.strip_suffix(&needle).map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

pub fn parse_byte_size(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last() {
        Some('k') | Some('K') => (&raw[..raw.len() - 1], 1_000),
        Some('M') => (&raw[..raw.len() - 1], 1_000_000),
        _ => (raw, 1),
    };
    digits
        .trim()
        .parse::<u64>()
        .map(|n| n * multiplier)
        .map_err(|_| "expected an integer with an optional k/M suffix".to_string())
}
