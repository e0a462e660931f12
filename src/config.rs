use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    /// Column holding the comments to score. Matched case-sensitively.
    pub text_column: String,
    pub sheet_name: String,
    pub preview_min_rows: usize,
    pub preview_default_rows: usize,
    pub histogram_bins: usize,
    pub lexicon_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_file_size: default_max_file_size(),
            text_column: "text".to_string(),
            sheet_name: "Sheet1".to_string(),
            preview_min_rows: 1,
            preview_default_rows: 10,
            histogram_bins: 20,
            lexicon_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` first, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            max_file_size: parse_or(&lookup, "MAX_FILE_SIZE", defaults.max_file_size)?,
            text_column: non_empty_or(&lookup, "TEXT_COLUMN", defaults.text_column)?,
            sheet_name: non_empty_or(&lookup, "SHEET_NAME", defaults.sheet_name)?,
            preview_min_rows: parse_or(&lookup, "PREVIEW_MIN_ROWS", defaults.preview_min_rows)?,
            preview_default_rows: parse_or(
                &lookup,
                "PREVIEW_DEFAULT_ROWS",
                defaults.preview_default_rows,
            )?,
            histogram_bins: parse_or(&lookup, "HISTOGRAM_BINS", defaults.histogram_bins)?,
            lexicon_path: lookup("LEXICON_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_level: non_empty_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
        };

        if config.histogram_bins == 0 {
            anyhow::bail!("HISTOGRAM_BINS must be at least 1");
        }
        if config.max_file_size == 0 {
            anyhow::bail!("MAX_FILE_SIZE must be at least 1");
        }
        // Excel caps sheet names at 31 characters.
        if config.sheet_name.chars().count() > 31 {
            anyhow::bail!("SHEET_NAME must be at most 31 characters");
        }

        Ok(config)
    }
}

pub fn load_config() -> Result<Config> {
    Config::from_env()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {}={:?}", key, raw)),
        _ => Ok(default),
    }
}

fn non_empty_or<F>(lookup: &F, key: &str, default: String) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if raw.is_empty() => Err(anyhow::anyhow!("{} must not be empty", key)),
        Some(raw) => Ok(raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.text_column, "text");
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.preview_min_rows, 1);
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.lexicon_path.is_none());
    }

    #[test]
    fn overrides_from_environment() {
        let config = Config::from_lookup(lookup(&[
            ("TEXT_COLUMN", "Comment"),
            ("PREVIEW_MIN_ROWS", "10"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("LEXICON_PATH", "/etc/lexicon.csv"),
        ]))
        .unwrap();
        assert_eq!(config.text_column, "Comment");
        assert_eq!(config.preview_min_rows, 10);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.lexicon_path, Some(PathBuf::from("/etc/lexicon.csv")));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = Config::from_lookup(lookup(&[("MAX_FILE_SIZE", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE"));
        assert!(Config::from_lookup(lookup(&[("HISTOGRAM_BINS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TEXT_COLUMN", "")])).is_err());
    }
}
