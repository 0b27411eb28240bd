// src/config.rs
//! Startup configuration for the scanner.
//!
//! Everything here is static: cutoff, cache TTL, and the keyword set are
//! loaded once at boot and never mutated at runtime. Invalid or missing
//! configuration is fatal; a scanner booted without a cutoff or keywords
//! would silently serve an empty or unfiltered table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::relevance::KeywordSet;

pub const DEFAULT_CONFIG_PATH: &str = "config/scanner.toml";
pub const ENV_CONFIG_PATH: &str = "SCANNER_CONFIG_PATH";

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Earliest acceptable deadline. Listings resolving before it are
    /// excluded; open-ended listings always pass.
    pub cutoff: NaiveDate,
    /// How long a computed table is served before sources are re-fetched.
    pub cache_ttl_secs: u64,
    /// Relevance vocabulary, matched as case-insensitive substrings.
    pub keywords: KeywordSet,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    cutoff: String,
    #[serde(default = "default_ttl")]
    cache_ttl_secs: u64,
    keywords: Vec<String>,
}

fn default_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl ScannerConfig {
    /// Load from an explicit TOML path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scanner config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using `$SCANNER_CONFIG_PATH`, falling back to
    /// `config/scanner.toml`.
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(&path)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(s).context("parsing scanner config")?;
        let cutoff = NaiveDate::parse_from_str(raw.cutoff.trim(), "%Y-%m-%d").with_context(
            || format!("invalid cutoff date {:?} (expected YYYY-MM-DD)", raw.cutoff),
        )?;
        if raw.cache_ttl_secs == 0 {
            bail!("cache_ttl_secs must be greater than zero");
        }
        let keywords = KeywordSet::new(&raw.keywords)?;
        Ok(Self {
            cutoff,
            cache_ttl_secs: raw.cache_ttl_secs,
            keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    const GOOD: &str = r#"
cutoff = "2026-01-01"
cache_ttl_secs = 600
keywords = ["housing", "youth"]
"#;

    #[test]
    fn parses_a_complete_config() {
        let cfg = ScannerConfig::from_toml_str(GOOD).unwrap();
        assert_eq!(cfg.cutoff, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(cfg.cache_ttl_secs, 600);
        assert_eq!(cfg.keywords.len(), 2);
    }

    #[test]
    fn ttl_defaults_when_omitted() {
        let cfg =
            ScannerConfig::from_toml_str("cutoff = \"2026-01-01\"\nkeywords = [\"housing\"]")
                .unwrap();
        assert_eq!(cfg.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn rejects_invalid_cutoff() {
        let err = ScannerConfig::from_toml_str(
            "cutoff = \"January 2026\"\nkeywords = [\"housing\"]",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid cutoff date"));
    }

    #[test]
    fn rejects_empty_keyword_list() {
        assert!(ScannerConfig::from_toml_str("cutoff = \"2026-01-01\"\nkeywords = []").is_err());
        assert!(ScannerConfig::from_toml_str(
            "cutoff = \"2026-01-01\"\nkeywords = [\"\", \"  \"]"
        )
        .is_err());
    }

    #[test]
    fn rejects_zero_ttl() {
        assert!(ScannerConfig::from_toml_str(
            "cutoff = \"2026-01-01\"\ncache_ttl_secs = 0\nkeywords = [\"housing\"]"
        )
        .is_err());
    }

    #[serial_test::serial]
    #[test]
    fn load_default_honors_env_override() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("scanner.toml");
        fs::write(&p, GOOD).unwrap();

        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let cfg = ScannerConfig::load_default().unwrap();
        assert_eq!(cfg.cache_ttl_secs, 600);
        env::remove_var(ENV_CONFIG_PATH);
    }

    #[serial_test::serial]
    #[test]
    fn load_default_fails_on_missing_file() {
        env::set_var(ENV_CONFIG_PATH, "/nonexistent/scanner.toml");
        assert!(ScannerConfig::load_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);
    }
}
