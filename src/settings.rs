use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const ENV_PREFIX: &str = "NITRO";

/// Runtime settings, overridable through `NITRO_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub cache_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub no_cache: bool,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("data/http_cache.sqlite"),
            cache_ttl_secs: 30 * 60,
            no_cache: false,
            timeout_secs: 30,
            max_retries: 3,
            user_agent: concat!("nitroradical/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let d = Settings::default();
        config::Config::builder()
            .set_default("cache_path", d.cache_path.to_string_lossy().into_owned())?
            .set_default("cache_ttl_secs", d.cache_ttl_secs as i64)?
            .set_default("no_cache", d.no_cache)?
            .set_default("timeout_secs", d.timeout_secs as i64)?
            .set_default("max_retries", d.max_retries as i64)?
            .set_default("user_agent", d.user_agent)?
            .add_source(source)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_without_overrides() {
        let s = Settings::from_source(env(&[])).unwrap();
        assert_eq!(s.cache_path, PathBuf::from("data/http_cache.sqlite"));
        assert_eq!(s.cache_ttl_secs, 1800);
        assert!(!s.no_cache);
        assert_eq!(s.max_retries, 3);
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = Settings::from_source(env(&[
            ("NITRO_CACHE_TTL_SECS", "60"),
            ("NITRO_NO_CACHE", "true"),
            ("NITRO_CACHE_PATH", "/tmp/nitro.sqlite"),
        ]))
        .unwrap();
        assert_eq!(s.cache_ttl_secs, 60);
        assert!(s.no_cache);
        assert_eq!(s.cache_path, PathBuf::from("/tmp/nitro.sqlite"));
    }
}
