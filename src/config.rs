// Cache configuration.
// Resolves the cache root, API base URL and request timeout from defaults and environment.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{CacheError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_CACHE_DIR: &str = "REPOCACHE_CACHE_DIR";
const ENV_API_BASE: &str = "REPOCACHE_API_BASE";
const ENV_TIMEOUT_SECS: &str = "REPOCACHE_TIMEOUT_SECS";

/// Get the platform cache directory (~/.cache/repocache on Linux).
pub fn default_cache_root() -> PathBuf {
    ProjectDirs::from("", "", "repocache")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory under which `<repo>/<kind>.json` files are stored.
    pub cache_root: PathBuf,
    /// Base URL of the remote API, without trailing slash.
    pub api_base: String,
    /// Upper bound on a single transport request.
    pub timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_root: default_cache_root(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CacheConfig {
    pub fn new(cache_root: impl Into<PathBuf>, api_base: &str) -> Self {
        Self {
            cache_root: cache_root.into(),
            api_base: normalize_api_base(api_base),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a config from the REPOCACHE_* environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            config.cache_root = PathBuf::from(dir);
        }
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.is_empty()) {
            config = config.with_api_base(&base);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CacheError::Config(format!("{} must be whole seconds, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = normalize_api_base(api_base);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_api_base(api_base: &str) -> String {
    api_base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.cache_root, default_cache_root());
    }

    #[test]
    fn test_env_overrides() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            (ENV_CACHE_DIR, "/tmp/rc"),
            (ENV_API_BASE, "http://localhost:8080/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.cache_root, PathBuf::from("/tmp/rc"));
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = CacheConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[test]
    fn test_api_base_trailing_slashes_trimmed() {
        let config = CacheConfig::new("data", "https://api.github.com//");
        assert_eq!(config.api_base, "https://api.github.com");
    }
}
