//! Runtime configuration: endpoint, storage locations and cache key

use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;

/// Banners endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://www.gelostory.com/dd-images.php?endpoint=banners";

/// Key under which the cache record is stored
pub const CACHE_KEY: &str = "cachedImages";

pub const USER_AGENT: &str = concat!("WebtoonReader/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Config {
    /// Banners endpoint returning `[{url, title}]`
    pub endpoint: String,
    /// Root directory for the key-value store and downloaded images
    pub data_dir: PathBuf,
    /// Per-request timeout; `None` leaves reqwest's default (no timeout)
    pub timeout: Option<Duration>,
    /// Store the record under a key derived from the endpoint
    pub key_by_endpoint: bool,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: default_data_dir(),
            timeout: None,
            key_by_endpoint: false,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Returns the default data directory: ~/.local/share/webtoon_reader
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("webtoon_reader")
}

impl Config {
    /// SQLite file backing the key-value store
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("storage.db")
    }

    /// Directory downloaded images are written to
    pub fn image_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    /// Key for the cache record.
    ///
    /// With `key_by_endpoint` the key carries a short SHA-256 fingerprint of the
    /// endpoint, so records for different endpoints never collide.
    pub fn cache_key(&self) -> String {
        if self.key_by_endpoint {
            format!("{}:{}", CACHE_KEY, endpoint_fingerprint(&self.endpoint))
        } else {
            CACHE_KEY.to_string()
        }
    }
}

fn endpoint_fingerprint(endpoint: &str) -> String {
    let digest = Sha256::digest(endpoint.as_bytes());
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_is_fixed() {
        let config = Config::default();
        assert_eq!(config.cache_key(), "cachedImages");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_endpoint_keyed_cache_key() {
        let config = Config {
            key_by_endpoint: true,
            ..Config::default()
        };
        let key = config.cache_key();

        assert!(key.starts_with("cachedImages:"));
        assert_eq!(key.len(), "cachedImages:".len() + 16);
        // Stable across calls
        assert_eq!(key, config.cache_key());
    }

    #[test]
    fn test_endpoint_keyed_differs_per_endpoint() {
        let a = Config {
            key_by_endpoint: true,
            endpoint: "http://a.example/banners".to_string(),
            ..Config::default()
        };
        let b = Config {
            endpoint: "http://b.example/banners".to_string(),
            ..a.clone()
        };
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_derived_paths() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/reader"),
            ..Config::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/reader/storage.db"));
        assert_eq!(config.image_dir(), PathBuf::from("/tmp/reader/images"));
    }
}
