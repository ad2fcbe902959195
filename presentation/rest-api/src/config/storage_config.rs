use std::env;
use std::path::PathBuf;

use local_store::DEFAULT_QUOTA_BYTES;

/// Where guest carts are kept between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for the JSON file store; `None` keeps guest carts in memory.
    pub dir: Option<PathBuf>,
    pub quota_bytes: usize,
}

impl StorageConfig {
    /// Environment variables:
    /// - GUEST_STORE_DIR: Directory for guest cart files (default: in memory)
    /// - GUEST_STORE_QUOTA_BYTES: Total size allowed for guest carts (default: 5 MiB)
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("GUEST_STORE_DIR").ok(),
            env::var("GUEST_STORE_QUOTA_BYTES").ok(),
        )
    }

    fn from_values(dir: Option<String>, quota: Option<String>) -> Self {
        let dir = dir
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        let quota_bytes = quota
            .and_then(|q| q.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_QUOTA_BYTES);
        Self { dir, quota_bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_memory_with_five_mebibytes() {
        let config = StorageConfig::from_values(None, None);

        assert_eq!(config.dir, None);
        assert_eq!(config.quota_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn should_use_directory_when_set() {
        let config =
            StorageConfig::from_values(Some("/var/lib/storefront".to_string()), Some("1024".to_string()));

        assert_eq!(config.dir, Some(PathBuf::from("/var/lib/storefront")));
        assert_eq!(config.quota_bytes, 1024);
    }

    #[test]
    fn should_treat_blank_directory_as_unset() {
        let config = StorageConfig::from_values(Some("  ".to_string()), Some("lots".to_string()));

        assert_eq!(config.dir, None);
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
    }
}
