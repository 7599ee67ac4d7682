use crate::config::types::{Config, RawConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads raw settings from a TOML configuration file
///
/// The result is not validated yet; layer CLI overrides on top with
/// [`RawConfig::merge`] and pass it to [`build_config`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ngram_spider::config::load_config;
///
/// let raw = load_config(Path::new("spider.toml")).unwrap();
/// println!("Seed: {:?}", raw.url);
/// ```
pub fn load_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawConfig = toml::from_str(&content)?;
    Ok(raw)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the settings that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration file and returns both the raw settings and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(RawConfig, String), ConfigError> {
    let raw = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((raw, hash))
}

/// Builds the validated configuration from an optional file plus overrides
///
/// # Arguments
///
/// * `file` - Optional TOML configuration file
/// * `overrides` - Settings given on the command line; these win over the file
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and the file hash, if a file was used
/// * `Err(ConfigError)` - The file could not be read or the merged settings are invalid
pub fn build_config(
    file: Option<&Path>,
    overrides: RawConfig,
) -> Result<(Config, Option<String>), ConfigError> {
    let (base, hash) = match file {
        Some(path) => {
            let (raw, hash) = load_config_with_hash(path)?;
            (raw, Some(hash))
        }
        None => (RawConfig::default(), None),
    };

    let config = validate(base.merge(overrides))?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{RawCrawlerConfig, Source};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
url = "https://example.com/"

[crawler]
max-depth = 3
delay-ms = 100
timeout-secs = 5

[ngram]
length = "1-3"

[output]
path = "./words.txt"
sort = true
"#;

        let file = create_temp_config(config_content);
        let raw = load_config(file.path()).unwrap();

        assert_eq!(raw.url.as_deref(), Some("https://example.com/"));
        assert_eq!(raw.crawler.max_depth, Some(3));
        assert_eq!(raw.crawler.delay_ms, Some(100));
        assert_eq!(raw.ngram.length.as_deref(), Some("1-3"));
        assert_eq!(raw.output.sort, Some(true));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/spider.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_build_config_cli_overrides_file() {
        let file = create_temp_config(
            r#"
url = "https://example.com/"

[crawler]
max-depth = 3
delay-ms = 100
"#,
        );

        let overrides = RawConfig {
            crawler: RawCrawlerConfig {
                max_depth: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };

        let (config, hash) = build_config(Some(file.path()), overrides).unwrap();
        assert_eq!(config.crawler.max_depth, 7);
        assert_eq!(config.crawler.delay, Duration::from_millis(100));
        assert!(matches!(config.source, Source::Url(_)));
        assert_eq!(hash.map(|h| h.len()), Some(64));
    }

    #[test]
    fn test_build_config_with_validation_error() {
        let file = create_temp_config(
            r#"
url = "https://example.com/"

[ngram]
length = "21"
"#,
        );

        let result = build_config(Some(file.path()), RawConfig::default());
        assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_build_config_rejects_huge_pipeline_capacity() {
        let file = create_temp_config(
            r#"
url = "https://example.com/"

[crawler]
pipeline-capacity = 9223372036854775807
"#,
        );

        let result = build_config(Some(file.path()), RawConfig::default());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
