use crate::config::types::{
    Config, CrawlerConfig, NgramConfig, NgramRange, OutputConfig, RawConfig, RawCrawlerConfig,
    Source, DEFAULT_PIPELINE_CAPACITY, DEFAULT_USER_AGENT, MAX_CRAWL_DEPTH, MAX_DELAY_MS,
    MAX_NGRAM_LEN, MAX_PIPELINE_CAPACITY, MIN_CRAWL_DEPTH,
};
use crate::url::{default_output_name, parse_seed};
use crate::ConfigError;
use std::time::Duration;

/// Validates raw settings and builds the immutable runtime configuration
///
/// Any out-of-range value, or a missing/ambiguous source, is rejected here so that
/// nothing is fetched or read before the whole configuration is known to be good.
pub fn validate(raw: RawConfig) -> Result<Config, ConfigError> {
    let source = validate_source(raw.url.as_deref(), raw.file)?;
    let crawler = validate_crawler_config(&raw.crawler)?;
    let range = parse_ngram_range(raw.ngram.length.as_deref().unwrap_or("1"))?;

    let path = match raw.output.path {
        Some(path) if path.as_os_str().is_empty() => {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
        Some(path) => path,
        None => default_output_name(&source),
    };

    Ok(Config {
        source,
        crawler,
        ngram: NgramConfig { range },
        output: OutputConfig {
            path,
            sort: raw.output.sort.unwrap_or(false),
        },
    })
}

/// Exactly one of url/file must be given
fn validate_source(
    url: Option<&str>,
    file: Option<std::path::PathBuf>,
) -> Result<Source, ConfigError> {
    let url = url.filter(|u| !u.trim().is_empty());
    let file = file.filter(|f| !f.as_os_str().is_empty());

    match (url, file) {
        (Some(url), None) => {
            let seed = parse_seed(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
            Ok(Source::Url(seed))
        }
        (None, Some(file)) => Ok(Source::File(file)),
        _ => Err(ConfigError::Validation(
            "You must specify either a URL or a file, but not both".to_string(),
        )),
    }
}

/// Validates crawler configuration
fn validate_crawler_config(raw: &RawCrawlerConfig) -> Result<CrawlerConfig, ConfigError> {
    let max_depth = raw.max_depth.unwrap_or(MIN_CRAWL_DEPTH);
    if !(MIN_CRAWL_DEPTH..=MAX_CRAWL_DEPTH).contains(&max_depth) {
        return Err(ConfigError::Validation(format!(
            "crawl depth must be between {} and {}, got {}",
            MIN_CRAWL_DEPTH, MAX_CRAWL_DEPTH, max_depth
        )));
    }

    let delay_ms = raw.delay_ms.unwrap_or(0);
    if delay_ms > MAX_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "delay must be between 0 and {}ms, got {}ms",
            MAX_DELAY_MS, delay_ms
        )));
    }

    let timeout_secs = raw.timeout_secs.unwrap_or(1);
    if timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be at least 1 second, got {}",
            timeout_secs
        )));
    }

    let user_agent = raw
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    let pipeline_capacity = raw.pipeline_capacity.unwrap_or(DEFAULT_PIPELINE_CAPACITY);
    if !(1..=MAX_PIPELINE_CAPACITY).contains(&pipeline_capacity) {
        return Err(ConfigError::Validation(format!(
            "pipeline_capacity must be between 1 and {}, got {}",
            MAX_PIPELINE_CAPACITY, pipeline_capacity
        )));
    }

    Ok(CrawlerConfig {
        max_depth,
        delay: Duration::from_millis(delay_ms),
        timeout: Duration::from_secs(timeout_secs),
        user_agent,
        pipeline_capacity,
    })
}

/// Parses an n-gram length such as `"2"` or `"1-3"`
///
/// Both bounds must lie in `1..=20` and the upper bound may not be below the lower.
pub fn parse_ngram_range(spec: &str) -> Result<NgramRange, ConfigError> {
    let out_of_range = || {
        ConfigError::InvalidRange(format!(
            "'{}': lengths must be between 1 and {}",
            spec, MAX_NGRAM_LEN
        ))
    };

    let mut parts = spec.trim().splitn(2, '-');
    let min = parts
        .next()
        .and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|n| (1..=MAX_NGRAM_LEN).contains(n))
        .ok_or_else(out_of_range)?;

    let max = match parts.next() {
        Some(p) => p
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (min..=MAX_NGRAM_LEN).contains(n))
            .ok_or_else(out_of_range)?,
        None => min,
    };

    Ok(NgramRange { min, max })
}
