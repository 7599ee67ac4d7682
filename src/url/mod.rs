//! URL handling module for Ngram-Spider
//!
//! This module provides seed parsing, crawl-scope checks, and the default
//! output file naming derived from the input source.

mod domain;

use crate::config::Source;
use crate::{UrlError, UrlResult};
use std::path::{Path, PathBuf};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, in_scope};

/// Suffix appended to the default output file name
pub const OUTPUT_SUFFIX: &str = "_spider.txt";

/// Parses a seed URL given on the command line or in a config file
///
/// Input without a scheme is treated as `https://`. Only HTTP and HTTPS seeds
/// with a host are accepted.
///
/// # Examples
///
/// ```
/// use ngram_spider::url::parse_seed;
///
/// let url = parse_seed("example.com/docs").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn parse_seed(input: &str) -> UrlResult<Url> {
    let input = input.trim();
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if extract_domain(&url).map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url)
}

/// Derives the default output path for a source
///
/// URL sources use the hostname without a leading `www.`; file sources use the
/// file stem. Both get the `_spider.txt` suffix and land in the working directory.
pub fn default_output_name(source: &Source) -> PathBuf {
    let stem = match source {
        Source::Url(url) => {
            let host = extract_domain(url).unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Source::File(path) => file_stem(path),
    };

    PathBuf::from(format!("{}{}", stem, OUTPUT_SUFFIX))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
