//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run whole
//! sessions end-to-end, checking the wordlist that lands on disk.

use ngram_spider::config::{
    build_config, Config, RawConfig, RawCrawlerConfig, RawNgramConfig, RawOutputConfig,
};
use ngram_spider::{run_session, ConfigError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML page whose visible text is exactly `words` followed by one space
fn page(words: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}"></a>"#, href))
        .collect();
    format!("<html><body>{} {}</body></html>", words, anchors)
}

async fn mount_page(server: &MockServer, route: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

fn crawl_config(seed: &str, depth: u32, length: &str, sort: bool, output: &Path) -> Config {
    let overrides = RawConfig {
        url: Some(seed.to_string()),
        crawler: RawCrawlerConfig {
            max_depth: Some(depth),
            delay_ms: Some(0),
            timeout_secs: Some(5),
            ..Default::default()
        },
        ngram: RawNgramConfig {
            length: Some(length.to_string()),
        },
        output: RawOutputConfig {
            path: Some(output.to_path_buf()),
            sort: Some(sort),
        },
        ..Default::default()
    };
    let (config, hash) = build_config(None, overrides).expect("valid test config");
    assert!(hash.is_none());
    config
}

fn sorted_lines(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path).expect("output file exists");
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    lines.sort();
    lines
}

#[tokio::test]
async fn test_single_page_unigrams() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("the cat sat", &[]), 1).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 1, "1", false, &output);

    let summary = run_session(&config, false).await.expect("session succeeds");

    assert_eq!(summary.unique_words, 3);
    assert_eq!(summary.unique_ngrams, 3);
    assert_eq!(summary.urls_crawled, Some(1));
    assert_eq!(sorted_lines(&output), vec!["cat", "sat", "the"]);
}

#[tokio::test]
async fn test_depth_one_fetches_only_seed() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("home page", &["/next"]), 1).await;
    mount_page(&server, "/next", page("next page", &[]), 0).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 1, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(1));
    assert_eq!(sorted_lines(&output), vec!["home", "page"]);
}

#[tokio::test]
async fn test_depth_two_stops_after_one_hop() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("root", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", page("alpha", &["/deep"]), 1).await;
    mount_page(&server, "/b", page("bravo", &[]), 1).await;
    mount_page(&server, "/deep", page("deep", &[]), 0).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 2, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(3));
    assert_eq!(sorted_lines(&output), vec!["alpha", "bravo", "root"]);
}

#[tokio::test]
async fn test_cycles_are_fetched_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("home", &["/loop", "/"]), 1).await;
    mount_page(&server, "/loop", page("loop", &["/", "/loop"]), 1).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 5, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(2));
    assert_eq!(sorted_lines(&output), vec!["home", "loop"]);
}

#[tokio::test]
async fn test_other_hosts_are_not_crawled() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    // Same server, addressed by a different hostname
    let port = url::Url::parse(&elsewhere.uri())
        .unwrap()
        .port()
        .expect("mock server port");
    let foreign = format!("http://localhost:{}/outside", port);

    mount_page(&server, "/", page("inside", &[&foreign]), 1).await;
    mount_page(&elsewhere, "/outside", page("outside", &[]), 0).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 3, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(1));
    assert_eq!(sorted_lines(&output), vec!["inside"]);
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("still here", &["/gone", "/ok"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found words"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", page("fine", &[]), 1).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 2, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(2));
    assert_eq!(sorted_lines(&output), vec!["fine", "here", "still"]);
}

#[tokio::test]
async fn test_unreachable_seed_writes_empty_wordlist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 3, "1", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.urls_crawled, Some(0));
    assert_eq!(summary.unique_ngrams, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn test_ngrams_do_not_span_documents() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("alpha beta", &["/next"]), 1).await;
    mount_page(&server, "/next", page("gamma delta", &[]), 1).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 2, "2", false, &output);

    let summary = run_session(&config, false).await.unwrap();

    assert_eq!(summary.unique_words, 4);
    assert_eq!(sorted_lines(&output), vec!["alpha beta", "gamma delta"]);
}

#[tokio::test]
async fn test_sorted_output_ranks_across_pages() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("x y x", &["/more"]), 1).await;
    mount_page(&server, "/more", page("x z y", &[]), 1).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    let config = crawl_config(&format!("{}/", server.uri()), 2, "1", true, &output);

    run_session(&config, false).await.unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "x\ny\nz\n");
}

#[tokio::test]
async fn test_invalid_ngram_length_rejected_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("never", &[])))
        .expect(0)
        .mount(&server)
        .await;

    for length in ["0", "21", "3-2", "abc"] {
        let overrides = RawConfig {
            url: Some(format!("{}/", server.uri())),
            ngram: RawNgramConfig {
                length: Some(length.to_string()),
            },
            ..Default::default()
        };

        let err = build_config(None, overrides).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidRange(_)),
            "length {:?} gave {:?}",
            length,
            err
        );
    }
}

#[tokio::test]
async fn test_url_and_file_are_mutually_exclusive() {
    let overrides = RawConfig {
        url: Some("https://example.com/".to_string()),
        file: Some("words.txt".into()),
        ..Default::default()
    };

    let err = build_config(None, overrides).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("not both"));
}
