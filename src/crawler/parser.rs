//! HTML parser for extracting links and visible text
//!
//! This module handles parsing fetched documents to extract:
//! - Outbound anchors to follow, resolved against the document's own URL
//! - The visible text, with `<script>` and `<style>` content removed

use scraper::node::Node;
use scraper::{Html, Selector};
use url::Url;

/// Path suffixes that mark a link as crawlable content (e.g. files on a file server)
pub const CONTENT_SUFFIXES: &[&str] = &[".html", ".htm", ".txt"];

/// Elements whose text is never part of a document's visible content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Extracted information from a fetched document
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Visible text of the document
    pub text: String,

    /// Crawl candidates found in the document (absolute URLs, document order)
    pub links: Vec<Url>,
}

/// Parses a document and extracts its text and links
///
/// # Example
///
/// ```
/// use ngram_spider::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>hello world</p><a href="/next.html">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert!(parsed.text.contains("hello world"));
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/next.html");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Collects the visible text of the document
///
/// Text nodes are concatenated in document order without added separators, so
/// words are split exactly where the markup had whitespace.
pub fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => NON_CONTENT_ELEMENTS.contains(&element.name()),
            _ => false,
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

/// Extracts crawl candidates from `<a href>` tags
///
/// A link is a candidate if its href ends in one of [`CONTENT_SUFFIXES`] or is
/// not a same-page fragment (`#...`). Candidates are resolved against `base_url`;
/// hrefs that cannot be resolved are logged and skipped. Scope filtering is left
/// to the caller.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_crawl_candidate(href) {
            continue;
        }

        match base_url.join(href) {
            Ok(absolute_url) => links.push(absolute_url),
            Err(e) => {
                tracing::debug!("Skipping malformed link '{}' on {}: {}", href, base_url, e);
            }
        }
    }

    links
}

/// Link eligibility test applied to the raw href
pub fn is_crawl_candidate(href: &str) -> bool {
    has_any_suffix(href, CONTENT_SUFFIXES) || !href.starts_with('#')
}

fn has_any_suffix(s: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| s.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/docs/page.html").unwrap()
    }

    fn link_strings(parsed: &ParsedPage) -> Vec<&str> {
        parsed.links.iter().map(Url::as_str).collect()
    }

    #[test]
    fn test_extract_text_skips_script_and_style() {
        let html = r#"<html><head><style>body { color: red; }</style>
            <script>var hidden = 1;</script></head>
            <body><p>visible words</p><script>alert("no")</script></body></html>"#;
        let parsed = parse_html(html, &base_url());

        assert!(parsed.text.contains("visible words"));
        assert!(!parsed.text.contains("color"));
        assert!(!parsed.text.contains("hidden"));
        assert!(!parsed.text.contains("alert"));
    }

    #[test]
    fn test_extract_text_keeps_title_and_order() {
        let html = "<html><head><title>The Title</title></head><body> <p>one two</p> <p>three</p></body></html>";
        let parsed = parse_html(html, &base_url());
        let words: Vec<&str> = parsed.text.split_whitespace().collect();
        assert_eq!(words, vec!["The", "Title", "one", "two", "three"]);
    }

    #[test]
    fn test_extract_text_no_separator_between_tags() {
        let html = "<html><body><b>snow</b><i>ball</i></body></html>";
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.text.trim(), "snowball");
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(link_strings(&parsed), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_links() {
        let html = r#"<html><body>
            <a href="/root.html">Root</a>
            <a href="sibling.txt">Sibling</a>
            <a href="../up">Up</a>
        </body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(
            link_strings(&parsed),
            vec![
                "https://example.com/root.html",
                "https://example.com/docs/sibling.txt",
                "https://example.com/up",
            ]
        );
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_fragment_with_content_suffix_is_candidate() {
        assert!(is_crawl_candidate("#chapter.html"));
        assert!(!is_crawl_candidate("#top"));
        assert!(is_crawl_candidate("/about"));
        assert!(is_crawl_candidate("notes.txt"));
    }

    #[test]
    fn test_skip_unresolvable_link() {
        let html = r#"<html><body><a href="http://[::1">Broken</a><a href="/ok">Ok</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(link_strings(&parsed), vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_links_keep_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="https://other.com/page3">Link 3</a>
            </body>
            </html>
        "#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(
            link_strings(&parsed),
            vec![
                "https://example.com/page1",
                "https://example.com/page2",
                "https://other.com/page3",
            ]
        );
    }

    #[test]
    fn test_plain_text_document() {
        let parsed = parse_html("just some plain words", &base_url());
        assert_eq!(parsed.text, "just some plain words");
        assert!(parsed.links.is_empty());
    }
}
