//! Web reader integration tests
//!
//! Each test runs against a local `wiremock` server, so hostnames resolve to
//! `127.0.0.1` unless a custom hostname or table entry says otherwise.

use pretty_assertions::assert_eq;
use scraper::Html;
use std::time::Duration;
use webdoc_reader::{
    Error, ExtractionError, ExtractorConfig, Metadata, StrategyTable, SubstackStrategy,
    WebDocumentExtractor, URL_KEY,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUBSTACK_POST: &str = r#"<html><body><h1 class="post-title">Hello</h1><h3 class="subtitle">World</h3><span class="byline-names">Jane</span><div class="available-content">Body text.</div></body></html>"#;

/// Address nothing listens on
const UNREACHABLE: &str = "http://127.0.0.1:1/unreachable";

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn url_only(url: &str) -> Metadata {
    [(URL_KEY.to_string(), url.to_string())].into_iter().collect()
}

#[tokio::test]
async fn test_documents_follow_input_order() {
    let server = MockServer::start().await;
    serve(&server, "/one", "<p>first</p>").await;
    serve(&server, "/two", "<p>second</p>").await;
    serve(&server, "/three", "<p>third</p>").await;

    let urls = vec![
        format!("{}/three", server.uri()),
        format!("{}/one", server.uri()),
        format!("{}/two", server.uri()),
    ];
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&urls, None, None, None).await.unwrap();

    assert_eq!(docs.len(), urls.len());
    for (doc, url) in docs.iter().zip(&urls) {
        assert_eq!(doc.url(), Some(url.as_str()));
    }
    let texts: Vec<&str> = docs.iter().map(|d| d.text()).collect();
    assert_eq!(texts, vec!["third", "first", "second"]);
}

#[tokio::test]
async fn test_fallback_is_visible_text_with_url_only() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/plain",
        "<html><head><style>p{color:red}</style></head><body><h1>Title</h1><p>Some <em>plain</em> text.</p><script>track()</script></body></html>",
    )
    .await;

    let url = format!("{}/plain", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();

    assert_eq!(docs[0].text(), "TitleSome plain text.");
    assert_eq!(docs[0].metadata(), &url_only(&url));
}

#[tokio::test]
async fn test_custom_hostname_applies_to_every_url() {
    let server = MockServer::start().await;
    serve(&server, "/a", SUBSTACK_POST).await;
    serve(&server, "/b", SUBSTACK_POST).await;

    let urls = [format!("{}/a", server.uri()), format!("{}/b", server.uri())];
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor
        .load_data(&urls, Some("substack.com"), None, None)
        .await
        .unwrap();

    assert_eq!(docs.len(), 2);
    for (doc, url) in docs.iter().zip(&urls) {
        assert_eq!(doc.text(), "Body text.");
        let expected: Metadata = [
            (URL_KEY, url.as_str()),
            (SubstackStrategy::TITLE_KEY, "Hello"),
            (SubstackStrategy::SUBTITLE_KEY, "World"),
            (SubstackStrategy::AUTHOR_KEY, "Jane"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(doc.metadata(), &expected);
    }
}

#[tokio::test]
async fn test_without_custom_hostname_local_host_falls_back() {
    let server = MockServer::start().await;
    serve(&server, "/post", SUBSTACK_POST).await;

    let url = format!("{}/post", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();

    assert_eq!(docs[0].text(), "HelloWorldJaneBody text.");
    assert_eq!(docs[0].metadata(), &url_only(&url));
}

#[tokio::test]
async fn test_strategy_keys_merge_into_metadata() {
    fn headline(page: &Html) -> Result<(String, Metadata), ExtractionError> {
        let title = webdoc_reader::ContentExtractor::select_text(page, "h1")?;
        let mut meta = Metadata::new();
        meta.insert("headline".to_string(), title);
        Ok(("from strategy".to_string(), meta))
    }

    let server = MockServer::start().await;
    serve(&server, "/news", "<h1>Big news</h1><p>details</p>").await;

    let table = StrategyTable::defaults().with("127.0.0.1", headline);
    let extractor = WebDocumentExtractor::new(Some(table)).unwrap();
    let url = format!("{}/news", server.uri());
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();

    assert_eq!(docs[0].text(), "from strategy");
    assert_eq!(docs[0].metadata()["headline"], "Big news");
    assert_eq!(docs[0].url(), Some(url.as_str()));
}

#[tokio::test]
async fn test_unreachable_url_aborts_whole_batch() {
    let server = MockServer::start().await;
    serve(&server, "/before", "<p>ok</p>").await;
    Mock::given(method("GET"))
        .and(path("/after"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>never</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let urls = [
        format!("{}/before", server.uri()),
        UNREACHABLE.to_string(),
        format!("{}/after", server.uri()),
    ];
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let result = extractor.load_data(&urls, None, None, None).await;

    match result {
        Err(Error::Fetch { url, .. }) => assert_eq!(url, UNREACHABLE),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_url_is_fetch_error() {
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let err = extractor
        .load_data(&["not a url"], None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.url(), Some("not a url"));
    assert!(matches!(err, Error::Fetch { .. }));
}

#[tokio::test]
async fn test_strategy_failure_aborts_batch() {
    let server = MockServer::start().await;
    serve(&server, "/good", SUBSTACK_POST).await;
    serve(&server, "/drifted", "<h1 class=\"post-title\">Only a title</h1>").await;

    let urls = [format!("{}/good", server.uri()), format!("{}/drifted", server.uri())];
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let err = extractor
        .load_data(&urls, Some("substack.com"), None, None)
        .await
        .unwrap_err();

    match err {
        Error::Extraction { url, source } => {
            assert_eq!(url, urls[1]);
            assert_eq!(source, ExtractionError::ElementNotFound("h3.subtitle".to_string()));
        }
        other => panic!("expected extraction error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_binary_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]))
        .mount(&server)
        .await;

    let url = format!("{}/image", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let err = extractor
        .load_data(&[url.as_str()], None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

async fn serve_raw(server: &MockServer, route: &str, body: &[u8], content_type: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_latin1_page_is_decoded() {
    let server = MockServer::start().await;
    serve_raw(&server, "/cafe", b"<p>Caf\xe9</p>", "text/html; charset=iso-8859-1").await;

    let url = format!("{}/cafe", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();

    assert_eq!(docs[0].text(), "Caf\u{e9}");
    assert_eq!(docs[0].metadata(), &url_only(&url));
}

#[tokio::test]
async fn test_shift_jis_page_is_decoded() {
    let server = MockServer::start().await;
    // "日本" in Shift_JIS
    serve_raw(&server, "/jp", b"<p>\x93\xfa\x96\x7b</p>", "text/html; charset=Shift_JIS").await;

    let url = format!("{}/jp", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();

    assert_eq!(docs[0].text(), "\u{65e5}\u{672c}");
}

#[tokio::test]
async fn test_invalid_bytes_under_utf8_charset_is_parse_error() {
    let server = MockServer::start().await;
    serve_raw(&server, "/broken", b"<p>Caf\xe9</p>", "text/html; charset=utf-8").await;

    let url = format!("{}/broken", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let err = extractor
        .load_data(&[url.as_str()], None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse { url: ref failed, .. } if *failed == url));
}

#[tokio::test]
async fn test_blank_custom_hostname_uses_url_host() {
    fn marker(_: &Html) -> Result<(String, Metadata), ExtractionError> {
        Ok(("local strategy".to_string(), Metadata::new()))
    }

    let server = MockServer::start().await;
    serve(&server, "/x", "<p>x</p>").await;

    let table = StrategyTable::empty().with("127.0.0.1", marker);
    let extractor = WebDocumentExtractor::new(Some(table)).unwrap();
    let url = format!("{}/x", server.uri());
    for blank in ["", "   "] {
        let docs = extractor
            .load_data(&[url.as_str()], Some(blank), None, None)
            .await
            .unwrap();
        assert_eq!(docs[0].text(), "local strategy");
    }
}

#[tokio::test]
async fn test_basic_auth_header_sent_on_every_request() {
    let server = MockServer::start().await;
    // base64("u:p")
    Mock::given(method("GET"))
        .and(header("authorization", "Basic dTpw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>secret</p>"))
        .expect(2)
        .mount(&server)
        .await;

    let urls = [format!("{}/plain", server.uri()), format!("{}/other", server.uri())];
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor
        .load_data(&urls, None, Some("u"), Some("p"))
        .await
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text(), "secret");
}

#[tokio::test]
async fn test_no_auth_header_without_both_credentials() {
    let server = MockServer::start().await;
    serve(&server, "/open", "<p>open</p>").await;

    let url = format!("{}/open", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    extractor
        .load_data(&[url.as_str()], None, Some("u"), None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_error_status_body_is_still_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let docs = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();
    assert_eq!(docs[0].text(), "Not Found");
}

#[tokio::test]
async fn test_timeout_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>slow</p>")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ExtractorConfig::builder().timeout_ms(200).build();
    let extractor = WebDocumentExtractor::with_config(None, config).unwrap();
    let url = format!("{}/slow", server.uri());
    let err = extractor
        .load_data(&[url.as_str()], None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}

#[tokio::test]
async fn test_extractor_reusable_across_calls() {
    let server = MockServer::start().await;
    serve(&server, "/x", "<p>x</p>").await;

    let url = format!("{}/x", server.uri());
    let extractor = WebDocumentExtractor::new(None).unwrap();
    let first = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();
    let second = extractor.load_data(&[url.as_str()], None, None, None).await.unwrap();
    assert_eq!(first, second);
}
