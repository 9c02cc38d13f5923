use super::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DDG_PAGE: &str = r#"
    <html><body>
        <div class="result">
            <a class="result__a" href="/l/?uddg=https%3A%2F%2Fclinic.example.com%2Ffever">Fever basics</a>
            <a class="result__snippet">Most fevers resolve on their own.</a>
        </div>
    </body></html>
"#;

fn config_for(server: &MockServer, api_key: Option<&str>) -> WebConfig {
    WebConfig {
        serpapi_key: api_key.map(str::to_string),
        serpapi_url: format!("{}/search", server.uri()),
        duckduckgo_url: format!("{}/html/", server.uri()),
        search_timeout_seconds: 5,
        fetch_timeout_seconds: 5,
        ..WebConfig::default()
    }
}

#[test]
fn rejects_invalid_endpoints() {
    let config = WebConfig {
        serpapi_url: "::not-a-url".to_string(),
        ..WebConfig::default()
    };
    assert!(WebSearchEngine::new(&config).is_err());
}

#[test]
fn blank_api_key_means_no_serpapi() {
    let config = WebConfig {
        serpapi_key: Some(String::new()),
        ..WebConfig::default()
    };
    let engine = WebSearchEngine::new(&config).expect("engine should build");
    assert!(!engine.has_api_key());
}

#[tokio::test(flavor = "multi_thread")]
async fn duckduckgo_search_appends_health_terms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "fever in adults health medical"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DDG_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = WebSearchEngine::new(&config_for(&server, None)).expect("engine should build");
    let hits = engine
        .search("fever in adults", 3)
        .expect("search should succeed");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Fever basics");
    assert_eq!(hits[0].url, "https://clinic.example.com/fever");
}

#[tokio::test(flavor = "multi_thread")]
async fn serpapi_is_used_when_key_is_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api_key", "secret"))
        .and(query_param("num", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "organic_results": [
                { "title": "One", "snippet": "first", "link": "https://one.example.com" },
                { "title": "Two", "snippet": "second", "link": "https://two.example.com" },
                { "title": "Three", "snippet": "third", "link": "https://three.example.com" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine =
        WebSearchEngine::new(&config_for(&server, Some("secret"))).expect("engine should build");
    let hits = engine.search("fever", 2).expect("search should succeed");

    assert_eq!(
        hits,
        vec![
            SearchHit {
                title: "One".to_string(),
                snippet: "first".to_string(),
                url: "https://one.example.com".to_string(),
            },
            SearchHit {
                title: "Two".to_string(),
                snippet: "second".to_string(),
                url: "https://two.example.com".to_string(),
            },
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn serpapi_failure_falls_back_to_duckduckgo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DDG_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let engine =
        WebSearchEngine::new(&config_for(&server, Some("bad-key"))).expect("engine should build");
    let hits = engine.search("fever", 3).expect("fallback should succeed");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Fever basics");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_fails_when_every_provider_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let engine = WebSearchEngine::new(&config_for(&server, None)).expect("engine should build");
    assert!(engine.search("fever", 3).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_content_extracts_page_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fever"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><nav>Menu</nav><p>Drink plenty of fluids.</p></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let engine = WebSearchEngine::new(&config_for(&server, None)).expect("engine should build");

    let text = engine
        .fetch_content(&format!("{}/fever", server.uri()))
        .expect("fetch should succeed");
    assert_eq!(text, "Drink plenty of fluids.");

    assert!(
        engine
            .fetch_content(&format!("{}/missing", server.uri()))
            .is_err()
    );
}
