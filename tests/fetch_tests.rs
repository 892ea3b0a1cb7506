//! Fetch-and-lookup tests against a local mock server.

use tempfile::tempdir;
use winerr::{Category, DocumentCache, Lookup, Registry, Strategy};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const PAGE: &str = r#"<html><body><table>
<tr><th>Return value/code</th><th>Description</th></tr>
<tr><td data-th="Return value/code"><p>E_FAIL</p><p>0x80004005</p></td><td data-th="Description"><p>Unspecified failure</p></td></tr>
<tr><td data-th="Return value/code"><p>E_ABORT</p><p>0x80004004</p></td><td data-th="Description"><p>Operation aborted</p></td></tr>
</table></body></html>"#;

#[tokio::test]
async fn test_first_lookup_fetches_and_caches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cc704587.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let registry = Registry::new(vec![Category::new(
        "HRESULT",
        format!("{}/cc704587.aspx", server.uri()),
        Strategy::Default,
    )]);

    let mut lookup = Lookup::new(registry.clone(), DocumentCache::new(dir.path()).unwrap());
    let hits = lookup.lookup(Some("HRESULT"), Some("E_FAIL")).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.value, "E_FAIL");

    let cached = std::fs::read_to_string(dir.path().join("HRESULT.cache")).unwrap();
    assert_eq!(cached, PAGE);

    // A fresh process-equivalent reads the cache file, not the server.
    let mut second = Lookup::new(registry, DocumentCache::new(dir.path()).unwrap());
    let hits = second.lookup(Some("HRESULT"), Some("E_ABORT")).await;
    assert_eq!(hits[0].record.code, "0x80004004");
}

#[tokio::test]
async fn test_server_error_is_retried_next_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let registry = Registry::new(vec![Category::new(
        "HRESULT",
        format!("{}/page", server.uri()),
        Strategy::Default,
    )]);
    let mut lookup = Lookup::new(registry, DocumentCache::new(dir.path()).unwrap());

    assert!(lookup.lookup(Some("HRESULT"), Some("E_FAIL")).await.is_empty());
    assert!(!dir.path().join("HRESULT.cache").exists());

    let hits = lookup.lookup(Some("HRESULT"), Some("E_FAIL")).await;
    assert_eq!(hits.len(), 1);
    assert!(dir.path().join("HRESULT.cache").exists());
}
