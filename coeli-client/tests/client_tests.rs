mod common;

use coeli_client::{ClientError, CoeliClient, SearchOptions};
use coeli_types::{
    ControlledSearch, ControlledSearchCondition, ControlledSearchResponse, FacetMode, Language,
    Operator, Page,
};
use common::{config_for, entity_json, handle_json, page_json, RecordingTransport, TENANT, TOKEN};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search() -> ControlledSearch {
    ControlledSearch::new(vec![ControlledSearchCondition::simple(
        "type",
        Operator::Equals,
        "painting",
    )])
}

fn handle() -> ControlledSearchResponse {
    serde_json::from_value(handle_json("abc")).unwrap()
}

async fn client_for(server: &MockServer) -> CoeliClient {
    CoeliClient::with_config(config_for(&server.uri())).unwrap()
}

fn title(entity: coeli_format::PlainEntity) -> String {
    entity.get_text("title").unwrap_or_default().to_string()
}

// ── Request building ──

#[test]
fn request_carries_language_and_token_headers() {
    let client = CoeliClient::with_transport(config_for("https://api.test/coeli"), RecordingTransport::new()).unwrap();
    let request = client.build_request(Method::GET, "/Artwork/1", Language::Es, None);

    assert_eq!(request.url, format!("https://api.test/coeli/{TENANT}/Artwork/1"));
    assert_eq!(request.header("Accept-Language"), Some("es"));
    assert_eq!(request.header("Content-Language"), Some("es"));
    assert_eq!(request.header("Authorization"), Some(format!("Authorization {TOKEN}").as_str()));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert!(request.body.is_none());
}

#[test]
fn request_display_redacts_token() {
    let client = CoeliClient::with_transport(config_for("https://api.test"), RecordingTransport::new()).unwrap();
    let request = client.build_request(Method::POST, "/Artwork/search", Language::En, Some(json!({"a": 1})));
    let shown = request.to_string();

    assert!(shown.starts_with("POST https://api.test/t1/Artwork/search"));
    assert!(shown.contains("Authorization: <redacted>"));
    assert!(!shown.contains(TOKEN));
    assert!(shown.ends_with(r#"{"a":1}"#));
}

#[tokio::test]
async fn get_requests_send_no_body() {
    let transport = RecordingTransport::new();
    transport.respond(200, entity_json("a1", "Alpha"));
    let client = CoeliClient::with_transport(config_for("https://api.test"), transport.clone()).unwrap();

    client.try_get_entity_by_id(Language::En, "Artwork", "a1", title).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, "https://api.test/t1/Artwork/a1");
    assert!(requests[0].body.is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let result = CoeliClient::with_transport(
        coeli_client::ClientConfig::new("", TOKEN),
        RecordingTransport::new(),
    );
    assert!(matches!(result, Err(ClientError::Config(_))));
}

// ── Controlled searches ──

#[tokio::test]
async fn create_search_posts_body_with_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/t1/Artwork/search"))
        .and(header("Authorization", "Authorization secret-token"))
        .and(header("Accept-Language", "ca"))
        .and(header("Content-Language", "ca"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "conditions": [{
                "$type": "SimpleEntitySearchCondition",
                "property": "type",
                "operator": "=",
                "value": "painting"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(handle_json("abc")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let created = client
        .create_controlled_search(Language::Ca, "Artwork", &search())
        .await
        .unwrap();

    assert_eq!(created, handle());
}

#[tokio::test]
async fn get_search_formats_projects_and_rewrites_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/search/abc/"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![entity_json("a1", "Alpha"), entity_json("a2", "Beta")],
            25,
            0,
            10_000,
            2,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .get_controlled_search(
            Language::En,
            &handle(),
            |e| (title(e.clone()), e.get_text("height").unwrap_or_default().to_string()),
            &SearchOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.entities,
        vec![
            ("Alpha".to_string(), "1,234.50 cm".to_string()),
            ("Beta".to_string(), "1,234.50 cm".to_string()),
        ]
    );
    assert_eq!(response.url, "/Artwork/search/abc");
    assert_eq!(response.page.total, 2);
}

#[tokio::test]
async fn get_search_sends_facets_and_modes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/search/abc/"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(query_param("facet", "type,author"))
        .and(query_param("facetMode", "Equals,BelongsTo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 10, 20, 10_000, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let options = SearchOptions::new()
        .with_facets(["type", "author"])
        .with_page(Page::new(10, 20))
        .with_facet_modes([FacetMode::Equals, FacetMode::BelongsTo]);
    let client = client_for(&server).await;
    let response = client
        .try_get_controlled_search(Language::En, &handle(), title, &options)
        .await
        .unwrap();

    assert!(response.entities.is_empty());
}

#[tokio::test]
async fn create_and_get_chains_both_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/t1/Artwork/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(handle_json("abc")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/search/abc/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![entity_json("a1", "Alpha")],
            25,
            0,
            10_000,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .create_and_get_controlled_search(Language::En, "Artwork", &search(), title, &SearchOptions::new())
        .await
        .unwrap();

    assert_eq!(response.entities, vec!["Alpha".to_string()]);
}

#[tokio::test]
async fn failed_create_skips_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .try_create_and_get_controlled_search(Language::En, "Artwork", &search(), title, &SearchOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

// ── Entities ──

#[tokio::test]
async fn entity_by_slug_uses_slugs_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/slugs/the-kiss"))
        .and(header("Accept-Language", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entity_json("the-kiss", "Le Baiser")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let entity = client
        .get_entity_by_slug(Language::Fr, "Artwork", "the-kiss", |e| e)
        .await
        .unwrap();

    assert_eq!(entity.get_text("title"), Some("Le Baiser"));
    assert_eq!(entity.get_text("height"), Some("1\u{202f}234,50 cm"));
    assert_eq!(entity.metadata.slug, "the-kiss");
}

#[tokio::test]
async fn entities_list_maps_each_entity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [entity_json("a1", "Alpha"), entity_json("a2", "Beta")],
            "page": { "limit": 25, "offset": 0, "maxOffset": 10000, "total": 2 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.get_entities(Language::En, "Artwork", title).await.unwrap();

    assert_eq!(response.entities, vec!["Alpha".to_string(), "Beta".to_string()]);
    assert_eq!(response.page.limit, 25);
}

// ── Failures ──

#[tokio::test]
async fn not_found_resolves_to_none() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/Artwork/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.get_entity_by_id(Language::En, "Artwork", "missing", title).await.is_none());

    let err = client
        .try_get_entity_by_id(Language::En, "Artwork", "missing", title)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::NotFound { ref url } if url.ends_with("/t1/Artwork/missing")));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.try_get_entities(Language::En, "Artwork", title).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(!err.is_not_found());
    assert!(client.get_entities(Language::En, "Artwork", title).await.is_none());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .try_get_entity_by_slug(Language::En, "Artwork", "x", title)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn transport_failure_resolves_to_none() {
    let client = CoeliClient::with_transport(config_for("https://api.test"), RecordingTransport::new()).unwrap();
    assert!(client
        .create_controlled_search(Language::En, "Artwork", &search())
        .await
        .is_none());
}
