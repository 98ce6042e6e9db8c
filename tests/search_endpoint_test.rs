use axum::http::StatusCode;
use axum_test::TestServer;
use barcode_lookup::config::toml_config::TomlConfig;
use barcode_lookup::{build_router, AppConfig, AppState, SearchConfig, ServerArgs};
use httpmock::prelude::*;
use serde_json::{json, Value};

const SEARCH_PATH: &str = "/customsearch/v1";

fn search_config(server: &MockServer) -> SearchConfig {
    let endpoint = server.url(SEARCH_PATH);
    let env = move |key: &str| match key {
        "GOOGLE_API_KEY" => Some("test-key".to_string()),
        "CSE_ID" => Some("test-cx".to_string()),
        "SEARCH_ENDPOINT" => Some(endpoint.clone()),
        _ => None,
    };
    AppConfig::from_sources(&ServerArgs::default(), &TomlConfig::default(), env)
        .unwrap()
        .search
}

fn test_server(server: &MockServer) -> TestServer {
    let state = AppState::from_settings(&search_config(server)).unwrap();
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn hello_returns_greeting() {
    let upstream = MockServer::start_async().await;
    let app = test_server(&upstream);

    let response = app.get("/hello").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Hello from the Barcode Search API!");
}

#[tokio::test]
async fn search_returns_product() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path(SEARCH_PATH)
                .query_param("q", "8901262150125 site:bigbasket.com")
                .query_param("cx", "test-cx")
                .query_param("key", "test-key")
                .query_param("searchType", "image")
                .query_param("num", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "items": [{
                        "link": "https://www.bigbasket.com/media/uploads/p/l/104860_8-amul-butter.jpg",
                        "image": {
                            "contextLink": "https://www.bigbasket.com/pd/104860/amul-butter-pasteurised-500-g-carton/"
                        }
                    }]
                }));
        })
        .await;

    let app = test_server(&upstream);
    let response = app
        .get("/search")
        .add_query_param("barcode", "8901262150125")
        .await;

    mock.assert_async().await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "product_name": "Amul Butter Pasteurised 500 G Carton",
            "image_url": "https://www.bigbasket.com/media/uploads/p/l/104860_8-amul-butter.jpg",
            "page_url": "https://www.bigbasket.com/pd/104860/amul-butter-pasteurised-500-g-carton/"
        })
    );
}

#[tokio::test]
async fn search_without_context_link_uses_fallback_title() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).json_body(json!({
                "items": [{ "link": "https://img.example/only-image.jpg" }]
            }));
        })
        .await;

    let app = test_server(&upstream);
    let response = app.get("/search").add_query_param("barcode", "123").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["product_name"], "Unknown Product");
    assert_eq!(body["image_url"], "https://img.example/only-image.jpg");
    assert!(body.get("page_url").is_some());
    assert!(body["page_url"].is_null());
}

#[tokio::test]
async fn search_without_barcode_is_bad_request() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).json_body(json!({ "items": [] }));
        })
        .await;

    let app = test_server(&upstream);

    let missing = app.get("/search").await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "error": "Missing 'barcode' parameter" })
    );

    let empty = app.get("/search").add_query_param("barcode", "").await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let blank = app.get("/search").add_query_param("barcode", "   ").await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn search_with_no_items_is_not_found() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).json_body(json!({
                "kind": "customsearch#search",
                "searchInformation": { "totalResults": "0" }
            }));
        })
        .await;

    let app = test_server(&upstream);
    let response = app.get("/search").add_query_param("barcode", "0000000000000").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "error": "No results found" }));
}

#[tokio::test]
async fn upstream_failure_is_generic_server_error() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(403).json_body(json!({
                "error": { "code": 403, "message": "API key not valid. secret-detail" }
            }));
        })
        .await;

    let app = test_server(&upstream);
    let response = app.get("/search").add_query_param("barcode", "123").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    assert!(!text.contains("secret-detail"));
    assert!(!text.contains("403"));
    assert_eq!(
        serde_json::from_str::<Value>(&text).unwrap(),
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn malformed_upstream_body_is_server_error() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let app = test_server(&upstream);
    let response = app.get("/search").add_query_param("barcode", "123").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("maintenance"));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let upstream = MockServer::start_async().await;
    let app = test_server(&upstream);

    let response = app.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn repeated_barcode_is_json_bad_request() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).json_body(json!({ "items": [] }));
        })
        .await;

    let app = test_server(&upstream);
    let response = app
        .get("/search")
        .add_query_params([("barcode", "1"), ("barcode", "2")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid query string: expected a single 'barcode' parameter" })
    );
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn wrong_method_is_json_method_not_allowed() {
    let upstream = MockServer::start_async().await;
    let app = test_server(&upstream);

    let search = app.post("/search").add_query_param("barcode", "1").await;
    assert_eq!(search.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(search.json::<Value>(), json!({ "error": "Method Not Allowed" }));

    let hello = app.delete("/hello").await;
    assert_eq!(hello.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(hello.json::<Value>(), json!({ "error": "Method Not Allowed" }));
}
