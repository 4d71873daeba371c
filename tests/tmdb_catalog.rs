//! TMDB catalog client against a mock API server.

use releaseforge::catalog::{CatalogService, TmdbCatalog};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn catalog(server: &MockServer) -> TmdbCatalog {
    TmdbCatalog::new("test-key", "en-US")
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn movie_search_takes_first_similar_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Inception"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 1, "title": "Inception: The Cobol Job", "original_title": "Inception: The Cobol Job"},
                {"id": 27205, "title": "Inception", "original_title": "Inception"},
                {"id": 3, "title": "Inceptio", "original_title": "Inceptio"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "original_language": "en"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = catalog(&server)
        .await
        .search("Inception", true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.display_title, "Inception");
    assert_eq!(record.release_date.as_deref(), Some("2010-07-15"));
    assert!(record.is_movie);
}

#[tokio::test]
async fn tv_search_matches_original_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 70523, "name": "Dark", "original_name": "Dark"},
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/70523"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 70523,
            "name": "Dark",
            "first_air_date": "2017-12-01"
        })))
        .mount(&server)
        .await;

    let record = catalog(&server).await.search("Dark", false).await.unwrap().unwrap();
    assert_eq!(record.display_title, "Dark");
    assert_eq!(record.release_date.as_deref(), Some("2017-12-01"));
    assert!(!record.is_movie);
}

#[tokio::test]
async fn no_similar_result_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 1, "title": "Something Else", "original_title": "Autre Chose"},
                {"id": 2}
            ]
        })))
        .mount(&server)
        .await;

    let found = catalog(&server).await.search("Heat", true).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn threshold_is_exclusive() {
    let server = MockServer::start().await;
    // "The Office" vs "The Offica": exactly 90% similar
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 2316, "name": "The Offica", "original_name": "The Offica"}]
        })))
        .mount(&server)
        .await;

    let strict = catalog(&server).await.with_threshold(90.0);
    assert_eq!(strict.find_id("The Office", false).await.unwrap(), None);

    let lenient = catalog(&server).await.with_threshold(89.0);
    assert_eq!(lenient.find_id("The Office", false).await.unwrap(), Some(2316));
}

#[tokio::test]
async fn fetch_by_id_with_missing_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "title": "Untitled Project"
        })))
        .mount(&server)
        .await;

    let record = catalog(&server).await.fetch_by_id(42, true).await.unwrap();
    assert_eq!(record.display_title, "Untitled Project");
    assert_eq!(record.release_date, None);
}

#[tokio::test]
async fn http_errors_surface() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let err = catalog(&server).await.fetch_by_id(1, false).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("TMDB request returned error"));
    assert!(!message.contains("test-key"));
}
