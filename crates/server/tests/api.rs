use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_test::TestServer;
use serde_json::{Value, json};
use tower::ServiceExt;

use cineshelf_core::{services::TmdbService, storage::MemoryStore};
use cineshelf_server::{AppState, create_router};

async fn weekly(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: i64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "page": page,
        "results": [{ "id": 1000 + page, "title": format!("Week {}", page), "genre_ids": [28] }],
        "total_pages": 10000
    }))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    let query = params.get("query").cloned().unwrap_or_default();
    if query == "fail" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status_message": "Internal error" })),
        )
            .into_response();
    }
    Json(json!({
        "page": 1,
        "results": [{ "id": 100, "title": query }],
        "total_pages": 3
    }))
    .into_response()
}

async fn details(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_message": "The resource you requested could not be found." })),
        )
            .into_response();
    }
    Json(json!({
        "id": id,
        "title": format!("Movie {}", id),
        "genres": [{ "id": 28, "name": "Action" }]
    }))
    .into_response()
}

async fn videos(Path(id): Path<i64>) -> Json<Value> {
    let results = if id == 1 {
        json!([{ "key": "abc123", "name": "Official Trailer", "site": "YouTube", "type": "Trailer" }])
    } else {
        json!([])
    };
    Json(json!({ "results": results }))
}

fn stub_tmdb() -> Router {
    Router::new()
        .route("/trending/movie/week", get(weekly))
        .route(
            "/trending/movie/day",
            get(|| async { Json(json!({ "results": [{ "id": 1, "title": "Hero" }] })) }),
        )
        .route(
            "/movie/upcoming",
            get(|| async { Json(json!({ "results": [{ "id": 2, "title": "Soon" }] })) }),
        )
        .route(
            "/genre/movie/list",
            get(|| async {
                Json(json!({ "genres": [{ "id": 16, "name": "Animation" }, { "id": 28, "name": "Action" }] }))
            }),
        )
        .route("/search/movie", get(search))
        .route("/movie/{id}", get(details))
        .route("/movie/{id}/videos", get(videos))
}

async fn app() -> Router {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_tmdb()).await.unwrap();
    });

    let tmdb = TmdbService::with_base_url("test-key".to_string(), &format!("http://{}", addr), "en-US");
    let state = Arc::new(AppState::new(tmdb, Arc::new(MemoryStore::new())));
    create_router(state, None)
}

async fn setup() -> TestServer {
    TestServer::new(app().await).unwrap()
}

/// A server whose metadata API refuses every connection.
fn offline() -> TestServer {
    let tmdb = TmdbService::with_base_url("test-key".to_string(), "http://127.0.0.1:1", "en-US");
    let state = Arc::new(AppState::new(tmdb, Arc::new(MemoryStore::new())));
    TestServer::new(create_router(state, None)).unwrap()
}

fn movie(id: i64, genre: i32) -> Value {
    json!({ "id": id, "title": format!("Saved {}", id), "genre_ids": [genre], "popularity": 1.5 })
}

#[tokio::test]
async fn test_health() {
    let server = setup().await;
    server.get("/health").await.assert_text("OK");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_catalog_starts_on_weekly_trends_and_caps_pages() {
    let server = setup().await;

    let body: Value = server.get("/api/v1/catalog").await.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["results"][0]["title"], "Week 1");
    assert_eq!(body["total_pages"], 10000);
    assert_eq!(body["page_bound"], 500);
    assert_eq!(body["pagination"]["last"], 500);
    assert_eq!(body["status"]["state"], "ready");

    server
        .put("/api/v1/catalog/page/501")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: Value = server.put("/api/v1/catalog/page/500").await.json();
    assert_eq!(body["page"], 500);
    assert_eq!(body["results"][0]["title"], "Week 500");
}

#[tokio::test]
async fn test_submit_resets_page_and_clear_restores_trending() {
    let server = setup().await;
    server.get("/api/v1/catalog").await.assert_status_ok();

    let body: Value = server.put("/api/v1/catalog/page/5").await.json();
    assert_eq!(body["page"], 5);

    let body: Value = server
        .post("/api/v1/catalog/search")
        .json(&json!({ "text": "", "year": "" }))
        .await
        .json();
    assert_eq!(body["page"], 1);

    let body: Value = server
        .post("/api/v1/catalog/search")
        .json(&json!({ "text": "alien", "year": "1979" }))
        .await
        .json();
    assert_eq!(body["committed"]["text"], "alien");
    assert_eq!(body["results"][0]["title"], "alien");
    assert_eq!(body["total_pages"], 3);

    let body: Value = server.post("/api/v1/catalog/clear").await.json();
    assert_eq!(body["committed"]["text"], "");
    assert_eq!(body["draft"]["text"], "");
    assert_eq!(body["page"], 1);
    assert_eq!(body["results"][0]["title"], "Week 1");
}

#[tokio::test]
async fn test_draft_update_does_not_fetch() {
    let server = setup().await;
    server.get("/api/v1/catalog").await.assert_status_ok();

    let body: Value = server
        .put("/api/v1/catalog/draft")
        .json(&json!({ "text": "heat", "year": "" }))
        .await
        .json();
    assert_eq!(body["draft"]["text"], "heat");
    assert_eq!(body["committed"]["text"], "");
    assert_eq!(body["results"][0]["title"], "Week 1");
}

#[tokio::test]
async fn test_search_failure_shows_banner_and_keeps_total_pages() {
    let server = setup().await;

    server
        .post("/api/v1/catalog/search")
        .json(&json!({ "text": "dune", "year": "" }))
        .await
        .assert_status_ok();

    let body: Value = server
        .post("/api/v1/catalog/search")
        .json(&json!({ "text": "fail", "year": "" }))
        .await
        .json();

    assert_eq!(body["error"], "Failed to fetch movies. Please check your network.");
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["status"]["state"], "failed");
    assert!(body["pagination"].is_null());
}

#[tokio::test]
async fn test_year_options() {
    let server = setup().await;
    let years: Vec<i32> = server.get("/api/v1/catalog/years").await.json();
    assert_eq!(years.len(), 50);
    assert!(years.windows(2).all(|w| w[0] == w[1] + 1));
}

#[tokio::test]
async fn test_library_toggle_round_trip() {
    let server = setup().await;

    let body: Value = server
        .post("/api/v1/library/toggle")
        .json(&movie(7, 28))
        .await
        .json();
    assert_eq!(body, json!({ "id": 7, "in_library": true }));

    let body: Value = server.get("/api/v1/library/7").await.json();
    assert_eq!(body["in_library"], true);

    let body: Value = server.get("/api/v1/library").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["movies"][0]["popularity"], 1.5);

    let body: Value = server
        .post("/api/v1/library/toggle")
        .json(&movie(7, 28))
        .await
        .json();
    assert_eq!(body["in_library"], false);

    let body: Value = server.get("/api/v1/library").await.json();
    assert_eq!(body["total"], 0);
    assert_eq!(
        body["empty_message"],
        "You don't have any movies in your library yet."
    );
}

#[tokio::test]
async fn test_library_remove_absent_is_noop() {
    let server = setup().await;
    server.post("/api/v1/library/toggle").json(&movie(1, 28)).await;

    server
        .delete("/api/v1/library/999")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/api/v1/library").await.json();
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_library_genre_filter_and_load_more() {
    let server = setup().await;
    for id in 0..12 {
        server.post("/api/v1/library/toggle").json(&movie(id, 28)).await;
    }
    for id in 100..102 {
        server.post("/api/v1/library/toggle").json(&movie(id, 16)).await;
    }

    let body: Value = server.get("/api/v1/library").await.json();
    assert_eq!(body["movies"].as_array().unwrap().len(), 9);
    assert_eq!(body["has_more"], true);

    let body: Value = server.post("/api/v1/library/load-more").await.json();
    assert_eq!(body["visible_count"], 18);
    assert_eq!(body["movies"].as_array().unwrap().len(), 14);
    assert_eq!(body["has_more"], false);

    let body: Value = server
        .put("/api/v1/library/genre")
        .json(&json!({ "genre": "16" }))
        .await
        .json();
    assert_eq!(body["visible_count"], 9);
    assert_eq!(body["genre"], "16");
    assert_eq!(body["matching"], 2);

    let body: Value = server
        .put("/api/v1/library/genre")
        .json(&json!({ "genre": "all" }))
        .await
        .json();
    assert_eq!(body["visible_count"], 9);
    assert_eq!(body["matching"], 14);

    server
        .get("/api/v1/library")
        .add_query_param("genre", "drama")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_detail_and_trailer() {
    let server = setup().await;
    server.post("/api/v1/library/toggle").json(&movie(1, 28)).await;

    let body: Value = server.get("/api/v1/movies/1").await.json();
    assert_eq!(body["movie"]["title"], "Movie 1");
    assert_eq!(body["in_library"], true);
    assert_eq!(body["genre_labels"], json!(["Action"]));

    let body: Value = server.get("/api/v1/movies/1/trailer").await.json();
    assert_eq!(body["embed_url"], "https://www.youtube.com/embed/abc123?autoplay=1");

    server
        .get("/api/v1/movies/2/trailer")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_status_message_reaches_client() {
    let server = setup().await;

    let response = server.get("/api/v1/movies/404").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "TMDB API Error: The resource you requested could not be found."
    );
}

#[tokio::test]
async fn test_unreachable_upstream_hides_transport_text() {
    let server = offline();

    for path in ["/api/v1/movies/1", "/api/v1/movies/1/trailer"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            "We couldn't connect to the movie database. Please check your internet connection."
        );
    }

    let body: Value = server.get("/api/v1/catalog").await.json();
    assert_eq!(body["error"], "Failed to fetch movies. Please check your network.");
}

#[tokio::test]
async fn test_home_feed() {
    let server = setup().await;

    let body: Value = server.get("/api/v1/home").await.json();
    assert!(body["error"].is_null());
    assert_eq!(body["hero"]["id"], 1);
    assert_eq!(body["weekly"].as_array().unwrap().len(), 1);
    assert_eq!(body["upcoming"]["movie"]["id"], 2);
    assert_eq!(body["upcoming"]["in_library"], false);

    let genres: Value = server.get("/api/v1/genres").await.json();
    assert_eq!(genres[0]["name"], "Animation");
}

#[tokio::test]
async fn test_theme_setting() {
    let server = setup().await;

    let body: Value = server.get("/api/v1/settings/theme").await.json();
    assert_eq!(body["theme"], "dark");

    let body: Value = server
        .put("/api/v1/settings/theme")
        .json(&json!({ "theme": "light" }))
        .await
        .json();
    assert_eq!(body["theme"], "light");

    let body: Value = server.get("/api/v1/settings/theme").await.json();
    assert_eq!(body["theme"], "light");
}
