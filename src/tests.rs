//! Router-level tests: drive the assembled `/api` router end to end with
//! `tower::ServiceExt::oneshot`, through the access guard.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_kernel::{settings::Settings, ModuleRegistry};

use crate::modules::{self, AppContext};

fn app() -> Router {
    let settings = Settings::default();
    let ctx = AppContext::new(&settings);

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &ctx);

    folio_http::build_router(&registry, &settings)
        .with_extension(ctx.auth.clone())
        .build()
}

fn request(method: &str, path: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Create an account and return its session token.
async fn signup(app: &Router, username: &str) -> String {
    let req = request(
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2",
        })),
    );

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("signup sets a session cookie")
        .to_str()
        .unwrap();
    let (_, token) = cookie
        .split(';')
        .next()
        .unwrap()
        .split_once('=')
        .unwrap();
    token.to_string()
}

async fn add_book(app: &Router, token: &str, title: &str, author: &str) -> Value {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/books",
            Some(token),
            Some(json!({
                "title": title,
                "author": author,
                "genre": "SciFi",
                "price": 12.5,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let app = app();
    let (status, _) = send(&app, request("GET", "/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_routes_require_authentication() {
    let app = app();

    let (status, body) = send(&app, request("GET", "/api/books", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    let (status, _) = send(
        &app,
        request("POST", "/api/books", None, Some(json!({"title": "x"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_is_accepted_as_credential() {
    let app = app();
    let token = signup(&app, "cookie_reader").await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/books")
        .header(header::COOKIE, format!("folio_session={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dune_scenario() {
    let app = app();
    let paul = signup(&app, "paul").await;

    // Add Dune.
    let created = add_book(&app, &paul, "Dune", "Herbert").await;
    assert_eq!(created["message"], "Book added successfully");
    assert_eq!(created["book"]["title"], "Dune");
    let book_id = created["book"]["id"].as_str().unwrap().to_string();

    // Same title again conflicts.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/books",
            Some(&paul),
            Some(json!({
                "title": "Dune",
                "author": "Someone Else",
                "genre": "Fantasy",
                "price": 99.0,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book with this title already exists");

    // Rating out of range.
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/books/{book_id}/reviews"),
            Some(&paul),
            Some(json!({"rating": 6, "comment": "too good"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 1 and 5");

    // Valid review.
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/books/{book_id}/reviews"),
            Some(&paul),
            Some(json!({"rating": 5, "comment": "a classic"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["review"]["user"]["username"], "paul");
    let review_id = body["review"]["id"].as_str().unwrap().to_string();

    // A different user cannot delete it.
    let harkonnen = signup(&app, "harkonnen").await;
    let (status, _) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/reviews/{review_id}"),
            Some(&harkonnen),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner can.
    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/reviews/{review_id}"),
            Some(&paul),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted successfully");
}

#[tokio::test]
async fn listing_reports_pagination_metadata() {
    let app = app();
    let token = signup(&app, "librarian").await;

    for i in 0..12 {
        add_book(&app, &token, &format!("Volume {i}"), "Author").await;
    }

    let (status, body) = send(
        &app,
        request("GET", "/api/books?page=2&limit=10", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["totalBooks"], 12);
    assert_eq!(body["pagination"]["hasPrev"], true);
    assert_eq!(body["pagination"]["hasNext"], false);

    // Non-numeric paging falls back to defaults.
    let (status, body) = send(
        &app,
        request("GET", "/api/books?page=abc&limit=xyz", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["books"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn search_requires_a_query_and_matches_title_or_author() {
    let app = app();
    let token = signup(&app, "seeker").await;
    add_book(&app, &token, "Dune", "Herbert").await;
    add_book(&app, &token, "Foundation", "Asimov").await;

    let (status, body) = send(&app, request("GET", "/api/search", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query is required");

    let (status, body) = send(
        &app,
        request("GET", "/api/search?q=herb", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searchQuery"], "herb");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
    assert_eq!(body["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn detail_aggregates_review_ratings() {
    let app = app();
    let token = signup(&app, "first_reader").await;

    let created = add_book(&app, &token, "Dune", "Herbert").await;
    let book_id = created["book"]["id"].as_str().unwrap().to_string();

    let second = signup(&app, "second_reader").await;
    for (reader, rating) in [(&token, 4), (&second, 5)] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                &format!("/api/books/{book_id}/reviews"),
                Some(reader),
                Some(json!({"rating": rating, "comment": "words"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        request("GET", &format!("/api/books/{book_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageRating"], 4.5);
    assert_eq!(body["totalReviews"], 2);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
    assert!(body["reviews"][0]["user"]["username"].is_string());

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/books/{}", uuid::Uuid::now_v7()),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn owner_update_is_visible_in_detail() {
    let app = app();
    let token = signup(&app, "editor").await;

    let created = add_book(&app, &token, "Dune", "Herbert").await;
    let book_id = created["book"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/books/{book_id}/reviews"),
            Some(&token),
            Some(json!({"rating": 2, "comment": "meh"})),
        ),
    )
    .await;
    let review_id = body["review"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/reviews/{review_id}"),
            Some(&token),
            Some(json!({"rating": 5, "comment": "grew on me"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review updated successfully");

    let (_, detail) = send(
        &app,
        request("GET", &format!("/api/books/{book_id}"), Some(&token), None),
    )
    .await;
    assert_eq!(detail["averageRating"], 5.0);
    assert_eq!(detail["reviews"][0]["comment"], "grew on me");
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = app();
    let token = signup(&app, "leaver").await;

    let (status, body) = send(&app, request("GET", "/api/auth/check", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "leaver");

    let (status, _) = send(
        &app,
        request("POST", "/api/auth/logout", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/api/auth/check", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = app();
    signup(&app, "careful").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "careful", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "careful", "password": "hunter2"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged in successfully");
}
