//! API integration tests.
//!
//! These tests drive the router over a mock-backed application state and
//! verify the authentication and validation surface.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bazaar_api::{middleware::AppState, router};
use bazaar_core::{
    CategoryService, CommentService, LikeService, ProductImageService, ProductService, UserService,
};
use bazaar_db::entities::{category, user};
use bazaar_db::repositories::{
    CategoryRepository, CommentRepository, LikeRepository, ProductImageRepository,
    ProductRepository, UserRepository,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use std::sync::Arc;
use tower::ServiceExt;

fn empty_mock() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn state_with_dbs(
    user_db: Arc<DatabaseConnection>,
    category_db: Arc<DatabaseConnection>,
    product_db: Arc<DatabaseConnection>,
    image_db: Arc<DatabaseConnection>,
    comment_db: Arc<DatabaseConnection>,
    like_db: Arc<DatabaseConnection>,
) -> AppState {
    let user_repo = UserRepository::new(user_db);
    let category_repo = CategoryRepository::new(category_db);
    let product_repo = ProductRepository::new(product_db);
    let image_repo = ProductImageRepository::new(image_db);
    let comment_repo = CommentRepository::new(comment_db);
    let like_repo = LikeRepository::new(like_db);

    AppState {
        user_service: UserService::new(user_repo),
        category_service: CategoryService::new(category_repo.clone()),
        product_service: ProductService::new(product_repo.clone(), category_repo),
        product_image_service: ProductImageService::new(
            image_repo,
            product_repo.clone(),
            "https://bazaar.example.com".to_string(),
        ),
        comment_service: CommentService::new(comment_repo, product_repo.clone()),
        like_service: LikeService::new(like_repo, product_repo),
    }
}

fn test_app(state: AppState) -> Router {
    router().with_state(state)
}

fn create_test_user(id: &str, username: &str, email: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        username: username.to_string(),
        username_lower: username.to_lowercase(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        token: Some("token-abc".to_string()),
        name: None,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_category_list_is_anonymous() {
    let category_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category::Model {
                slug: "shoes".to_string(),
                name: "Shoes".to_string(),
            }]])
            .into_connection(),
    );

    let state = state_with_dbs(
        empty_mock(),
        category_db,
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .uri("/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"][0]["slug"], "shoes");
}

#[tokio::test]
async fn test_product_list_requires_auth() {
    let state = state_with_dbs(
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .uri("/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_toggle_requires_auth() {
    let state = state_with_dbs(
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/likes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"productId":"p1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let state = state_with_dbs(
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"alice","email":"not-an-email","password":"password123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_returns_token() {
    let created = create_test_user("u1", "alice", "alice@example.com");

    // find_by_username -> none, find_by_email -> none, insert -> user
    let user_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new(), Vec::new(), vec![created]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection(),
    );

    let state = state_with_dbs(
        user_db,
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"alice","email":"alice@example.com","password":"password123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["token"], "token-abc");
}

#[tokio::test]
async fn test_product_search_requires_auth() {
    let state = state_with_dbs(
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
        empty_mock(),
    );

    let response = test_app(state)
        .oneshot(
            Request::builder()
                .uri("/products/search?q=shoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
