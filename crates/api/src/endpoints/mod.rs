//! API endpoints.

mod auth;
mod categories;
mod comments;
mod likes;
mod product_images;
mod products;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/product-images", product_images::router())
        .nest("/comments", comments::router())
        .nest("/likes", likes::router())
}
