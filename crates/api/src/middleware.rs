//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use bazaar_core::{
    CategoryService, CommentService, LikeService, ProductImageService, ProductService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub product_image_service: ProductImageService,
    pub comment_service: CommentService,
    pub like_service: LikeService,
}

/// Authentication middleware.
///
/// Resolves `Authorization: Bearer <token>` into the user model and
/// stores it in request extensions; route handlers opt in via the
/// `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        match state.user_service.authenticate_by_token(token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
            }
        }
    }

    next.run(req).await
}
