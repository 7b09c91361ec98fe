//! Product image endpoints.

use axum::{extract::State, routing::get, Json, Router};
use bazaar_common::AppResult;
use bazaar_core::CreateProductImageInput;
use bazaar_db::entities::product_image;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Product image response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageResponse {
    pub id: String,
    pub product_id: String,
    /// Absolute URL, resolved against the configured server URL.
    pub image: Option<String>,
}

/// Build an image representation with the stored reference resolved to
/// an absolute URL.
pub fn build_image_response(
    state: &AppState,
    image: product_image::Model,
) -> ProductImageResponse {
    let resolved = state
        .product_image_service
        .resolve_url(image.image.as_deref());

    ProductImageResponse {
        id: image.id,
        product_id: image.product_id,
        image: resolved,
    }
}

/// List all images.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ProductImageResponse>>> {
    let images = state.product_image_service.list().await?;

    Ok(ApiResponse::ok(
        images
            .into_iter()
            .map(|i| build_image_response(&state, i))
            .collect(),
    ))
}

/// Attach an image to a product.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProductImageInput>,
) -> AppResult<ApiResponse<ProductImageResponse>> {
    let image = state.product_image_service.create(input).await?;

    Ok(ApiResponse::ok(build_image_response(&state, image)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}
