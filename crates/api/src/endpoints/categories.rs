//! Category endpoints.
//!
//! Listing is the only anonymous route in the API.

use axum::{extract::State, routing::get, Json, Router};
use bazaar_common::AppResult;
use bazaar_db::entities::category;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Category response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub slug: String,
    pub name: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(c: category::Model) -> Self {
        Self {
            slug: c.slug,
            name: c.name,
        }
    }
}

/// List all categories. No authentication required.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = state.category_service.list().await?;

    Ok(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    ))
}

/// Create category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub slug: String,
    pub name: String,
}

/// Create a new category.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let input = bazaar_core::category::CreateCategoryInput {
        slug: req.slug,
        name: req.name,
    };

    let category = state.category_service.create(input).await?;

    Ok(ApiResponse::ok(category.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}
