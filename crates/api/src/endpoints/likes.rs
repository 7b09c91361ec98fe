//! Like endpoints.
//!
//! Create-or-list only: there is no delete route. "Unliking" is a flag
//! flip performed by the same create call.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bazaar_common::AppResult;
use bazaar_db::entities::like;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Like response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: String,
    pub product_id: String,
    /// The liking user's email.
    pub user: String,
    pub like: bool,
    pub created_at: String,
}

/// Build a like representation, resolving the user's email.
pub async fn build_like_response(state: &AppState, like: like::Model) -> AppResult<LikeResponse> {
    let user = state.user_service.get(&like.user_id).await?;

    Ok(LikeResponse {
        id: like.id,
        product_id: like.product_id,
        user: user.email,
        like: like.like,
        created_at: like.created_at.to_rfc3339(),
    })
}

/// Toggle request. The flag is never client-supplied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub product_id: String,
}

/// Toggle the requesting user's like on a product.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ToggleLikeRequest>,
) -> AppResult<ApiResponse<LikeResponse>> {
    let like = state.like_service.toggle(&user.id, &req.product_id).await?;

    Ok(ApiResponse::ok(build_like_response(&state, like).await?))
}

/// List likes request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLikesQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

/// List like rows.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListLikesQuery>,
) -> AppResult<ApiResponse<Vec<LikeResponse>>> {
    let limit = query.limit.min(100);
    let likes = state
        .like_service
        .list(limit, query.until_id.as_deref())
        .await?;

    let mut responses = Vec::with_capacity(likes.len());
    for like in likes {
        responses.push(build_like_response(&state, like).await?);
    }

    Ok(ApiResponse::ok(responses))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}
