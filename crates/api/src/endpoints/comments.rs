//! Comment endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use bazaar_common::AppResult;
use bazaar_core::{CreateCommentInput, UpdateCommentInput};
use bazaar_db::entities::comment;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Comment response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub product_id: String,
    /// The author's email.
    pub author: String,
    pub text: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Build a comment representation, resolving the author's email.
pub async fn build_comment_response(
    state: &AppState,
    comment: comment::Model,
) -> AppResult<CommentResponse> {
    let author = state.user_service.get(&comment.author_id).await?;

    Ok(CommentResponse {
        id: comment.id,
        product_id: comment.product_id,
        author: author.email,
        text: comment.text,
        created_at: comment.created_at.to_rfc3339(),
        updated_at: comment.updated_at.map(|dt| dt.to_rfc3339()),
    })
}

/// List comments request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Scope the listing to one product.
    pub product_id: Option<String>,
}

/// List comments in ascending creation order.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state
        .comment_service
        .list(query.product_id.as_deref())
        .await?;

    let mut responses = Vec::with_capacity(comments.len());
    for comment in comments {
        responses.push(build_comment_response(&state, comment).await?);
    }

    Ok(ApiResponse::ok(responses))
}

/// Create a comment. The author is the requesting user.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(
        build_comment_response(&state, comment).await?,
    ))
}

/// Retrieve a comment.
async fn show(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.get(&id).await?;

    Ok(ApiResponse::ok(
        build_comment_response(&state, comment).await?,
    ))
}

/// Update a comment. Author only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state.comment_service.update(&user.id, &id, input).await?;

    Ok(ApiResponse::ok(
        build_comment_response(&state, comment).await?,
    ))
}

/// Delete a comment. Author only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.comment_service.delete(&user.id, &id).await?;

    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}
