//! Product endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use bazaar_common::AppResult;
use bazaar_core::{CreateProductInput, UpdateProductInput};
use bazaar_db::entities::product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::categories::CategoryResponse;
use super::comments::{build_comment_response, CommentResponse};
use super::likes::{build_like_response, LikeResponse};
use super::product_images::{build_image_response, ProductImageResponse};

/// Denormalized product representation: embeds the author's email, the
/// full category, the image list, the comment list, and only the
/// currently-liked like rows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub author: String,
    pub category: CategoryResponse,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub images: Vec<ProductImageResponse>,
    pub comments: Vec<CommentResponse>,
    pub likes: Vec<LikeResponse>,
}

/// Build the full product representation.
async fn build_product_response(
    state: &AppState,
    product: product::Model,
) -> AppResult<ProductResponse> {
    let author = state.user_service.get(&product.author_id).await?;
    let category = state.category_service.get(&product.category_slug).await?;

    let images = state
        .product_image_service
        .list_by_product(&product.id)
        .await?
        .into_iter()
        .map(|i| build_image_response(state, i))
        .collect();

    let mut comments = Vec::new();
    for comment in state.comment_service.list(Some(&product.id)).await? {
        comments.push(build_comment_response(state, comment).await?);
    }

    let mut likes = Vec::new();
    for like in state.like_service.liked_for_product(&product.id).await? {
        likes.push(build_like_response(state, like).await?);
    }

    Ok(ProductResponse {
        id: product.id,
        author: author.email,
        category: category.into(),
        title: product.title,
        description: product.description,
        price: product.price,
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.map(|dt| dt.to_rfc3339()),
        images,
        comments,
        likes,
    })
}

/// Build representations for a page of products.
async fn build_product_responses(
    state: &AppState,
    products: Vec<product::Model>,
) -> AppResult<Vec<ProductResponse>> {
    let mut responses = Vec::with_capacity(products.len());
    for product in products {
        responses.push(build_product_response(state, product).await?);
    }
    Ok(responses)
}

/// List products request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

/// Search products request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    10
}

const fn max_limit() -> u64 {
    100
}

/// List products.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let limit = query.limit.min(max_limit());
    let products = state
        .product_service
        .list(limit, query.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        build_product_responses(&state, products).await?,
    ))
}

/// Create a new product. The author is the requesting user.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(
        build_product_response(&state, product).await?,
    ))
}

/// Retrieve a product.
async fn show(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.get(&id).await?;

    Ok(ApiResponse::ok(
        build_product_response(&state, product).await?,
    ))
}

/// Update a product. Author only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.update(&user.id, &id, input).await?;

    Ok(ApiResponse::ok(
        build_product_response(&state, product).await?,
    ))
}

/// Delete a product. Author only.
async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.product_service.delete(&user.id, &id).await?;

    Ok(ApiResponse::ok(()))
}

/// List the requesting user's own products.
async fn own(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let limit = query.limit.min(max_limit());
    let products = state
        .product_service
        .list_own(&user.id, limit, query.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        build_product_responses(&state, products).await?,
    ))
}

/// Case-insensitive substring search over title OR description.
async fn search(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchProductsQuery>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let limit = query.limit.min(max_limit());
    let products = state
        .product_service
        .search(&query.q, limit, query.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        build_product_responses(&state, products).await?,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/own", get(own))
        .route("/search", get(search))
        .route("/{id}", get(show).put(update).delete(destroy))
}
