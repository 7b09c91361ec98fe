//! Like repository.

use std::sync::Arc;

use crate::entities::{Like, like};
use bazaar_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by user and product.
    ///
    /// At most one row exists per (user, product) pair.
    pub async fn find_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::ProductId.eq(product_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List likes (paginated).
    pub async fn find_all(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<like::Model>> {
        let mut query = Like::find().order_by_desc(like::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(like::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the currently-liked rows for a product (flag set).
    pub async fn find_liked_by_product(&self, product_id: &str) -> AppResult<Vec<like::Model>> {
        Like::find()
            .filter(like::Column::ProductId.eq(product_id))
            .filter(like::Column::Like.eq(true))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new like row.
    pub async fn create(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a like row.
    pub async fn update(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
