//! Product repository.

use std::sync::Arc;

use crate::entities::{Product, product};
use bazaar_common::{AppError, AppResult};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Product repository for database operations.
#[derive(Clone)]
pub struct ProductRepository {
    db: Arc<DatabaseConnection>,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a product by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<product::Model>> {
        Product::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a product by ID, failing if it does not exist.
    pub async fn get_by_id(&self, id: &str) -> AppResult<product::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ProductNotFound(id.to_string()))
    }

    /// List products (paginated).
    pub async fn find_all(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        let mut query = Product::find().order_by_desc(product::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(product::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List products by author (paginated).
    pub async fn find_by_author(
        &self,
        author_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        let mut query = Product::find()
            .filter(product::Column::AuthorId.eq(author_id))
            .order_by_desc(product::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(product::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Case-insensitive substring search over title OR description.
    ///
    /// Plain LIKE over lowercased columns; no ranking or relevance
    /// scoring.
    pub async fn search(
        &self,
        query: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        let pattern = format!(
            "%{}%",
            query.to_lowercase().replace('%', "\\%").replace('_', "\\_")
        );

        let text_match = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(product::Column::Title))).like(&pattern))
            .add(Expr::expr(Func::lower(Expr::col(product::Column::Description))).like(&pattern));

        let mut condition = Condition::all().add(text_match);

        if let Some(id) = until_id {
            condition = condition.add(product::Column::Id.lt(id));
        }

        Product::find()
            .filter(condition)
            .order_by_desc(product::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new product.
    pub async fn create(&self, model: product::ActiveModel) -> AppResult<product::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a product.
    pub async fn update(&self, model: product::ActiveModel) -> AppResult<product::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a product.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let product = self.find_by_id(id).await?;
        if let Some(p) = product {
            p.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}
