//! Product image repository.

use std::sync::Arc;

use crate::entities::{ProductImage, product_image};
use bazaar_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Product image repository for database operations.
#[derive(Clone)]
pub struct ProductImageRepository {
    db: Arc<DatabaseConnection>,
}

impl ProductImageRepository {
    /// Create a new product image repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List all images.
    pub async fn find_all(&self) -> AppResult<Vec<product_image::Model>> {
        ProductImage::find()
            .order_by_asc(product_image::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List images attached to a product.
    pub async fn find_by_product(&self, product_id: &str) -> AppResult<Vec<product_image::Model>> {
        ProductImage::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_asc(product_image::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new image.
    pub async fn create(
        &self,
        model: product_image::ActiveModel,
    ) -> AppResult<product_image::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
