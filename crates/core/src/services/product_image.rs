//! Product image service.

use bazaar_common::{AppError, AppResult, IdGenerator};
use bazaar_db::{
    entities::product_image,
    repositories::{ProductImageRepository, ProductRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use url::Url;
use validator::Validate;

/// Product image service for business logic.
#[derive(Clone)]
pub struct ProductImageService {
    image_repo: ProductImageRepository,
    product_repo: ProductRepository,
    server_url: String,
    id_gen: IdGenerator,
}

/// Input for attaching an image to a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductImageInput {
    pub product_id: String,

    /// Stored path (e.g. `/media/products/a.jpg`) or absolute URL.
    #[validate(length(max = 1024))]
    pub image: Option<String>,
}

impl ProductImageService {
    /// Create a new product image service.
    #[must_use]
    pub fn new(
        image_repo: ProductImageRepository,
        product_repo: ProductRepository,
        server_url: String,
    ) -> Self {
        Self {
            image_repo,
            product_repo,
            server_url,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach an image to a product.
    pub async fn create(&self, input: CreateProductImageInput) -> AppResult<product_image::Model> {
        input.validate()?;

        // Product must exist
        self.product_repo.get_by_id(&input.product_id).await?;

        let model = product_image::ActiveModel {
            id: Set(self.id_gen.generate()),
            product_id: Set(input.product_id),
            image: Set(input.image),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.image_repo.create(model).await
    }

    /// List all images.
    pub async fn list(&self) -> AppResult<Vec<product_image::Model>> {
        self.image_repo.find_all().await
    }

    /// List the images attached to a product.
    pub async fn list_by_product(&self, product_id: &str) -> AppResult<Vec<product_image::Model>> {
        self.image_repo.find_by_product(product_id).await
    }

    /// Resolve a stored image reference into an absolute URL.
    ///
    /// Absolute inputs pass through unchanged; relative paths are joined
    /// against the configured public server URL.
    #[must_use]
    pub fn resolve_url(&self, image: Option<&str>) -> Option<String> {
        let image = image?;

        if image.starts_with("http://") || image.starts_with("https://") {
            return Some(image.to_string());
        }

        let base = Url::parse(&self.server_url).ok()?;
        base.join(image).ok().map(Into::into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bazaar_db::entities::product;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_service(
        image_db: Arc<sea_orm::DatabaseConnection>,
        product_db: Arc<sea_orm::DatabaseConnection>,
    ) -> ProductImageService {
        ProductImageService::new(
            ProductImageRepository::new(image_db),
            ProductRepository::new(product_db),
            "https://bazaar.example.com".to_string(),
        )
    }

    fn create_test_product(id: &str) -> product::Model {
        product::Model {
            id: id.to_string(),
            author_id: "u1".to_string(),
            category_slug: "shoes".to_string(),
            title: "Running shoes".to_string(),
            description: "Light".to_string(),
            price: Decimal::new(4999, 2),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_resolve_url_relative_path() {
        let service = test_service(
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
        );

        let resolved = service.resolve_url(Some("/media/products/a.jpg"));
        assert_eq!(
            resolved.as_deref(),
            Some("https://bazaar.example.com/media/products/a.jpg")
        );
    }

    #[test]
    fn test_resolve_url_absolute_passthrough() {
        let service = test_service(
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
        );

        let resolved = service.resolve_url(Some("https://cdn.example.com/a.jpg"));
        assert_eq!(resolved.as_deref(), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn test_resolve_url_none() {
        let service = test_service(
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
        );

        assert!(service.resolve_url(None).is_none());
    }

    #[tokio::test]
    async fn test_create_product_not_found() {
        let image_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<product::Model>::new()])
                .into_connection(),
        );

        let service = test_service(image_db, product_db);

        let input = CreateProductImageInput {
            product_id: "nonexistent".to_string(),
            image: Some("/media/products/a.jpg".to_string()),
        };

        let result = service.create(input).await;
        match result {
            Err(AppError::ProductNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected ProductNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_create_ok() {
        let image = product_image::Model {
            id: "i1".to_string(),
            product_id: "p1".to_string(),
            image: Some("/media/products/a.jpg".to_string()),
            created_at: Utc::now().into(),
        };

        let image_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[image]])
                .into_connection(),
        );
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_product("p1")]])
                .into_connection(),
        );

        let service = test_service(image_db, product_db);

        let input = CreateProductImageInput {
            product_id: "p1".to_string(),
            image: Some("/media/products/a.jpg".to_string()),
        };

        let result = service.create(input).await.unwrap();
        assert_eq!(result.product_id, "p1");
    }
}
