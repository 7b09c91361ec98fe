//! Product service.

use bazaar_common::{AppError, AppResult, IdGenerator};
use bazaar_db::{
    entities::product,
    repositories::{CategoryRepository, ProductRepository},
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Product service for business logic.
#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 100))]
    pub category_slug: String,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: String,

    pub price: Decimal,
}

/// Input for updating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 100))]
    pub category_slug: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub price: Option<Decimal>,
}

impl ProductService {
    /// Create a new product service.
    #[must_use]
    pub fn new(product_repo: ProductRepository, category_repo: CategoryRepository) -> Self {
        Self {
            product_repo,
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new product.
    ///
    /// The creation timestamp is server-set and immutable thereafter.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateProductInput,
    ) -> AppResult<product::Model> {
        input.validate()?;
        validate_price(input.price)?;

        // Category must exist
        self.category_repo.get_by_slug(&input.category_slug).await?;

        let model = product::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            category_slug: Set(input.category_slug),
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.product_repo.create(model).await
    }

    /// Get a product by ID.
    pub async fn get(&self, id: &str) -> AppResult<product::Model> {
        self.product_repo.get_by_id(id).await
    }

    /// List products.
    pub async fn list(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        self.product_repo.find_all(limit, until_id).await
    }

    /// List the products listed by a user.
    pub async fn list_own(
        &self,
        author_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        self.product_repo.find_by_author(author_id, limit, until_id).await
    }

    /// Case-insensitive substring search over title OR description.
    pub async fn search(
        &self,
        query: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<product::Model>> {
        if query.is_empty() {
            return Err(AppError::BadRequest("Missing search query".to_string()));
        }

        self.product_repo.search(query, limit, until_id).await
    }

    /// Update a product. Only the author may do this.
    pub async fn update(
        &self,
        user_id: &str,
        product_id: &str,
        input: UpdateProductInput,
    ) -> AppResult<product::Model> {
        input.validate()?;

        let product = self.product_repo.get_by_id(product_id).await?;

        if product.author_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot update another user's product".to_string(),
            ));
        }

        if let Some(ref price) = input.price {
            validate_price(*price)?;
        }

        if let Some(ref slug) = input.category_slug {
            self.category_repo.get_by_slug(slug).await?;
        }

        let mut active: product::ActiveModel = product.into();

        if let Some(slug) = input.category_slug {
            active.category_slug = Set(slug);
        }
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.product_repo.update(active).await
    }

    /// Delete a product. Only the author may do this.
    pub async fn delete(&self, user_id: &str, product_id: &str) -> AppResult<()> {
        let product = self.product_repo.get_by_id(product_id).await?;

        if product.author_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot delete another user's product".to_string(),
            ));
        }

        self.product_repo.delete(product_id).await
    }
}

/// Largest value representable as numeric(6,2).
const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Validate that a price fits numeric(6,2) and is non-negative.
fn validate_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if price.scale() > 2 {
        return Err(AppError::Validation(
            "Price supports at most two decimal places".to_string(),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::Validation(format!(
            "Price must not exceed {MAX_PRICE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bazaar_db::entities::category;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_product(id: &str, author_id: &str, title: &str) -> product::Model {
        product::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            category_slug: "shoes".to_string(),
            title: title.to_string(),
            description: "A product".to_string(),
            price: Decimal::new(4999, 2),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_category() -> category::Model {
        category::Model {
            slug: "shoes".to_string(),
            name: "Shoes".to_string(),
        }
    }

    // Unit tests for validate_price
    #[test]
    fn test_validate_price_ok() {
        assert!(validate_price(Decimal::new(0, 0)).is_ok());
        assert!(validate_price(Decimal::new(999_999, 2)).is_ok()); // 9999.99
        assert!(validate_price(Decimal::new(1950, 2)).is_ok());
    }

    #[test]
    fn test_validate_price_negative() {
        let result = validate_price(Decimal::new(-100, 2));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_price_too_many_decimals() {
        let result = validate_price(Decimal::new(19_999, 3)); // 19.999
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_price_too_large() {
        let result = validate_price(Decimal::new(1_000_000, 2)); // 10000.00
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    // Service tests
    #[tokio::test]
    async fn test_create_category_not_found() {
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let category_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<category::Model>::new()])
                .into_connection(),
        );

        let service = ProductService::new(
            ProductRepository::new(product_db),
            CategoryRepository::new(category_db),
        );

        let input = CreateProductInput {
            category_slug: "nonexistent".to_string(),
            title: "Running shoes".to_string(),
            description: "Light".to_string(),
            price: Decimal::new(4999, 2),
        };

        let result = service.create("u1", input).await;
        match result {
            Err(AppError::CategoryNotFound(slug)) => assert_eq!(slug, "nonexistent"),
            _ => panic!("Expected CategoryNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_update_wrong_owner_returns_error() {
        let product = create_test_product("p1", "u1", "Running shoes");

        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[product]])
                .into_connection(),
        );
        let category_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ProductService::new(
            ProductRepository::new(product_db),
            CategoryRepository::new(category_db),
        );

        let input = UpdateProductInput {
            category_slug: None,
            title: Some("Stolen".to_string()),
            description: None,
            price: None,
        };

        let result = service.update("u2", "p1", input).await;
        match result {
            Err(AppError::Forbidden(msg)) => {
                assert!(msg.contains("Cannot update another user's product"));
            }
            _ => panic!("Expected Forbidden error"),
        }
    }

    #[tokio::test]
    async fn test_delete_wrong_owner_returns_error() {
        let product = create_test_product("p1", "u1", "Running shoes");

        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[product]])
                .into_connection(),
        );
        let category_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ProductService::new(
            ProductRepository::new(product_db),
            CategoryRepository::new(category_db),
        );

        let result = service.delete("u2", "p1").await;
        match result {
            Err(AppError::Forbidden(msg)) => {
                assert!(msg.contains("Cannot delete another user's product"));
            }
            _ => panic!("Expected Forbidden error"),
        }
    }

    #[tokio::test]
    async fn test_search_empty_query_rejected() {
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let category_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ProductService::new(
            ProductRepository::new(product_db),
            CategoryRepository::new(category_db),
        );

        let result = service.search("", 10, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_ok() {
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_product("p1", "u1", "Running shoes")]])
                .into_connection(),
        );
        let category_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_category()]])
                .into_connection(),
        );

        let service = ProductService::new(
            ProductRepository::new(product_db),
            CategoryRepository::new(category_db),
        );

        let input = CreateProductInput {
            category_slug: "shoes".to_string(),
            title: "Running shoes".to_string(),
            description: "Light".to_string(),
            price: Decimal::new(4999, 2),
        };

        let result = service.create("u1", input).await.unwrap();
        assert_eq!(result.author_id, "u1");
        assert_eq!(result.title, "Running shoes");
    }
}
