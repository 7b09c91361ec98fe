//! Category service.

use bazaar_common::{AppError, AppResult};
use bazaar_db::{entities::category, repositories::CategoryRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
}

/// Input for creating a new category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub slug: String,

    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self { category_repo }
    }

    /// List all categories.
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_all().await
    }

    /// Get a category by slug.
    pub async fn get(&self, slug: &str) -> AppResult<category::Model> {
        self.category_repo.get_by_slug(slug).await
    }

    /// Create a new category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        if !is_valid_slug(&input.slug) {
            return Err(AppError::Validation(
                "Slug must contain only lowercase letters, digits and hyphens".to_string(),
            ));
        }

        if self
            .category_repo
            .find_by_slug(&input.slug)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                input.slug
            )));
        }

        if self
            .category_repo
            .find_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Category named '{}' already exists",
                input.name
            )));
        }

        let model = category::ActiveModel {
            slug: Set(input.slug),
            name: Set(input.name),
        };

        self.category_repo.create(model).await
    }
}

/// A slug is lowercase ASCII letters, digits and hyphens.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
