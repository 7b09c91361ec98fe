//! Comment service.

use bazaar_common::{AppError, AppResult, IdGenerator};
use bazaar_db::{
    entities::comment,
    repositories::{CommentRepository, ProductRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    product_repo: ProductRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub product_id: String,

    #[validate(length(min = 1, max = 4096))]
    pub text: String,
}

/// Input for updating a comment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentInput {
    #[validate(length(min = 1, max = 4096))]
    pub text: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(comment_repo: CommentRepository, product_repo: ProductRepository) -> Self {
        Self {
            comment_repo,
            product_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a comment on a product.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        // Product must exist
        self.product_repo.get_by_id(&input.product_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            product_id: Set(input.product_id),
            author_id: Set(author_id.to_string()),
            text: Set(input.text),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.comment_repo.create(model).await
    }

    /// Get a comment by ID.
    pub async fn get(&self, id: &str) -> AppResult<comment::Model> {
        self.comment_repo.get_by_id(id).await
    }

    /// List comments in ascending creation order, optionally scoped to a
    /// product.
    pub async fn list(&self, product_id: Option<&str>) -> AppResult<Vec<comment::Model>> {
        match product_id {
            Some(id) => self.comment_repo.find_by_product(id).await,
            None => self.comment_repo.find_all().await,
        }
    }

    /// Update a comment. Only the author may do this.
    pub async fn update(
        &self,
        user_id: &str,
        comment_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        let comment = self.comment_repo.get_by_id(comment_id).await?;

        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot update another user's comment".to_string(),
            ));
        }

        let mut active: comment::ActiveModel = comment.into();
        active.text = Set(input.text);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.comment_repo.update(active).await
    }

    /// Delete a comment. Only the author may do this.
    pub async fn delete(&self, user_id: &str, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot delete another user's comment".to_string(),
            ));
        }

        self.comment_repo.delete(comment_id).await
    }
}
