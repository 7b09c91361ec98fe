//! Like service.

use bazaar_common::{AppResult, IdGenerator};
use bazaar_db::{
    entities::like,
    repositories::{LikeRepository, ProductRepository},
};
use sea_orm::Set;

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    product_repo: ProductRepository,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub fn new(like_repo: LikeRepository, product_repo: ProductRepository) -> Self {
        Self {
            like_repo,
            product_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a user's like on a product.
    ///
    /// Get-or-create keyed on (user, product), then flip: the first call
    /// from an unliked state sets the flag true, a repeated call flips it
    /// false, then true again. Rows are never deleted; "unliking" is a
    /// flag flip. A unique index on (user_id, product_id) keeps
    /// concurrent first-toggles from creating duplicate rows.
    pub async fn toggle(&self, user_id: &str, product_id: &str) -> AppResult<like::Model> {
        // Product must exist
        self.product_repo.get_by_id(product_id).await?;

        match self
            .like_repo
            .find_by_user_and_product(user_id, product_id)
            .await?
        {
            Some(existing) => {
                let flipped = !existing.like;
                tracing::debug!(user_id = %user_id, product_id = %product_id, like = flipped, "Flipped like");

                let mut active: like::ActiveModel = existing.into();
                active.like = Set(flipped);
                active.updated_at = Set(Some(chrono::Utc::now().into()));

                self.like_repo.update(active).await
            }
            None => {
                let model = like::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_id: Set(user_id.to_string()),
                    product_id: Set(product_id.to_string()),
                    like: Set(true),
                    created_at: Set(chrono::Utc::now().into()),
                    ..Default::default()
                };

                self.like_repo.create(model).await
            }
        }
    }

    /// List like rows.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<like::Model>> {
        self.like_repo.find_all(limit, until_id).await
    }

    /// The currently-liked rows for a product.
    pub async fn liked_for_product(&self, product_id: &str) -> AppResult<Vec<like::Model>> {
        self.like_repo.find_liked_by_product(product_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bazaar_common::AppError;
    use bazaar_db::entities::product;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

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

    fn create_test_like(id: &str, user_id: &str, product_id: &str, liked: bool) -> like::Model {
        like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            like: liked,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_product_not_found() {
        let like_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<product::Model>::new()])
                .into_connection(),
        );

        let service = LikeService::new(
            LikeRepository::new(like_db),
            ProductRepository::new(product_db),
        );

        let result = service.toggle("u1", "nonexistent").await;
        match result {
            Err(AppError::ProductNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected ProductNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_toggle_first_like_sets_flag() {
        let created = create_test_like("l1", "u1", "p1", true);

        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new(), vec![created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_product("p1")]])
                .into_connection(),
        );

        let service = LikeService::new(
            LikeRepository::new(like_db),
            ProductRepository::new(product_db),
        );

        let result = service.toggle("u1", "p1").await.unwrap();
        assert!(result.like);
    }

    #[tokio::test]
    async fn test_toggle_second_like_flips_flag_off() {
        let existing = create_test_like("l1", "u1", "p1", true);
        let mut flipped = existing.clone();
        flipped.like = false;
        flipped.updated_at = Some(Utc::now().into());

        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing], vec![flipped]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_product("p1")]])
                .into_connection(),
        );

        let service = LikeService::new(
            LikeRepository::new(like_db),
            ProductRepository::new(product_db),
        );

        let result = service.toggle("u1", "p1").await.unwrap();
        assert!(!result.like);
    }

    #[tokio::test]
    async fn test_list() {
        let l1 = create_test_like("l1", "u1", "p1", true);
        let l2 = create_test_like("l2", "u2", "p1", false);

        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1, l2]])
                .into_connection(),
        );
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = LikeService::new(
            LikeRepository::new(like_db),
            ProductRepository::new(product_db),
        );

        let result = service.list(10, None).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_liked_for_product() {
        let l1 = create_test_like("l1", "u1", "p1", true);

        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1]])
                .into_connection(),
        );
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = LikeService::new(
            LikeRepository::new(like_db),
            ProductRepository::new(product_db),
        );

        let result = service.liked_for_product("p1").await.unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].like);
    }
}
