//! Business logic services.

pub mod category;
pub mod comment;
pub mod like;
pub mod product;
pub mod product_image;
pub mod user;

pub use category::{CategoryService, CreateCategoryInput};
pub use comment::{CommentService, CreateCommentInput, UpdateCommentInput};
pub use like::LikeService;
pub use product::{CreateProductInput, ProductService, UpdateProductInput};
pub use product_image::{CreateProductImageInput, ProductImageService};
pub use user::{CreateUserInput, UserService};
