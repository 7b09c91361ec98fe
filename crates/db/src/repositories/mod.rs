//! Database repositories.

mod category;
mod comment;
mod like;
mod product;
mod product_image;
mod user;

pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use like::LikeRepository;
pub use product::ProductRepository;
pub use product_image::ProductImageRepository;
pub use user::UserRepository;
