//! Database entities.

pub mod category;
pub mod comment;
pub mod like;
pub mod product;
pub mod product_image;
pub mod user;

pub use category::Entity as Category;
pub use comment::Entity as Comment;
pub use like::Entity as Like;
pub use product::Entity as Product;
pub use product_image::Entity as ProductImage;
pub use user::Entity as User;
