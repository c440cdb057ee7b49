pub mod format;
pub mod validate;

pub use format::{products_to_views, ProductView, UserView};
