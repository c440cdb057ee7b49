pub mod product;
pub mod user;

pub use product::{Product, ProductChanges, ProductDraft};
pub use user::{NewUser, User};
