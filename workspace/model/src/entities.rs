//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the product catalog service here:
//! the catalog of products and the credential table backing sign-up.

pub mod product;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::product::Entity as Product;
    pub use super::user::Entity as User;
}
