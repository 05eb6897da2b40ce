//! Domain models for recipe-service.

mod ingredient;
mod user;

pub use ingredient::Ingredient;
pub use user::UserId;
