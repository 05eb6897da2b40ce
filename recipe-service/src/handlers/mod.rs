pub mod health;
pub mod ingredients;
pub mod metrics;

pub use health::{health_check, readiness_check};
pub use ingredients::{create_ingredient, list_ingredients};
