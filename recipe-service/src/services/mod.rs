pub mod database;
pub mod ingredients;
pub mod jwt;
pub mod metrics;
pub mod repository;

pub use database::Database;
pub use ingredients::IngredientService;
pub use jwt::{AccessTokenClaims, JwtService};
pub use repository::{InMemoryRepository, IngredientRepository};
