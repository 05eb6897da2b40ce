//! PostgreSQL adapter for the ingredient repository.

use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{Ingredient, UserId};
use crate::services::metrics::QueryTimer;
use crate::services::repository::IngredientRepository;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "recipe-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl IngredientRepository for Database {
    #[instrument(skip(self, name), fields(owner_id = %owner))]
    async fn create(&self, owner: &UserId, name: &str) -> Result<Ingredient, AppError> {
        let _timer = QueryTimer::start("create_ingredient");

        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (ingredient_id, owner_id, name)
            VALUES ($1, $2, $3)
            RETURNING ingredient_id, owner_id, name, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
                AppError::BadRequest(anyhow::anyhow!("Ingredient name must not be blank"))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create ingredient: {}", e)),
        })?;

        info!(ingredient_id = %ingredient.ingredient_id, name = %ingredient.name, "Ingredient created");

        Ok(ingredient)
    }

    #[instrument(skip(self), fields(owner_id = %owner))]
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ingredient>, AppError> {
        let _timer = QueryTimer::start("list_ingredients");

        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT ingredient_id, owner_id, name, created_utc
            FROM ingredients
            WHERE owner_id = $1
            ORDER BY name COLLATE "C" DESC, created_utc DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list ingredients: {}", e)))
    }

    #[instrument(skip(self), fields(owner_id = %owner))]
    async fn exists_by_owner_and_name(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<bool, AppError> {
        let _timer = QueryTimer::start("ingredient_exists");

        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ingredients WHERE owner_id = $1 AND name = $2)",
        )
        .bind(owner.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to check ingredient: {}", e))
        })
    }

    #[instrument(skip(self), fields(owner_id = %owner))]
    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, AppError> {
        let _timer = QueryTimer::start("count_ingredients");

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ingredients WHERE owner_id = $1",
        )
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to count ingredients: {}", e))
        })?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
