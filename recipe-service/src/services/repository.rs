//! Storage port for ingredients and its in-memory adapter.

use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use std::cmp::Ordering;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{Ingredient, UserId};
use crate::services::metrics::QueryTimer;

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Persist a new ingredient owned by `owner`. Duplicates are allowed.
    async fn create(&self, owner: &UserId, name: &str) -> Result<Ingredient, AppError>;

    /// All of `owner`'s ingredients, by name descending then newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ingredient>, AppError>;

    async fn exists_by_owner_and_name(&self, owner: &UserId, name: &str)
        -> Result<bool, AppError>;

    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Listing order shared by every adapter: byte-wise name descending, then
/// newest first.
pub fn listing_order(a: &Ingredient, b: &Ingredient) -> Ordering {
    b.name
        .as_bytes()
        .cmp(a.name.as_bytes())
        .then_with(|| b.created_utc.cmp(&a.created_utc))
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct InMemoryRepository {
    ingredients: Mutex<Vec<Ingredient>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, f: impl FnOnce(&mut Vec<Ingredient>) -> T) -> Result<T, AppError> {
        let mut rows = self.ingredients.lock().map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })?;
        Ok(f(&mut rows))
    }
}

#[async_trait]
impl IngredientRepository for InMemoryRepository {
    async fn create(&self, owner: &UserId, name: &str) -> Result<Ingredient, AppError> {
        let _timer = QueryTimer::start("create_ingredient");

        let ingredient = Ingredient {
            ingredient_id: Uuid::new_v4(),
            owner_id: owner.as_str().to_string(),
            name: name.to_string(),
            created_utc: Utc::now(),
        };

        self.with_rows(|rows| rows.push(ingredient.clone()))?;
        Ok(ingredient)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ingredient>, AppError> {
        let _timer = QueryTimer::start("list_ingredients");

        let mut owned = self.with_rows(|rows| {
            rows.iter()
                .filter(|i| i.is_owned_by(owner))
                .cloned()
                .collect::<Vec<_>>()
        })?;
        owned.sort_by(listing_order);
        Ok(owned)
    }

    async fn exists_by_owner_and_name(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<bool, AppError> {
        let _timer = QueryTimer::start("ingredient_exists");

        self.with_rows(|rows| rows.iter().any(|i| i.is_owned_by(owner) && i.name == name))
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, AppError> {
        self.with_rows(|rows| rows.iter().filter(|i| i.is_owned_by(owner)).count() as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.with_rows(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_only_the_owners_rows_in_descending_name_order() {
        let repo = InMemoryRepository::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        repo.create(&alice, "Kale").await.unwrap();
        repo.create(&bob, "Vinegar").await.unwrap();
        repo.create(&alice, "Salt").await.unwrap();
        repo.create(&alice, "Basil").await.unwrap();

        let names: Vec<_> = repo
            .list_by_owner(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(names, vec!["Salt", "Kale", "Basil"]);
        assert_eq!(repo.count_by_owner(&alice).await.unwrap(), 3);
        assert_eq!(repo.count_by_owner(&bob).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn existence_is_scoped_to_owner() {
        let repo = InMemoryRepository::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        repo.create(&bob, "Vinegar").await.unwrap();

        assert!(repo.exists_by_owner_and_name(&bob, "Vinegar").await.unwrap());
        assert!(!repo.exists_by_owner_and_name(&alice, "Vinegar").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_names_are_kept() {
        let repo = InMemoryRepository::new();
        let alice = UserId::new("alice");

        let first = repo.create(&alice, "Salt").await.unwrap();
        let second = repo.create(&alice, "Salt").await.unwrap();

        assert_ne!(first.ingredient_id, second.ingredient_id);
        assert_eq!(repo.list_by_owner(&alice).await.unwrap().len(), 2);
    }

    #[test]
    fn ordering_is_byte_wise() {
        let make = |name: &str| Ingredient {
            ingredient_id: Uuid::new_v4(),
            owner_id: "alice".to_string(),
            name: name.to_string(),
            created_utc: Utc::now(),
        };

        let mut rows = vec![make("apple"), make("Zucchini"), make("banana")];
        rows.sort_by(listing_order);

        let names: Vec<_> = rows.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["banana", "apple", "Zucchini"]);
    }
}
