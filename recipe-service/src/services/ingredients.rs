//! List/create operations on the caller's ingredients.

use service_core::error::AppError;
use std::sync::Arc;
use validator::Validate;

use crate::dtos::ingredients::CreateIngredientRequest;
use crate::models::{Ingredient, UserId};
use crate::services::metrics;
use crate::services::repository::IngredientRepository;

#[derive(Clone)]
pub struct IngredientService {
    repository: Arc<dyn IngredientRepository>,
}

impl IngredientService {
    pub fn new(repository: Arc<dyn IngredientRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn IngredientRepository> {
        &self.repository
    }

    /// The caller's ingredients, ordered by name descending.
    pub async fn list(&self, caller: Option<&UserId>) -> Result<Vec<Ingredient>, AppError> {
        let owner = require_caller(caller)?;
        self.repository.list_by_owner(owner).await
    }

    /// Create an ingredient owned by the caller.
    ///
    /// Authentication is checked before the payload, so an anonymous caller
    /// gets `Unauthorized` whatever it sent. Nothing is stored on failure.
    pub async fn create(
        &self,
        caller: Option<&UserId>,
        request: Result<CreateIngredientRequest, AppError>,
    ) -> Result<Ingredient, AppError> {
        let owner = require_caller(caller)?;

        let request = request.inspect_err(|_| metrics::record_rejection("validation"))?;
        request.validate().map_err(|e| {
            metrics::record_rejection("validation");
            tracing::debug!(owner_id = %owner, error = %e, "Rejected ingredient payload");
            AppError::from(e)
        })?;

        let ingredient = self.repository.create(owner, &request.name).await?;
        metrics::record_ingredient_created();

        Ok(ingredient)
    }
}

fn require_caller(caller: Option<&UserId>) -> Result<&UserId, AppError> {
    caller.ok_or_else(|| {
        metrics::record_rejection("unauthorized");
        AppError::Unauthorized(anyhow::anyhow!(
            "Authentication credentials were not provided"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::repository::InMemoryRepository;

    fn service() -> IngredientService {
        IngredientService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn anonymous_list_is_unauthorized() {
        let result = service().list(None).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn anonymous_create_is_unauthorized_even_with_bad_payload() {
        let svc = service();
        let result = svc
            .create(None, Ok(CreateIngredientRequest::new("")))
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn create_sets_owner_to_caller() {
        let svc = service();
        let alice = UserId::new("alice");

        let created = svc
            .create(Some(&alice), Ok(CreateIngredientRequest::new("Cabbage")))
            .await
            .unwrap();

        assert!(created.is_owned_by(&alice));
        assert!(svc
            .repository()
            .exists_by_owner_and_name(&alice, "Cabbage")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_writing() {
        let svc = service();
        let alice = UserId::new("alice");

        let result = svc
            .create(Some(&alice), Ok(CreateIngredientRequest::new("")))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(svc.repository().count_by_owner(&alice).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_excludes_other_owners() {
        let svc = service();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        svc.create(Some(&bob), Ok(CreateIngredientRequest::new("Vinegar")))
            .await
            .unwrap();
        svc.create(Some(&alice), Ok(CreateIngredientRequest::new("Kale")))
            .await
            .unwrap();
        svc.create(Some(&alice), Ok(CreateIngredientRequest::new("Salt")))
            .await
            .unwrap();

        let names: Vec<_> = svc
            .list(Some(&alice))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(names, vec!["Salt", "Kale"]);
    }
}
