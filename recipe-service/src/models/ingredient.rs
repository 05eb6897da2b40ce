//! Ingredient model for recipe-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::UserId;

/// An ingredient owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub ingredient_id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
}

impl Ingredient {
    pub fn is_owned_by(&self, owner: &UserId) -> bool {
        self.owner_id == owner.as_str()
    }
}

