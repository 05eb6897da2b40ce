use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::Ingredient;

/// Body of `POST /ingredients/`, as JSON or form data.
///
/// `name` is trimmed on the way in; a missing field reads as empty.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateIngredientRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Name must be between 1 and 255 characters"
        ),
        custom(
            function = "reject_null_characters",
            message = "Null characters are not allowed"
        )
    )]
    #[schema(example = "Cabbage", min_length = 1, max_length = 255)]
    pub name: String,
}

impl CreateIngredientRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Text columns cannot hold NUL, so such names are refused up front.
fn reject_null_characters(name: &str) -> Result<(), ValidationError> {
    if name.contains('\0') {
        return Err(ValidationError::new("null_characters"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Cabbage")]
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.ingredient_id,
            name: ingredient.name,
        }
    }
}
