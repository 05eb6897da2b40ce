use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::dtos::ingredients::{CreateIngredientRequest, IngredientResponse};
use crate::dtos::ErrorResponse;
use crate::middleware::Caller;
use crate::utils::Payload;
use crate::AppState;

/// List the caller's ingredients
#[utoipa::path(
    get,
    path = "/ingredients/",
    responses(
        (status = 200, description = "Caller's ingredients, by name descending", body = [IngredientResponse]),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ingredients",
    security(("bearer_auth" = []))
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, AppError> {
    let ingredients = state.ingredients.list(caller.user_id()).await?;

    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Create an ingredient owned by the caller
#[utoipa::path(
    post,
    path = "/ingredients/",
    request_body(
        content = CreateIngredientRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Empty, too long or malformed name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Ingredients",
    security(("bearer_auth" = []))
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Payload<CreateIngredientRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.map(|Payload(request)| request);

    let ingredient = state
        .ingredients
        .create(caller.user_id(), request)
        .await?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}
