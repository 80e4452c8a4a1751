use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use forkful_core::store::recipes;
use forkful_core::types::Recipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeResponse {
    pub recipe_id: String,
    pub saved_at: DateTime<Utc>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = Object,
    responses(
        (status = 201, description = "Recipe saved for the caller", body = SaveRecipeResponse),
        (status = 400, description = "Recipe has no id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_recipe(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Json(recipe): Json<Recipe>,
) -> impl IntoResponse {
    if recipe.id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Recipe must have an id".to_string(),
            }),
        )
            .into_response();
    }

    match recipes::save_recipe(ctx.store.as_ref(), &user.id, &user.id, &recipe).await {
        Ok(saved) => (
            StatusCode::CREATED,
            Json(SaveRecipeResponse {
                recipe_id: saved.recipe.id,
                saved_at: saved.saved_at,
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}
