use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use forkful_core::store::recipes;
use forkful_core::types::SavedRecipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSavedRecipesResponse {
    #[schema(value_type = Vec<Object>)]
    pub recipes: Vec<SavedRecipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "The caller's saved recipes, most recently saved first", body = ListSavedRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_saved_recipes(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match recipes::list_saved_recipes(ctx.store.as_ref(), &user.id).await {
        Ok(recipes) => {
            (StatusCode::OK, Json(ListSavedRecipesResponse { recipes })).into_response()
        }
        Err(e) => store_error_response(e),
    }
}
