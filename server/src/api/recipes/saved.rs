use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use forkful_core::store::recipes;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IsRecipeSavedResponse {
    pub saved: bool,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/saved",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Whether the caller has saved this recipe", body = IsRecipeSavedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn is_recipe_saved(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match recipes::is_recipe_saved(ctx.store.as_ref(), &user.id, &id).await {
        Ok(saved) => (StatusCode::OK, Json(IsRecipeSavedResponse { saved })).into_response(),
        Err(e) => store_error_response(e),
    }
}
