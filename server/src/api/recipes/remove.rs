use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use forkful_core::store::recipes;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe removed (or was never saved)"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_recipe(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match recipes::remove_recipe(ctx.store.as_ref(), &user.id, &user.id, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e),
    }
}
