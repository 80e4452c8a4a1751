use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use forkful_core::store::meal_plans;

#[utoipa::path(
    delete,
    path = "/api/meal-plans/{id}",
    tag = "meal_plans",
    params(
        ("id" = String, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 204, description = "Meal plan deleted (or did not exist)"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Meal plan owned by another user", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_meal_plan(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match meal_plans::delete_meal_plan(ctx.store.as_ref(), &user.id, &user.id, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e),
    }
}
