use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use forkful_core::store::meal_plans;

#[utoipa::path(
    get,
    path = "/api/meal-plans/{id}",
    tag = "meal_plans",
    params(
        ("id" = String, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Meal plan details", body = Object),
        (status = 404, description = "Meal plan not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Meal plan owned by another user", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_meal_plan(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match meal_plans::get_meal_plan(ctx.store.as_ref(), &user.id, &id).await {
        Ok(Some(plan)) => (StatusCode::OK, Json(plan)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Meal plan not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}
