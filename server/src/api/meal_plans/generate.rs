//! Meal-plan generation: deliberately not live yet.
//!
//! The endpoint exists so clients have a stable URL, but it answers 503
//! regardless of input until the generation flow ships.

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/api/meal-plans/generate",
    tag = "meal_plans",
    responses(
        (status = 503, description = "Feature not yet available", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_meal_plan(AuthUser(_user): AuthUser) -> impl IntoResponse {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "Meal plan generation is coming soon".to_string(),
        }),
    )
}
