//! Per-user preference storage.

use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::routing::get;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use forkful_core::store::preferences;
use forkful_core::types::UserPreferences;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_preferences).put(set_preferences))
}

#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "preferences",
    responses(
        (status = 200, description = "The caller's preferences", body = Object),
        (status = 404, description = "Onboarding not completed yet", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_preferences(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match preferences::get_preferences(ctx.store.as_ref(), &user.id).await {
        Ok(Some(prefs)) => (StatusCode::OK, Json(prefs)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No preferences saved yet".to_string(),
            }),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "preferences",
    request_body = Object,
    responses(
        (status = 204, description = "Preferences stored"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_preferences(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
    Json(prefs): Json<UserPreferences>,
) -> impl IntoResponse {
    match preferences::set_preferences(ctx.store.as_ref(), &user.id, &user.id, &prefs).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e),
    }
}

#[derive(OpenApi)]
#[openapi(paths(get_preferences, set_preferences))]
pub struct ApiDoc;
