use crate::api::{store_error_response, ErrorResponse};
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use forkful_core::store::meal_plans::{self, StoredMealPlan};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMealPlansResponse {
    #[schema(value_type = Vec<Object>)]
    pub meal_plans: Vec<StoredMealPlan>,
}

#[utoipa::path(
    get,
    path = "/api/meal-plans",
    tag = "meal_plans",
    responses(
        (status = 200, description = "The caller's meal plans, newest first", body = ListMealPlansResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_meal_plans(
    AuthUser(user): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match meal_plans::list_meal_plans(ctx.store.as_ref(), &user.id).await {
        Ok(meal_plans) => {
            (StatusCode::OK, Json(ListMealPlansResponse { meal_plans })).into_response()
        }
        Err(e) => store_error_response(e),
    }
}
