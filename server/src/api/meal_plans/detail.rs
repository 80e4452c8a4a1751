//! Fill in a lightweight meal-plan recipe.
//!
//! Meal plans embed name-and-emoji recipe stubs; the client calls this
//! in the background once an item is opened. Failures fall back to the
//! input recipe: the user has usually navigated on already, so a
//! degraded answer beats an error.

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use forkful_core::extract::extract_recipe;
use forkful_core::llm::ChatRequest;
use forkful_core::prompts::meal_plan_detail::render_meal_plan_detail_prompt;
use forkful_core::types::{Recipe, UserPreferences};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDetailRequest {
    #[schema(value_type = Object)]
    pub recipe: Recipe,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub user_preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealPlanDetailResponse {
    #[schema(value_type = Object)]
    pub recipe: Recipe,
}

#[utoipa::path(
    post,
    path = "/api/meal-plans/detail",
    tag = "meal_plans",
    request_body = MealPlanDetailRequest,
    responses(
        (status = 200, description = "Completed recipe; falls back to the input on failure", body = MealPlanDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn meal_plan_detail(
    AuthUser(_user): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<MealPlanDetailRequest>,
) -> impl IntoResponse {
    let input = request.recipe;

    if input.is_complete() {
        // Nothing to fill in
        return (
            StatusCode::OK,
            Json(MealPlanDetailResponse { recipe: input }),
        )
            .into_response();
    }

    let Some(llm) = ctx.llm.as_ref() else {
        tracing::warn!("Meal-plan detail requested with no completion provider configured");
        return (
            StatusCode::OK,
            Json(MealPlanDetailResponse { recipe: input }),
        )
            .into_response();
    };

    let system = render_meal_plan_detail_prompt(&input, request.user_preferences.as_ref());
    let reply = match llm
        .complete(&ChatRequest::single(system, "Write the complete recipe."))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, recipe = %input.name, "Meal-plan detail completion failed");
            return (
                StatusCode::OK,
                Json(MealPlanDetailResponse { recipe: input }),
            )
                .into_response();
        }
    };

    let recipe = match extract_recipe(&reply).recipe {
        Some(completed) => merge_onto_input(input, completed),
        None => {
            tracing::warn!("Meal-plan detail reply contained no recipe");
            input
        }
    };

    (StatusCode::OK, Json(MealPlanDetailResponse { recipe })).into_response()
}

/// Pin identity fields from the plan's stub onto the completed recipe so
/// patching it back into the plan keeps references intact.
fn merge_onto_input(input: Recipe, mut completed: Recipe) -> Recipe {
    if !input.id.is_empty() {
        completed.id = input.id;
    }
    if !input.name.is_empty() {
        completed.name = input.name;
    }
    if completed.emoji.is_empty() {
        completed.emoji = input.emoji;
    }
    if completed.image_url.is_none() {
        completed.image_url = input.image_url;
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_pins_identity_fields() {
        let input = Recipe::from_value(json!({
            "id": "stub-1",
            "name": "Pesto Pasta",
            "emoji": "🍝",
            "ingredients": []
        }))
        .unwrap();

        let completed = Recipe::from_value(json!({
            "id": "model-made-up",
            "name": "Pesto Pasta Supreme",
            "ingredients": [{"name": "Basil"}],
            "instructions": [{"step": "Blend."}]
        }))
        .unwrap();

        let merged = merge_onto_input(input, completed);
        assert_eq!(merged.id, "stub-1");
        assert_eq!(merged.name, "Pesto Pasta");
        assert_eq!(merged.emoji, "🍝");
        assert!(merged.is_complete());
    }
}
