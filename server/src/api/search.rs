//! One-shot recipe search: a query in, a recipe (or nothing) out.

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::routing::post;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use forkful_core::extract::extract_recipe;
use forkful_core::llm::ChatRequest;
use forkful_core::prompts::recipe_search::render_recipe_search_prompt;
use forkful_core::types::{Recipe, UserPreferences};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(recipe_search))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchRequest {
    pub query: String,
    #[serde(default)]
    pub available_ingredients: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub user_preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSearchResponse {
    #[schema(value_type = Option<Object>)]
    pub recipe: Option<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/search",
    tag = "search",
    request_body = RecipeSearchRequest,
    responses(
        (status = 200, description = "Search result; recipe is null when none could be generated", body = RecipeSearchResponse),
        (status = 400, description = "Empty query", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Completion service failure", body = RecipeSearchResponse),
        (status = 503, description = "Completion service not configured", body = RecipeSearchResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn recipe_search(
    AuthUser(_user): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<RecipeSearchRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "query must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let Some(llm) = ctx.llm.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(RecipeSearchResponse {
                recipe: None,
                error: Some("Recipe search is not configured on this server".to_string()),
            }),
        )
            .into_response();
    };

    let system = render_recipe_search_prompt(
        &request.query,
        &request.available_ingredients,
        request.user_preferences.as_ref(),
    );

    let reply = match llm
        .complete(&ChatRequest::single(system, request.query.clone()))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "Completion service call failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RecipeSearchResponse {
                    recipe: None,
                    error: Some("Recipe search failed, please try again".to_string()),
                }),
            )
                .into_response();
        }
    };

    let extraction = extract_recipe(&reply);
    let mut recipe = extraction.recipe;

    match recipe.as_mut() {
        Some(recipe) => {
            crate::api::chat::attach_image(&ctx, recipe).await;
        }
        None => {
            return (
                StatusCode::OK,
                Json(RecipeSearchResponse {
                    recipe: None,
                    error: Some("No recipe could be generated for that search".to_string()),
                }),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        Json(RecipeSearchResponse {
            recipe,
            error: None,
        }),
    )
        .into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(recipe_search),
    components(schemas(RecipeSearchRequest, RecipeSearchResponse))
)]
pub struct ApiDoc;
