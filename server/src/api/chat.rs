//! Conversational recipe generation.
//!
//! The flow in one place: build the system prompt from the request,
//! call the completion service, pull a recipe out of the reply, then
//! (best-effort, bounded) attach a generated image. Upstream failures
//! never surface as errors here; the user always gets a chat message,
//! at worst without a recipe.

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::context::AppState;
use axum::routing::post;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use forkful_core::extract::extract_recipe;
use forkful_core::image::generate_with_timeout;
use forkful_core::llm::{ChatMessage, ChatRequest};
use forkful_core::prompts::image::render_recipe_image_prompt;
use forkful_core::prompts::recipe_chat::render_recipe_chat_prompt;
use forkful_core::types::{Recipe, UserPreferences};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Shown instead of calling the network when no completion API key is
/// configured.
const MISSING_KEY_MESSAGE: &str = "The recipe assistant isn't set up yet: the server has no \
completion-service API key. Set ANTHROPIC_API_KEY and restart to enable recipe generation.";

/// Shown when the completion service is unreachable or rejects the call.
const UPSTREAM_ERROR_MESSAGE: &str =
    "Sorry, I couldn't reach the recipe assistant just now. Please try again in a moment.";

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(recipe_chat))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeChatRequest {
    /// Conversation history, oldest first.
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
    /// Recipe being modified, embedded verbatim in the prompt.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub current_recipe: Option<Recipe>,
    #[serde(default)]
    pub available_ingredients: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub user_preferences: Option<UserPreferences>,
    /// Ingredients the user has marked as unavailable.
    #[serde(default)]
    pub removed_ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeChatResponse {
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub recipe: Option<Recipe>,
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = RecipeChatRequest,
    responses(
        (status = 200, description = "Chat reply, with a recipe when one was generated", body = RecipeChatResponse),
        (status = 400, description = "Empty conversation", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn recipe_chat(
    AuthUser(_user): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<RecipeChatRequest>,
) -> impl IntoResponse {
    if request.messages.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "messages must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let Some(llm) = ctx.llm.as_ref() else {
        return (
            StatusCode::OK,
            Json(RecipeChatResponse {
                message: MISSING_KEY_MESSAGE.to_string(),
                recipe: None,
            }),
        )
            .into_response();
    };

    let system = render_recipe_chat_prompt(
        request.current_recipe.as_ref(),
        &request.available_ingredients,
        &request.removed_ingredients,
        request.user_preferences.as_ref(),
    );

    let reply = match llm
        .complete(&ChatRequest::new(system, request.messages))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "Completion service call failed");
            return (
                StatusCode::OK,
                Json(RecipeChatResponse {
                    message: UPSTREAM_ERROR_MESSAGE.to_string(),
                    recipe: None,
                }),
            )
                .into_response();
        }
    };

    let extraction = extract_recipe(&reply);
    let mut recipe = extraction.recipe;

    if let Some(recipe) = recipe.as_mut() {
        attach_image(&ctx, recipe).await;
    }

    (
        StatusCode::OK,
        Json(RecipeChatResponse {
            message: extraction.message,
            recipe,
        }),
    )
        .into_response()
}

/// Best-effort image generation for a freshly extracted recipe.
///
/// Runs under the core image timeout and leaves `image_url` unset on any
/// failure; the recipe response does not wait beyond the bound.
pub(crate) async fn attach_image(ctx: &AppState, recipe: &mut Recipe) {
    if recipe.image_url.is_some() {
        return;
    }
    let Some(image) = ctx.image.as_ref() else {
        return;
    };

    let prompt = render_recipe_image_prompt(recipe);
    recipe.image_url = generate_with_timeout(image.as_ref(), &prompt).await;
}

#[derive(OpenApi)]
#[openapi(
    paths(recipe_chat),
    components(schemas(RecipeChatRequest, RecipeChatResponse))
)]
pub struct ApiDoc;
