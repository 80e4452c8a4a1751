pub mod list;
pub mod remove;
pub mod save;
pub mod saved;

use crate::context::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_saved_recipes).post(save::save_recipe))
        .route("/{id}", delete(remove::remove_recipe))
        .route("/{id}/saved", get(saved::is_recipe_saved))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_saved_recipes,
        save::save_recipe,
        remove::remove_recipe,
        saved::is_recipe_saved,
    ),
    components(schemas(
        list::ListSavedRecipesResponse,
        save::SaveRecipeResponse,
        saved::IsRecipeSavedResponse,
    ))
)]
pub struct ApiDoc;
