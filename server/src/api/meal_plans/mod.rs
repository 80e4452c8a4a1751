pub mod delete;
pub mod detail;
pub mod generate;
pub mod get;
pub mod list;

use crate::context::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/meal-plans endpoints (mounted at /api/meal-plans)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_meal_plans))
        .route("/detail", post(detail::meal_plan_detail))
        .route("/generate", post(generate::generate_meal_plan))
        .route(
            "/{id}",
            get(get::get_meal_plan).delete(delete::delete_meal_plan),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_meal_plans,
        get::get_meal_plan,
        delete::delete_meal_plan,
        detail::meal_plan_detail,
        generate::generate_meal_plan,
    ),
    components(schemas(
        list::ListMealPlansResponse,
        detail::MealPlanDetailRequest,
        detail::MealPlanDetailResponse,
    ))
)]
pub struct ApiDoc;
