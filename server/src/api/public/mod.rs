pub mod ping;

use crate::context::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new().route("/api/test/unauthed-ping", get(ping::unauthed_ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(ping::unauthed_ping),
    components(schemas(ping::UnauthedPingResponse))
)]
pub struct ApiDoc;
