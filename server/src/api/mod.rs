pub mod chat;
pub mod meal_plans;
pub mod preferences;
pub mod public;
pub mod recipes;
pub mod search;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forkful_core::store::StoreError;
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a store failure onto an HTTP response.
///
/// Permission rejections and transient unavailability get their own
/// statuses so the client can tell a broken deployment from a blip;
/// everything else is a plain 500.
pub fn store_error_response(error: StoreError) -> Response {
    let (status, message) = match &error {
        StoreError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "Permission denied"),
        StoreError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Storage temporarily unavailable, try again",
        ),
        StoreError::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage operation failed"),
    };

    tracing::error!(error = %error, "Store operation failed");

    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        chat::ApiDoc::openapi(),
        search::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        preferences::ApiDoc::openapi(),
        meal_plans::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
