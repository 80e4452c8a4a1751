//! Explicitly constructed application context.
//!
//! Every external collaborator (completion service, image service,
//! document store, identity provider) is built once at startup and
//! handed to handlers through shared state. Handlers never reach for
//! globals or re-read the environment.

use std::env;
use std::sync::Arc;

use forkful_core::image::{create_image_provider_from_env, ImageProvider};
use forkful_core::llm::{create_provider_from_env, CompletionProvider};
use forkful_core::store::{DocumentStore, FirestoreStore};

use crate::auth::verifier::{IdentityClient, TokenVerifier};

/// Application state shared across all handlers.
pub type AppState = Arc<AppContext>;

pub struct AppContext {
    /// Completion provider; `None` when no API key is configured, in
    /// which case generation endpoints answer with a canned
    /// instructional message instead of calling the network.
    pub llm: Option<Box<dyn CompletionProvider>>,
    /// Image provider; `None` disables image generation entirely.
    pub image: Option<Box<dyn ImageProvider>>,
    pub store: Box<dyn DocumentStore>,
    pub verifier: Box<dyn TokenVerifier>,
}

impl AppContext {
    /// Build the context from environment configuration.
    ///
    /// Storage and identity config are required; the two AI providers
    /// are optional and degrade gracefully when absent.
    pub fn from_env() -> Self {
        let llm = match create_provider_from_env() {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    "Completion provider configured"
                );
                Some(provider)
            }
            Err(e) => {
                tracing::warn!("Completion provider unavailable: {}", e);
                None
            }
        };

        let image = match create_image_provider_from_env() {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    "Image provider configured"
                );
                Some(provider)
            }
            Err(e) => {
                tracing::warn!("Image provider unavailable: {}", e);
                None
            }
        };

        let project_id =
            env::var("FORKFUL_FIRESTORE_PROJECT").expect("FORKFUL_FIRESTORE_PROJECT must be set");
        let store_api_key =
            env::var("FORKFUL_FIRESTORE_API_KEY").expect("FORKFUL_FIRESTORE_API_KEY must be set");
        let store: Box<dyn DocumentStore> =
            Box::new(FirestoreStore::new(project_id, store_api_key));

        let identity_api_key =
            env::var("FORKFUL_IDENTITY_API_KEY").expect("FORKFUL_IDENTITY_API_KEY must be set");
        let verifier: Box<dyn TokenVerifier> = Box::new(IdentityClient::new(identity_api_key));

        Self {
            llm,
            image,
            store,
            verifier,
        }
    }
}
