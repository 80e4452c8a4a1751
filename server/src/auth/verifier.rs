//! Token verification against the identity provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const DEFAULT_API_BASE: &str = "https://identitytoolkit.googleapis.com";

/// The identity the provider vouches for: a stable user id.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
}

/// Trait for token verifiers.
///
/// `None` covers every failure mode (expired, malformed, revoked,
/// provider unreachable); callers only distinguish valid from not.
#[async_trait]
pub trait TokenVerifier: Send + Sync + fmt::Debug {
    async fn verify(&self, token: &str) -> Option<AuthenticatedUser>;
}

/// Real verifier calling the identity provider's account-lookup endpoint.
#[derive(Debug)]
pub struct IdentityClient {
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(api_key: String) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE.to_string())
    }

    /// Create a verifier pointed at a non-default base URL (tests/emulator).
    pub fn with_api_base(api_key: String, api_base: String) -> Self {
        Self {
            api_key,
            api_base,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
}

#[async_trait]
impl TokenVerifier for IdentityClient {
    async fn verify(&self, token: &str) -> Option<AuthenticatedUser> {
        let url = format!(
            "{}/v1/accounts:lookup?key={}",
            self.api_base, self.api_key
        );

        let response = match self
            .client
            .post(url)
            .json(&LookupRequest { id_token: token })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Identity provider unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            return None;
        }

        let lookup: LookupResponse = response.json().await.ok()?;
        let user = lookup.users.into_iter().next()?;
        Some(AuthenticatedUser { id: user.local_id })
    }
}

/// Fixed token -> user-id map for tests.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, String>,
}

#[allow(dead_code)]
impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: &str, user_id: &str) -> Self {
        self.tokens.insert(token.to_string(), user_id.to_string());
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens.get(token).map(|id| AuthenticatedUser {
            id: id.clone(),
        })
    }
}
