//! Core library for Forkful: recipe generation, persistence, and guided cooking.
//!
//! This crate holds everything that is not HTTP routing: the shared data
//! model, prompt construction for the completion service, extraction and
//! repair of recipe JSON from model replies, the document-store adapter,
//! and the cooking-session state machine. The `server` crate wires these
//! together behind an axum API.

pub mod cooking;
pub mod error;
pub mod extract;
pub mod image;
pub mod llm;
pub mod prompts;
pub mod repair;
pub mod store;
pub mod types;
