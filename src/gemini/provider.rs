//! Text generation trait.
//!
//! Defines the interface every generation backend implements.
//! The HTTP client implements it for real calls; tests supply
//! scripted in-memory implementations.

use super::types::{Generation, GenerationOptions};
use crate::error::Result;

/// Trait for text generation backends.
pub trait TextGenerator: Send + Sync {
    /// Model identifier used for logging and output metadata.
    fn model(&self) -> &str;

    /// Send one prompt and wait for the full reply.
    fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> impl std::future::Future<Output = Result<Generation>> + Send;
}
