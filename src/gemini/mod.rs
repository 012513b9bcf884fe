//! Gemini generation API.
//!
//! A thin request/response wrapper: one blocking-style call per prompt,
//! no streaming, no retries.
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────────┐
//! │ CLI commands │ ───▶ │ TextGenerator│ ───▶ │  generateContent │
//! └──────────────┘      │ (GeminiClient)│      │   (HTTPS, JSON)  │
//!                       └──────┬───────┘      └──────────────────┘
//!                              ▼
//!                     Generation / Error
//!                              ▼
//!                 render_generation / render_failure
//!                              ▼
//!                          markdown
//! ```

pub mod client;
pub mod provider;
pub mod render;
pub mod types;

pub use client::GeminiClient;
pub use provider::TextGenerator;
pub use render::{render_failure, render_generation};
pub use types::{FinishReason, Generation, GenerationOptions};

#[cfg(test)]
pub(crate) mod testing;
