//! Scripted generator for unit tests.

use super::provider::TextGenerator;
use super::types::{Generation, GenerationOptions};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued replies in order and records every prompt it receives.
///
/// When the queue runs dry it echoes a fixed reply.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<Generation>>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(Generation::text(text)))
    }

    pub fn fail(self, status: u16, message: &str) -> Self {
        self.push(Err(Error::Api {
            status,
            message: message.to_string(),
        }))
    }

    pub fn push(self, reply: Result<Generation>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn options(&self) -> Vec<GenerationOptions> {
        self.calls.lock().unwrap().iter().map(|(_, o)| *o).collect()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *options));
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Generation::text("scripted reply")))
    }
}
