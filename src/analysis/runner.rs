//! Prompt a document with a pattern and reassemble the reply.

use super::sections::{estimate_tokens, split_by_sections};
use crate::gemini::{render_failure, render_generation, GenerationOptions, TextGenerator};
use crate::patterns::AssistKind;

/// Documents above this estimate are analyzed section by section.
pub const MAX_INPUT_TOKENS: usize = 30_000;

/// Progress of a sectioned analysis.
#[derive(Debug, Clone, Copy)]
pub struct SectionProgress<'a> {
    /// One-based index of the section being sent.
    pub index: usize,
    pub total: usize,
    pub title: &'a str,
}

/// Runs prompts against a generator and always yields markdown.
pub struct Analyzer<'g, G: TextGenerator> {
    generator: &'g G,
    max_input_tokens: usize,
}

impl<'g, G: TextGenerator> Analyzer<'g, G> {
    #[must_use]
    pub fn new(generator: &'g G) -> Self {
        Self {
            generator,
            max_input_tokens: MAX_INPUT_TOKENS,
        }
    }

    /// Override the sectioning threshold.
    #[must_use]
    pub fn with_max_input_tokens(mut self, max_input_tokens: usize) -> Self {
        self.max_input_tokens = max_input_tokens;
        self
    }

    /// Whether `context` will be split into sections.
    #[must_use]
    pub fn needs_sections(&self, context: &str) -> bool {
        estimate_tokens(context) > self.max_input_tokens
    }

    /// Analyze a document with a pattern prompt.
    ///
    /// Failures are rendered into the returned markdown; nothing is retried.
    pub async fn run(&self, prompt: &str, context: &str) -> String {
        self.run_with_progress(prompt, context, |_| {}).await
    }

    /// Like [`Self::run`], reporting each section before it is sent.
    pub async fn run_with_progress<F>(&self, prompt: &str, context: &str, mut on_section: F) -> String
    where
        F: FnMut(SectionProgress<'_>),
    {
        if self.needs_sections(context) {
            return self.run_sectioned(prompt, context, &mut on_section).await;
        }

        let full_prompt = format!("{prompt}\n\n--- USER CONTEXT (TELOS FILE) ---\n{context}\n");
        match self
            .generator
            .generate(&full_prompt, &GenerationOptions::analysis())
            .await
        {
            Ok(generation) => render_generation(&generation),
            Err(e) => {
                tracing::warn!(error = %e, "Analysis request failed");
                render_failure(&e)
            }
        }
    }

    async fn run_sectioned<F>(&self, prompt: &str, context: &str, on_section: &mut F) -> String
    where
        F: FnMut(SectionProgress<'_>),
    {
        let sections = split_by_sections(context);
        let total = sections.len();
        tracing::info!(
            estimated_tokens = estimate_tokens(context),
            sections = total,
            "Large document, analyzing by section"
        );

        let mut results = Vec::with_capacity(total);
        for (i, section) in sections.iter().enumerate() {
            let index = i + 1;
            on_section(SectionProgress {
                index,
                total,
                title: section.title(),
            });

            let section_prompt = format!(
                "{prompt}\n\n**Note:** This is section {index} of {total} from a larger Telos document.\n\n\
                 --- SECTION CONTENT ---\n{}\n",
                section.content
            );

            let body = match self
                .generator
                .generate(&section_prompt, &GenerationOptions::section())
                .await
            {
                Ok(generation) => render_generation(&generation),
                Err(e) => {
                    tracing::warn!(section = index, error = %e, "Section request failed");
                    format!("❌ Error: {e}")
                }
            };
            results.push(format!("### {}\n\n{body}", section.title()));
        }

        format!(
            "# Analysis Results (Processed in Sections)\n\n{}",
            results.join("\n\n---\n\n")
        )
    }

    /// Writing assistance for a draft document.
    pub async fn assist(&self, kind: AssistKind, draft: &str) -> String {
        let document = if draft.trim().is_empty() {
            "[User is just starting their Telos]"
        } else {
            draft
        };

        let full_prompt = format!(
            "{}\n\n--- USER'S TELOS DOCUMENT ---\n{document}\n\n\
             Provide helpful, actionable guidance. Be concise but insightful. Use markdown formatting.\n",
            kind.prompt()
        );

        match self
            .generator
            .generate(&full_prompt, &GenerationOptions::plain())
            .await
        {
            Ok(generation) => render_generation(&generation),
            Err(e) => format!("❌ Error getting AI assistance: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::testing::ScriptedGenerator;

    #[tokio::test]
    async fn test_small_document_single_call() {
        let generator = ScriptedGenerator::new().reply("Summary here");
        let analyzer = Analyzer::new(&generator);

        let out = analyzer.run("Summarize.", "## Goals\n- ship it").await;

        assert_eq!(out, "Summary here");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Summarize."));
        assert!(prompts[0].contains("--- USER CONTEXT (TELOS FILE) ---\n## Goals"));
        assert_eq!(generator.options()[0], GenerationOptions::analysis());
    }

    #[tokio::test]
    async fn test_failure_becomes_markdown() {
        let generator = ScriptedGenerator::new().fail(429, "RESOURCE_EXHAUSTED: quota");
        let out = Analyzer::new(&generator).run("p", "ctx").await;
        assert!(out.contains("Rate Limit Reached"));
    }

    #[tokio::test]
    async fn test_large_document_split_by_section() {
        let generator = ScriptedGenerator::new()
            .reply("intro analysis")
            .fail(500, "backend exploded")
            .reply("goals analysis");
        let analyzer = Analyzer::new(&generator).with_max_input_tokens(5);

        let doc = "preface text here\n## Mission\nHelp people grow\n## Goals\n- run a marathon";
        let mut seen = Vec::new();
        let out = analyzer
            .run_with_progress("Review.", doc, |p| {
                seen.push((p.index, p.total, p.title.to_string()));
            })
            .await;

        assert_eq!(
            seen,
            vec![
                (1, 3, "Introduction".to_string()),
                (2, 3, "Mission".to_string()),
                (3, 3, "Goals".to_string()),
            ]
        );

        assert!(out.starts_with("# Analysis Results (Processed in Sections)\n\n### Introduction\n\nintro analysis"));
        assert!(out.contains("### Mission\n\n❌ Error: Model API error (500): backend exploded"));
        assert!(out.ends_with("### Goals\n\ngoals analysis"));
        assert_eq!(out.matches("\n\n---\n\n").count(), 2);

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[1].contains("This is section 2 of 3 from a larger Telos document."));
        assert!(prompts[1].contains("--- SECTION CONTENT ---\n## Mission\nHelp people grow"));
        assert!(generator.options().iter().all(|o| *o == GenerationOptions::section()));
    }

    #[test]
    fn test_threshold() {
        let generator = ScriptedGenerator::new();
        let analyzer = Analyzer::new(&generator);
        assert!(!analyzer.needs_sections(&"x".repeat(MAX_INPUT_TOKENS * 4)));
        assert!(analyzer.needs_sections(&"x".repeat(MAX_INPUT_TOKENS * 4 + 4)));
    }

    #[tokio::test]
    async fn test_assist_empty_draft() {
        let generator = ScriptedGenerator::new().reply("Try these questions");
        let out = Analyzer::new(&generator).assist(AssistKind::Expand, "   ").await;

        assert_eq!(out, "Try these questions");
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("[User is just starting their Telos]"));
        assert!(prompt.starts_with(AssistKind::Expand.prompt()));
        assert_eq!(generator.options()[0], GenerationOptions::plain());
    }

    #[tokio::test]
    async fn test_assist_failure() {
        let generator = ScriptedGenerator::new().fail(400, "bad");
        let out = Analyzer::new(&generator).assist(AssistKind::Goals, "draft").await;
        assert!(out.starts_with("❌ Error getting AI assistance:"));
    }
}
