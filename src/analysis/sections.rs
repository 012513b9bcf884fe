//! Section splitting for oversized documents.
//!
//! Documents too large for one request are split at level-2 markdown
//! headings (`## `) and analyzed one section at a time.

/// Rough token estimate: one token per four characters.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// One `## `-delimited slice of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The heading line including its `## ` marker; empty for a preamble.
    pub header: String,
    /// Heading plus body, trimmed.
    pub content: String,
}

impl Section {
    /// Heading text without the `## ` marker.
    ///
    /// The preamble before the first heading is labeled `Introduction`.
    #[must_use]
    pub fn title(&self) -> &str {
        let title = self.header.trim_start_matches('#').trim();
        if title.is_empty() { "Introduction" } else { title }
    }
}

/// Split a document into sections at every line starting with `## `.
///
/// Text before the first heading becomes a header-less preamble section.
/// Sections whose trimmed content is empty are dropped.
#[must_use]
pub fn split_by_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut header = String::new();
    let mut body = String::new();

    let mut flush = |header: &str, body: &str| {
        let trimmed = body.trim();
        if !trimmed.is_empty() {
            sections.push(Section {
                header: header.to_string(),
                content: trimmed.to_string(),
            });
        }
    };

    for line in content.lines() {
        if line.starts_with("## ") {
            flush(&header, &body);
            header = line.trim_end().to_string();
            body.clear();
        }
        body.push_str(line);
        body.push('\n');
    }
    flush(&header, &body);

    sections
}
