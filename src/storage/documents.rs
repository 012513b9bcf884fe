//! Telos documents on disk.
//!
//! Documents are plain markdown files directly inside the Telos folder.
//! There is no index; the folder listing is the source of truth.

use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::validate::{document_file_name, find_similar};

/// Journal date format (`DD/MM/YYYY`).
pub const JOURNAL_DATE_FORMAT: &str = "%d/%m/%Y";

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
}

/// File name of `path` if it is a markdown file directly inside `dir`.
fn inside_dir(dir: &Path, path: &Path) -> Option<String> {
    if !path.is_file() || !is_markdown(path) {
        return None;
    }
    let parent = fs::canonicalize(path).ok()?.parent()?.to_path_buf();
    if parent != fs::canonicalize(dir).ok()? {
        return None;
    }
    Some(path.file_name()?.to_string_lossy().into_owned())
}

/// List markdown documents in `dir`, sorted by file name.
///
/// A missing folder yields an empty list.
pub fn find_documents(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut documents: Vec<Document> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_markdown(path))
        .filter_map(|path| Document::from_path(&path))
        .collect();

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(documents)
}

/// Resolve a user-supplied document reference.
///
/// Accepts a file name inside `dir`, a file stem, or a path to a markdown
/// file directly inside `dir`. Paths anywhere else never resolve.
pub fn resolve_document(dir: &Path, name: &str) -> Result<Document> {
    let documents = find_documents(dir)?;

    if let Some(doc) = inside_dir(dir, Path::new(name))
        .and_then(|file_name| documents.iter().find(|d| d.file_name == file_name))
    {
        return Ok(doc.clone());
    }

    if let Some(doc) = documents
        .iter()
        .find(|d| d.file_name == name || d.stem == name)
    {
        return Ok(doc.clone());
    }

    let stems: Vec<String> = documents.iter().map(|d| d.stem.clone()).collect();
    Err(Error::DocumentNotFound {
        name: name.to_string(),
        similar: find_similar(name.trim_end_matches(".md"), &stems, 3),
    })
}

/// Read a document's content.
pub fn load_document(doc: &Document) -> Result<String> {
    fs::read_to_string(&doc.path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::DocumentNotFound {
                name: doc.file_name.clone(),
                similar: Vec::new(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Create a new document. Never overwrites.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] for an empty/unsafe name or blank content
/// - [`Error::DocumentExists`] if the file is already there
pub fn create_document(dir: &Path, name: &str, content: &str) -> Result<Document> {
    let file_name = document_file_name(name)
        .ok_or_else(|| Error::InvalidArgument(format!("invalid document name '{name}'")))?;

    if content.trim().is_empty() {
        return Err(Error::InvalidArgument("document content is empty".to_string()));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(&file_name);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(Error::DocumentExists { path });
        }
        Err(e) => return Err(Error::Io(e)),
    };
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    tracing::info!(path = %path.display(), "Created document");
    Document::from_path(&path).ok_or_else(|| Error::Other(format!("bad path {}", path.display())))
}

/// Append a dated journal line: `\n- DD/MM/YYYY: text`.
pub fn append_journal_entry(doc: &Document, text: &str, date: NaiveDate) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidArgument("journal entry is empty".to_string()));
    }

    let mut file = OpenOptions::new().append(true).open(&doc.path)?;
    write!(file, "\n- {}: {text}", date.format(JOURNAL_DATE_FORMAT))?;
    file.sync_all()?;

    tracing::debug!(path = %doc.path.display(), "Appended journal entry");
    Ok(())
}

/// Starter document with the standard Telos sections.
#[must_use]
pub fn template(today: NaiveDate) -> String {
    format!(
        "# My Telos

## PROBLEMS
What current pains, inefficiencies, or negative states do I observe in my life or environment that I feel driven to change or solve?

- P1:
- P2:

## MISSION
What is your core purpose or mission in life? (This should address the problems above)

- M1:

## NARRATIVES
How do you describe yourself and your mission to others?

- N1:

## GOALS
What specific, measurable outcomes will move you toward your mission?

### Short-term (Next 3-6 months)
- G1:
- G2:

### Long-term (1-5 years)
- G3:
- G4:

## CHALLENGES
What obstacles currently stand between you and your goals?

- C1:
- C2:

## STRENGTHS
What are your key strengths, skills, and resources?

- S1:
- S2:

## CURRENT STATUS
Where are you right now across key life domains?

- Career:
- Health:
- Relationships:
- Finances:

## LOG (Journal)
Daily reflections, thoughts, and observations. Use DD/MM/YYYY format.

- {}:
",
        today.format(JOURNAL_DATE_FORMAT)
    )
}
