//! Filesystem storage for Telos.
//!
//! The local filesystem is the only store:
//! - Input documents are markdown files in the Telos folder
//! - Analyses are markdown files grouped by pattern in the outputs folder
//!
//! No locking, no transactions. Deleting is a plain file removal.
//!
//! # Submodules
//!
//! - [`documents`] - Listing, creating, and journaling documents
//! - [`outputs`] - Saving, indexing, and deleting analyses

pub mod documents;
pub mod outputs;

pub use documents::{
    append_journal_entry, create_document, find_documents, load_document, resolve_document,
    template, JOURNAL_DATE_FORMAT,
};
pub use outputs::{
    delete_all_for_source, delete_output, list_outputs, load_output, parse_output_filename,
    render_output_file, save_output,
};
