//! Data models for Telos.
//!
//! - [`Document`] - an input markdown file
//! - [`OutputRecord`] / [`OutputIndex`] - saved analyses on disk

pub mod document;
pub mod output;

pub use document::Document;
pub use output::{
    OutputIndex, OutputRecord, PatternOutputs, FILE_TIMESTAMP_FORMAT, HEADER_TIMESTAMP_FORMAT,
};
