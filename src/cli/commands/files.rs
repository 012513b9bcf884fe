//! Files command implementation.

use crate::config::Settings;
use crate::error::Result;
use crate::model::Document;
use crate::storage::{find_documents, list_outputs};
use serde::Serialize;

#[derive(Serialize)]
struct FileInfo<'a> {
    #[serde(flatten)]
    document: &'a Document,
    analyses: usize,
}

#[derive(Serialize)]
struct FileListOutput<'a> {
    count: usize,
    files: Vec<FileInfo<'a>>,
}

/// Execute files command.
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let documents = find_documents(settings.telos_dir())?;
    let index = list_outputs(settings.outputs_dir())?;

    let files: Vec<FileInfo> = documents
        .iter()
        .map(|document| FileInfo {
            document,
            analyses: index
                .for_source(&document.stem)
                .map_or(0, |p| p.values().map(Vec::len).sum()),
        })
        .collect();

    if crate::is_csv() {
        println!("file,path,analyses");
        for f in &files {
            println!(
                "{},{},{}",
                crate::csv_escape(&f.document.file_name),
                crate::csv_escape(&f.document.path.display().to_string()),
                f.analyses
            );
        }
    } else if json {
        let output = FileListOutput {
            count: files.len(),
            files,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if files.is_empty() {
        println!("No Telos files found in {}.", settings.telos_dir().display());
        println!();
        println!("Create one with: telos new <name> --template");
    } else {
        println!("Telos files ({} found):", files.len());
        println!();
        for f in &files {
            println!("  {:<32} {} analyses", f.document.file_name, f.analyses);
        }
    }

    Ok(())
}
