//! Template command implementation.

use crate::error::Result;
use crate::storage::template;

/// Print the starter template.
pub fn execute(json: bool) -> Result<()> {
    let text = template(chrono::Local::now().date_naive());

    if json {
        println!("{}", serde_json::json!({ "template": text }));
    } else {
        print!("{text}");
    }
    Ok(())
}
