//! Write-back of the admin PIN to the environment file.
//!
//! Only the `ADMIN_PASS` line is touched; every other line is kept as is.

use std::io;
use std::path::Path;

use super::{StoreError, write_atomically};

/// Variable holding the admin PIN.
pub const ADMIN_PASS_KEY: &str = "ADMIN_PASS";

/// Set `ADMIN_PASS=<pin>` in the file at `path`, creating the file if needed.
///
/// # Errors
///
/// Returns `StoreError` if the file can't be read or written.
pub async fn persist_admin_pass(path: &Path, pin: &str) -> Result<(), StoreError> {
    let existing = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    write_atomically(path, with_admin_pass(&existing, pin).as_bytes()).await
}

/// Rewrite `contents` so it holds exactly one `ADMIN_PASS` line.
fn with_admin_pass(contents: &str, pin: &str) -> String {
    let entry = format!("{ADMIN_PASS_KEY}={pin}");
    let mut replaced = false;
    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        if is_admin_pass_line(line) {
            if !replaced {
                lines.push(entry.clone());
                replaced = true;
            }
        } else {
            lines.push(line.to_owned());
        }
    }
    if !replaced {
        lines.push(entry);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn is_admin_pass_line(line: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);
    line.strip_prefix(ADMIN_PASS_KEY)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}
