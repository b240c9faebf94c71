use std::fmt;
use std::path::PathBuf;

const SNIPPET_PREVIEW_CHARS: usize = 60;

/// The expected snippet is absent from the target file's current contents.
/// Always fatal: the file is left untouched and the error is surfaced to the
/// invoker. Travels inside `anyhow::Error`; callers distinguish it from
/// pass-through I/O errors via `downcast_ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchNotFound {
    pub file_path: PathBuf,
    pub snippet: String,
}

impl fmt::Display for PatchNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected snippet not found in {:?}: {:?}",
            self.file_path,
            preview(&self.snippet)
        )
    }
}

impl std::error::Error for PatchNotFound {}

fn preview(snippet: &str) -> String {
    let mut head: String = snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
    if head.len() < snippet.len() {
        head.push_str("...");
    }
    head
}
