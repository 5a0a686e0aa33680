// src/materialize/mod.rs

use crate::prompts;
use crate::session::{ConversationSession, GenerationError};
use std::fs;
use std::path::Path;

/// Outcome of materializing one planned file. Filesystem trouble becomes a
/// `Failed` entry instead of an error so one bad path never stops the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum FileResult {
    Written(String),
    Failed { path: String, cause: String },
}

impl FileResult {
    pub fn path(&self) -> &str {
        match self {
            FileResult::Written(path) => path,
            FileResult::Failed { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, FileResult::Written(_))
    }
}

/// Generates content for one leaf and writes it beneath `root`.
///
/// Generation failures propagate; the caller owns retry policy. An empty
/// path is a guard against malformed plan entries and is a silent no-op.
pub fn materialize(
    session: &mut ConversationSession,
    root: &Path,
    path: &str,
    description: &str,
    amendment: &str,
) -> Result<FileResult, GenerationError> {
    if path.is_empty() {
        return Ok(FileResult::Written(String::new()));
    }

    let request = prompts::file_request(path, description, amendment);
    let response = session.predict(&request)?;
    let content = extract_code(&response);

    match write_file(&root.join(path), &content) {
        Ok(()) => {
            log::info!("wrote {path}");
            Ok(FileResult::Written(path.to_string()))
        }
        Err(err) => {
            log::warn!("failed to write {path}: {err}");
            Ok(FileResult::Failed {
                path: path.to_string(),
                cause: err.to_string(),
            })
        }
    }
}

/// Strips a single markdown fence when the model ignores the "no markdown"
/// instruction. Fenced means: the first line is a triple-backtick marker plus
/// at most a bare language tag, and a later line is solely a triple-backtick
/// marker. Only the interior is kept; the closing marker is taken as the last
/// such line so interior fences survive. Anything else comes back unchanged.
pub fn extract_code(response: &str) -> String {
    let mut lines = response.lines();
    let Some(first) = lines.next() else {
        return response.to_string();
    };
    let Some(tag) = first.strip_prefix("```") else {
        return response.to_string();
    };
    if tag.contains(char::is_whitespace) || tag.contains('`') {
        return response.to_string();
    }

    let body: Vec<&str> = lines.collect();
    match body.iter().rposition(|line| line.trim_end() == "```") {
        Some(end) => body[..end].join("\n"),
        None => response.to_string(),
    }
}

fn write_file(target: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(target, content)
}
