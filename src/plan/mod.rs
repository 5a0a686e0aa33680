// src/plan/mod.rs

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub mod walker;

pub use walker::{normalize, walk};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("directory entry {key:?} must map to an object of children")]
    DirectoryShape { key: String },
    #[error("entry {key:?} must map to an object or a description string")]
    InvalidValue { key: String },
    #[error("plan contains an entry with an empty name")]
    EmptyKey,
}

/// A validated build plan: directories hold ordered children, files hold
/// a one-line description of what to generate.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    Directory { children: IndexMap<String, PlanNode> },
    File { description: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Directory(IndexMap<String, RawNode>),
    File(String),
    Other(Value),
}

impl PlanNode {
    /// Parses a plan out of the model's JSON. The wire format is an object
    /// whose values are nested objects (subdirectories) or strings (file
    /// descriptions); directory keys conventionally end with `/`. Anything
    /// else is rejected.
    pub fn from_json(text: &str) -> Result<PlanNode, PlanError> {
        let raw: IndexMap<String, RawNode> = serde_json::from_str(text)?;
        Ok(PlanNode::Directory {
            children: convert_children(raw)?,
        })
    }

    pub fn file_count(&self) -> usize {
        match self {
            PlanNode::File { .. } => 1,
            PlanNode::Directory { children } => children.values().map(PlanNode::file_count).sum(),
        }
    }

    /// Indented listing for the operator's confirmation prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        if let PlanNode::Directory { children } = self {
            for (name, child) in children {
                let indent = "  ".repeat(depth);
                match child {
                    PlanNode::Directory { .. } => {
                        out.push_str(&format!("{indent}{name}/\n"));
                        child.render_into(out, depth + 1);
                    }
                    PlanNode::File { description } => {
                        out.push_str(&format!("{indent}{name}  ({description})\n"));
                    }
                }
            }
        }
    }
}

fn convert_children(
    raw: IndexMap<String, RawNode>,
) -> Result<IndexMap<String, PlanNode>, PlanError> {
    let mut children = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        let name = key.trim_end_matches('/').to_string();
        if name.is_empty() {
            return Err(PlanError::EmptyKey);
        }
        let node = match value {
            RawNode::Directory(map) => PlanNode::Directory {
                children: convert_children(map)?,
            },
            RawNode::File(description) => {
                if key.ends_with('/') {
                    // Directory-suffixed key mapped to a string.
                    return Err(PlanError::DirectoryShape { key });
                }
                PlanNode::File { description }
            }
            RawNode::Other(_) => return Err(PlanError::InvalidValue { key }),
        };
        children.insert(name, node);
    }
    Ok(children)
}
