// src/orchestrator/mod.rs

use crate::console::{Console, UserAbort};
use crate::materialize::{self, FileResult};
use crate::plan::walk;
use crate::planner::{AcquireError, acquire_plan};
use crate::session::{ConversationSession, GenerationError};
use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Abort(#[from] UserAbort),
}

/// Everything one build run produced, in traversal order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub results: Vec<FileResult>,
}

impl BuildReport {
    pub fn written_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_written()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.results.iter().filter(|r| !r.is_written())
    }
}

/// Drives one full build: acquire a plan, then materialize every leaf in
/// traversal order through the single shared session. With a console each
/// file goes through a confirm/revise loop; without one everything is
/// accepted as generated.
pub struct Orchestrator {
    pub session: ConversationSession,
    pub console: Option<Box<dyn Console>>,
    pub out_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(session: ConversationSession, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            console: None,
            out_dir: out_dir.into(),
        }
    }

    pub fn interactive(mut self, console: Box<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn run(&mut self, spec: &str) -> Result<BuildReport, RunError> {
        let plan = acquire_plan(
            &mut self.session,
            spec,
            self.console.as_deref_mut().map(|c| c as &mut dyn Console),
        )?;

        let mut leaves: Vec<(String, String)> = Vec::new();
        walk(&plan, &mut |path, description| {
            leaves.push((path.to_string(), description.to_string()));
        });

        let mut report = BuildReport::default();
        for (path, description) in &leaves {
            report.results.push(self.process_file(path, description)?);
        }
        Ok(report)
    }

    /// Generate, report, and loop on the operator's verdict for one leaf.
    fn process_file(&mut self, path: &str, description: &str) -> Result<FileResult, RunError> {
        let mut amendment = String::new();
        loop {
            let result = materialize::materialize(
                &mut self.session,
                &self.out_dir,
                path,
                description,
                &amendment,
            )?;
            match &result {
                FileResult::Written(path) => {
                    println!("{}", format!("File created: {path}").green());
                }
                FileResult::Failed { path, cause } => {
                    println!("{}", format!("Failed to create {path}: {cause}").red());
                }
            }

            let Some(console) = self.console.as_deref_mut() else {
                return Ok(result);
            };
            if console.confirm("Do you want to proceed with this file?")? {
                return Ok(result);
            }
            amendment = console.amend("Do you want to provide additional specifications?")?;
            println!("{}", format!("Re-prompting for the file: {path}").yellow());
        }
    }
}
