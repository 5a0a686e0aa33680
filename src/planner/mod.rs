// src/planner/mod.rs

use crate::console::{Console, UserAbort};
use crate::materialize::extract_code;
use crate::plan::{PlanError, PlanNode};
use crate::prompts;
use crate::session::{ConversationSession, GenerationError};
use colored::Colorize;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("could not obtain a usable plan: {0}")]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Abort(#[from] UserAbort),
}

/// Asks the session for a build plan and loops until one is accepted.
///
/// Interactively, both a malformed response and an operator rejection lead
/// back to a fresh request carrying the operator's amendment; the loop has
/// no bound. Without a console every parse failure is fatal and the first
/// well-formed plan is accepted as-is.
pub fn acquire_plan(
    session: &mut ConversationSession,
    spec: &str,
    mut console: Option<&mut dyn Console>,
) -> Result<PlanNode, AcquireError> {
    let mut amendment = String::new();
    loop {
        println!("{}", "Building the file structure of the application...".cyan());
        let request = prompts::plan_request(spec, &amendment);
        let response = session.predict(&request)?;
        match PlanNode::from_json(&salvage_json(&response)) {
            Ok(plan) => {
                let Some(console) = console.as_deref_mut() else {
                    return Ok(plan);
                };
                println!("\n{}", plan.render());
                println!(
                    "{}",
                    format!("{} file(s) planned.", plan.file_count()).cyan()
                );
                if console.confirm("Do you want to proceed with this file structure?")? {
                    return Ok(plan);
                }
                amendment = console.amend("Do you want to add specifications?")?;
            }
            Err(err) => {
                log::warn!("discarding malformed plan: {err}");
                let Some(console) = console.as_deref_mut() else {
                    return Err(err.into());
                };
                println!("{}", format!("The plan came back malformed: {err}").red());
                amendment = console.amend("Do you want to add specifications?")?;
            }
        }
    }
}

/// Pulls the JSON object out of a chatty response: strips a surrounding
/// fence first, then keeps the outermost brace-to-brace block.
fn salvage_json(response: &str) -> String {
    let unfenced = extract_code(response);
    Regex::new(r"\{[\s\S]*\}")
        .unwrap()
        .find(&unfenced)
        .map(|m| m.as_str().to_string())
        .unwrap_or(unfenced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::session::ScriptedGenerator;

    const SPEC: &str = "a tiny note-taking CLI";

    fn session(responses: &[&str]) -> ConversationSession {
        ConversationSession::new(Box::new(ScriptedGenerator::new(responses.iter().copied())))
    }

    #[test]
    fn auto_accepts_the_first_valid_plan() {
        let mut session = session(&[r#"{"app/": {"main.py": "entry point"}}"#]);

        let plan = acquire_plan(&mut session, SPEC, None).unwrap();

        assert_eq!(plan.file_count(), 1);
        assert_eq!(session.turns().len(), 1);
    }

    #[test]
    fn salvages_a_fenced_plan_with_prose_inside() {
        let mut session = session(&["```json\n{\"main.py\": \"entry point\"}\n```"]);
        let plan = acquire_plan(&mut session, SPEC, None).unwrap();
        assert_eq!(plan.file_count(), 1);
    }

    #[test]
    fn salvages_a_plan_surrounded_by_prose() {
        let mut session =
            session(&["Here is the structure:\n{\"main.py\": \"entry point\"}\nEnjoy!"]);
        let plan = acquire_plan(&mut session, SPEC, None).unwrap();
        assert_eq!(plan.file_count(), 1);
    }

    #[test]
    fn parse_failure_is_fatal_without_a_console() {
        let mut session = session(&["I would suggest starting with a README."]);
        let err = acquire_plan(&mut session, SPEC, None).unwrap_err();
        assert!(matches!(err, AcquireError::Plan(_)));
    }

    #[test]
    fn reprompts_after_a_parse_failure_until_valid() {
        let mut session = session(&[
            "no json here",
            r#"{"app/": {"main.py": "entry point"}}"#,
        ]);
        let mut console = ScriptedConsole::new([true], ["please answer with JSON only"]);

        let plan = acquire_plan(&mut session, SPEC, Some(&mut console)).unwrap();

        assert_eq!(plan.file_count(), 1);
        assert_eq!(session.turns().len(), 2);
        // The amendment rides along on the second request.
        assert!(session.turns()[1].request.contains("please answer with JSON only"));
    }

    #[test]
    fn rejection_reprompts_with_the_amendment() {
        let mut session = session(&[
            r#"{"app/": {"main.py": "entry point"}}"#,
            r#"{"app/": {"main.py": "entry point", "README.md": "usage"}}"#,
        ]);
        let mut console = ScriptedConsole::new([false, true], ["add a README"]);

        let plan = acquire_plan(&mut session, SPEC, Some(&mut console)).unwrap();

        assert_eq!(plan.file_count(), 2);
        assert!(session.turns()[1].request.contains("add a README"));
    }

    #[test]
    fn operator_walking_away_aborts() {
        let mut session = session(&[r#"{"main.py": "entry point"}"#]);
        let mut console = ScriptedConsole::new([], []);

        let err = acquire_plan(&mut session, SPEC, Some(&mut console)).unwrap_err();
        assert!(matches!(err, AcquireError::Abort(_)));
    }

    #[test]
    fn generation_failure_escalates() {
        let mut session = session(&[]);
        let err = acquire_plan(&mut session, SPEC, None).unwrap_err();
        assert!(matches!(err, AcquireError::Generation(_)));
    }
}
