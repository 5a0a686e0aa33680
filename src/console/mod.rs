// src/console/mod.rs

use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// The operator walked away: end-of-input on a prompt, or an unreadable
/// terminal. Stops the run; files already written stay on disk.
#[derive(Debug, Error)]
#[error("aborted by operator")]
pub struct UserAbort;

/// Operator I/O seam. Absent entirely in auto-accept mode.
pub trait Console {
    /// Yes/no question. Anything other than `y`/`yes` counts as no.
    fn confirm(&mut self, question: &str) -> Result<bool, UserAbort>;

    /// Reads one line of free text to steer the next attempt. Empty is fine.
    fn amend(&mut self, question: &str) -> Result<String, UserAbort>;
}

/// Console over stdin/stdout.
pub struct StdConsole;

impl StdConsole {
    fn read_line(&self) -> Result<String, UserAbort> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Err(UserAbort),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }
}

impl Console for StdConsole {
    fn confirm(&mut self, question: &str) -> Result<bool, UserAbort> {
        print!("{} (y/n): ", question.bold());
        io::stdout().flush().ok();
        let answer = self.read_line()?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn amend(&mut self, question: &str) -> Result<String, UserAbort> {
        print!("{} ", question.bold());
        io::stdout().flush().ok();
        self.read_line()
    }
}

/// Scripted console for driving the confirm/revise loops in tests.
#[cfg(test)]
pub struct ScriptedConsole {
    pub confirms: std::collections::VecDeque<bool>,
    pub amendments: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<C, A>(confirms: C, amendments: A) -> Self
    where
        C: IntoIterator<Item = bool>,
        A: IntoIterator<Item = &'static str>,
    {
        Self {
            confirms: confirms.into_iter().collect(),
            amendments: amendments.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn confirm(&mut self, _question: &str) -> Result<bool, UserAbort> {
        self.confirms.pop_front().ok_or(UserAbort)
    }

    fn amend(&mut self, _question: &str) -> Result<String, UserAbort> {
        self.amendments.pop_front().ok_or(UserAbort)
    }
}
