//! Running a single line through resolver, session and renderer.

use stash_core::{CommandTree, ErrorCategory};
use thiserror::Error;
use tracing::{debug, error};

use crate::commands::{Message, command_usage};
use crate::interactive::prompt::{render_error, render_help};
use crate::rendering::render_message;
use crate::session::{Outcome, Session, SessionError};

/// Whether the loop should keep reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Command(#[from] stash_core::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to render message: {0}")]
    Render(#[from] serde_json::Error),
}

impl ExecuteError {
    /// Defects in the command declarations rather than in what was typed.
    pub fn is_defect(&self) -> bool {
        match self {
            Self::Command(err) => err.category() == ErrorCategory::Config,
            Self::Session(_) => false,
            Self::Render(_) => true,
        }
    }

    /// Log defects loudly; user errors are only rendered.
    pub fn log(&self) {
        if self.is_defect() {
            error!(error = %self, "command failed");
        }
    }

    /// Show the error to the user, logging defects loudly.
    pub fn report(&self) {
        self.log();
        if self.is_defect() {
            render_error(&format!("internal error: {self}"));
        } else {
            render_error(&self.to_string());
        }
    }
}

/// Resolve `line`, apply the message to the session and render the outcome.
pub fn execute_line(
    tree: &CommandTree<Message>,
    session: &mut Session,
    line: &str,
    raw: bool,
) -> Result<Flow, ExecuteError> {
    let message = tree.resolve_line(line)?;
    debug!(?message, "resolved line");

    match session.update(message)? {
        Outcome::Show(message) => render_message(&message, raw)?,
        Outcome::Help => render_help(&tree.commands(), &command_usage()?),
        Outcome::Quit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

/// Run a single line against a fresh session, as `--command` does.
pub fn run_once(tree: &CommandTree<Message>, line: &str, raw: bool) -> Result<Flow, ExecuteError> {
    execute_line(tree, &mut Session::new(), line, raw).inspect_err(ExecuteError::log)
}
