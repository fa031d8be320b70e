//! Interactive REPL for the stash client.
//!
//! Reads one line per submission, resolves it against the command tree and
//! feeds the resulting message to the session.

mod cli;
mod executor;
mod prompt;

pub use cli::handle_interactive;
pub use executor::run_once;
