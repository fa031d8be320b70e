//! Core interactive CLI loop.

use std::path::PathBuf;

use anyhow::Result;
use rustyline::{Config as EditorConfig, Editor, error::ReadlineError, history::DefaultHistory};
use stash_core::CommandTree;
use tracing::{debug, warn};

use crate::commands::Message;
use crate::config::Config;
use crate::interactive::executor::{Flow, execute_line};
use crate::interactive::prompt::{render_info, render_prompt, render_welcome};
use crate::session::Session;

/// Main interactive CLI session
pub struct InteractiveCli<'t> {
    tree: &'t CommandTree<Message>,
    session: Session,
    editor: Editor<(), DefaultHistory>,
    history_path: Option<PathBuf>,
    label: String,
    raw: bool,
}

impl<'t> InteractiveCli<'t> {
    pub fn new(tree: &'t CommandTree<Message>, config: &Config, raw: bool) -> Result<Self> {
        let editor_config = EditorConfig::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)?
            .max_history_size(config.history_size)?
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        let history_path = config.history_path();
        if let Some(path) = &history_path {
            if path.exists() {
                if let Err(err) = editor.load_history(path) {
                    warn!(path = %path.display(), %err, "failed to load history");
                }
            }
        }

        Ok(Self {
            tree,
            session: Session::new(),
            editor,
            history_path,
            label: config.prompt.clone(),
            raw,
        })
    }

    /// Run the interactive CLI loop
    pub fn run(&mut self) -> Result<()> {
        render_welcome();

        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                continue;
            }

            match execute_line(self.tree, &mut self.session, &line, self.raw) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => err.report(),
            }
        }

        render_info("Leaving stash");
        self.save_history();
        Ok(())
    }

    /// Read one line; `None` once the user interrupts or closes input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = render_prompt(&self.label, &self.session);

        match self.editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line.trim().to_string()))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    fn save_history(&mut self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(dir) {
                warn!(path = %dir.display(), %err, "failed to create history directory");
                return;
            }
        }
        match self.editor.save_history(path) {
            Ok(()) => debug!(path = %path.display(), "saved history"),
            Err(err) => warn!(path = %path.display(), %err, "failed to save history"),
        }
    }
}

/// Handle the interactive CLI command - main entry point
pub fn handle_interactive(tree: &CommandTree<Message>, config: &Config, raw: bool) -> Result<()> {
    // Check if we're in a proper terminal environment
    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        eprintln!("Error: Interactive CLI requires a proper terminal environment");
        eprintln!("Use --command to run a single line from a script");
        return Err(anyhow::anyhow!("Not running in a terminal"));
    }

    InteractiveCli::new(tree, config, raw)?.run()
}
