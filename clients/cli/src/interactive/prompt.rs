//! Prompt and message rendering for the interactive CLI.

use colored::Colorize;

use crate::session::Session;

/// Build the prompt from the configured label and the current view.
pub fn render_prompt(label: &str, session: &Session) -> String {
    format!("[{}|{}]> ", label.bright_purple(), session.to_string().bright_blue())
}

/// Render a welcome message when entering interactive mode
pub fn render_welcome() {
    println!(
        "{} v{}",
        "stash interactive browser".bold().bright_purple(),
        stash_core::VERSION.dimmed()
    );
    println!(
        "Type a command followed by its arguments, e.g. {}",
        "scenes beach performer=\"Jane Doe\" page=2".bright_white()
    );
    println!("Type {} for the list of commands, {} to leave.", "help".bright_green(), "quit".bright_green());
    println!();
}

/// Render the available command paths with their argument summaries
pub fn render_help(commands: &[String], usage: &[(&str, String)]) {
    println!("\n{}", "Commands:".bold().bright_blue());
    for command in commands {
        let arguments = usage
            .iter()
            .find(|(path, _)| path == command)
            .map_or("", |(_, arguments)| arguments.as_str());
        println!("  {} {}", command.bright_green(), arguments.bright_white());
    }
    println!();
    println!("{}", "Arguments:".bold().bright_blue());
    println!("  {}  {}", "word".bright_cyan(), "positional argument".bright_white());
    println!("  {}  {}", "name=value".bright_cyan(), "named argument".bright_white());
    println!("  {}  {}", "\"two words\"".bright_cyan(), "quoted value, \\\" escapes the quote".bright_white());
    println!("  {}  {}", "flag".bright_cyan(), "a boolean option's name alone sets it".bright_white());
    println!();
}

/// Render an error message
pub fn render_error(message: &str) {
    println!("{} {}", "Error:".bright_red().bold(), message);
}

/// Render an info message
pub fn render_info(message: &str) {
    println!("{} {}", "ℹ".bright_blue(), message);
}
