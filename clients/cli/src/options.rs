//! Command-line options for the stash client.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the stash client
#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive browser for a stash library")]
pub struct Cli {
    /// Run a single command line and exit
    #[arg(short, long, value_name = "LINE")]
    pub command: Option<String>,

    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output messages as raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_command() {
        let cli = Cli::try_parse_from(["stash", "-c", "scenes page=2", "--raw"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("scenes page=2"));
        assert!(cli.raw);
        assert!(!cli.debug);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn command_is_optional() {
        let cli = Cli::try_parse_from(["stash", "--config", "/tmp/stash.toml", "--no-color"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/stash.toml")));
        assert!(cli.no_color);
    }
}
