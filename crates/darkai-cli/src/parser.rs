//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;
use crate::config::Settings;

/// Command-line interface for the Dark AI backend.
#[derive(Parser, Debug)]
#[command(name = "darkai")]
#[command(about = "Chat, image generation, speech and auth API for Dark AI")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "darkai",
            "--verbose",
            "--data-dir",
            "/tmp/darkai",
            "paths",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.settings.data_dir,
            Some(std::path::PathBuf::from("/tmp/darkai"))
        );
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from([
            "darkai",
            "serve",
            "--port",
            "9100",
            "--cors-origins",
            "http://localhost:3000",
        ]);
        match cli.command {
            Some(Commands::Serve { port, cors_origins }) => {
                assert_eq!(port, 9100);
                assert_eq!(cors_origins.as_deref(), Some("http://localhost:3000"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ask_collects_words() {
        let cli = Cli::parse_from(["darkai", "ask", "--code", "write", "a", "sort"]);
        match cli.command {
            Some(Commands::Ask { message, code }) => {
                assert!(code);
                assert_eq!(message, vec!["write", "a", "sort"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_speak_language_flag() {
        let cli = Cli::parse_from(["darkai", "speak", "--lang", "fr", "Bonjour"]);
        match cli.command {
            Some(Commands::Speak { text, lang }) => {
                assert_eq!(text, vec!["Bonjour"]);
                assert_eq!(lang.as_deref(), Some("fr"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["darkai"]);
        assert!(cli.command.is_none());
    }
}
