//! Subcommand definitions.

use clap::Subcommand;
use darkai_axum::DEFAULT_PORT;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "DARKAI_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Comma-separated allowed origins; all origins when unset
        #[arg(long, env = "DARKAI_CORS_ORIGINS")]
        cors_origins: Option<String>,
    },

    /// Ask the assistant once and print the reply
    ///
    /// With no message, the text is read from piped stdin.
    Ask {
        message: Vec<String>,
        /// Use the code-assistant prompt
        #[arg(long)]
        code: bool,
    },

    /// Generate an image and print where it was stored
    Imagine {
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Synthesize speech and print the clip path
    Speak {
        #[arg(required = true)]
        text: Vec<String>,
        /// Language code, e.g. `en` or `es`
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show all resolved paths
    Paths,

    /// Show which adapters the current settings select
    CheckConfig,
}
