//! Ask command handler.
//!
//! One chat turn against the configured text model, printed to stdout.

use std::io::{self, IsTerminal, Read};

use anyhow::Result;
use darkai_core::ChatRequest;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Join the words given on the command line, falling back to `piped`.
fn resolve_message(words: &[String], piped: Option<&str>) -> String {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        piped.map(str::trim).unwrap_or_default().to_string()
    } else {
        joined
    }
}

fn read_piped_stdin() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(CliError::from)?;
    Ok(Some(buffer))
}

pub async fn execute(ctx: &CliContext, words: &[String], code: bool) -> Result<()> {
    let piped = if words.is_empty() {
        read_piped_stdin()?
    } else {
        None
    };

    let request = ChatRequest {
        message: resolve_message(words, piped.as_deref()),
        code_mode: code,
    };
    tracing::debug!(
        target: "darkai.chat",
        chars = request.message.chars().count(),
        piped = piped.is_some(),
        "asking from the command line"
    );
    let reply = ctx
        .core
        .chat()
        .reply(&request)
        .await
        .map_err(CliError::from)?;
    println!("{}", reply.bot_response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use darkai_core::AppCore;
    use darkai_core::testing::{Fakes, in_memory_repos};

    #[test]
    fn words_win_over_stdin() {
        let words = vec!["hello".to_string(), "there".to_string()];
        assert_eq!(resolve_message(&words, Some("ignored")), "hello there");
    }

    #[test]
    fn stdin_used_when_no_words() {
        assert_eq!(resolve_message(&[], Some("  from pipe\n")), "from pipe");
        assert_eq!(resolve_message(&[], None), "");
    }

    #[tokio::test]
    async fn blank_message_is_an_argument_error() {
        let media = tempfile::tempdir().unwrap();
        let core = AppCore::new(
            in_memory_repos(),
            Fakes::default().gateways(),
            media.path().to_path_buf(),
        );
        let ctx = CliContext {
            core: Arc::new(core),
        };

        let err = execute(&ctx, &["   ".to_string()], false).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Arguments(m)) if m == "Message is required."
        ));
        assert_eq!(CliError::exit_code_for(&err), 2);
    }
}
