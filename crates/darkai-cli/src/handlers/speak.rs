//! Speak command handler.

use anyhow::Result;
use darkai_core::SpeechRequest;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Synthesize `text` and print where the clip was written.
pub async fn execute(ctx: &CliContext, text: &[String], lang: Option<String>) -> Result<()> {
    let request = SpeechRequest {
        text: text.join(" "),
        lang,
    };
    let clip = ctx
        .core
        .speech()
        .synthesize(&request)
        .await
        .map_err(CliError::from)?;
    let path = ctx
        .core
        .media_root()
        .join(darkai_core::domain::speech::TTS_FOLDER)
        .join(&clip.file_name);
    println!("{}", path.display());
    Ok(())
}
