//! Imagine command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Generate one image and print its record.
pub async fn execute(ctx: &CliContext, prompt: &[String]) -> Result<()> {
    let image = ctx
        .core
        .images()
        .generate(&prompt.join(" "))
        .await
        .map_err(CliError::from)?;
    println!("id = {}", image.id);
    println!("url = {}", image.file_name);
    Ok(())
}
