//! Check-config command handler.
//!
//! Reports which adapters the current settings select. Secrets are never
//! printed, only whether they are set.

use anyhow::Result;

use crate::config::Settings;

fn presence(set: bool) -> &'static str {
    if set { "set" } else { "missing" }
}

/// Build the report printed by `darkai check-config`.
pub fn report(settings: &Settings) -> Result<Vec<(&'static str, String)>> {
    let google = settings.google_config();
    let media = match settings.cloudinary_config() {
        Some(c) => format!("cloudinary ({})", c.cloud_name),
        None => "local filesystem".to_string(),
    };
    let mail = match settings.smtp_config()? {
        Some(c) => format!("smtp ({}:{}, from {})", c.host, c.port, c.from),
        None => "log only".to_string(),
    };

    Ok(vec![
        ("google_api_key", presence(google.api_key.is_some()).to_string()),
        ("text_model", google.text_model),
        ("image_model", google.image_model),
        ("media_store", media),
        ("mailer", mail),
    ])
}

pub fn execute(settings: &Settings) -> Result<()> {
    for (key, value) in report(settings)? {
        println!("{key} = {value}");
    }
    Ok(())
}
