use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use weekmeet_core::config::WeekmeetConfig;

use crate::client::Client;
use crate::render;
use crate::session;

pub async fn run() -> Result<()> {
    let profile = session::require()?;

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete profile '{}'? This removes your marks from every week",
            profile.name
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let spinner = render::create_spinner("Deleting your profile".into());
    let result = client.delete_profile(&profile.id).await;
    spinner.finish_and_clear();
    result?;

    session::clear()?;
    println!("{} Profile deleted", "✓".green());

    Ok(())
}
