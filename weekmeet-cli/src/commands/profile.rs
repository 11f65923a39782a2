use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::profile::{self, PALETTE, Profile};

use crate::client::Client;
use crate::render;
use crate::session;

pub async fn run() -> Result<()> {
    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);
    let current = session::load()?;

    // --- Name ---
    let current_name = current
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    let name: String = Input::new()
        .with_prompt("  Display name")
        .default(current_name.clone())
        .show_default(!current_name.is_empty())
        .interact_text()?;
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Display name cannot be empty");
    }

    let spinner = render::create_spinner("Checking the roster".into());
    let users = client.list_users().await;
    spinner.finish_and_clear();
    let users = users?;

    // Typing an existing display name signs back in as that profile
    if let Some(existing) = profile::find_by_name(&users, &name) {
        if current.as_ref().is_none_or(|c| c.id != existing.id) {
            session::save(existing)?;
            println!("{} Signed in as {}", "✓".green(), existing.name.bold());
            return Ok(());
        }
    }

    // --- Color ---
    let color = pick_color(current.as_ref().map(|p| p.color.as_str()))?;

    match current {
        // Editing an existing profile cascades the new name and color
        // through every week it has marks in
        Some(mut profile) if users.iter().any(|u| u.id == profile.id) => {
            if profile.name == name && profile.color == color {
                println!("{}", "Nothing to change".dimmed());
                return Ok(());
            }

            let spinner = render::create_spinner("Updating your profile".into());
            let result = client.update_profile(&profile.id, &name, &color).await;
            spinner.finish_and_clear();
            result?;

            profile.name = name;
            profile.color = color;
            session::save(&profile)?;
            println!("{} Profile updated", "✓".green());
        }
        _ => {
            let profile = Profile::new(name, color);

            let spinner = render::create_spinner("Saving your profile".into());
            let result = client.save_profile(&profile).await;
            spinner.finish_and_clear();
            let saved = result?;

            session::save(&saved)?;
            println!("{} Welcome, {}", "✓".green(), saved.name.bold());
        }
    }

    Ok(())
}

fn pick_color(current: Option<&str>) -> Result<String> {
    let items: Vec<String> = PALETTE
        .iter()
        .map(|c| format!("{} ({})", c.name, c.hex))
        .collect();
    let default = current
        .and_then(|hex| PALETTE.iter().position(|c| c.hex == hex))
        .unwrap_or(0);

    let picked = Select::new()
        .with_prompt("  Color")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(PALETTE[picked].hex.to_string())
}
