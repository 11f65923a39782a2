use anyhow::Result;
use owo_colors::OwoColorize;
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::week;

use crate::client::Client;
use crate::render;

pub async fn run() -> Result<()> {
    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let spinner = render::create_spinner("Fetching weeks".into());
    let weeks = client.all_weeks().await;
    spinner.finish_and_clear();
    let weeks = weeks?;

    if weeks.is_empty() {
        println!("{}", "No weeks have any marks yet".dimmed());
        return Ok(());
    }

    for (week_key, table) in &weeks {
        let marks: usize = table.values().map(Vec::len).sum();
        // Stored keys should always parse; fall back to the raw key if not
        let heading = match week::parse_week_key(week_key) {
            Ok(start) => render::week_range_text(start),
            Err(_) => week_key.clone(),
        };

        println!(
            "  {}  {} {}",
            week_key,
            heading,
            format!("({} {})", marks, if marks == 1 { "mark" } else { "marks" }).dimmed()
        );
    }

    Ok(())
}
