use anyhow::Result;
use owo_colors::OwoColorize;
use weekmeet_core::config::WeekmeetConfig;

use crate::client::Client;
use crate::render;

pub async fn run() -> Result<()> {
    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let spinner = render::create_spinner("Fetching roster".into());
    let users = client.list_users().await;
    spinner.finish_and_clear();
    let users = users?;

    println!("{}", "Roster".bold());
    print!("{}", render::render_legend(&users));

    Ok(())
}
