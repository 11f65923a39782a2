use anyhow::Result;
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::week;

use crate::client::Client;
use crate::commands::resolve_week_start;
use crate::render;

pub async fn run(week_arg: Option<&str>) -> Result<()> {
    let week_start = resolve_week_start(week_arg)?;
    let week_key = week::week_key(week_start);

    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let spinner = render::create_spinner(format!("Fetching {week_key}"));
    let table = client.week_table(&week_key).await;
    let users = client.list_users().await;
    spinner.finish_and_clear();
    let table = table?;
    let users = users?;

    print!("{}", render::render_week(week_start, &table));
    println!();
    print!("{}", render::render_legend(&users));

    Ok(())
}
