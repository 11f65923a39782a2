use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render;
use crate::session;

pub fn run() -> Result<()> {
    match session::load()? {
        Some(profile) => println!(
            "{} {} {}",
            "●".color(render::hex_color(&profile.color)),
            profile.name.bold(),
            format!("({})", profile.id).dimmed()
        ),
        None => println!("Not signed in. Create a profile with: weekmeet profile"),
    }

    Ok(())
}
