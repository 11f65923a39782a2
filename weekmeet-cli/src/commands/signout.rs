use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session;

pub fn run() -> Result<()> {
    if session::clear()? {
        println!("{} Signed out. Your marks stay on the server.", "✓".green());
    } else {
        println!("Not signed in.");
    }

    Ok(())
}
