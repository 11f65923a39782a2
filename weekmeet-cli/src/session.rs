//! The locally stored identity: which profile this machine acts as.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use weekmeet_core::profile::Profile;

fn session_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("weekmeet");

    Ok(config_dir.join("session.json"))
}

/// The signed-in profile, if any.
pub fn load() -> Result<Option<Profile>> {
    let path = session_path()?;

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("Failed to read session file"),
    };

    let profile = serde_json::from_str(&contents)
        .with_context(|| format!("Corrupt session file at {}", path.display()))?;

    Ok(Some(profile))
}

/// The signed-in profile, or an error telling the user how to sign in.
pub fn require() -> Result<Profile> {
    load()?.context("Not signed in.\n\nCreate a profile (or log back in) with:\n  weekmeet profile")
}

/// Persist `profile` as the signed-in identity.
pub fn save(profile: &Profile) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let contents = serde_json::to_string_pretty(profile)?;

    // Write to a temp file first, then atomically rename into place
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).context("Failed to write session file")?;
    fs::rename(&tmp, &path).context("Failed to write session file")?;

    Ok(())
}

/// Remove the stored identity. Returns whether one existed.
pub fn clear() -> Result<bool> {
    let path = session_path()?;

    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).context("Failed to remove session file"),
    }
}
