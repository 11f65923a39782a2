//! Participant profiles and the color palette.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participant: a display name plus the color their marks render in.
///
/// Profiles are created client-side and the server stores whatever id it is
/// given. Name and color are denormalized into every slot entry, so changing
/// either one cascades through all stored weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Profile {
    /// Create a profile with a fresh v4 UUID.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Profile {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The colors offered when picking a profile color.
///
/// Stored data accepts any hex string; this is only what the picker shows.
pub const PALETTE: [PaletteColor; 10] = [
    PaletteColor { name: "Red", hex: "#ef4444" },
    PaletteColor { name: "Orange", hex: "#f97316" },
    PaletteColor { name: "Amber", hex: "#f59e0b" },
    PaletteColor { name: "Yellow", hex: "#eab308" },
    PaletteColor { name: "Green", hex: "#22c55e" },
    PaletteColor { name: "Teal", hex: "#14b8a6" },
    PaletteColor { name: "Blue", hex: "#3b82f6" },
    PaletteColor { name: "Indigo", hex: "#6366f1" },
    PaletteColor { name: "Purple", hex: "#a855f7" },
    PaletteColor { name: "Pink", hex: "#ec4899" },
];

/// Case-insensitive, whitespace-trimmed lookup by display name.
///
/// Returns the first match, so returning participants can log back in by
/// typing their name instead of creating a duplicate profile.
pub fn find_by_name<'a>(profiles: &'a [Profile], name: &str) -> Option<&'a Profile> {
    let needle = name.trim().to_lowercase();
    profiles
        .iter()
        .find(|p| p.name.trim().to_lowercase() == needle)
}
