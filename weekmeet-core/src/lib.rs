//! Core types for the weekmeet ecosystem.
//!
//! This crate provides everything shared by weekmeet-server and weekmeet-cli:
//! - week keys and week math
//! - `Profile`, `SlotEntry`, and slot table operations
//! - the `DragSelection` gesture state machine
//! - the `BlobStore` persistence port and its backends
//! - the roster and calendar stores built on top of it

pub mod calendar;
pub mod config;
pub mod error;
pub mod profile;
pub mod roster;
pub mod selection;
pub mod slot;
pub mod store;
pub mod week;

// Re-export the types nearly every caller needs at the crate root
pub use calendar::CalendarStore;
pub use error::{WeekmeetError, WeekmeetResult};
pub use profile::Profile;
pub use roster::Roster;
pub use selection::{DragSelection, SlotAction};
pub use slot::{SlotCoord, SlotEntry, SlotTable, WeekCalendar};
