use std::sync::Arc;

use weekmeet_core::store::BlobStore;
use weekmeet_core::{CalendarStore, Roster};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub roster: Roster,
    pub calendar: CalendarStore,
}

impl AppState {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        AppState {
            roster: Roster::new(store.clone()),
            calendar: CalendarStore::new(store),
        }
    }
}
