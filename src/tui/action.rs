use crate::model::{EventDraft, EventId, EventRecord};
use crate::tui::state::RowKey;

/// Requests from the UI loop to the worker that owns the store.
#[derive(Debug)]
pub enum Action {
    Reload,
    Add {
        row: RowKey,
        draft: EventDraft,
    },
    Update {
        row: RowKey,
        id: EventId,
        draft: EventDraft,
    },
    Delete {
        row: RowKey,
        id: EventId,
    },
    Quit,
}

/// Results flowing back from the worker.
#[derive(Debug)]
pub enum AppEvent {
    Loaded(Vec<EventRecord>),
    Added {
        row: RowKey,
        draft: EventDraft,
        result: Result<EventRecord, String>,
    },
    Updated {
        row: RowKey,
        draft: EventDraft,
        result: Result<EventRecord, String>,
    },
    Deleted {
        row: RowKey,
        result: Result<(), String>,
    },
    Error(String),
    Status(String),
}
