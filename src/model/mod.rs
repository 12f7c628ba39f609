// File: ./src/model/mod.rs
// Event records, their ids and the save-time checks
pub mod id;
pub mod item;
pub mod validate;

pub use id::{EventId, IntoEventId};
pub use item::{EventDraft, EventRecord};
pub use validate::{Field, ValidationError, Validator};
