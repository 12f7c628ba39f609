// File: ./src/store.rs
use crate::client::{ApiError, EventsApi};
use crate::model::{EventDraft, EventId, EventRecord, IntoEventId};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("'{0}' is not an event id")]
    InvalidId(String),
}

/// Local mirror of the event collection.
///
/// Nothing here changes before the server has confirmed the matching call;
/// a failed call leaves the list as it was.
pub struct EventStore<A> {
    api: A,
    events: Vec<EventRecord>,
}

impl<A: EventsApi> EventStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replaces the whole list with the server's.
    pub async fn load(&mut self) -> Result<Vec<EventRecord>, StoreError> {
        let events = self.api.list_events().await?;
        debug!(count = events.len(), "fetched events");
        self.events = events.clone();
        Ok(events)
    }

    /// Creates the event and appends the draft as submitted. The id the
    /// server assigns is only visible in the returned record.
    pub async fn add(&mut self, draft: EventDraft) -> Result<EventRecord, StoreError> {
        let created = self.api.create_event(&draft).await?;
        debug!(?created, "server created event");
        self.events.push(EventRecord::from(draft));
        debug!(count = self.events.len(), "after adding");
        Ok(created)
    }

    pub async fn remove<I>(&mut self, id: I) -> Result<serde_json::Value, StoreError>
    where
        I: IntoEventId + ToString + Copy,
    {
        let id = Self::coerce(id)?;
        let ack = self.api.delete_event(id).await?;
        debug!(%id, ?ack, "server deleted event");
        self.events.retain(|e| e.id != Some(id));
        debug!(count = self.events.len(), "after deleting");
        Ok(ack)
    }

    pub async fn update<I>(&mut self, id: I, patch: EventDraft) -> Result<EventRecord, StoreError>
    where
        I: IntoEventId + ToString + Copy,
    {
        let id = Self::coerce(id)?;
        let updated = self.api.update_event(id, &patch).await?;
        debug!(%id, ?updated, "server updated event");
        for event in self.events.iter_mut().filter(|e| e.id == Some(id)) {
            event.apply(&patch);
        }
        Ok(updated)
    }

    fn coerce<I: IntoEventId + ToString + Copy>(id: I) -> Result<EventId, StoreError> {
        id.into_event_id()
            .ok_or_else(|| StoreError::InvalidId(id.to_string()))
    }
}
