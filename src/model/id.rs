// File: ./src/model/id.rs
// Server-assigned event identifiers and the one place ids get coerced
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(value: u64) -> Self {
        EventId(value)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EventId)
    }
}

// Some servers hand out numeric ids as JSON strings ("7"); accept both.
impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(EventId(n)),
            Raw::Text(s) => s
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("non-numeric event id '{}'", s))),
        }
    }
}

/// Normalises anything a caller may hold as an id (row handles keep
/// strings, the store keeps numbers) into an [`EventId`].
///
/// Returns `None` when the value has no numeric meaning, e.g. the
/// `"undefined"` placeholder of an unsaved row.
pub trait IntoEventId {
    fn into_event_id(self) -> Option<EventId>;
}

impl IntoEventId for EventId {
    fn into_event_id(self) -> Option<EventId> {
        Some(self)
    }
}

impl IntoEventId for u64 {
    fn into_event_id(self) -> Option<EventId> {
        Some(EventId(self))
    }
}

impl IntoEventId for i64 {
    fn into_event_id(self) -> Option<EventId> {
        u64::try_from(self).ok().map(EventId)
    }
}

impl IntoEventId for i32 {
    fn into_event_id(self) -> Option<EventId> {
        i64::from(self).into_event_id()
    }
}

impl IntoEventId for &str {
    fn into_event_id(self) -> Option<EventId> {
        self.parse().ok()
    }
}

impl IntoEventId for String {
    fn into_event_id(self) -> Option<EventId> {
        self.as_str().into_event_id()
    }
}

impl IntoEventId for &String {
    fn into_event_id(self) -> Option<EventId> {
        self.as_str().into_event_id()
    }
}
