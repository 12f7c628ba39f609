// File: ./src/model/item.rs
use crate::model::id::EventId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One event as the collection endpoint stores it.
///
/// Fields the server leaves out come back as empty strings, the same way an
/// unset input shows up blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Body of a create/update request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl EventDraft {
    pub fn new(
        event_name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

impl EventRecord {
    /// Overwrites the editable fields, leaving the id alone.
    pub fn apply(&mut self, patch: &EventDraft) {
        self.event_name = patch.event_name.clone();
        self.start_date = patch.start_date.clone();
        self.end_date = patch.end_date.clone();
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            event_name: self.event_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

impl From<EventDraft> for EventRecord {
    fn from(draft: EventDraft) -> Self {
        Self {
            id: None,
            event_name: draft.event_name,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }
}

/// Reads a date field the way a date input does: anything that is not a
/// real `YYYY-MM-DD` calendar date reads back as "".
pub fn date_value(raw: &str) -> String {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(d) => d.format(DATE_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_on_the_wire() {
        let json = r#"{"id":1,"eventName":"A","startDate":"2024-01-01","endDate":"2024-01-02"}"#;
        let rec: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, Some(EventId(1)));
        assert_eq!(rec.event_name, "A");
        assert_eq!(rec.end_date, "2024-01-02");
        assert_eq!(serde_json::to_string(&rec).unwrap(), json);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let rec: EventRecord = serde_json::from_str(r#"{"eventName":"AAA"}"#).unwrap();
        assert_eq!(rec.id, None);
        assert!(rec.start_date.is_empty());
    }

    #[test]
    fn draft_serializes_without_id() {
        let draft = EventDraft::new("Trip", "2024-02-01", "2024-02-03");
        let v = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"eventName":"Trip","startDate":"2024-02-01","endDate":"2024-02-03"})
        );
    }

    #[test]
    fn apply_keeps_the_id() {
        let mut rec = EventRecord {
            id: Some(EventId(2)),
            ..Default::default()
        };
        rec.apply(&EventDraft::new("B", "2024-03-01", "2024-03-02"));
        assert_eq!(rec.id, Some(EventId(2)));
        assert_eq!(rec.draft(), EventDraft::new("B", "2024-03-01", "2024-03-02"));
    }

    #[test]
    fn invalid_dates_read_back_empty() {
        assert_eq!(date_value("2024-02-01"), "2024-02-01");
        assert_eq!(date_value(" 2024-02-01 "), "2024-02-01");
        assert_eq!(date_value("2024-02-30"), "");
        assert_eq!(date_value("2024-02"), "");
        assert_eq!(date_value(""), "");
    }
}
