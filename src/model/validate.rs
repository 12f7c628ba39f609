// File: ./src/model/validate.rs
// Non-empty checks applied before a row is saved
use crate::model::item::EventDraft;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    StartDate,
    EndDate,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::StartDate, Field::EndDate];

    pub fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::StartDate => 1,
            Field::EndDate => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::StartDate,
            Field::StartDate => Field::EndDate,
            Field::EndDate => Field::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Name => Field::EndDate,
            Field::StartDate => Field::Name,
            Field::EndDate => Field::StartDate,
        }
    }

    pub fn is_date(self) -> bool {
        !matches!(self, Field::Name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "event name",
            Field::StartDate => "start date",
            Field::EndDate => "end date",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter a valid value ({0} is empty)")]
    EmptyField(Field),
}

/// Which fields must be filled in before a save is dispatched.
///
/// The end date is optional unless `require_end_date` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    pub require_end_date: bool,
}

impl Validator {
    pub fn new(require_end_date: bool) -> Self {
        Self { require_end_date }
    }

    pub fn check(&self, draft: &EventDraft) -> Result<(), ValidationError> {
        if draft.event_name.is_empty() {
            return Err(ValidationError::EmptyField(Field::Name));
        }
        if draft.start_date.is_empty() {
            return Err(ValidationError::EmptyField(Field::StartDate));
        }
        if self.require_end_date && draft.end_date.is_empty() {
            return Err(ValidationError::EmptyField(Field::EndDate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let v = Validator::default();
        let err = v.check(&EventDraft::new("", "2024-02-01", "2024-02-03"));
        assert_eq!(err, Err(ValidationError::EmptyField(Field::Name)));
    }

    #[test]
    fn empty_start_is_rejected() {
        let v = Validator::default();
        assert_eq!(
            v.check(&EventDraft::new("Trip", "", "2024-02-03")),
            Err(ValidationError::EmptyField(Field::StartDate))
        );
    }

    #[test]
    fn end_date_only_required_when_configured() {
        let draft = EventDraft::new("Trip", "2024-02-01", "");
        assert!(Validator::new(false).check(&draft).is_ok());
        assert_eq!(
            Validator::new(true).check(&draft),
            Err(ValidationError::EmptyField(Field::EndDate))
        );
    }

    #[test]
    fn field_cycle_wraps() {
        assert_eq!(Field::EndDate.next(), Field::Name);
        assert_eq!(Field::Name.previous(), Field::EndDate);
        assert!(Field::StartDate.is_date());
    }
}
