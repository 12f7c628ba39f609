use crate::model::item::date_value;
use crate::model::{EventDraft, EventId, EventRecord, Field, Validator};
use crate::tui::action::{Action, AppEvent};
use ratatui::widgets::TableState;
use tracing::debug;

pub type RowKey = u64;

pub const INVALID_VALUE_ALERT: &str = "please enter a valid value";
pub const UNSAVED_ID: &str = "undefined";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RowMode {
    ReadOnly,
    Editing,
    Adding,
}

impl RowMode {
    pub fn is_locked(self) -> bool {
        self == RowMode::ReadOnly
    }

    pub fn primary_label(self) -> &'static str {
        match self {
            RowMode::ReadOnly => "Edit",
            RowMode::Editing => "Save",
            RowMode::Adding => "Add",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub key: RowKey,
    pub id: Option<EventId>,
    pub fields: [String; 3],
    /// Values last confirmed by the server, restored when an edit is cancelled.
    pub saved: EventDraft,
    pub mode: RowMode,
    pub focus: Field,
    pub cursor_position: usize,
    pub pending: bool,
    pub failed: Option<String>,
}

impl EventRow {
    fn new(key: RowKey, record: &EventRecord, mode: RowMode) -> Self {
        let fields = [
            record.event_name.clone(),
            record.start_date.clone(),
            record.end_date.clone(),
        ];
        let cursor_position = fields[0].chars().count();
        Self {
            key,
            id: record.id,
            fields,
            saved: record.draft(),
            mode,
            focus: Field::Name,
            cursor_position,
            pending: false,
            failed: None,
        }
    }

    /// Identifier shown for the row; unsaved rows carry the placeholder.
    pub fn dom_id(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNSAVED_ID.to_string())
    }

    pub fn value(&self, field: Field) -> &str {
        &self.fields[field.index()]
    }

    pub fn is_editable(&self) -> bool {
        !self.mode.is_locked() && !self.pending
    }

    /// Reads the three inputs as they would be submitted.
    pub fn read_draft(&self) -> EventDraft {
        EventDraft {
            event_name: self.value(Field::Name).to_string(),
            start_date: date_value(self.value(Field::StartDate)),
            end_date: date_value(self.value(Field::EndDate)),
        }
    }

    fn set_values(&mut self, draft: &EventDraft) {
        self.fields = [
            draft.event_name.clone(),
            draft.start_date.clone(),
            draft.end_date.clone(),
        ];
        self.focus_field(Field::Name);
    }

    fn focus_field(&mut self, field: Field) {
        self.focus = field;
        self.cursor_position = self.fields[field.index()].chars().count();
    }

    fn lock(&mut self) {
        self.mode = RowMode::ReadOnly;
        self.focus_field(Field::Name);
    }
}

pub struct AppState {
    pub rows: Vec<EventRow>,
    pub table_state: TableState,
    pub validator: Validator,
    pub message: String,
    pub loading: bool,
    pub alert: Option<String>,
    next_key: RowKey,
}

impl AppState {
    pub fn new(validator: Validator) -> Self {
        let mut t_state = TableState::default();
        t_state.select(None);
        Self {
            rows: vec![],
            table_state: t_state,
            validator,
            message: "a: Add | Enter: Edit/Save | d: Delete".to_string(),
            loading: true,
            alert: None,
            next_key: 0,
        }
    }

    // --- Rendering of rows ---

    /// Appends one row for `record` and returns its handle; the row's name
    /// field has focus.
    pub fn render_row(&mut self, record: &EventRecord, mode: RowMode) -> RowKey {
        let key = self.next_key;
        self.next_key += 1;
        self.rows.push(EventRow::new(key, record, mode));
        key
    }

    /// Clears the table and shows every record read-only, in order.
    pub fn render_all(&mut self, records: &[EventRecord]) {
        self.rows.clear();
        for record in records {
            self.render_row(record, RowMode::ReadOnly);
        }
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            let sel = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(sel.min(self.rows.len() - 1)));
        }
    }

    /// Like `render_all`, but rows with a request in flight and rows not yet
    /// saved survive: an in-flight row replaces the fresh row with the same
    /// id, the rest go at the end.
    fn reload_rows(&mut self, records: &[EventRecord]) {
        let carried: Vec<EventRow> = self
            .rows
            .drain(..)
            .filter(|r| r.pending || (r.mode == RowMode::Adding && r.id.is_none()))
            .collect();
        self.render_all(records);
        for row in carried {
            match row
                .id
                .and_then(|id| self.rows.iter().position(|r| r.id == Some(id)))
            {
                Some(pos) => self.rows[pos] = row,
                None => self.rows.push(row),
            }
        }
        if self.table_state.selected().is_none() && !self.rows.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    /// Undoes the pending mark of an action the worker never received.
    pub fn action_dropped(&mut self, action: &Action) {
        let key = match action {
            Action::Add { row, .. } | Action::Update { row, .. } | Action::Delete { row, .. } => {
                Some(*row)
            }
            Action::Reload => {
                self.loading = false;
                None
            }
            Action::Quit => None,
        };
        if let Some(r) = key.and_then(|k| self.row_mut(k)) {
            r.pending = false;
        }
        self.message = "Busy, try again.".to_string();
    }

    pub fn row(&self, key: RowKey) -> Option<&EventRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    fn row_mut(&mut self, key: RowKey) -> Option<&mut EventRow> {
        self.rows.iter_mut().find(|r| r.key == key)
    }

    pub fn remove_row(&mut self, key: RowKey) {
        if let Some(pos) = self.rows.iter().position(|r| r.key == key) {
            self.rows.remove(pos);
            if self.rows.is_empty() {
                self.table_state.select(None);
            } else if let Some(sel) = self.table_state.selected()
                && sel >= self.rows.len()
            {
                self.table_state.select(Some(self.rows.len() - 1));
            }
        }
    }

    pub fn selected_row(&self) -> Option<&EventRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    fn selected_row_mut(&mut self) -> Option<&mut EventRow> {
        let idx = self.table_state.selected()?;
        self.rows.get_mut(idx)
    }

    pub fn select_key(&mut self, key: RowKey) {
        if let Some(pos) = self.rows.iter().position(|r| r.key == key) {
            self.table_state.select(Some(pos));
        }
    }

    // --- Controller transitions ---

    /// Toolbar "add": a fresh row in adding mode, selected, name focused.
    pub fn press_add(&mut self) -> RowKey {
        let key = self.render_row(&EventRecord::default(), RowMode::Adding);
        self.select_key(key);
        key
    }

    /// Primary button of the selected row (Edit / Save / Add).
    pub fn press_primary(&mut self) -> Option<Action> {
        let validator = self.validator;
        let row = self.selected_row_mut()?;
        if row.pending {
            return None;
        }

        if row.mode.is_locked() {
            row.mode = RowMode::Editing;
            row.failed = None;
            row.focus_field(Field::Name);
            return None;
        }

        let draft = row.read_draft();
        if let Err(e) = validator.check(&draft) {
            debug!(row = row.key, error = %e, "save blocked");
            self.alert = Some(INVALID_VALUE_ALERT.to_string());
            return None;
        }

        let key = row.key;
        let action = match (row.mode, row.id) {
            (RowMode::Adding, _) => Action::Add { row: key, draft },
            (_, Some(id)) => Action::Update { row: key, id, draft },
            (_, None) => {
                self.alert = Some("no server id yet, reload (r) to edit".to_string());
                return None;
            }
        };
        row.pending = true;
        row.failed = None;
        Some(action)
    }

    /// Delete button of the selected row. Rows never saved go away at once.
    pub fn press_delete(&mut self) -> Option<Action> {
        let row = self.selected_row()?;
        if row.pending {
            return None;
        }
        let (key, id) = (row.key, row.id);
        match id {
            None => {
                self.remove_row(key);
                None
            }
            Some(id) => {
                if let Some(row) = self.row_mut(key) {
                    row.pending = true;
                    row.failed = None;
                }
                Some(Action::Delete { row: key, id })
            }
        }
    }

    /// Esc: abandon an edit, or drop a row that was never saved.
    pub fn cancel_edit(&mut self) {
        let Some(row) = self.selected_row_mut() else {
            return;
        };
        if row.pending {
            return;
        }
        match row.mode {
            RowMode::Editing => {
                let saved = row.saved.clone();
                row.set_values(&saved);
                row.failed = None;
                row.lock();
            }
            RowMode::Adding if row.id.is_none() => {
                let key = row.key;
                self.remove_row(key);
            }
            _ => {}
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded(records) => {
                self.reload_rows(&records);
                self.loading = false;
                self.message = format!("Events: {}", records.len());
            }
            AppEvent::Added { row, draft, result } => match result {
                Ok(created) => {
                    if let Some(r) = self.row_mut(row) {
                        r.pending = false;
                        r.failed = None;
                        if created.id.is_some() {
                            r.id = created.id;
                        }
                        r.saved = draft.clone();
                        r.set_values(&draft);
                        r.lock();
                    }
                    self.message = "Added.".to_string();
                }
                Err(e) => self.fail_row(row, e),
            },
            AppEvent::Updated { row, draft, result } => match result {
                Ok(_) => {
                    if let Some(r) = self.row_mut(row) {
                        r.pending = false;
                        r.failed = None;
                        r.saved = draft.clone();
                        r.set_values(&draft);
                        r.lock();
                    }
                    self.message = "Saved.".to_string();
                }
                Err(e) => self.fail_row(row, e),
            },
            AppEvent::Deleted { row, result } => match result {
                Ok(()) => {
                    self.remove_row(row);
                    self.message = "Deleted.".to_string();
                }
                Err(e) => self.fail_row(row, e),
            },
            AppEvent::Error(msg) => {
                self.message = format!("Error: {}", msg);
                self.loading = false;
            }
            AppEvent::Status(msg) => {
                self.message = msg;
            }
        }
    }

    fn fail_row(&mut self, key: RowKey, error: String) {
        if let Some(r) = self.row_mut(key) {
            r.pending = false;
            r.failed = Some(error.clone());
        }
        self.message = format!("Error: {}", error);
    }

    // --- Field editing ---

    pub fn next_field(&mut self) {
        if let Some(row) = self.selected_row_mut()
            && row.is_editable()
        {
            let f = row.focus.next();
            row.focus_field(f);
        }
    }

    pub fn previous_field(&mut self) {
        if let Some(row) = self.selected_row_mut()
            && row.is_editable()
        {
            let f = row.focus.previous();
            row.focus_field(f);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(row) = self.selected_row_mut() {
            row.cursor_position = row.cursor_position.saturating_sub(1);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(row) = self.selected_row_mut() {
            let len = row.value(row.focus).chars().count();
            row.cursor_position = row.cursor_position.saturating_add(1).clamp(0, len);
        }
    }

    pub fn enter_char(&mut self, new_char: char) {
        let Some(row) = self.selected_row_mut() else {
            return;
        };
        if !row.is_editable() {
            return;
        }
        if row.focus.is_date() && !(new_char.is_ascii_digit() || new_char == '-') {
            return;
        }
        let buf = &mut row.fields[row.focus.index()];
        let byte_idx = buf
            .char_indices()
            .nth(row.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(buf.len());
        buf.insert(byte_idx, new_char);
        row.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        let Some(row) = self.selected_row_mut() else {
            return;
        };
        if !row.is_editable() || row.cursor_position == 0 {
            return;
        }
        let current_index = row.cursor_position;
        let buf = &row.fields[row.focus.index()];
        let before_char_to_delete = buf.chars().take(current_index - 1);
        let after_char_to_delete = buf.chars().skip(current_index);
        let updated: String = before_char_to_delete.chain(after_char_to_delete).collect();
        row.fields[row.focus.index()] = updated;
        row.cursor_position -= 1;
    }

    // --- Navigation ---

    pub fn next(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = (current + step).min(self.rows.len() - 1);
        self.table_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.table_state.select(Some(new_index));
    }
}
