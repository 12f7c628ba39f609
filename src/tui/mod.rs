pub mod action;
pub mod state;
pub mod view;
pub mod worker;

use crate::client::RestClient;
use crate::config::Config;
use crate::logging;
use crate::model::Validator;
use crate::store::EventStore;
use action::{Action, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use state::AppState;
use std::{env, io, time::Duration};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::info;
use view::draw;

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let url = env::args().nth(1).unwrap_or_else(|| config.api_url.clone());

    logging::install_panic_hook();
    let log_path = logging::init(&config.log_filter)?;
    info!(%url, log = %log_path.display(), "starting");

    let client = RestClient::new(&url)?;
    info!(collection = client.collection_url(), "client ready");
    let store = EventStore::new(client);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(Validator::new(config.require_end_date));
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    tokio::spawn(worker::serve(store, action_rx, event_tx));

    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        while let Ok(event) = event_rx.try_recv() {
            app_state.apply(event);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = handle_key(&mut app_state, key) {
                        if matches!(action, Action::Quit) {
                            let _ = action_tx.try_send(action);
                            break;
                        }
                        // Never wait on the worker here: it may itself be
                        // waiting for this loop to drain `event_rx`.
                        if let Err(TrySendError::Full(action) | TrySendError::Closed(action)) =
                            action_tx.try_send(action)
                        {
                            app_state.action_dropped(&action);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Maps one key press onto the state, returning work for the store if any.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    if state.alert.is_some() {
        state.dismiss_alert();
        return None;
    }

    let editing = state.selected_row().is_some_and(|r| r.is_editable());
    if editing {
        match key.code {
            KeyCode::Enter => return state.press_primary(),
            KeyCode::Esc => state.cancel_edit(),
            KeyCode::Tab => state.next_field(),
            KeyCode::BackTab => state.previous_field(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            KeyCode::Char(c) => state.enter_char(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('a') => {
            state.press_add();
        }
        KeyCode::Enter | KeyCode::Char('e') => return state.press_primary(),
        KeyCode::Char('d') | KeyCode::Delete => return state.press_delete(),
        KeyCode::Char('r') => {
            state.loading = true;
            return Some(Action::Reload);
        }
        KeyCode::Esc => state.cancel_edit(),
        KeyCode::Down | KeyCode::Char('j') => state.next(),
        KeyCode::Up | KeyCode::Char('k') => state.previous(),
        KeyCode::PageDown => state.jump_forward(10),
        KeyCode::PageUp => state.jump_backward(10),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventDraft, EventId, EventRecord};
    use crossterm::event::KeyModifiers;

    fn press(state: &mut AppState, code: KeyCode) -> Option<Action> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_keys(state: &mut AppState, s: &str) {
        for c in s.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn keyboard_add_flow() {
        let mut state = AppState::new(Validator::default());
        state.apply(AppEvent::Loaded(vec![]));

        assert!(press(&mut state, KeyCode::Char('a')).is_none());
        // 'q' and 'd' are text while the row is unlocked
        type_keys(&mut state, "Quad");
        press(&mut state, KeyCode::Tab);
        type_keys(&mut state, "2024-02-01");

        match press(&mut state, KeyCode::Enter) {
            Some(Action::Add { draft, .. }) => {
                assert_eq!(draft, EventDraft::new("Quad", "2024-02-01", ""));
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn alert_swallows_the_next_key() {
        let mut state = AppState::new(Validator::default());
        state.apply(AppEvent::Loaded(vec![]));
        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Enter);
        assert!(state.alert.is_some());

        assert!(press(&mut state, KeyCode::Char('q')).is_none());
        assert!(state.alert.is_none());
        assert_eq!(state.rows[0].value(crate::model::Field::Name), "");
    }

    #[test]
    fn normal_mode_keys() {
        let mut state = AppState::new(Validator::default());
        state.apply(AppEvent::Loaded(vec![EventRecord {
            id: Some(EventId(4)),
            event_name: "Four".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: String::new(),
        }]));
        assert!(matches!(
            press(&mut state, KeyCode::Char('d')),
            Some(Action::Delete { id: EventId(4), .. })
        ));
        assert!(matches!(
            press(&mut state, KeyCode::Char('r')),
            Some(Action::Reload)
        ));
        assert!(matches!(
            press(&mut state, KeyCode::Char('q')),
            Some(Action::Quit)
        ));
    }
}
