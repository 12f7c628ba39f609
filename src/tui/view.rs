use crate::model::Field;
use crate::tui::state::{AppState, EventRow, RowMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub const HEADER: [&str; 4] = ["Event", "Start", "End", "Actions"];

const WIDTHS: [Constraint; 4] = [
    Constraint::Percentage(40),
    Constraint::Length(12),
    Constraint::Length(12),
    Constraint::Min(16),
];

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    // --- Event Table ---
    let header = Row::new(HEADER.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));

    let rows: Vec<Row> = state.rows.iter().map(event_row).collect();

    let title = if state.loading {
        " Events (Loading...) ".to_string()
    } else if let Some(row) = state.selected_row() {
        format!(" Events ({}) | id {} ", state.rows.len(), row.dom_id())
    } else {
        format!(" Events ({}) ", state.rows.len())
    };
    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));
    f.render_stateful_widget(table, v_chunks[0], &mut state.table_state);

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);

    let status_color = if state.message.starts_with("Error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(status_color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let editing = state.selected_row().is_some_and(|r| r.is_editable());
    let help_text = if editing {
        "Tab:Field | Enter:Save | Esc:Cancel"
    } else {
        "a:Add | Enter:Edit | d:Del | r:Reload | q:Quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);

    if let Some(msg) = &state.alert {
        draw_alert(f, msg);
    }
}

fn event_row(row: &EventRow) -> Row<'static> {
    let base = if row.failed.is_some() {
        Style::default().fg(Color::Red)
    } else if row.pending {
        Style::default().fg(Color::DarkGray)
    } else {
        match row.mode {
            RowMode::ReadOnly => Style::default().fg(Color::White),
            RowMode::Editing => Style::default().fg(Color::Magenta),
            RowMode::Adding => Style::default().fg(Color::Green),
        }
    };

    let mut cells: Vec<Cell> = Field::ALL
        .iter()
        .map(|&field| {
            let value = row.value(field).to_string();
            if row.is_editable() && row.focus == field {
                Cell::from(Line::from(vec![
                    Span::styled(value, Style::default().add_modifier(Modifier::UNDERLINED)),
                    Span::raw("_"),
                ]))
            } else {
                Cell::from(value)
            }
        })
        .collect();

    let primary = if row.pending {
        "...".to_string()
    } else if row.failed.is_some() {
        format!("[{}!]", row.mode.primary_label())
    } else {
        format!("[{}]", row.mode.primary_label())
    };
    cells.push(Cell::from(format!("{} [Delete]", primary)));

    Row::new(cells).style(base)
}

fn draw_alert(f: &mut Frame, msg: &str) {
    let area = centered(f.area(), 44, 5);
    let popup = Paragraph::new(vec![
        Line::from(msg.to_string()),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Alert ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [v] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [h] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(v);
    h
}
