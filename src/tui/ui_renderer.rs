use super::app_logic::TuiApp;
use super::app_state::NoticeLevel;
use crate::selection::SelectionState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn draw_help_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("Arrows/jk: Nav | Space/Enter/Click: Toggle | a: Check All | d: Uncheck All"),
        Line::from("e/y: Export | r: Rescan | q/Esc: Quit"),
        Line::from(format!(
            "Project: {}  →  Export to: {}",
            app.scan_root.display(),
            app.export_dir.display()
        )),
    ];
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Fencepack File Exporter"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_main_list_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.list_area = area;
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_selection_is_visible_in_viewport(); // Call this to adjust scroll based on current state

    let end = (app.scroll_offset + app.list_viewport_height).min(app.rows.len());
    let rows_to_render = app.rows.get(app.scroll_offset..end).unwrap_or(&[]);

    let list_items: Vec<ListItem> = rows_to_render
        .iter()
        .filter_map(|row| {
            let node = app.tree.node(row.id)?;
            let selection_prefix = match node.state {
                SelectionState::Unchecked => "[ ] ",
                SelectionState::Partial => "[-] ",
                SelectionState::Checked => "[x] ",
            };
            Some(ListItem::new(format!("{}{}", selection_prefix, row.label)))
        })
        .collect();

    let list_title = format!("Select files ({} checked)", app.checked_count());

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ratatui::widgets::ListState::default();
    if app.current_row >= app.scroll_offset
        && app.current_row < app.scroll_offset + app.list_viewport_height
    {
        list_state_for_view.select(Some(app.current_row - app.scroll_offset));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

fn draw_status_line(f: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Info => Style::default().fg(Color::Green),
        NoticeLevel::Warning => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    f.render_widget(Paragraph::new(notice.text.as_str()).style(style), area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let help_lines = 3;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_lines + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_help_block(frame, app, main_chunks[0]);
    draw_main_list_block(frame, app, main_chunks[1]);
    draw_status_line(frame, app, main_chunks[2]);
}
