//! Layout rendering (top bar, status line)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, AppModel, Category, SearchState, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(40), // Category tabs
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_input.is_empty() {
        "App name, artist, song, album, e-book".to_string()
    } else if is_focused {
        format!("{}▏", ui_state.search_input)
    } else {
        ui_state.search_input.clone()
    };

    let search = Paragraph::new(search_text)
        .style(if ui_state.search_input.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            search_style
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if is_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    let tabs: Vec<Span> = Category::ALL
        .iter()
        .flat_map(|&category| {
            let style = if category == ui_state.category {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {} ", category.label()), style), Span::raw(" ")]
        })
        .collect();

    let categories = Paragraph::new(Line::from(tabs))
        .block(Block::default().borders(Borders::ALL).title(" Category "));
    frame.render_widget(categories, chunks[1]);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let hints = match model.active_section() {
        ActiveSection::Search => "Enter search · Tab results · ←/→ category · Esc clear · Ctrl+C quit",
        ActiveSection::Results => "↑/↓ select · ←/→ or 1-4 category · Tab search · q quit",
    };

    let state = model.search_state();
    let status = if state.is_loading() {
        " searching ".to_string()
    } else if let SearchState::Loaded(records) = state {
        format!(" {} results ", records.len())
    } else {
        String::new()
    };

    let line = Line::from(vec![
        Span::styled(status, Style::default().fg(Color::Cyan)),
        Span::styled(format!(" {}", hints), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
