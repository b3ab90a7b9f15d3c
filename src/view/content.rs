//! Results area rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::coordinator::SlotId;
use crate::model::{ActiveSection, AppModel, ResultRecord, SearchState};
use super::utils::{artwork_cells, truncate_string};

pub fn render_results(frame: &mut Frame, area: Rect, model: &AppModel) {
    let is_focused = model.active_section() == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let (message, style) = match model.search_state() {
        SearchState::Idle => (
            "Type in search and press Enter to find music, apps and books\n\nUse Tab to move between search and results\nUse ←/→ to switch category",
            Style::default().fg(Color::DarkGray),
        ),
        SearchState::Loading => ("Loading...", Style::default().fg(Color::Yellow)),
        SearchState::Empty => ("Nothing Found", Style::default().fg(Color::DarkGray)),
        SearchState::Failed(_) => (
            "The last search failed.\n\nPress Enter in the search box to try again.",
            Style::default().fg(Color::Red),
        ),
        SearchState::Loaded(records) => {
            render_rows(frame, area, model, records.len(), border_style);
            return;
        }
    };

    let content = Paragraph::new(message).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(content, area);
}

fn render_rows(frame: &mut Frame, area: Rect, model: &AppModel, total: usize, border_style: Style) {
    let ui_state = model.ui_state();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", total))
        .border_style(border_style);
    let inner = block.inner(area);

    // Artwork (4) + gap (1) on the left, details on the right
    let text_width = (inner.width as usize).saturating_sub(6);

    let mut lines: Vec<Line> = Vec::new();
    for (index, record) in model.visible_records().iter().enumerate() {
        let is_selected = ui_state.scroll_offset + index == ui_state.selected;
        let thumbnail = model.thumbnail(SlotId(index));

        let (name_style, detail_style) = if is_selected {
            (
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Black).bg(Color::Green),
            )
        } else {
            (
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            )
        };

        let mut top = artwork_cells(thumbnail, 0);
        top.push(Span::raw(" "));
        top.push(Span::styled(
            pad(&row_title(record, text_width), text_width),
            name_style,
        ));

        let mut bottom = artwork_cells(thumbnail, 1);
        bottom.push(Span::raw(" "));
        bottom.push(Span::styled(
            pad(&truncate_string(&record.artist_line(), text_width), text_width),
            detail_style,
        ));

        lines.push(Line::from(top));
        lines.push(Line::from(bottom));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Name on the left, genre and price on the right when there is room
fn row_title(record: &ResultRecord, width: usize) -> String {
    let extra = match (record.genre.is_empty(), price_label(record)) {
        (true, None) => String::new(),
        (false, None) => record.genre.clone(),
        (true, Some(price)) => price,
        (false, Some(price)) => format!("{} · {}", record.genre, price),
    };

    let name_len = record.name.chars().count();
    let extra_len = extra.chars().count();
    if extra.is_empty() || name_len + extra_len + 2 > width {
        return truncate_string(&record.name, width);
    }
    format!("{}{}{}", record.name, " ".repeat(width - name_len - extra_len), extra)
}

fn price_label(record: &ResultRecord) -> Option<String> {
    match record.price {
        Some(price) if price <= 0.0 => Some("Free".to_string()),
        Some(price) if record.currency.is_empty() => Some(format!("{:.2}", price)),
        Some(price) => Some(format!("{:.2} {}", price, record.currency)),
        None => None,
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    #[test]
    fn title_includes_genre_and_price() {
        let mut r = record("Abbey Road", "The Beatles");
        r.genre = "Rock".to_string();
        r.price = Some(9.99);
        r.currency = "USD".to_string();

        let title = row_title(&r, 40);
        assert_eq!(title.chars().count(), 40);
        assert!(title.starts_with("Abbey Road"));
        assert!(title.ends_with("Rock · 9.99 USD"));
    }

    #[test]
    fn title_drops_details_when_narrow() {
        let mut r = record("Abbey Road", "The Beatles");
        r.genre = "Rock".to_string();
        r.price = Some(0.0);
        assert_eq!(row_title(&r, 12), "Abbey Road");
        assert_eq!(price_label(&r).as_deref(), Some("Free"));
    }
}
