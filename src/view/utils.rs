//! Utility functions for rendering UI components

use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::model::{Thumbnail, THUMB_COLUMNS};

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Cells for one terminal line of artwork. Each cell shows two stacked
/// pixels: the upper half block takes the top pixel as foreground and the
/// bottom pixel as background. Without artwork a hollow square is drawn.
pub fn artwork_cells(thumbnail: Option<&Thumbnail>, line: u32) -> Vec<Span<'static>> {
    let Some(thumb) = thumbnail else {
        let placeholder = if line == 0 { "┌──┐" } else { "└──┘" };
        return vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))];
    };

    (0..THUMB_COLUMNS)
        .map(|x| {
            let top = thumb.pixel(x, line * 2);
            let bottom = thumb.pixel(x, line * 2 + 1);
            let mut style = Style::default();
            if let Some([r, g, b]) = top {
                style = style.fg(Color::Rgb(r, g, b));
            }
            if let Some([r, g, b]) = bottom {
                style = style.bg(Color::Rgb(r, g, b));
            }
            Span::styled("▀", style)
        })
        .collect()
}
