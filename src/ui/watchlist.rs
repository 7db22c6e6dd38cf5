//! Watchlist grid view
//!
//! Three posters per row. Each cell shows the title, year and rating; the
//! selected cell is highlighted. A footer shows when the next page or a
//! refresh is in flight.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::GridState;
use crate::models::Movie;
use crate::ui::Theme;
use crate::watchlist::WatchlistState;

/// Terminal rows per grid cell
pub const CELL_HEIGHT: u16 = 5;

pub fn render_watchlist(
    frame: &mut Frame,
    area: Rect,
    watchlist: &WatchlistState,
    grid: &mut GridState,
) {
    let title = if watchlist.refreshing {
        " WATCHLIST ⟳ "
    } else {
        " WATCHLIST "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} movies ", watchlist.movies.len()),
                Theme::dimmed(),
            ))
            .right_aligned(),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    // Record the viewport even when empty so the next page knows whether it fits
    let visible_rows = (chunks[0].height / CELL_HEIGHT).max(1) as usize;
    grid.scroll_into_view(visible_rows);

    if watchlist.movies.is_empty() {
        let text = if watchlist.is_busy() {
            "⟳ Loading watchlist..."
        } else {
            "Nothing here yet. Swipe up on a movie to save it."
        };
        let empty = Paragraph::new(vec![Line::from(""), Line::from(text)])
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[0]);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); visible_rows])
        .split(chunks[0]);

    for (slot, row_area) in rows.iter().enumerate() {
        let row = grid.offset + slot;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, grid.columns as u32); grid.columns])
            .split(*row_area);

        for (col, cell_area) in cols.iter().enumerate() {
            let index = row * grid.columns + col;
            if let Some(movie) = watchlist.movies.get(index) {
                render_cell(frame, *cell_area, movie, index == grid.selected);
            }
        }
    }

    if watchlist.loading {
        let footer = Paragraph::new("⟳ Loading more...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[1]);
    }
}

fn render_cell(frame: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
    let border_style = if selected {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let title_style = if selected {
        Theme::selected()
    } else {
        Theme::heading()
    };

    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(Span::styled(truncate(&movie.title, width), title_style)),
        Line::from(vec![
            Span::styled(format!("★ {:.1}", movie.rate), Theme::rating()),
            Span::styled(format!("  {}", movie.date), Theme::dimmed()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Cut to `width` characters, ending with an ellipsis when shortened
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Heat", 10), "Heat");
        assert_eq!(truncate("The Godfather", 6), "The G…");
        assert_eq!(truncate("Heat", 0), "");
    }
}
