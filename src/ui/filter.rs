//! Platform filter popup

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState},
};

use crate::discovery::PlatformSet;
use crate::models::Platform;
use crate::ui::Theme;

/// Render the selector centered over `area`
pub fn render_filter(frame: &mut Frame, area: Rect, pending: &PlatformSet, cursor: usize) {
    let popup = centered_rect(area, 40, Platform::ALL.len() as u16 + 4);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .style(Theme::card())
        .title(Span::styled(" PLATFORMS ", Theme::title()))
        .title_bottom(Line::from(Span::styled(" space:toggle  enter:apply ", Theme::dimmed())).centered());

    let items: Vec<ListItem> = Platform::ALL
        .iter()
        .map(|platform| {
            let check = if pending.contains(*platform) { "[x]" } else { "[ ]" };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", check), Theme::keybind()),
                Span::styled(format!(" {} ", platform.badge()), Theme::platform_badge(*platform)),
                Span::raw(" "),
                Span::raw(platform.wire_name()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("▶");

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, popup, &mut state);
}

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(area, 40, 12);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));

        let rect = centered_rect(Rect::new(0, 0, 80, 24), 40, 12);
        assert_eq!(rect, Rect::new(20, 6, 40, 12));
    }
}
