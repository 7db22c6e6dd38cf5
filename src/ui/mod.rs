//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first: arrows swipe, tabs switch with
//! 1 and 2, Esc goes back.

pub mod deck;
pub mod detail;
pub mod filter;
pub mod theme;
pub mod watchlist;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};

use crate::app::{App, AppState};

/// Draw the whole screen for the current app state
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Logo
            Constraint::Min(1),     // Tabs
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled("blip", Theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(logo, header_chunks[0]);

    let selected = match tab_of(app) {
        AppState::Watchlist => 1,
        _ => 0,
    };

    let platforms = app
        .discovery
        .platforms
        .iter()
        .map(|p| p.badge())
        .collect::<Vec<_>>()
        .join(" ");

    let tabs = Tabs::new(vec!["1 Discover", "2 Watchlist"])
        .select(selected)
        .style(Theme::dimmed())
        .highlight_style(Theme::title())
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title_top(Line::from(Span::styled(format!(" {} ", platforms), Theme::dimmed())).right_aligned()),
        );
    frame.render_widget(tabs, header_chunks[1]);
}

/// Tab a screen belongs to; detail and filter sit on top of a tab
fn tab_of(app: &App) -> AppState {
    match app.state {
        AppState::Discover | AppState::Watchlist => app.state,
        AppState::Filter | AppState::Detail => app
            .nav_stack
            .last()
            .copied()
            .unwrap_or(AppState::Discover),
    }
}

fn render_content(frame: &mut Frame, area: Rect, app: &mut App) {
    match app.state {
        AppState::Discover => {
            deck::render_deck(frame, area, &app.discovery, app.last_swipe.as_ref());
        }
        AppState::Filter => {
            deck::render_deck(frame, area, &app.discovery, app.last_swipe.as_ref());
            filter::render_filter(frame, area, &app.discovery.pending, app.filter_cursor);
        }
        AppState::Watchlist => {
            watchlist::render_watchlist(frame, area, &app.watchlist, &mut app.grid);
        }
        AppState::Detail => {
            detail::render_detail(frame, area, app.detail.as_ref());
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state_indicator = Span::styled(
        format!(" {} ", format!("{:?}", app.state).to_uppercase()),
        Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
    );

    let help = match app.state {
        AppState::Discover => " ←→↑↓:swipe  space:flip  enter:detail  f:filter  q:quit ",
        AppState::Filter => " ↑↓:move  space:toggle  enter:apply  esc:cancel ",
        AppState::Watchlist => " arrows:move  enter:detail  r:refresh  1:discover  q:quit ",
        AppState::Detail => " esc:back  q:quit ",
    };

    let status_line = Line::from(vec![
        state_indicator,
        Span::raw(" "),
        Span::styled(help, Theme::dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
