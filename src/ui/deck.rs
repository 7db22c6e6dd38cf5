//! Discovery deck view
//!
//! Draws the top card of the deck with a hint of the stack behind it.
//! The card has two faces: poster (title, badges, rating) and details
//! (synopsis, genres, year, runtime, trailer).

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::discovery::{CardFace, DiscoveryState, SwipeOutcome};
use crate::models::{Movie, Opinion};
use crate::ui::Theme;

/// How many cards peek out behind the top one
const STACK_DEPTH: usize = 2;

pub const EMPTY_DECK_TEXT: &str = "No movie found. Please modify your filters.";

/// Render the deck area
pub fn render_deck(
    frame: &mut Frame,
    area: Rect,
    discovery: &DiscoveryState,
    last_swipe: Option<&SwipeOutcome>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Card
            Constraint::Length(3), // Swipe hints
        ])
        .split(area);

    if discovery.show_loading() {
        let loading = Paragraph::new(vec![Line::from(""), Line::from("⟳ Loading movies...")])
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, chunks[0]);
        return;
    }

    match discovery.current() {
        Some(movie) => {
            let behind = discovery.remaining().saturating_sub(1).min(STACK_DEPTH);
            let card_area = stack_offset(chunks[0], behind);
            render_stack(frame, chunks[0], behind);
            render_card(frame, card_area, movie, discovery.face, last_swipe);
            render_hints(frame, chunks[1]);
        }
        None => {
            let empty = Paragraph::new(vec![Line::from(""), Line::from(EMPTY_DECK_TEXT)])
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(empty, chunks[0]);
        }
    }
}

/// Area of the top card once `behind` cards are stacked underneath
fn stack_offset(area: Rect, behind: usize) -> Rect {
    let shift = behind as u16;
    Rect {
        x: area.x,
        y: area.y,
        width: area.width.saturating_sub(shift * 2),
        height: area.height.saturating_sub(shift),
    }
}

/// Draw the edges of the cards under the top one
fn render_stack(frame: &mut Frame, area: Rect, behind: usize) {
    for depth in (1..=behind).rev() {
        let shift = depth as u16;
        let rect = Rect {
            x: area.x + shift * 2,
            y: area.y + shift,
            width: area.width.saturating_sub(shift * 2),
            height: area.height.saturating_sub(shift),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border());
        frame.render_widget(block, rect);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    movie: &Movie,
    face: CardFace,
    last_swipe: Option<&SwipeOutcome>,
) {
    let progress = match face {
        CardFace::Poster => "━━ ──",
        CardFace::Details => "── ━━",
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .style(Theme::card())
        .title(Span::styled(format!(" {} ", progress), Theme::dimmed()));

    if let Some(outcome) = last_swipe {
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {} ", swipe_label(outcome.opinion)),
                Theme::opinion(outcome.opinion),
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let lines = match face {
        CardFace::Poster => poster_lines(movie),
        CardFace::Details => detail_lines(movie),
    };

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn poster_lines(movie: &Movie) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(movie.title.clone(), Theme::heading())).centered(),
        Line::from(Span::styled(movie.date.clone(), Theme::dimmed())).centered(),
        Line::from(""),
        Line::from(Span::styled(format!("★ {:.1} / 10", movie.rate), Theme::rating())).centered(),
        Line::from(""),
    ];

    if !movie.platforms.is_empty() {
        lines.push(platform_badges(movie).centered());
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled("space: details", Theme::dimmed())).centered(),
    );
    lines
}

fn detail_lines(movie: &Movie) -> Vec<Line<'static>> {
    let mut header = vec![Span::styled(movie.title.clone(), Theme::heading()), Span::raw(" ")];
    header.extend(platform_badges(movie).spans);

    let mut lines = vec![Line::from(header), Line::from("")];
    lines.push(Line::from(Span::styled(movie.overview.clone(), Theme::card())));
    lines.push(Line::from(""));

    if !movie.genres.is_empty() {
        let mut genres = Vec::new();
        for genre in &movie.genres {
            genres.push(Span::styled(format!(" {} ", genre), Theme::genre()));
            genres.push(Span::raw(" "));
        }
        lines.push(Line::from(genres));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Year     ", Theme::dimmed()),
        Span::styled(movie.date.clone(), Theme::card()),
    ]));
    if let Some(runtime) = movie.runtime_str() {
        lines.push(Line::from(vec![
            Span::styled("Runtime  ", Theme::dimmed()),
            Span::styled(runtime, Theme::card()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Rating   ", Theme::dimmed()),
        Span::styled(format!("★ {:.1} / 10", movie.rate), Theme::rating()),
    ]));
    if let Some(url) = movie.trailer_url() {
        lines.push(Line::from(vec![
            Span::styled("Trailer  ", Theme::dimmed()),
            Span::styled(url, Theme::link()),
        ]));
    }
    lines
}

/// One colored badge per platform the movie streams on
pub fn platform_badges(movie: &Movie) -> Line<'static> {
    let mut spans = Vec::new();
    for platform in &movie.platforms {
        spans.push(Span::styled(
            format!(" {} ", platform.badge()),
            Theme::platform_badge(*platform),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn swipe_label(opinion: Opinion) -> &'static str {
    match opinion {
        Opinion::LovedIt => "Loved it 👍",
        Opinion::DidntLikeIt => "Didn't like it 👎",
        Opinion::WantToWatch => "Watch 👀",
        Opinion::Pass => "Pass 😑",
    }
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, opinion: Opinion| {
        vec![
            Span::styled(key, Theme::keybind()),
            Span::raw(" "),
            Span::styled(format!(" {} ", opinion.label()), Theme::opinion(opinion)),
            Span::raw("   "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(hint("←", Opinion::DidntLikeIt));
    spans.extend(hint("↑", Opinion::WantToWatch));
    spans.extend(hint("→", Opinion::LovedIt));
    spans.extend(hint("↓", Opinion::Pass));

    let hints = Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center);
    frame.render_widget(hints, area);
}
