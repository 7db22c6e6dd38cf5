//! Detail view for a single movie
//!
//! Left panel: title, rating, genres, synopsis. Right panel: where to watch
//! it, with a search link per platform, plus poster and trailer links.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::models::Movie;
use crate::ui::Theme;

/// Render the detail screen, or an empty panel if nothing is selected
pub fn render_detail(frame: &mut Frame, area: Rect, movie: Option<&Movie>) {
    let Some(movie) = movie else {
        render_empty(frame, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_info_panel(frame, chunks[0], movie);
    render_links_panel(frame, chunks[1], movie);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" DETAIL ", Theme::title()));

    let empty = Paragraph::new("No movie selected")
        .style(Theme::dimmed())
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(empty, area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, movie: &Movie) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" INFO ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(movie.title.clone(), Theme::heading()),
        Span::styled(format!(" ({})", movie.date), Theme::dimmed()),
    ])];

    let mut meta = vec![Span::styled(format!("★ {:.1}", movie.rate), Theme::rating())];
    if let Some(runtime) = movie.runtime_str() {
        meta.push(Span::styled(" │ ", Theme::dimmed()));
        meta.push(Span::styled(runtime, Theme::card()));
    }
    lines.push(Line::from(meta));

    let genres = movie.genres_str();
    if !genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genre: ", Theme::dimmed()),
            Span::raw(genres),
        ]));
    }
    if let Some(director) = &movie.director {
        lines.push(Line::from(vec![
            Span::styled("Director: ", Theme::dimmed()),
            Span::raw(director.clone()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Theme::border(),
    )));

    if !movie.overview.is_empty() {
        lines.push(Line::from(Span::styled("OVERVIEW", Theme::title())));
        lines.push(Line::from(""));
        for line in movie.overview.lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn render_links_panel(frame: &mut Frame, area: Rect, movie: &Movie) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" WATCH ON ", Theme::title()));

    let mut items: Vec<ListItem> = movie
        .platforms
        .iter()
        .map(|platform| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {} ", platform.badge()), Theme::platform_badge(*platform)),
                    Span::raw(" "),
                    Span::styled(platform.wire_name(), Theme::heading()),
                ]),
                Line::from(Span::styled(platform.search_url(&movie.title), Theme::link())),
            ])
        })
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "Not streaming on a known platform",
            Theme::dimmed(),
        )));
    }

    items.push(ListItem::new(""));
    if let Some(url) = movie.trailer_url() {
        items.push(ListItem::new(vec![
            Line::from(Span::styled("Trailer", Theme::dimmed())),
            Line::from(Span::styled(url, Theme::link())),
        ]));
    }
    if !movie.image.is_empty() {
        items.push(ListItem::new(vec![
            Line::from(Span::styled("Poster", Theme::dimmed())),
            Line::from(Span::styled(movie.image.clone(), Theme::link())),
        ]));
    }

    frame.render_widget(List::new(items).block(block), area);
}
