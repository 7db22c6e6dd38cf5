//! Color theme for blip
//!
//! Palette and style helpers for the TUI. Opinion colors follow the swipe
//! buttons (green loved, red disliked, blue watch, grey pass); platform
//! colors follow each service's brand.

use ratatui::style::{Color, Modifier, Style};

use crate::models::{Opinion, Platform};

/// blip color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #121216
    pub const BACKGROUND: Color = Color::Rgb(0x12, 0x12, 0x16);

    /// Panels and cards: #1e1e24
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1e, 0x1e, 0x24);

    /// Brand: #ff4f70
    pub const PRIMARY: Color = Color::Rgb(0xff, 0x4f, 0x70);

    /// Text: #f0f0f0
    pub const TEXT: Color = Color::Rgb(0xf0, 0xf0, 0xf0);

    /// Dim: #8a8a96
    pub const DIM: Color = Color::Rgb(0x8a, 0x8a, 0x96);

    /// Border: #3a3a46
    pub const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x46);

    /// Rating star: #ffd700
    pub const STAR: Color = Color::Rgb(0xff, 0xd7, 0x00);

    // ═══════════════════════════════════════════════════════════════════════
    // OPINION COLORS
    // ═══════════════════════════════════════════════════════════════════════

    pub const LOVED: Color = Color::Rgb(0x4c, 0xaf, 0x50);
    pub const DISLIKED: Color = Color::Rgb(0xf4, 0x43, 0x36);
    pub const WATCH: Color = Color::Rgb(0x21, 0x96, 0xf3);
    pub const PASS: Color = Color::Rgb(0x9e, 0x9e, 0x9e);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected grid cell / list row
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn rating() -> Style {
        Style::default().fg(Self::STAR).add_modifier(Modifier::BOLD)
    }

    pub fn genre() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::DIM)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link() -> Style {
        Style::default()
            .fg(Self::WATCH)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn opinion_color(opinion: Opinion) -> Color {
        match opinion {
            Opinion::LovedIt => Self::LOVED,
            Opinion::DidntLikeIt => Self::DISLIKED,
            Opinion::WantToWatch => Self::WATCH,
            Opinion::Pass => Self::PASS,
        }
    }

    /// Overlay label for a swipe: white on the opinion color
    pub fn opinion(opinion: Opinion) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::opinion_color(opinion))
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PLATFORM STYLES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn platform_color(platform: Platform) -> Color {
        match platform {
            Platform::Netflix => Color::Rgb(0xe5, 0x09, 0x14),
            Platform::PrimeVideo => Color::Rgb(0x00, 0x96, 0xf6),
            Platform::HboMax => Color::Rgb(0x02, 0x2a, 0xe0),
            Platform::DisneyPlus => Color::Rgb(0x0c, 0x0f, 0x35),
            Platform::ParamountPlus => Color::Rgb(0x00, 0x64, 0xff),
            Platform::AppleTvPlus => Color::Rgb(0xa2, 0xaa, 0xad),
            Platform::Youtube => Color::Rgb(0xff, 0x00, 0x00),
            Platform::Hulu => Color::Rgb(0x1c, 0xe7, 0x83),
        }
    }

    /// Badge style: brand background with whichever of black or white reads
    /// better on it
    pub fn platform_badge(platform: Platform) -> Style {
        let bg = Self::platform_color(platform);
        let fg = match color_to_rgb(bg) {
            Some(rgb) if contrast_ratio((0, 0, 0), rgb) > contrast_ratio((255, 255, 255), rgb) => {
                Color::Black
            }
            _ => Color::White,
        };
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance of an sRGB color
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
