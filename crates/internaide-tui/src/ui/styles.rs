use ratatui::style::{Color, Modifier, Style};

use internaide_core::models::application::{
    STATUS_INTERVIEWING, STATUS_OFFER_RECEIVED, STATUS_REJECTED, STATUS_SUBMITTED,
};

// Color palette
pub const PRIMARY: Color = Color::Rgb(124, 92, 220);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 40, 72);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn label_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

/// Color for an application status label
pub fn status_style(status: &str) -> Style {
    match status {
        STATUS_OFFER_RECEIVED => success_style().add_modifier(Modifier::BOLD),
        STATUS_INTERVIEWING => Style::default().fg(PRIMARY),
        STATUS_SUBMITTED => label_style(),
        STATUS_REJECTED => error_style(),
        _ => muted_style(),
    }
}

pub fn nav_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        muted_style()
    }
}

/// Initials badge next to the user's name
pub fn avatar_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn input_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(HIGHLIGHT).fg(Color::White)
    } else {
        text_style()
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    text_style()
}
