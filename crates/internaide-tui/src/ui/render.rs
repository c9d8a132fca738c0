use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, AuthMode, Form};

use super::{pages, shell, styles};

/// Visible width of a form input box
const INPUT_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Shell + page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match shell::render(frame, chunks[0], app.session.user(), app.current_page) {
        Some(content) => {
            if let Some(user) = app.session.user() {
                pages::render(frame, app, user, content);
            }
        }
        None => render_splash(frame, chunks[0]),
    }
    render_status_bar(frame, app, chunks[1]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::Authenticating => render_auth_overlay(frame, app),
        AppState::EditingProfile => render_form_overlay(
            frame,
            " Edit profile ",
            &app.profile_form,
            "[Enter] save  [Esc] cancel",
        ),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_splash(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  ✦ {}", shell::BRAND), styles::title_style())),
        Line::from(Span::styled(
            "  Internship applications, CVs and cover letters",
            styles::muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[?] help | [q]uit";

    let (left_text, left_style) = match app.status_message {
        Some(ref msg) if app.status_is_error => (format!(" {} ", msg), styles::error_style()),
        Some(ref msg) => (format!(" {} ", msg), styles::success_style()),
        None => (format!(" {} ", app.session.api().base_url()), styles::muted_style()),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 17, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");
    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(format!("  ✦ {}", shell::BRAND), styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::label_style())),
        key_line("1-3", "Dashboard / CVs / Profile"),
        key_line("Tab", "Next page"),
        key_line("S-Tab", "Previous page"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::label_style())),
        key_line("e", "Edit profile (Profile page)"),
        key_line("r", "Reload profile, CVs, applications"),
        key_line("l", "Log out"),
        key_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_auth_overlay(frame: &mut Frame, app: &App) {
    let (title, footer) = match app.auth_mode {
        AuthMode::Login => (" Log in ", "[Enter] log in  [Ctrl-R] create account"),
        AuthMode::Register => (" Create account ", "[Enter] register  [Ctrl-R] back to login"),
    };
    render_form_overlay(frame, title, &app.auth_form, footer);
}

fn render_form_overlay(frame: &mut Frame, title: &str, form: &Form, footer: &str) {
    let error_rows = if form.error.is_some() { 2 } else { 0 };
    let height = form.fields.len() as u16 + 6 + error_rows;
    let area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let shown = if field.secret {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if focused { "▌" } else { "" };
        let marker = if field.required { "*" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>10}{} ", field.label, marker), styles::muted_style()),
            Span::styled(
                format!("{:<width$}", input_tail(&shown, cursor), width = INPUT_WIDTH + 1),
                styles::input_style(focused),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("  {}", footer), styles::muted_style())));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", error), styles::error_style())));
    }

    let block = Block::default()
        .title(Span::styled(title.to_string(), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The end of `value` that fits the input box, followed by the cursor.
fn input_tail(value: &str, cursor: &str) -> String {
    let count = value.chars().count();
    let tail: String = value.chars().skip(count.saturating_sub(INPUT_WIDTH)).collect();
    format!("{}{}", tail, cursor)
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::label_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
