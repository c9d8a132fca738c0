//! Page bodies drawn inside the shell's content area.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use internaide_core::models::{ApplicationStats, User};
use internaide_core::utils::{format_date, format_optional, truncate_string};

use crate::app::{App, Page};

use super::styles;

/// Longest URL or application title shown before truncation
const MAX_URL_DISPLAY: usize = 60;

/// Most applications listed on the dashboard
const MAX_RECENT_APPLICATIONS: usize = 8;

pub fn render(frame: &mut Frame, app: &App, user: &User, area: Rect) {
    let lines = match app.current_page {
        Page::Dashboard => dashboard_lines(app, user),
        Page::Cvs => cvs_lines(app),
        Page::Profile => profile_lines(user),
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", app.current_page.title()), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn dashboard_lines(app: &App, user: &User) -> Vec<Line<'static>> {
    let first_name = user.name.split(' ').next().unwrap_or_default().to_string();
    let stats = ApplicationStats::from_applications(&app.applications);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  Welcome back, {}!", first_name), styles::title_style())),
        Line::from(""),
        field_line("Applications", stats.total.to_string()),
        field_line("Submitted", stats.submitted.to_string()),
        field_line("Interviewing", stats.interviewing.to_string()),
        field_line("Offers", stats.offers.to_string()),
        field_line("CVs", app.cvs.len().to_string()),
        field_line("Profile links", format!("{} of 3", user.links().len())),
        Line::from(""),
    ];

    if !app.listings_loaded {
        lines.push(muted_line("Applications not loaded. Press [r] to retry."));
    } else if app.applications.is_empty() {
        lines.push(muted_line("No applications yet. Track them from the web app."));
    } else {
        lines.push(Line::from(Span::styled("  Recent applications", styles::label_style())));
        // Newest first; the API returns them in creation order
        for application in app.applications.iter().rev().take(MAX_RECENT_APPLICATIONS) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<16}", truncate_string(&application.status, 16)),
                    styles::status_style(&application.status),
                ),
                Span::styled(
                    truncate_string(
                        &format!("{} at {}", application.role_title, application.company_name),
                        MAX_URL_DISPLAY,
                    ),
                    styles::text_style(),
                ),
            ]));
        }
    }
    lines
}

fn cvs_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    if !app.listings_loaded {
        lines.push(muted_line("CVs not loaded. Press [r] to retry."));
    } else if app.cvs.is_empty() {
        lines.push(muted_line("No CVs uploaded yet."));
    } else {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<40}", "File"), styles::label_style()),
            Span::styled("Role", styles::label_style()),
        ]));
        for cv in &app.cvs {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<40}", truncate_string(&cv.filename, 38)), styles::text_style()),
                Span::styled(cv.role_category.clone(), styles::muted_style()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(muted_line("CV upload needs a browser. Upload new CVs at:"));
    lines.push(Line::from(Span::styled(
        format!("  {}", app.session.api().base_url()),
        styles::label_style(),
    )));
    lines
}

fn profile_lines(user: &User) -> Vec<Line<'static>> {
    let url = |v: &Option<String>| truncate_string(&format_optional(v, "-"), MAX_URL_DISPLAY);

    vec![
        Line::from(""),
        field_line("Name", user.name.clone()),
        field_line("Email", user.email.clone()),
        field_line("Phone", format_optional(&user.phone, "-")),
        field_line("GitHub", url(&user.github_url)),
        field_line("LinkedIn", url(&user.linkedin_url)),
        field_line("Portfolio", url(&user.portfolio_url)),
        field_line("Member since", format_date(&user.created_at)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [e]", styles::help_key_style()),
            Span::styled(" edit profile   ", styles::help_desc_style()),
            Span::styled("[r]", styles::help_key_style()),
            Span::styled(" reload from server", styles::help_desc_style()),
        ]),
    ]
}

fn muted_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(format!("  {}", text), styles::muted_style()))
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), styles::label_style()),
        Span::styled(value, styles::text_style()),
    ])
}
