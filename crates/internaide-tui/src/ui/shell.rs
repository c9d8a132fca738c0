//! The page shell: branding, navigation and identity around every page.
//!
//! The shell reads the signed-in user and renders nothing without one. It
//! keeps no routing state: the current page comes in from the caller and
//! navigation keys come back out as `ShellIntent`s, which `dispatch` hands
//! to the caller's navigation callback. Logout goes straight to the session
//! store.
//!
//! Two layouts share the same inputs:
//! - wide: navigation inline in the header, name and email shown
//! - narrow: navigation on its own row, only the initials badge shown

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use internaide_core::auth::SessionStore;
use internaide_core::models::User;
use internaide_core::utils::initials;

use crate::app::Page;

use super::styles;

pub const BRAND: &str = "InternAIde";

/// Terminals at least this wide get the wide layout
pub const WIDE_MIN_WIDTH: u16 = 80;

const LOGOUT_HINT: &str = "[l]ogout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellLayout {
    Wide,
    Narrow,
}

impl ShellLayout {
    pub fn for_width(width: u16) -> Self {
        if width >= WIDE_MIN_WIDTH {
            ShellLayout::Wide
        } else {
            ShellLayout::Narrow
        }
    }
}

/// What a key press on the shell asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellIntent {
    Navigate(Page),
    Logout,
}

/// Map a key to a shell intent. `current` is only used for Tab cycling.
pub fn intent_for_key(key: KeyEvent, current: Page) -> Option<ShellIntent> {
    match key.code {
        KeyCode::Char('1') => Some(ShellIntent::Navigate(Page::Dashboard)),
        KeyCode::Char('2') => Some(ShellIntent::Navigate(Page::Cvs)),
        KeyCode::Char('3') => Some(ShellIntent::Navigate(Page::Profile)),
        KeyCode::Tab => Some(ShellIntent::Navigate(current.next())),
        KeyCode::BackTab => Some(ShellIntent::Navigate(current.prev())),
        KeyCode::Char('l') => Some(ShellIntent::Logout),
        _ => None,
    }
}

/// Carry out an intent: navigation is reported, logout is performed.
pub fn dispatch(intent: ShellIntent, session: &mut SessionStore, on_navigate: &mut dyn FnMut(Page)) {
    match intent {
        ShellIntent::Navigate(page) => on_navigate(page),
        ShellIntent::Logout => session.logout(),
    }
}

/// Draw the shell chrome into `area` and return the area left for page
/// content. Draws nothing and returns `None` when no one is signed in.
pub fn render(frame: &mut Frame, area: Rect, user: Option<&User>, current: Page) -> Option<Rect> {
    let user = user?;

    match ShellLayout::for_width(area.width) {
        ShellLayout::Wide => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(area);

            let mut left = brand_spans();
            left.push(Span::raw("   "));
            left.extend(nav_spans(current));

            let mut right = identity_spans(user, true);
            right.push(Span::raw("  "));
            right.push(Span::styled(LOGOUT_HINT, styles::muted_style()));

            render_bar(frame, chunks[0], left, right);
            Some(chunks[1])
        }
        ShellLayout::Narrow => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(2),
                    Constraint::Min(0),
                ])
                .split(area);

            let mut right = identity_spans(user, false);
            right.push(Span::raw(" "));
            right.push(Span::styled(LOGOUT_HINT, styles::muted_style()));
            frame.render_widget(Paragraph::new(justify(brand_spans(), right, chunks[0].width)), chunks[0]);

            render_bar(frame, chunks[1], nav_spans(current), Vec::new());
            Some(chunks[2])
        }
    }
}

fn render_bar(frame: &mut Frame, area: Rect, left: Vec<Span<'static>>, right: Vec<Span<'static>>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    let paragraph = Paragraph::new(justify(left, right, area.width)).block(block);
    frame.render_widget(paragraph, area);
}

/// Left spans, padding, right spans, filling `width`.
fn justify(mut left: Vec<Span<'static>>, right: Vec<Span<'static>>, width: u16) -> Line<'static> {
    let used: usize = left.iter().chain(right.iter()).map(Span::width).sum();
    let padding = (width as usize).saturating_sub(used + 1);
    left.insert(0, Span::raw(" "));
    left.push(Span::raw(" ".repeat(padding)));
    left.extend(right);
    Line::from(left)
}

fn brand_spans() -> Vec<Span<'static>> {
    vec![Span::styled(format!("✦ {}", BRAND), styles::title_style())]
}

fn nav_spans(current: Page) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(
            format!("[{}] {}", i + 1, page.title()),
            styles::nav_style(*page == current),
        ));
    }
    spans
}

fn identity_spans(user: &User, show_details: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if show_details {
        spans.push(Span::styled(user.name.clone(), styles::text_style()));
        spans.push(Span::styled(format!(" <{}> ", user.email), styles::muted_style()));
    }
    spans.push(Span::styled(format!(" {} ", initials(&user.name)), styles::avatar_style()));
    spans
}
