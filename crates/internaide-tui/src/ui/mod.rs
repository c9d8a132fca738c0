//! Terminal UI module using ratatui.
//!
//! - `shell`: branding, navigation and identity chrome
//! - `pages`: Dashboard, CVs and Profile bodies
//! - `render`: frame layout, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling

pub mod input;
pub mod pages;
pub mod render;
pub mod shell;
pub mod styles;
