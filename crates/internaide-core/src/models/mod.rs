//! Data models for InternAIde entities.
//!
//! - `User`: the account record returned by the API
//! - `Registration`, `ProfileUpdate`: request bodies
//! - `AuthResponse`: token + user returned by login and register
//! - `Cv`, `Application`: the user's uploaded CVs and tracked applications

pub mod application;
pub mod cv;
pub mod user;

pub use application::{Application, ApplicationStats};
pub use cv::Cv;
pub use user::{AuthResponse, ProfileUpdate, Registration, User};
