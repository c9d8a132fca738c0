//! Core library for the InternAIde client.
//!
//! - `api`: HTTP client for the InternAIde REST API
//! - `auth`: session store over the API and durable storage
//! - `config`: configuration file and environment overrides
//! - `models`: user record and request bodies
//! - `storage`: durable key-value surfaces
//! - `utils`: display formatting helpers

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;
pub mod utils;
