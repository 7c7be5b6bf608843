//! Podcast agent
//!
//! Derives URL slugs from free-text topics, builds episode links, asks a
//! language model for announcements and keeps an episode catalog in a
//! SQL-over-HTTP database with model-backed recommendations.

pub mod agent;
pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

pub use agent::{Generation, PersistOutcome, PodcastAgent, Reply};
pub use config::{Credentials, Settings};
pub use crate::core::slug::{compose_url, derive_slug};
