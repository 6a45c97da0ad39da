//! Configuration module for jokebox
//!
//! This module contains the application configuration structures and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;

/// Maximum number of jokes listed in the sidebar
pub const SIDEBAR_LIMIT: usize = 60;

/// How long the copy control reads "Copied"
pub const COPY_FEEDBACK_MS: u64 = 1200;
