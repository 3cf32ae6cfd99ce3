//! Configuration module
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (exclusion list, audit toggle)

pub mod paths;
pub mod settings;

pub use paths::ReconcilerPaths;
pub use settings::Settings;
