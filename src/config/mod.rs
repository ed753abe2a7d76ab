//! Configuration module for bordero
//!
//! - Platform path resolution (with a `BORDERO_DATA_DIR` override)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BorderoPaths;
pub use settings::Settings;
