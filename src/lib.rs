//! bordero - weekly payables schedule
//!
//! This library assembles the weekly bordero: from a list of payment items
//! and a registry of funding accounts it selects the items due in a
//! Monday-to-Sunday week, applies the account/status/search filters, tracks
//! which items are included, and derives the totals, groupings, balance
//! projection and export rows shown to approvers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (items, accounts, money, week period)
//! - `services`: Week selection, filtering, inclusion and ordering
//! - `reports`: Aggregation, balance projection and the weekly bordero
//! - `export`: CSV, JSON and YAML writers
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use bordero::config::settings::Settings;
//! use bordero::reports::{SessionState, WeeklyBordero};
//!
//! let settings = Settings::default();
//! let state = SessionState::new(items, registry, reference);
//! let bordero = WeeklyBordero::derive(&state, &settings);
//! println!("{}", bordero.format_terminal());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BorderoError, BorderoResult};
