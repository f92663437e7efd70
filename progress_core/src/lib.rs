//! # Progress Core
//!
//! The progress engine of Java Quest. This crate owns the learner's progress record,
//! applies every change to it, and keeps it in device-local storage.
//!
//! ## Core Components
//!
//! - **store**: Persistent store adapter over a pluggable key/value backend
//! - **tracker**: The progress model - experience, lessons, achievements, reset
//! - **queries**: Derived read-only views for the presentation layer
//! - **config**: TOML configuration for storage and tracker behavior
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use progress_core::{FileStorage, ProgressStore, ProgressTracker, TrackerConfig};
//! use quest_rules::Catalog;
//!
//! let config = TrackerConfig::default();
//! let store = ProgressStore::from_config(FileStorage::from_config(&config), &config);
//! let mut tracker = ProgressTracker::with_config(Arc::new(Catalog::builtin()), store, &config);
//!
//! let outcome = tracker.finish_lesson("fundamentals", "variables");
//! println!("+{} XP, level {}", outcome.xp_gained, tracker.current_user().level);
//! ```

pub mod config;
pub mod error;
pub mod queries;
pub mod store;
pub mod tracker;

pub use config::*;
pub use error::*;
pub use store::*;
pub use tracker::*;
