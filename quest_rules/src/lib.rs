//! # Quest Rules
//!
//! The rule book for Java Quest - progress records, leveling mechanics, achievement
//! definitions, and the built-in course catalog. This crate performs no I/O; the
//! `progress_core` crate persists and mutates the records defined here.

pub mod catalog;
pub mod entities;
pub mod mechanics;

pub use catalog::*;
pub use entities::*;
pub use mechanics::*;
