//! Per-device progress records.

mod achievement;
mod user;

pub use achievement::*;
pub use user::*;
