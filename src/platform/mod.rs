//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names/codes to held keys)
//! - Wall-clock time

pub mod input;
pub mod time;

pub use input::Key;
pub use time::now_ms;
