//! Utilities shared by the Hiroba crates: logging setup and wall-clock time.

pub mod logger;
pub mod time;
