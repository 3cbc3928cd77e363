//! Utility module
//!
//! Filesystem path helpers.

pub mod file;
