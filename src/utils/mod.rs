//! Shared helpers for reference files and filesystem work.

pub mod fs;
pub mod reference;
