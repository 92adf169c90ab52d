//! Filesystem-backed command templates

pub mod fs;

pub use fs::FileCommandSource;
