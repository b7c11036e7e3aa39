//! Shared helpers for the platform packagers.

pub mod fs;
pub mod http;
pub mod zip;
