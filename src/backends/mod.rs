//! Backends module - Filesystem traversal
//!
//! - discover: suffix-filtered recursive file discovery

pub mod discover;
