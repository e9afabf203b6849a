//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Data model and error taxonomy
//! - Summary rendering (text/json)
//! - Path normalization utilities
//! - File reading and line splitting
//! - Content digests

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
