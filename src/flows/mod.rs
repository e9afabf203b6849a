//! Flows module - The code material pipeline
//!
//! - corpus: concatenate discovered files behind banners
//! - excerpt: head/tail window selection
//! - report: report rendering and writing
//! - material: the end-to-end run

pub mod corpus;
pub mod excerpt;
pub mod material;
pub mod report;
