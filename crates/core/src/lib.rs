//! Core types and helpers for tablechat
//!
//! This crate contains domain types shared across all other crates.

mod constants;
mod env_config;
mod json_utils;
mod message;
mod report;
mod table;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use json_utils::strip_markdown_fences;
pub use message::*;
pub use report::ReportType;
pub use table::*;
