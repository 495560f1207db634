//! # Record Catalog Common Library
//!
//! Shared code for the catalog web service and the seed tool:
//! - Entity schemas and their display paths
//! - Storage queries (SQLite)
//! - Configuration resolution
//! - Input sanitization
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod sanitize;
pub mod uuid_utils;

pub use error::{Error, Result};
