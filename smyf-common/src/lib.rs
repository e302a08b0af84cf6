//! # SMYF Common Library
//!
//! Shared code for the registration service:
//! - Store initialization and the two-table insert/read operations
//! - Row models
//! - Database path resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
