//! bitelog-common - Shared library for BiteLog services
//!
//! Provides the error taxonomy, SQLite schema and connection helpers, row
//! models for the two review sources, and data-directory resolution used by
//! every BiteLog service binary.

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
