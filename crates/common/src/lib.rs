//! Common types for the Time Series API
//!
//! This crate provides the shared data model used across all crates.
//!
//! # Modules
//!
//! - [`types`] - Time series points, series sets and wide tables

pub mod types;

pub use types::*;
