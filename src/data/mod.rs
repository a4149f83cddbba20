//! Data fetching
//!
//! Handles:
//! - Yahoo Finance chart API for daily close history

pub mod yahoo;

pub use yahoo::*;
