//! Core data types for volgrid
//!
//! Defines fundamental types:
//! - OptionType: call/put with intrinsic value
//! - CloseSeries: historical closing prices
//! - VolGridError: error taxonomy

pub mod error;
pub mod option;
pub mod series;

pub use error::*;
pub use option::*;
pub use series::*;
