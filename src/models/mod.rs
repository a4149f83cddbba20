//! Pricing models
//!
//! Implements:
//! - Black-Scholes (closed-form European call/put pricing)

pub mod black_scholes;

pub use black_scholes::*;
