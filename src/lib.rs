//! # volgrid - Black-Scholes Grid Pricing
//!
//! A small options-pricing service that computes call and put price
//! grids over a spot/volatility cross product, seeded by a historical
//! closing-price lookup for a ticker.
//!
//! ## Overview
//!
//! Given a ticker and a date range, the service fetches daily closes,
//! derives the current price and annualized historical volatility, and
//! prices a 20x20 Black-Scholes grid spanning 0.8x-1.2x the current
//! price (spot axis) and 0.5x-1.5x the estimated volatility (vol axis).
//! Callers may override the strike, time to maturity, risk-free rate,
//! and spot bounds.
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance daily close history
//! - **Black-Scholes**: closed-form European call/put pricing kernel
//! - **Pricing Engine**: parameter resolution and grid construction
//! - **Server**: axum REST endpoint with permissive CORS
//!
//! ## Usage
//!
//! ```rust,no_run
//! use volgrid::prelude::*;
//! use chrono::NaiveDate;
//!
//! // Fetch a year of AAPL closes
//! let client = YahooClient::new();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let series = client.get_close_history("AAPL", start, end).unwrap();
//!
//! // Price the grid with default parameters
//! let (params, grid) = price_grid(&series, &GridRequest::default()).unwrap();
//! println!("current price: {}", params.current_price);
//! println!("call at grid center: {}", grid.calls[[10, 10]]);
//! ```

pub mod core;
pub mod data;
pub mod models;
pub mod pricing;
pub mod server;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{CloseSeries, OptionType, VolGridError, VolGridResult};

    // Data fetching
    pub use crate::data::YahooClient;

    // Black-Scholes
    pub use crate::models::{norm_cdf, price as bs_price};

    // Grid pricing
    pub use crate::pricing::{
        annualized_volatility, build_grid, price_grid, resolve_params, GridRequest, PriceGrid,
        ResolvedParams, GRID_POINTS,
    };
}

// Re-export main types at crate root
pub use crate::core::{VolGridError, VolGridResult};
