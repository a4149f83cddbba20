//! Historical closing-price series
//!
//! The market-data value object consumed by the pricing engine: an
//! ordered sequence of daily closes for a single ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily closing prices for a ticker, ascending by trading date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseSeries {
    /// Ticker symbol (e.g., "AAPL", "QQQ")
    pub symbol: String,
    /// (trading date, closing price) pairs
    pub closes: Vec<(NaiveDate, f64)>,
}

impl CloseSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            closes: Vec::new(),
        }
    }

    /// Add a close, keeping the series sorted by date
    pub fn push(&mut self, date: NaiveDate, close: f64) {
        self.closes.push((date, close));
        self.closes.sort_by_key(|(d, _)| *d);
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent closing price
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().map(|(_, close)| *close)
    }

    /// Simple daily percentage returns: (close[i] - close[i-1]) / close[i-1].
    ///
    /// A series with fewer than two closes has no returns.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.closes
            .windows(2)
            .map(|pair| (pair[1].1 - pair[0].1) / pair[0].1)
            .collect()
    }
}
