//! Yahoo Finance data fetcher
//!
//! Fetches free daily closing-price history for a ticker via Yahoo
//! Finance's unofficial chart API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, Duration, NaiveDate};
use serde::Deserialize;

use crate::core::{CloseSeries, VolGridError, VolGridResult};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com/v8/finance".to_string(),
        }
    }

    /// Daily closing prices for a symbol between `start` and `end`
    /// (both inclusive).
    pub fn get_close_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> VolGridResult<CloseSeries> {
        let period1 = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let period2 = (end + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        );

        let response: YahooChartResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| VolGridError::network(e.to_string()))?
            .json()
            .map_err(|e| VolGridError::data(format!("Failed to parse chart: {}", e)))?;

        if let Some(error) = response.chart.error {
            return Err(VolGridError::no_data(format!(
                "{}: {} ({})",
                symbol, error.description, error.code
            )));
        }

        let result = response
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                VolGridError::no_data(format!("no chart data returned for {}", symbol))
            })?;

        let series = build_series(symbol, result);
        if series.is_empty() {
            return Err(VolGridError::no_data(format!(
                "no closing prices for {} between {} and {}",
                symbol, start, end
            )));
        }

        tracing::debug!("Fetched {} closes for {}", series.len(), symbol);
        Ok(series)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pair timestamps with closes, skipping days Yahoo reports as null
fn build_series(symbol: &str, result: YahooChartResult) -> CloseSeries {
    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut series = CloseSeries::new(symbol);
    for (ts, close) in timestamps.iter().zip(closes.iter()) {
        if let (Some(close), Some(dt)) = (close, DateTime::from_timestamp(*ts, 0)) {
            series.push(dt.date_naive(), *close);
        }
    }

    series
}

// Yahoo Finance chart API response structures

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuoteIndicator>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteIndicator {
    close: Vec<Option<f64>>,
}
