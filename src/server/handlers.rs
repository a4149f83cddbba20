//! REST API handlers and wire types

use std::time::Instant;

use axum::Json;
use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::core::{VolGridError, VolGridResult};
use crate::data::YahooClient;
use crate::pricing::{price_grid, GridRequest, PriceGrid, ResolvedParams};

use super::error::ServerError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Grid pricing request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub stock: String,
    pub start_date: String,
    pub end_date: String,
    pub strike_price: Option<f64>,
    pub time_to_maturity: Option<f64>,
    pub risk_free_rate: Option<f64>,
    pub min_spot_price: Option<f64>,
    pub max_spot_price: Option<f64>,
}

impl PricingRequest {
    /// Parse and validate the ticker and date range
    pub fn date_range(&self) -> VolGridResult<(NaiveDate, NaiveDate)> {
        if self.stock.trim().is_empty() {
            return Err(VolGridError::invalid_input("stock symbol must not be empty"));
        }

        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        if start > end {
            return Err(VolGridError::invalid_input(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        Ok((start, end))
    }

    /// Engine-level overrides carried by this request
    pub fn grid_request(&self) -> GridRequest {
        GridRequest {
            strike_price: self.strike_price,
            time_to_maturity: self.time_to_maturity,
            risk_free_rate: self.risk_free_rate,
            min_spot_price: self.min_spot_price,
            max_spot_price: self.max_spot_price,
        }
    }
}

fn parse_date(value: &str) -> VolGridResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| VolGridError::invalid_input(format!("invalid date {:?}: {}", value, e)))
}

/// Grid pricing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    /// One object per spot level: {"id": spot label, vol label: price, ...}
    pub call_data: Vec<Map<String, Value>>,
    pub put_data: Vec<Map<String, Value>>,
    pub current_price: f64,
    pub implied_volatility: f64,
    pub strike_price: f64,
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
}

impl PricingResponse {
    /// Render the dense grid as heatmap rows keyed by formatted axis labels
    pub fn from_grid(params: &ResolvedParams, grid: &PriceGrid) -> Self {
        Self {
            call_data: grid_rows(&grid.spot_axis, &grid.vol_axis, &grid.calls),
            put_data: grid_rows(&grid.spot_axis, &grid.vol_axis, &grid.puts),
            current_price: params.current_price,
            implied_volatility: params.volatility,
            strike_price: params.strike,
            time_to_maturity: params.time_to_maturity,
            risk_free_rate: params.risk_free_rate,
        }
    }
}

fn grid_rows(spot_axis: &[f64], vol_axis: &[f64], prices: &Array2<f64>) -> Vec<Map<String, Value>> {
    spot_axis
        .iter()
        .enumerate()
        .map(|(i, spot)| {
            let mut row = Map::new();
            row.insert("id".to_string(), Value::String(format!("{:.2}", spot)));
            for (j, vol) in vol_axis.iter().enumerate() {
                row.insert(format!("{:.2}", vol), json_number(prices[[i, j]]));
            }
            row
        })
        .collect()
}

// Grid cells are finite (the engine rejects non-finite prices), so the
// fallback arm is unreachable in practice.
fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fetch close history for the requested ticker and price the full
/// call/put grid.
pub async fn black_scholes(
    Json(request): Json<PricingRequest>,
) -> Result<Json<PricingResponse>, ServerError> {
    info!("Received pricing request for {}", request.stock);
    let started = Instant::now();

    // Reject malformed input before the provider round trip
    let (start, end) = request.date_range()?;
    let grid_request = request.grid_request();
    grid_request.validate()?;

    let symbol = request.stock.clone();
    let series = tokio::task::spawn_blocking(move || {
        let client = YahooClient::new();
        client.get_close_history(&symbol, start, end)
    })
    .await
    .map_err(|e| VolGridError::computation(format!("fetch task failed: {}", e)))??;

    info!(
        "Fetched {} closes for {} in {:.2?}",
        series.len(),
        request.stock,
        started.elapsed()
    );

    let (params, grid) = price_grid(&series, &grid_request)?;

    info!(
        "Priced {}x{} grid for {} in {:.2?}",
        grid.spot_axis.len(),
        grid.vol_axis.len(),
        request.stock,
        started.elapsed()
    );

    Ok(Json(PricingResponse::from_grid(&params, &grid)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(stock: &str, start: &str, end: &str) -> PricingRequest {
        PricingRequest {
            stock: stock.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            strike_price: None,
            time_to_maturity: None,
            risk_free_rate: None,
            min_spot_price: None,
            max_spot_price: None,
        }
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let payload = r#"{
            "stock": "AAPL",
            "startDate": "2024-01-02",
            "endDate": "2024-12-31",
            "strikePrice": 200.0,
            "minSpotPrice": 150.0,
            "maxSpotPrice": 250.0
        }"#;

        let request: PricingRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.stock, "AAPL");
        assert_eq!(request.strike_price, Some(200.0));
        assert_eq!(request.time_to_maturity, None);
        assert_eq!(request.min_spot_price, Some(150.0));
    }

    #[test]
    fn test_date_range_validation() {
        let (start, end) = request("AAPL", "2024-01-02", "2024-12-31")
            .date_range()
            .unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let err = request("AAPL", "2024-12-31", "2024-01-02")
            .date_range()
            .unwrap_err();
        assert!(matches!(err, VolGridError::InvalidInput(_)));

        let err = request("AAPL", "not-a-date", "2024-01-02")
            .date_range()
            .unwrap_err();
        assert!(matches!(err, VolGridError::InvalidInput(_)));

        let err = request("  ", "2024-01-02", "2024-12-31")
            .date_range()
            .unwrap_err();
        assert!(matches!(err, VolGridError::InvalidInput(_)));
    }

    #[test]
    fn test_grid_rows_shape_and_labels() {
        let spot_axis = vec![80.0, 100.0, 120.0];
        let vol_axis = vec![0.1, 0.2];
        let prices =
            Array2::from_shape_vec((3, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

        let rows = grid_rows(&spot_axis, &vol_axis, &prices);
        assert_eq!(rows.len(), 3);

        let keys: Vec<&str> = rows[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["id", "0.10", "0.20"]);
        assert_eq!(rows[0]["id"], Value::String("80.00".to_string()));
        assert_eq!(rows[1]["0.10"], serde_json::json!(3.0));
        assert_eq!(rows[2]["0.20"], serde_json::json!(6.0));
    }
}
