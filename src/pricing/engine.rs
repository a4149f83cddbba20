//! Grid pricing engine
//!
//! Resolves scalar pricing parameters from a closing-price series plus
//! caller overrides, then prices a 20x20 call/put grid over derived spot
//! and volatility ranges:
//! - spot axis: [min_spot, max_spot], default 0.8x to 1.2x the last close
//! - vol axis: [0.5*sigma, 1.5*sigma] around the annualized historical vol

use ndarray::{Array, Array2};

use crate::core::{CloseSeries, OptionType, VolGridError, VolGridResult};
use crate::models::black_scholes;

/// Points along each grid axis
pub const GRID_POINTS: usize = 20;

/// Assumed trading days per year when annualizing daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

const DEFAULT_TIME_TO_MATURITY: f64 = 1.0;
const DEFAULT_RISK_FREE_RATE: f64 = 0.01;
const DEFAULT_SPOT_BOUNDS: (f64, f64) = (0.8, 1.2);
const VOL_BOUNDS: (f64, f64) = (0.5, 1.5);

/// Caller overrides for grid pricing. Every field falls back to a
/// series-derived default during resolution.
#[derive(Debug, Clone, Default)]
pub struct GridRequest {
    pub strike_price: Option<f64>,
    pub time_to_maturity: Option<f64>,
    pub risk_free_rate: Option<f64>,
    pub min_spot_price: Option<f64>,
    pub max_spot_price: Option<f64>,
}

impl GridRequest {
    /// Reject non-positive or contradictory overrides before any
    /// computation or provider round trip.
    pub fn validate(&self) -> VolGridResult<()> {
        if let Some(strike) = self.strike_price {
            if strike <= 0.0 {
                return Err(VolGridError::invalid_input(format!(
                    "strike price must be positive, got {}",
                    strike
                )));
            }
        }

        if let Some(time) = self.time_to_maturity {
            if time <= 0.0 {
                return Err(VolGridError::invalid_input(format!(
                    "time to maturity must be positive, got {}",
                    time
                )));
            }
        }

        if let Some(min_spot) = self.min_spot_price {
            if min_spot <= 0.0 {
                return Err(VolGridError::invalid_input(format!(
                    "min spot price must be positive, got {}",
                    min_spot
                )));
            }
        }

        if let Some(max_spot) = self.max_spot_price {
            if max_spot <= 0.0 {
                return Err(VolGridError::invalid_input(format!(
                    "max spot price must be positive, got {}",
                    max_spot
                )));
            }
        }

        if let (Some(min_spot), Some(max_spot)) = (self.min_spot_price, self.max_spot_price) {
            if min_spot >= max_spot {
                return Err(VolGridError::invalid_input(format!(
                    "min spot price {} must be below max spot price {}",
                    min_spot, max_spot
                )));
            }
        }

        Ok(())
    }
}

/// Scalar parameters resolved before grid construction
#[derive(Debug, Clone, Copy)]
pub struct ResolvedParams {
    /// Last close in the series
    pub current_price: f64,
    /// Annualized historical volatility of daily returns
    pub volatility: f64,
    /// Strike (caller override or current price)
    pub strike: f64,
    /// Time to maturity in years
    pub time_to_maturity: f64,
    /// Annualized risk-free rate
    pub risk_free_rate: f64,
    /// Lower spot-axis bound
    pub min_spot: f64,
    /// Upper spot-axis bound
    pub max_spot: f64,
}

/// Annualized sample standard deviation of daily returns.
///
/// Fewer than two returns leave the sample estimator undefined; the
/// volatility resolves to zero in that case.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    let n = returns.len();
    if n < 2 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / n as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f64>()
        / (n as f64 - 1.0);

    variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Resolve grid parameters from a non-empty series and caller overrides.
pub fn resolve_params(series: &CloseSeries, request: &GridRequest) -> VolGridResult<ResolvedParams> {
    request.validate()?;

    let current_price = series.last_close().ok_or_else(|| {
        VolGridError::no_data(format!("no closing prices for {}", series.symbol))
    })?;

    if current_price <= 0.0 {
        return Err(VolGridError::data(format!(
            "non-positive last close {} for {}",
            current_price, series.symbol
        )));
    }

    let volatility = annualized_volatility(&series.daily_returns());

    let min_spot = request
        .min_spot_price
        .unwrap_or(DEFAULT_SPOT_BOUNDS.0 * current_price);
    let max_spot = request
        .max_spot_price
        .unwrap_or(DEFAULT_SPOT_BOUNDS.1 * current_price);

    // Re-check after defaults: a single caller bound can still invert
    // the resolved range.
    if min_spot >= max_spot {
        return Err(VolGridError::invalid_input(format!(
            "resolved spot range is inverted: min {} >= max {}",
            min_spot, max_spot
        )));
    }

    Ok(ResolvedParams {
        current_price,
        volatility,
        strike: request.strike_price.unwrap_or(current_price),
        time_to_maturity: request.time_to_maturity.unwrap_or(DEFAULT_TIME_TO_MATURITY),
        risk_free_rate: request.risk_free_rate.unwrap_or(DEFAULT_RISK_FREE_RATE),
        min_spot,
        max_spot,
    })
}

/// Call and put price grids over the spot/volatility cross product.
///
/// Rows follow `spot_axis`, columns follow `vol_axis`; every cell is
/// rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    pub spot_axis: Vec<f64>,
    pub vol_axis: Vec<f64>,
    pub calls: Array2<f64>,
    pub puts: Array2<f64>,
}

/// Round to 2 decimal places
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Price the full grid for resolved parameters.
pub fn build_grid(params: &ResolvedParams) -> VolGridResult<PriceGrid> {
    let spot_axis = Array::linspace(params.min_spot, params.max_spot, GRID_POINTS);
    let vol_axis = Array::linspace(
        VOL_BOUNDS.0 * params.volatility,
        VOL_BOUNDS.1 * params.volatility,
        GRID_POINTS,
    );

    let mut calls = Array2::<f64>::zeros((GRID_POINTS, GRID_POINTS));
    let mut puts = Array2::<f64>::zeros((GRID_POINTS, GRID_POINTS));

    for (i, &spot) in spot_axis.iter().enumerate() {
        for (j, &vol) in vol_axis.iter().enumerate() {
            let call = black_scholes::price(
                spot,
                params.strike,
                params.risk_free_rate,
                vol,
                params.time_to_maturity,
                OptionType::Call,
            );
            let put = black_scholes::price(
                spot,
                params.strike,
                params.risk_free_rate,
                vol,
                params.time_to_maturity,
                OptionType::Put,
            );

            if !call.is_finite() || !put.is_finite() {
                return Err(VolGridError::computation(format!(
                    "non-finite price at spot {} vol {}",
                    spot, vol
                )));
            }

            calls[[i, j]] = round2(call);
            puts[[i, j]] = round2(put);
        }
    }

    Ok(PriceGrid {
        spot_axis: spot_axis.to_vec(),
        vol_axis: vol_axis.to_vec(),
        calls,
        puts,
    })
}

/// Resolve parameters and price the grid in one step.
pub fn price_grid(
    series: &CloseSeries,
    request: &GridRequest,
) -> VolGridResult<(ResolvedParams, PriceGrid)> {
    let params = resolve_params(series, request)?;
    let grid = build_grid(&params)?;
    Ok((params, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_from_closes(closes: &[f64]) -> CloseSeries {
        let mut series = CloseSeries::new("TEST");
        for (i, &close) in closes.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                + chrono::Duration::days(i as i64);
            series.push(date, close);
        }
        series
    }

    #[test]
    fn test_default_resolution() {
        let series = series_from_closes(&[95.0, 98.0, 100.0]);
        let params = resolve_params(&series, &GridRequest::default()).unwrap();

        assert_eq!(params.current_price, 100.0);
        assert_eq!(params.strike, 100.0);
        assert_eq!(params.time_to_maturity, 1.0);
        assert_eq!(params.risk_free_rate, 0.01);
        assert!((params.min_spot - 80.0).abs() < 1e-10);
        assert!((params.max_spot - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let series = series_from_closes(&[95.0, 98.0, 100.0]);
        let request = GridRequest {
            strike_price: Some(110.0),
            time_to_maturity: Some(0.5),
            risk_free_rate: Some(0.03),
            min_spot_price: Some(50.0),
            max_spot_price: Some(150.0),
        };
        let params = resolve_params(&series, &request).unwrap();

        assert_eq!(params.strike, 110.0);
        assert_eq!(params.time_to_maturity, 0.5);
        assert_eq!(params.risk_free_rate, 0.03);
        assert_eq!(params.min_spot, 50.0);
        assert_eq!(params.max_spot, 150.0);
    }

    #[test]
    fn test_annualized_volatility() {
        // Returns +10%, -10%: mean 0, sample variance 0.02
        let series = series_from_closes(&[100.0, 110.0, 99.0]);
        let params = resolve_params(&series, &GridRequest::default()).unwrap();

        let expected = 0.02f64.sqrt() * 252f64.sqrt();
        assert!((params.volatility - expected).abs() < 1e-10);
    }

    #[test]
    fn test_single_close_resolves_to_zero_vol() {
        let series = series_from_closes(&[100.0]);
        let params = resolve_params(&series, &GridRequest::default()).unwrap();
        assert_eq!(params.volatility, 0.0);

        // Two closes give one return, still below the sample-std minimum
        let series = series_from_closes(&[100.0, 105.0]);
        let params = resolve_params(&series, &GridRequest::default()).unwrap();
        assert_eq!(params.volatility, 0.0);
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let series = CloseSeries::new("TEST");
        let err = resolve_params(&series, &GridRequest::default()).unwrap_err();
        assert!(matches!(err, VolGridError::NoData(_)));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let series = series_from_closes(&[95.0, 98.0, 100.0]);

        let request = GridRequest {
            min_spot_price: Some(150.0),
            max_spot_price: Some(50.0),
            ..Default::default()
        };
        let err = resolve_params(&series, &request).unwrap_err();
        assert!(matches!(err, VolGridError::InvalidInput(_)));

        // A single override can invert the resolved range too:
        // min 300 against the default max of 1.2 * 100 = 120.
        let request = GridRequest {
            min_spot_price: Some(300.0),
            ..Default::default()
        };
        let err = resolve_params(&series, &request).unwrap_err();
        assert!(matches!(err, VolGridError::InvalidInput(_)));
    }

    #[test]
    fn test_non_positive_overrides_rejected() {
        let request = GridRequest {
            strike_price: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VolGridError::InvalidInput(_))
        ));

        let request = GridRequest {
            time_to_maturity: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(VolGridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_grid_is_always_20_by_20() {
        let series = series_from_closes(&[100.0, 101.0, 102.0, 100.0, 103.0]);

        // Wide range
        let (_, grid) = price_grid(&series, &GridRequest::default()).unwrap();
        assert_eq!(grid.spot_axis.len(), GRID_POINTS);
        assert_eq!(grid.vol_axis.len(), GRID_POINTS);
        assert_eq!(grid.calls.dim(), (GRID_POINTS, GRID_POINTS));
        assert_eq!(grid.puts.dim(), (GRID_POINTS, GRID_POINTS));

        // Narrow range
        let request = GridRequest {
            min_spot_price: Some(102.9),
            max_spot_price: Some(103.1),
            ..Default::default()
        };
        let (_, grid) = price_grid(&series, &request).unwrap();
        assert_eq!(grid.spot_axis.len(), GRID_POINTS);
        assert_eq!(grid.calls.dim(), (GRID_POINTS, GRID_POINTS));
    }

    #[test]
    fn test_axes_strictly_increasing() {
        let series = series_from_closes(&[100.0, 101.0, 102.0, 100.0, 103.0]);
        let (params, grid) = price_grid(&series, &GridRequest::default()).unwrap();
        assert!(params.volatility > 0.0);

        for pair in grid.spot_axis.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for pair in grid.vol_axis.windows(2) {
            assert!(pair[0] < pair[1]);
        }

        assert!((grid.spot_axis[0] - params.min_spot).abs() < 1e-10);
        assert!((grid.spot_axis[GRID_POINTS - 1] - params.max_spot).abs() < 1e-10);
        assert!((grid.vol_axis[0] - 0.5 * params.volatility).abs() < 1e-10);
        assert!((grid.vol_axis[GRID_POINTS - 1] - 1.5 * params.volatility).abs() < 1e-10);
    }

    #[test]
    fn test_cells_rounded_to_cents() {
        let series = series_from_closes(&[100.0, 101.0, 102.0, 100.0, 103.0]);
        let (_, grid) = price_grid(&series, &GridRequest::default()).unwrap();

        for &cell in grid.calls.iter().chain(grid.puts.iter()) {
            assert!(cell >= 0.0);
            let cents = cell * 100.0;
            assert!((cents - cents.round()).abs() < 1e-9, "unrounded cell {}", cell);
        }
    }

    #[test]
    fn test_zero_vol_grid_is_intrinsic() {
        let series = series_from_closes(&[100.0]);
        let (params, grid) = price_grid(&series, &GridRequest::default()).unwrap();

        assert_eq!(params.volatility, 0.0);
        assert!(grid.vol_axis.iter().all(|&v| v == 0.0));

        // Lowest spot 80 against strike 100: worthless call, 20 put
        assert_eq!(grid.calls[[0, 0]], 0.0);
        assert_eq!(grid.puts[[0, 0]], 20.0);
        // Highest spot 120: 20 call, worthless put
        assert_eq!(grid.calls[[GRID_POINTS - 1, 0]], 20.0);
        assert_eq!(grid.puts[[GRID_POINTS - 1, 0]], 0.0);
    }

    #[test]
    fn test_identical_inputs_give_identical_grids() {
        let series = series_from_closes(&[100.0, 101.0, 102.0, 100.0, 103.0]);
        let (_, first) = price_grid(&series, &GridRequest::default()).unwrap();
        let (_, second) = price_grid(&series, &GridRequest::default()).unwrap();
        assert_eq!(first, second);
    }
}
