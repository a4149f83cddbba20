//! volgrid CLI
//!
//! Command-line demo for the grid pricing engine: an offline
//! Black-Scholes example followed by a live Yahoo Finance fetch.

use chrono::{Duration, Utc};
use volgrid::prelude::*;

fn main() {
    println!("volgrid - Black-Scholes Grid Pricing");
    println!("====================================\n");

    // Example: single Black-Scholes evaluation
    let spot = 100.0;
    let strike = 100.0;
    let rate = 0.01;
    let vol = 0.20;
    let time = 1.0;

    println!("Black-Scholes Pricing Example:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Time: {:.1} years", time);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%\n", vol * 100.0);

    let call_price = bs_price(spot, strike, rate, vol, time, OptionType::Call);
    let put_price = bs_price(spot, strike, rate, vol, time, OptionType::Put);

    println!("Option Prices:");
    println!("  Call: ${:.2}", call_price);
    println!("  Put: ${:.2}", put_price);

    // Try fetching real data
    println!("\n--- Live Data ---");
    println!("Attempting to fetch AAPL history from Yahoo Finance...\n");

    let client = YahooClient::new();
    let end = Utc::now().date_naive();
    let start = end - Duration::days(365);

    match client.get_close_history("AAPL", start, end) {
        Ok(series) => {
            println!("AAPL: {} closes fetched", series.len());

            match price_grid(&series, &GridRequest::default()) {
                Ok((params, grid)) => {
                    println!("  Current price: ${:.2}", params.current_price);
                    println!("  Annualized vol: {:.2}%", params.volatility * 100.0);
                    println!("  Strike: ${:.2}", params.strike);
                    println!(
                        "  Spot range: ${:.2} - ${:.2}",
                        params.min_spot, params.max_spot
                    );
                    println!(
                        "  Grid: {} spots x {} vols",
                        grid.spot_axis.len(),
                        grid.vol_axis.len()
                    );
                    println!(
                        "  Call (low spot, low vol): ${:.2}",
                        grid.calls[[0, 0]]
                    );
                    println!(
                        "  Call (high spot, high vol): ${:.2}",
                        grid.calls[[GRID_POINTS - 1, GRID_POINTS - 1]]
                    );
                    println!(
                        "  Put (low spot, high vol): ${:.2}",
                        grid.puts[[0, GRID_POINTS - 1]]
                    );
                }
                Err(e) => println!("Could not price grid: {}", e),
            }
        }
        Err(e) => {
            println!("Could not fetch AAPL: {}", e);
            println!("(This is expected if you're offline or Yahoo API is unavailable)");
        }
    }

    println!("\n--- Done ---");
}
