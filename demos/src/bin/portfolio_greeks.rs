//! Example computing portfolio Greeks the way a dashboard widget would.
//!
//! This example shows how to:
//! 1. Plug a trade source into the `RiskEngine`
//! 2. Aggregate a multi-leg book and a two-leg calendar spread
//! 3. Recover implied volatility from an observed premium
//! 4. Emit rows ready for display as JSON

use options_risk::prelude::{
    AggregationMode, AnalyticsError, OptionType, RiskConfig, RiskEngine, TradeFilter, TradeRecord,
    compute_implied_volatility,
};
use serde::Serialize;
use tracing::{info, warn};

const TRADES: &str = r#"[
    {"instrument_name": "BTC-29MAR24-60000-C", "index_price": "60000", "dte": 30, "iv": "60", "direction": "buy", "amount": "5"},
    {"instrument_name": "BTC-29MAR24-55000-P", "index_price": 60000, "dte": 30, "iv": 65, "direction": "sell", "amount": 3},
    {"instrument_name": "BTC-26APR24-70000-C", "index_price": 60000, "dte": 58, "iv": 58, "direction": "buy", "amount": 2},
    {"instrument_name": "ETH-29MAR24-3200-C", "index_price": 3100, "dte": 30, "iv": 70, "direction": "buy", "amount": 10},
    {"instrument_name": "ETH-26APR24-3200-C", "index_price": 3100, "dte": 58, "iv": 66, "direction": "sell", "amount": 10}
]"#;

/// One line of the dashboard's Greeks table.
#[derive(Debug, Serialize)]
struct DashboardRow {
    underlying: String,
    mode: AggregationMode,
    legs: usize,
    delta: f64,
    gamma: f64,
    theta: f64,
    vega: f64,
}

/// Stands in for the cached HTTP client the dashboard uses.
fn fetch_trades(filter: &TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError> {
    let records = TradeRecord::list_from_json(TRADES)?;
    Ok(records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting portfolio Greeks example");

    let engine = RiskEngine::new(fetch_trades).with_config(RiskConfig::default());

    let mut rows = Vec::new();
    for underlying in ["BTC", "ETH", "SOL"] {
        let filter = TradeFilter::all().with_underlying(underlying);
        let report = engine.report(&filter)?;
        if report.leg_count == 0 {
            warn!("No trades for {}", underlying);
        }
        rows.push(DashboardRow {
            underlying: underlying.to_string(),
            mode: report.mode,
            legs: report.leg_count,
            delta: report.greeks.delta,
            gamma: report.greeks.gamma,
            theta: report.greeks.theta,
            vega: report.greeks.vega,
        });
    }

    // The ETH book is two legs, so it was aggregated as a calendar spread.
    // Forcing the general policy uses the trade sides instead.
    let general = RiskEngine::new(fetch_trades).with_mode(AggregationMode::General);
    let eth = general.portfolio_greeks(&TradeFilter::all().with_underlying("ETH"))?;
    info!("ETH under general policy: {:?}", eth);

    println!("{}", serde_json::to_string_pretty(&rows)?);

    let config = engine.config();
    let iv = compute_implied_volatility(
        60000.0,
        60000.0,
        config.years_from_days(30.0),
        config.risk_free_rate,
        4100.0,
        OptionType::Call,
    );
    info!("Implied volatility of a 4100 premium ATM call: {:.2}%", iv * 100.0);

    info!("Example completed successfully");
    Ok(())
}
