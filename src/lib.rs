//! # options-risk
//!
//! Risk analytics for crypto options dashboards.
//!
//! The crate takes already-fetched trade records and turns them into numbers:
//!
//! - **Pricing**: Black-Scholes price and Greeks (delta, gamma, theta per
//!   day, vega) for a single European option, with an Abramowitz-Stegun
//!   error function behind the normal CDF.
//! - **Implied volatility**: a Newton-Raphson search for the volatility that
//!   reproduces an observed market price.
//! - **Portfolio aggregation**: side-signed, size-scaled sums of Greeks over
//!   any number of legs, plus a dedicated two-leg calendar spread path.
//! - **Input adaptation**: lenient parsing of heterogeneous trade records
//!   into validated option legs.
//!
//! Degenerate inputs (expired options, zero volatility, missing fields)
//! never fail; they produce zero-valued results.
//!
//! ## Example
//!
//! ```ignore
//! use options_risk::prelude::*;
//!
//! let records = TradeRecord::list_from_json(r#"[
//!     {"instrument_name": "BTC-29MAR24-60000-C", "index_price": 60000, "dte": 30, "iv": 60, "direction": "buy", "amount": 2},
//!     {"instrument_name": "BTC-29MAR24-55000-P", "index_price": 60000, "dte": 30, "iv": 65, "direction": "sell", "amount": 1},
//!     {"instrument_name": "BTC-26APR24-70000-C", "index_price": 60000, "dte": 58, "iv": 58, "direction": "buy", "amount": 1}
//! ]"#)?;
//!
//! let legs = legs_from_records(&records, &RiskConfig::default());
//! let greeks = aggregate_portfolio(&legs);
//! println!("net delta {:.4}, theta/day {:.2}", greeks.delta, greeks.theta);
//! ```

pub mod analytics;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::analytics::portfolio::{
        AggregationMode, LegContribution, OptionLeg, TradeRecord, aggregate_greeks,
        aggregate_portfolio, aggregate_with_mode, calendar_spread_greeks, leg_contributions,
        legs_from_records, try_calendar_spread_greeks,
    };
    pub use crate::analytics::pricing::{
        BlackScholes, Greeks, IVSolution, OptionType, PortfolioGreeks, PricingParams,
        SolverConfig, SolverStatus, TradeSide, compute_greeks, compute_implied_volatility,
        compute_price, implied_volatility, solve_iv,
    };
    pub use crate::analytics::{
        AnalyticsError, DAYS_PER_YEAR, DEFAULT_RISK_FREE_RATE, InMemoryTradeSource, RiskConfig,
        RiskEngine, RiskReport, TradeFilter, TradeSource,
    };
}

pub use analytics::pricing::{compute_greeks, compute_implied_volatility, compute_price};
pub use analytics::portfolio::aggregate_portfolio;
