//! Black-Scholes pricing, Greeks and implied volatility.
//!
//! # Overview
//!
//! For a single option leg the model takes five inputs (spot, strike, time to
//! expiry in years, risk-free rate, volatility) plus the option type, and
//! returns either a theoretical price or its first-order Greeks.
//!
//! The implied volatility solver runs the model backwards: given an observed
//! market price it searches, via Newton-Raphson, for the volatility that
//! reproduces it. Vega is the derivative of price with respect to volatility,
//! so each step costs one price and one vega evaluation.
//!
//! # Degenerate inputs
//!
//! Trade rows often arrive half-populated. Instead of failing, the model
//! returns zero for an expired option (`T <= 0`) or a non-positive
//! volatility, and the solver returns 0 for a non-positive market price.
//!
//! # Example
//!
//! ```ignore
//! use options_risk::prelude::{OptionType, compute_greeks, compute_implied_volatility};
//!
//! let greeks = compute_greeks(60000.0, 60000.0, 30.0 / 365.25, 0.01, 0.6, OptionType::Call);
//! println!("delta {:.4} theta/day {:.2}", greeks.delta, greeks.theta);
//!
//! let iv = compute_implied_volatility(60000.0, 60000.0, 30.0 / 365.25, 0.01, 4100.0, OptionType::Call);
//! println!("IV: {:.2}%", iv * 100.0);
//! ```

mod black_scholes;
mod solver;
mod types;

pub use black_scholes::{BlackScholes, compute_greeks, compute_price};
pub use solver::{
    IVSolution, SolverConfig, SolverStatus, compute_implied_volatility, implied_volatility,
    solve_iv,
};
pub use types::{Greeks, OptionType, PortfolioGreeks, PricingParams, TradeSide};
