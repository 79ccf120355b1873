//! Newton-Raphson solver for implied volatility calculation.
//!
//! Finds the volatility whose Black-Scholes price equals an observed market
//! price. The solver never fails: invalid inputs return 0 and a search that
//! does not converge returns its last iterate.

use super::black_scholes::BlackScholes;
use super::types::{OptionType, PricingParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on the step between successive volatilities.
    pub tolerance: f64,
    /// Initial volatility guess (default: 0.5 = 50%).
    pub initial_guess: f64,
    /// Floor applied to every iterate (default: 0.001 = 0.1%).
    pub min_volatility: f64,
    /// Minimum vega threshold to avoid division by near-zero.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            initial_guess: 0.5,
            min_volatility: 0.001,
            min_vega: 1e-10,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial volatility guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the volatility floor.
    #[must_use]
    pub fn with_min_volatility(mut self, min_volatility: f64) -> Self {
        self.min_volatility = min_volatility;
        self
    }
}

/// How an implied volatility search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Successive iterates moved less than the tolerance.
    Converged,
    /// Vega fell below the threshold; the search could not progress.
    VegaUnderflow,
    /// The iteration budget ran out.
    MaxIterations,
    /// Expiry or market price was non-positive; no search was attempted.
    InvalidInput,
}

/// Outcome of an implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVSolution {
    /// Implied volatility as a decimal (e.g., 0.6 = 60%).
    pub volatility: f64,
    /// Number of Newton steps evaluated.
    pub iterations: u32,
    /// Reason the search stopped.
    pub status: SolverStatus,
}

impl IVSolution {
    /// Returns the volatility as a percentage (e.g., 60.0 for 60%).
    #[must_use]
    pub fn volatility_percent(&self) -> f64 {
        self.volatility * 100.0
    }

    /// Returns true if the search converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// Solves for implied volatility using Newton-Raphson method.
///
/// Each step evaluates price and vega at σ and moves to
/// σ' = σ + (market_price - BS(σ)) / vega(σ). The search returns σ' as soon
/// as |σ' - σ| falls below the tolerance; otherwise σ is floored at
/// `min_volatility` and the loop continues.
///
/// # Arguments
/// - `params`: Option parameters (spot, strike, time, rate, type)
/// - `market_price`: Observed market price to match
/// - `config`: Solver configuration
///
/// # Returns
/// The last volatility estimate together with the way the search ended.
/// Non-positive expiry or market price yields volatility 0.
///
/// # Example
/// ```ignore
/// use options_risk::prelude::{PricingParams, SolverConfig, solve_iv};
///
/// let params = PricingParams::call(60000.0, 60000.0, 30.0 / 365.25, 0.01);
/// let solution = solve_iv(&params, 4100.0, &SolverConfig::default());
/// println!("IV: {:.2}%", solution.volatility_percent());
/// ```
#[must_use]
pub fn solve_iv(params: &PricingParams, market_price: f64, config: &SolverConfig) -> IVSolution {
    if params.time_to_expiry <= 0.0 || market_price <= 0.0 {
        debug!(
            "implied volatility skipped: T={} market_price={}",
            params.time_to_expiry, market_price
        );
        return IVSolution {
            volatility: 0.0,
            iterations: 0,
            status: SolverStatus::InvalidInput,
        };
    }

    let mut sigma = config.initial_guess;

    for iteration in 0..config.max_iterations {
        let price = BlackScholes::price(params, sigma);
        let vega = BlackScholes::greeks(params, sigma).vega;

        if vega.abs() < config.min_vega {
            trace!("vega underflow at sigma={sigma} after {iteration} iterations");
            return IVSolution {
                volatility: sigma,
                iterations: iteration + 1,
                status: SolverStatus::VegaUnderflow,
            };
        }

        let next = sigma + (market_price - price) / vega;
        if (next - sigma).abs() < config.tolerance {
            return IVSolution {
                volatility: next,
                iterations: iteration + 1,
                status: SolverStatus::Converged,
            };
        }

        sigma = next.max(config.min_volatility);
    }

    debug!(
        "implied volatility did not converge after {} iterations, last sigma {}",
        config.max_iterations, sigma
    );
    IVSolution {
        volatility: sigma,
        iterations: config.max_iterations,
        status: SolverStatus::MaxIterations,
    }
}

/// Implied volatility with the default solver configuration.
///
/// Returns only the volatility; see [`solve_iv`] for the convergence status.
#[must_use]
pub fn implied_volatility(params: &PricingParams, market_price: f64) -> f64 {
    solve_iv(params, market_price, &SolverConfig::default()).volatility
}

/// Computes implied volatility from raw Black-Scholes inputs.
///
/// Returns 0 when `time_to_expiry <= 0` or `market_price <= 0`.
#[must_use]
pub fn compute_implied_volatility(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    market_price: f64,
    option_type: OptionType,
) -> f64 {
    let params = PricingParams::new(spot, strike, time_to_expiry, risk_free_rate, option_type);
    implied_volatility(&params, market_price)
}
