//! Black-Scholes pricing model and Greeks calculation.
//!
//! European options on a non-dividend-paying underlying. Every function
//! returns zero for degenerate inputs instead of failing, so rows that are
//! still incomplete when a dashboard renders simply contribute nothing.

use super::types::{Greeks, OptionType, PricingParams};
use crate::analytics::config::DAYS_PER_YEAR;
use std::f64::consts::PI;
use tracing::trace;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Black-Scholes pricing model implementation.
///
/// Provides methods for calculating option prices and Greeks
/// using the Black-Scholes formula without dividend yield.
pub struct BlackScholes;

impl BlackScholes {
    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷.
    ///
    /// # Arguments
    /// - `x`: Input value
    ///
    /// # Returns
    /// Approximation of erf(x)
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        // Constants for the approximation
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function (CDF).
    ///
    /// Calculates P(Z ≤ x) where Z is a standard normal random variable.
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function (PDF).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `spot`: Current underlying price (S)
    /// - `strike`: Option strike price (K)
    /// - `rate`: Risk-free interest rate (r)
    /// - `time`: Time to expiration in years (T)
    /// - `vol`: Volatility (σ)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Returns true when the model produces a finite, meaningful result.
    ///
    /// Expired options, non-positive volatility and non-positive prices are
    /// all treated as degenerate.
    #[must_use]
    pub fn is_priceable(params: &PricingParams, vol: f64) -> bool {
        params.time_to_expiry > 0.0
            && vol > 0.0
            && params.spot > 0.0
            && params.strike > 0.0
            && params.time_to_expiry.is_finite()
            && vol.is_finite()
            && params.spot.is_finite()
            && params.strike.is_finite()
            && params.risk_free_rate.is_finite()
    }

    /// Calculates the theoretical option price using Black-Scholes formula.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// # Returns
    /// Theoretical option price, or 0 for degenerate inputs
    #[must_use]
    pub fn price(params: &PricingParams, vol: f64) -> f64 {
        if !Self::is_priceable(params, vol) {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        let d2 = Self::d2(d1, vol, params.time_to_expiry);
        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();

        match params.option_type {
            OptionType::Call => {
                params.spot * Self::norm_cdf(d1) - params.strike * discount * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                params.strike * discount * Self::norm_cdf(-d2) - params.spot * Self::norm_cdf(-d1)
            }
        }
    }

    /// Calculates vega (∂price/∂σ) - sensitivity to volatility.
    ///
    /// Vega = S · N'(d1) · √T, per unit of volatility (not per 1%).
    #[must_use]
    pub fn vega(params: &PricingParams, vol: f64) -> f64 {
        if !Self::is_priceable(params, vol) {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        params.spot * Self::norm_pdf(d1) * params.time_to_expiry.sqrt()
    }

    /// Calculates delta (∂price/∂S) - sensitivity to underlying price.
    ///
    /// For calls: Δ = N(d1)
    /// For puts:  Δ = N(d1) - 1
    #[must_use]
    pub fn delta(params: &PricingParams, vol: f64) -> f64 {
        if !Self::is_priceable(params, vol) {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );

        match params.option_type {
            OptionType::Call => Self::norm_cdf(d1),
            OptionType::Put => Self::norm_cdf(d1) - 1.0,
        }
    }

    /// Calculates gamma (∂²price/∂S²) - rate of change of delta.
    ///
    /// Γ = N'(d1) / (S · σ · √T)
    #[must_use]
    pub fn gamma(params: &PricingParams, vol: f64) -> f64 {
        if !Self::is_priceable(params, vol) {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        Self::norm_pdf(d1) / (params.spot * vol * params.time_to_expiry.sqrt())
    }

    /// Calculates annual theta (∂price/∂t), the price change per year.
    #[must_use]
    pub fn theta_annual(params: &PricingParams, vol: f64) -> f64 {
        if !Self::is_priceable(params, vol) {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        let d2 = Self::d2(d1, vol, params.time_to_expiry);
        Self::theta_from_d(params, vol, d1, d2)
    }

    /// Calculates theta per calendar day.
    ///
    /// Annual theta divided by [`DAYS_PER_YEAR`].
    #[must_use]
    pub fn theta(params: &PricingParams, vol: f64) -> f64 {
        Self::theta_annual(params, vol) / DAYS_PER_YEAR
    }

    fn theta_from_d(params: &PricingParams, vol: f64, d1: f64, d2: f64) -> f64 {
        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();
        let sqrt_time = params.time_to_expiry.sqrt();

        let term1 = -params.spot * Self::norm_pdf(d1) * vol / (2.0 * sqrt_time);

        match params.option_type {
            OptionType::Call => {
                term1 - params.risk_free_rate * params.strike * discount * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                term1 + params.risk_free_rate * params.strike * discount * Self::norm_cdf(-d2)
            }
        }
    }

    /// Calculates delta, gamma, theta (per day) and vega in one pass.
    ///
    /// # Arguments
    /// - `params`: Option parameters (spot, strike, time, rate, type)
    /// - `vol`: Volatility (σ) as a decimal fraction
    ///
    /// # Returns
    /// The Greeks of one unit of the option, or [`Greeks::zero`] for
    /// degenerate inputs
    #[must_use]
    pub fn greeks(params: &PricingParams, vol: f64) -> Greeks {
        Self::greeks_with_day_count(params, vol, DAYS_PER_YEAR)
    }

    /// Same as [`BlackScholes::greeks`], with theta expressed per day of a
    /// `days_per_year`-day year.
    ///
    /// The day count should be the one used to derive `time_to_expiry`.
    /// A non-positive or non-finite day count yields [`Greeks::zero`].
    #[must_use]
    pub fn greeks_with_day_count(params: &PricingParams, vol: f64, days_per_year: f64) -> Greeks {
        if !Self::is_priceable(params, vol) || !(days_per_year > 0.0 && days_per_year.is_finite())
        {
            trace!(
                "degenerate pricing input: spot={} strike={} T={} vol={} days_per_year={}",
                params.spot, params.strike, params.time_to_expiry, vol, days_per_year
            );
            return Greeks::zero();
        }

        let sqrt_time = params.time_to_expiry.sqrt();
        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        let d2 = Self::d2(d1, vol, params.time_to_expiry);
        let pdf_d1 = Self::norm_pdf(d1);

        let delta = match params.option_type {
            OptionType::Call => Self::norm_cdf(d1),
            OptionType::Put => Self::norm_cdf(d1) - 1.0,
        };
        let gamma = pdf_d1 / (params.spot * vol * sqrt_time);
        let vega = params.spot * sqrt_time * pdf_d1;
        let theta = Self::theta_from_d(params, vol, d1, d2) / days_per_year;

        Greeks::new(delta, gamma, theta, vega)
    }
}

/// Computes the Greeks of one option from raw Black-Scholes inputs.
///
/// Returns [`Greeks::zero`] when `time_to_expiry <= 0` or `volatility <= 0`.
#[must_use]
pub fn compute_greeks(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Greeks {
    let params = PricingParams::new(spot, strike, time_to_expiry, risk_free_rate, option_type);
    BlackScholes::greeks(&params, volatility)
}

/// Computes the Black-Scholes price of one option from raw inputs.
///
/// Returns 0 when `time_to_expiry <= 0` or `volatility <= 0`.
#[must_use]
pub fn compute_price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> f64 {
    let params = PricingParams::new(spot, strike, time_to_expiry, risk_free_rate, option_type);
    BlackScholes::price(&params, volatility)
}
