//! Canonical option leg consumed by the aggregators.

use crate::analytics::config::DAYS_PER_YEAR;
use crate::analytics::pricing::{
    BlackScholes, Greeks, OptionType, PricingParams, SolverConfig, TradeSide, solve_iv,
};
use serde::{Deserialize, Serialize};

/// One option position within a portfolio or spread.
///
/// All fields are already validated: the option type and side are enums,
/// time is in years and volatility is a decimal fraction. A leg whose type
/// could not be resolved prices to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Instrument name, e.g. `BTC-29MAR24-60000-C`.
    pub instrument_name: String,
    /// Underlying price at the time of the trade.
    pub spot: f64,
    /// Exercise price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Annualized volatility as a decimal (0.6 = 60%).
    pub volatility: f64,
    /// Annualized risk-free rate.
    pub risk_free_rate: f64,
    /// Call or put, if known.
    pub option_type: Option<OptionType>,
    /// Buy or sell, if known.
    pub side: Option<TradeSide>,
    /// Contract quantity.
    pub size: f64,
    /// Day count behind `time_to_expiry`, also used for daily theta.
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
}

fn default_days_per_year() -> f64 {
    DAYS_PER_YEAR
}

impl OptionLeg {
    /// Creates a unit-size leg with a known type and side.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instrument_name: impl Into<String>,
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_rate: f64,
        option_type: OptionType,
        side: TradeSide,
    ) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            spot,
            strike,
            time_to_expiry,
            volatility,
            risk_free_rate,
            option_type: Some(option_type),
            side: Some(side),
            size: 1.0,
            days_per_year: DAYS_PER_YEAR,
        }
    }

    /// Sets the contract quantity.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the day count used for daily theta.
    #[must_use]
    pub fn with_days_per_year(mut self, days_per_year: f64) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Sets the trade side.
    #[must_use]
    pub fn with_side(mut self, side: Option<TradeSide>) -> Self {
        self.side = side;
        self
    }

    /// Pricing parameters for this leg, if its option type is known.
    #[must_use]
    pub fn pricing_params(&self) -> Option<PricingParams> {
        self.option_type.map(|option_type| {
            PricingParams::new(
                self.spot,
                self.strike,
                self.time_to_expiry,
                self.risk_free_rate,
                option_type,
            )
        })
    }

    /// Greeks of one contract, unsigned and unscaled.
    #[must_use]
    pub fn unit_greeks(&self) -> Greeks {
        self.pricing_params()
            .map(|params| {
                BlackScholes::greeks_with_day_count(&params, self.volatility, self.days_per_year)
            })
            .unwrap_or_default()
    }

    /// Theoretical price of one contract.
    #[must_use]
    pub fn theoretical_price(&self) -> f64 {
        self.pricing_params()
            .map(|params| BlackScholes::price(&params, self.volatility))
            .unwrap_or(0.0)
    }

    /// Sign of this leg in a general aggregate: `+1` buy, `-1` sell, `0`
    /// when the side is unknown.
    #[must_use]
    pub fn side_sign(&self) -> f64 {
        self.side.map(|side| side.sign()).unwrap_or(0.0)
    }

    /// Greeks scaled by size and signed by side.
    #[must_use]
    pub fn signed_greeks(&self) -> Greeks {
        let sign = self.side_sign();
        if sign == 0.0 {
            return Greeks::zero();
        }
        self.unit_greeks().scale(self.size * sign)
    }

    /// Implied volatility that reprices this leg at `market_price`.
    ///
    /// Returns 0 when the option type is unknown.
    #[must_use]
    pub fn implied_volatility(&self, market_price: f64) -> f64 {
        self.pricing_params()
            .map(|params| solve_iv(&params, market_price, &SolverConfig::default()).volatility)
            .unwrap_or(0.0)
    }
}
