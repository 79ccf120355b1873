//! Types shared by the pricing model and the implied volatility solver.

use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

/// Option type of a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionType {
    /// Resolves the option type from an instrument name suffix.
    ///
    /// `BTC-29MAR24-60000-C` is a call, `BTC-29MAR24-60000-P` a put. Any other
    /// suffix yields `None`.
    #[must_use]
    pub fn from_instrument_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.ends_with("-C") {
            Some(OptionType::Call)
        } else if name.ends_with("-P") {
            Some(OptionType::Put)
        } else {
            None
        }
    }
}

impl FromStr for OptionType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(AnalyticsError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}

/// Direction of a trade.
///
/// Determines the sign a leg carries into a general portfolio aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    /// Bought (long) position, contributes with sign `+1`.
    Buy,
    /// Sold (short) position, contributes with sign `-1`.
    Sell,
}

impl TradeSide {
    /// Sign applied to a leg's Greeks when aggregating.
    #[must_use]
    pub fn sign(&self) -> f64 {
        match self {
            TradeSide::Buy => 1.0,
            TradeSide::Sell => -1.0,
        }
    }
}

impl FromStr for TradeSide {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(TradeSide::Buy),
            "sell" | "short" => Ok(TradeSide::Sell),
            _ => Err(AnalyticsError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}

/// Black-Scholes inputs for one option, excluding volatility.
///
/// Volatility is passed separately so the same parameters can be priced at
/// several volatilities, as the implied volatility solver does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Underlying spot price in price units.
    pub spot: f64,
    /// Option strike price in price units.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.25).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.01 for 1%).
    pub risk_free_rate: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl PricingParams {
    /// Creates new pricing parameters.
    ///
    /// # Arguments
    /// - `spot`: Underlying spot price in price units
    /// - `strike`: Option strike price in price units
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Calculates the intrinsic value of the option.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        self.strike > 0.0 && (self.spot - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}

/// First-order sensitivities of an option (or a sum of options).
///
/// `theta` is expressed per calendar day. A single unit-size leg has
/// `delta` in `[-1, 1]`; aggregates have no bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Sensitivity of price to the underlying.
    pub delta: f64,
    /// Sensitivity of delta to the underlying.
    pub gamma: f64,
    /// Time decay per calendar day.
    pub theta: f64,
    /// Sensitivity of price to a unit change in volatility.
    pub vega: f64,
}

impl Greeks {
    /// Creates a new set of Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
        }
    }

    /// All-zero Greeks, the result of any degenerate input.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Returns true if every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.delta == 0.0 && self.gamma == 0.0 && self.theta == 0.0 && self.vega == 0.0
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            self.delta * factor,
            self.gamma * factor,
            self.theta * factor,
            self.vega * factor,
        )
    }
}

/// Greeks of a portfolio: the side-signed sum over its legs.
pub type PortfolioGreeks = Greeks;

impl Add for Greeks {
    type Output = Greeks;

    fn add(self, rhs: Greeks) -> Greeks {
        Greeks::new(
            self.delta + rhs.delta,
            self.gamma + rhs.gamma,
            self.theta + rhs.theta,
            self.vega + rhs.vega,
        )
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Greeks) {
        *self = *self + rhs;
    }
}

impl Sub for Greeks {
    type Output = Greeks;

    fn sub(self, rhs: Greeks) -> Greeks {
        Greeks::new(
            self.delta - rhs.delta,
            self.gamma - rhs.gamma,
            self.theta - rhs.theta,
            self.vega - rhs.vega,
        )
    }
}

impl Neg for Greeks {
    type Output = Greeks;

    fn neg(self) -> Greeks {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Greeks {
    type Output = Greeks;

    fn mul(self, rhs: f64) -> Greeks {
        self.scale(rhs)
    }
}

impl Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Greeks {
        iter.fold(Greeks::zero(), |acc, g| acc + g)
    }
}
