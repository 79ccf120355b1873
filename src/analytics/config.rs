//! Market conventions shared by every computation in the crate.

use crate::analytics::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Day count used to convert calendar days to years, and annual theta to
/// daily theta.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Risk-free rate applied to every leg unless overridden.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// Conventions applied when turning trade records into option legs.
///
/// The risk-free rate is a policy constant of the caller, never read from a
/// trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Annualized risk-free rate (e.g., 0.01 for 1%).
    pub risk_free_rate: f64,
    /// Calendar days per year, for time-to-expiry conversion and daily theta.
    pub days_per_year: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            days_per_year: DAYS_PER_YEAR,
        }
    }
}

impl RiskConfig {
    /// Creates a configuration with the default conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_days_per_year(mut self, days_per_year: f64) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Converts calendar days to years under this configuration.
    ///
    /// A non-positive day count yields 0, which the pricing model treats as
    /// expired.
    #[must_use]
    pub fn years_from_days(&self, days: f64) -> f64 {
        if self.days_per_year <= 0.0 {
            return 0.0;
        }
        days / self.days_per_year
    }

    /// Loads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(data: &str) -> Result<Self, AnalyticsError> {
        Ok(serde_json::from_str(data)?)
    }
}
