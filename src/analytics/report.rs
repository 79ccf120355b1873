//! Serializable summary of a portfolio aggregation.

use crate::analytics::config::RiskConfig;
use crate::analytics::error::AnalyticsError;
use crate::analytics::portfolio::{
    AggregationMode, LegContribution, OptionLeg, aggregate_with_mode, leg_contributions,
};
use crate::analytics::pricing::PortfolioGreeks;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// Aggregated Greeks together with the per-leg breakdown that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Milliseconds since epoch when the report was built.
    pub timestamp: u64,
    /// Policy used for the aggregate.
    pub mode: AggregationMode,
    /// Number of legs aggregated.
    pub leg_count: usize,
    /// Portfolio Greeks.
    pub greeks: PortfolioGreeks,
    /// Signed contribution of each leg, in input order.
    pub legs: Vec<LegContribution>,
    /// Conventions the legs were built with.
    pub config: RiskConfig,
}

impl RiskReport {
    /// Builds a report for `legs` under `mode`.
    #[must_use]
    pub fn build(legs: &[OptionLeg], mode: AggregationMode, config: &RiskConfig) -> Self {
        let report = Self {
            timestamp: current_time_millis(),
            mode,
            leg_count: legs.len(),
            greeks: aggregate_with_mode(legs, mode),
            legs: leg_contributions(legs, mode),
            config: config.clone(),
        };
        trace!("risk report: {:?} over {} legs", report.mode, report.leg_count);
        report
    }

    /// Returns true if the aggregate carries no risk at all.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.greeks.is_zero()
    }

    /// Leg with the largest absolute delta contribution.
    #[must_use]
    pub fn largest_delta_contributor(&self) -> Option<&LegContribution> {
        self.legs
            .iter()
            .max_by(|a, b| a.greeks.delta.abs().total_cmp(&b.greeks.delta.abs()))
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the report to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, AnalyticsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report previously produced by [`RiskReport::to_json`].
    pub fn from_json(data: &str) -> Result<Self, AnalyticsError> {
        Ok(serde_json::from_str(data)?)
    }
}

fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
