/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Portfolio risk engine with a pluggable trade source.
//!
//! This module provides the `RiskEngine` struct, which fetches trades from a
//! [`TradeSource`], adapts them into option legs under one set of
//! conventions, and aggregates their Greeks.

use crate::analytics::config::RiskConfig;
use crate::analytics::error::AnalyticsError;
use crate::analytics::portfolio::{
    AggregationMode, OptionLeg, aggregate_with_mode, legs_from_records,
};
use crate::analytics::pricing::PortfolioGreeks;
use crate::analytics::report::RiskReport;
use crate::analytics::source::{TradeFilter, TradeSource};
use tracing::{info, warn};

/// Computes portfolio Greeks for trades delivered by a [`TradeSource`].
pub struct RiskEngine<S>
where
    S: TradeSource,
{
    /// Where trades come from
    source: S,
    /// Conventions applied to every leg
    config: RiskConfig,
    /// Aggregation policy; `None` selects by leg count
    mode: Option<AggregationMode>,
}

impl<S> RiskEngine<S>
where
    S: TradeSource,
{
    /// Create a new engine over `source` with default conventions.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: RiskConfig::default(),
            mode: None,
        }
    }

    /// Replace the conventions used to build legs.
    #[must_use]
    pub fn with_config(mut self, config: RiskConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the aggregation policy instead of selecting it by leg count.
    #[must_use]
    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Get the conventions in use.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Get the underlying trade source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Policy that will be applied to `leg_count` legs.
    pub fn mode_for(&self, leg_count: usize) -> AggregationMode {
        self.mode
            .unwrap_or_else(|| AggregationMode::for_leg_count(leg_count))
    }

    /// Fetch the trades matching `filter` and adapt them into legs.
    pub fn legs(&self, filter: &TradeFilter) -> Result<Vec<OptionLeg>, AnalyticsError> {
        let records = self.source.fetch_trades(filter).map_err(|err| {
            warn!("Failed to fetch trades for {:?}: {}", filter, err);
            err
        })?;
        Ok(legs_from_records(&records, &self.config))
    }

    /// Aggregate Greeks of the trades matching `filter`.
    pub fn portfolio_greeks(&self, filter: &TradeFilter) -> Result<PortfolioGreeks, AnalyticsError> {
        let legs = self.legs(filter)?;
        let mode = self.mode_for(legs.len());
        Ok(aggregate_with_mode(&legs, mode))
    }

    /// Build a full report for the trades matching `filter`.
    pub fn report(&self, filter: &TradeFilter) -> Result<RiskReport, AnalyticsError> {
        let legs = self.legs(filter)?;
        let mode = self.mode_for(legs.len());
        let report = RiskReport::build(&legs, mode, &self.config);
        info!(
            "Risk report over {} legs ({:?}): delta {:.4}, gamma {:.6}, theta {:.2}, vega {:.2}",
            report.leg_count,
            report.mode,
            report.greeks.delta,
            report.greeks.gamma,
            report.greeks.theta,
            report.greeks.vega
        );
        Ok(report)
    }
}
