//! Data-access seam between the analytics core and wherever trades come from.
//!
//! HTTP clients, response caches and the like live outside this crate and
//! implement [`TradeSource`]. The core only ever sees the records they return.

use crate::analytics::error::AnalyticsError;
use crate::analytics::portfolio::TradeRecord;
use crate::analytics::pricing::{OptionType, TradeSide};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Selection criteria for trades. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeFilter {
    /// Underlying currency, matched against the instrument name prefix
    /// (e.g. "BTC"), case-insensitively.
    pub underlying: Option<String>,
    /// Only calls or only puts.
    pub option_type: Option<OptionType>,
    /// Only buys or only sells.
    pub side: Option<TradeSide>,
}

impl TradeFilter {
    /// A filter that matches every trade.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one underlying.
    #[must_use]
    pub fn with_underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    /// Restricts to one option type.
    #[must_use]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Restricts to one side.
    #[must_use]
    pub fn with_side(mut self, side: TradeSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Returns true if `record` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, record: &TradeRecord) -> bool {
        if let Some(underlying) = &self.underlying {
            let prefix = record
                .instrument_name
                .as_deref()
                .and_then(|name| name.split('-').next())
                .unwrap_or_default();
            if !prefix.eq_ignore_ascii_case(underlying) {
                return false;
            }
        }

        let type_ok = self
            .option_type
            .is_none_or(|option_type| record.resolved_option_type() == Some(option_type));
        let side_ok = self
            .side
            .is_none_or(|side| record.resolved_side() == Some(side));

        type_ok && side_ok
    }
}

/// Anything that can deliver trade records for a filter.
pub trait TradeSource {
    /// Fetches the trades matching `filter`.
    ///
    /// # Errors
    /// [`AnalyticsError::Source`] when the underlying data cannot be read.
    fn fetch_trades(&self, filter: &TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError>;
}

impl<F> TradeSource for F
where
    F: Fn(&TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError>,
{
    fn fetch_trades(&self, filter: &TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError> {
        self(filter)
    }
}

/// Trade source backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeSource {
    records: Vec<TradeRecord>,
}

impl InMemoryTradeSource {
    /// Creates a source over the given records.
    #[must_use]
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    /// Creates a source from a JSON array of records.
    pub fn from_json(data: &str) -> Result<Self, AnalyticsError> {
        Ok(Self::new(TradeRecord::list_from_json(data)?))
    }

    /// Appends a record.
    pub fn push(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TradeSource for InMemoryTradeSource {
    fn fetch_trades(&self, filter: &TradeFilter) -> Result<Vec<TradeRecord>, AnalyticsError> {
        let trades: Vec<TradeRecord> = self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        trace!(
            "in-memory source: {} of {} records match",
            trades.len(),
            self.records.len()
        );
        Ok(trades)
    }
}
