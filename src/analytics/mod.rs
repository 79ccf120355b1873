//! Options risk analytics: pricing, implied volatility and portfolio Greeks.

pub mod config;
/// Fetch-adapt-aggregate pipeline over a pluggable trade source.
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod pricing;
pub mod report;
pub mod source;

pub use config::{DAYS_PER_YEAR, DEFAULT_RISK_FREE_RATE, RiskConfig};
pub use engine::RiskEngine;
pub use error::AnalyticsError;
pub use report::RiskReport;
pub use source::{InMemoryTradeSource, TradeFilter, TradeSource};
