//! Option legs, trade record adaptation and portfolio aggregation.

mod aggregator;
mod leg;
mod record;

pub use aggregator::{
    AggregationMode, CALENDAR_SPREAD_LEGS, LegContribution, aggregate_greeks, aggregate_portfolio,
    aggregate_with_mode, calendar_spread_greeks, leg_contributions, try_calendar_spread_greeks,
};
pub use leg::OptionLeg;
pub use record::{TradeRecord, legs_from_records, strike_from_instrument_name};
