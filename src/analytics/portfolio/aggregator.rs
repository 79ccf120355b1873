//! Portfolio-level Greeks aggregation.
//!
//! Two policies coexist:
//!
//! - **General**: every leg contributes its Greeks × size, signed `+1` for a
//!   buy and `-1` for a sell. Legs with an unknown side contribute nothing.
//! - **Calendar spread**: exactly two legs, the first long and the second
//!   short whatever their `side` fields say, scaled by the first leg's size.
//!
//! [`AggregationMode::for_leg_count`] holds the selection rule used by
//! [`aggregate_portfolio`]. Callers that know which policy they want should
//! use [`aggregate_with_mode`].

use super::leg::OptionLeg;
use crate::analytics::error::AnalyticsError;
use crate::analytics::pricing::{Greeks, PortfolioGreeks};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

/// Number of legs a calendar spread is made of.
pub const CALENDAR_SPREAD_LEGS: usize = 2;

/// Aggregation policy applied to a list of legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// Side-signed, size-scaled sum over any number of legs.
    General,
    /// Long first leg minus short second leg, ignoring sides.
    CalendarSpread,
}

impl AggregationMode {
    /// Policy chosen when the caller does not pick one: a calendar spread
    /// for exactly two legs, the general sum otherwise.
    #[must_use]
    pub fn for_leg_count(count: usize) -> Self {
        if count == CALENDAR_SPREAD_LEGS {
            AggregationMode::CalendarSpread
        } else {
            AggregationMode::General
        }
    }
}

/// Signed Greeks of one leg within an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegContribution {
    /// Instrument name of the leg.
    pub instrument_name: String,
    /// Greeks this leg adds to the aggregate.
    pub greeks: Greeks,
}

/// General aggregation: Σ sign(side) × size × Greeks.
///
/// Empty input yields zero Greeks. The result does not depend on leg order
/// beyond floating-point rounding.
#[must_use]
pub fn aggregate_greeks(legs: &[OptionLeg]) -> PortfolioGreeks {
    legs.iter()
        .map(|leg| {
            let greeks = leg.signed_greeks();
            trace!("{}: {:?}", leg.instrument_name, greeks);
            greeks
        })
        .sum()
}

/// Calendar spread aggregation: (long − short) × long.size.
///
/// The first leg is long and the second short; their `side` fields are
/// ignored and the short leg's size is not applied.
///
/// # Errors
/// [`AnalyticsError::LegCount`] unless exactly two legs are given.
pub fn try_calendar_spread_greeks(legs: &[OptionLeg]) -> Result<PortfolioGreeks, AnalyticsError> {
    let [long, short] = legs else {
        return Err(AnalyticsError::LegCount {
            expected: CALENDAR_SPREAD_LEGS,
            actual: legs.len(),
        });
    };

    let spread = (long.unit_greeks() - short.unit_greeks()).scale(long.size);
    trace!(
        "calendar spread {} / {}: {:?}",
        long.instrument_name, short.instrument_name, spread
    );
    Ok(spread)
}

/// Calendar spread aggregation that degrades to zero.
///
/// A wrong leg count is logged and yields zero Greeks.
#[must_use]
pub fn calendar_spread_greeks(legs: &[OptionLeg]) -> PortfolioGreeks {
    try_calendar_spread_greeks(legs).unwrap_or_else(|err| {
        error!("calendar spread aggregation rejected: {err}");
        Greeks::zero()
    })
}

/// Aggregates under an explicitly chosen policy.
#[must_use]
pub fn aggregate_with_mode(legs: &[OptionLeg], mode: AggregationMode) -> PortfolioGreeks {
    match mode {
        AggregationMode::General => aggregate_greeks(legs),
        AggregationMode::CalendarSpread => calendar_spread_greeks(legs),
    }
}

/// Aggregates with the policy picked by [`AggregationMode::for_leg_count`].
#[must_use]
pub fn aggregate_portfolio(legs: &[OptionLeg]) -> PortfolioGreeks {
    aggregate_with_mode(legs, AggregationMode::for_leg_count(legs.len()))
}

/// Per-leg contributions whose sum is the aggregate under `mode`.
///
/// Under [`AggregationMode::CalendarSpread`] with the wrong number of legs
/// every contribution is zero, matching the zero aggregate.
#[must_use]
pub fn leg_contributions(legs: &[OptionLeg], mode: AggregationMode) -> Vec<LegContribution> {
    let spread_ok = legs.len() == CALENDAR_SPREAD_LEGS;
    let long_size = legs.first().map(|leg| leg.size).unwrap_or(0.0);

    legs.iter()
        .enumerate()
        .map(|(index, leg)| {
            let greeks = match mode {
                AggregationMode::General => leg.signed_greeks(),
                AggregationMode::CalendarSpread if !spread_ok => Greeks::zero(),
                AggregationMode::CalendarSpread if index == 0 => {
                    leg.unit_greeks().scale(long_size)
                }
                AggregationMode::CalendarSpread => leg.unit_greeks().scale(-long_size),
            };
            LegContribution {
                instrument_name: leg.instrument_name.clone(),
                greeks,
            }
        })
        .collect()
}
