//! Raw trade records and their conversion to [`OptionLeg`].
//!
//! Records come from a remote API whose field names and types vary: numbers
//! may be JSON numbers or numeric strings, and most fields are optional.
//! Parsing is lenient. Anything that cannot be read becomes `None` and is
//! replaced by a default when the leg is built, so a record never fails to
//! convert.

use super::leg::OptionLeg;
use crate::analytics::config::RiskConfig;
use crate::analytics::error::AnalyticsError;
use crate::analytics::pricing::{OptionType, TradeSide};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One trade as delivered by the data source.
///
/// Several spellings are accepted for most fields. When a row carries more
/// than one of them, the first usable one in this order wins:
///
/// | Field | Keys |
/// |---|---|
/// | `instrument_name` | `instrument_name`, `instrument` |
/// | `spot` | `spot`, `index_price`, `underlying_price` |
/// | `days_to_expiry` | `days_to_expiry`, `dte` |
/// | `iv` | `iv`, `implied_volatility` |
/// | `side` | `side`, `direction` |
/// | `size` | `size`, `amount`, `contracts` |
/// | `option_type` | `option_type`, `kind` |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTradeRecord")]
pub struct TradeRecord {
    /// Instrument name (e.g., "BTC-29MAR24-60000-C").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_name: Option<String>,
    /// Underlying price at the time of the trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<f64>,
    /// Strike price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<f64>,
    /// Calendar days to expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_expiry: Option<f64>,
    /// Implied volatility in percent (60.0 = 60%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<f64>,
    /// Free-text trade direction ("buy", "sell", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Contract quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Explicit option type ("call", "put", "C", "P").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
}

/// Every key a row may use, each read on its own so that rows carrying two
/// spellings of one field still parse.
#[derive(Debug, Default, Deserialize)]
struct RawTradeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    instrument_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    instrument: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    spot: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    index_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    underlying_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    strike: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    days_to_expiry: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    dte: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    iv: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    implied_volatility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    side: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    contracts: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    option_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    kind: Option<String>,
}

impl From<RawTradeRecord> for TradeRecord {
    fn from(raw: RawTradeRecord) -> Self {
        Self {
            instrument_name: raw.instrument_name.or(raw.instrument),
            spot: raw.spot.or(raw.index_price).or(raw.underlying_price),
            strike: raw.strike,
            days_to_expiry: raw.days_to_expiry.or(raw.dte),
            iv: raw.iv.or(raw.implied_volatility),
            side: raw.side.or(raw.direction),
            size: raw.size.or(raw.amount).or(raw.contracts),
            option_type: raw.option_type.or(raw.kind),
        }
    }
}

impl TradeRecord {
    /// Parses one record from JSON.
    ///
    /// Only invalid JSON is an error. A value that is not an object becomes
    /// an empty record.
    pub fn from_json(data: &str) -> Result<Self, AnalyticsError> {
        let value: Value = serde_json::from_str(data)?;
        Ok(Self::from_value(value))
    }

    /// Parses a JSON array of records.
    ///
    /// Only invalid JSON or a non-array document is an error. Rows that are
    /// not objects become empty records, so one bad row never drops the
    /// rest of the batch.
    pub fn list_from_json(data: &str) -> Result<Vec<Self>, AnalyticsError> {
        let rows: Vec<Value> = serde_json::from_str(data)?;
        Ok(rows.into_iter().map(Self::from_value).collect())
    }

    /// Reads a record from an already-parsed JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            debug!("trade row is not an object, using an empty record: {value}");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("unreadable trade row, using an empty record: {e}");
            Self::default()
        })
    }

    /// Resolves the option type: explicit field first, then the instrument
    /// name suffix.
    #[must_use]
    pub fn resolved_option_type(&self) -> Option<OptionType> {
        self.option_type
            .as_deref()
            .and_then(|value| value.parse().ok())
            .or_else(|| {
                self.instrument_name
                    .as_deref()
                    .and_then(OptionType::from_instrument_name)
            })
    }

    /// Resolves the trade side, if it is recognisable.
    #[must_use]
    pub fn resolved_side(&self) -> Option<TradeSide> {
        self.side.as_deref().and_then(|value| value.parse().ok())
    }

    /// Resolves the strike: explicit field first, then the instrument name.
    #[must_use]
    pub fn resolved_strike(&self) -> Option<f64> {
        self.strike.or_else(|| {
            self.instrument_name
                .as_deref()
                .and_then(strike_from_instrument_name)
        })
    }
}

/// Extracts the strike from an instrument name of the form
/// `UNDERLYING-EXPIRY-STRIKE-TYPE`.
#[must_use]
pub fn strike_from_instrument_name(name: &str) -> Option<f64> {
    let parts: Vec<&str> = name.trim().split('-').collect();
    if parts.len() >= 4 {
        parts[2].parse().ok().filter(|strike: &f64| strike.is_finite())
    } else {
        None
    }
}

impl OptionLeg {
    /// Builds a leg from a raw record under the given conventions.
    ///
    /// Defaults: size 1, implied volatility 0 (the leg then prices to zero),
    /// every other number 0. A negative or non-finite size is replaced by 1.
    /// The risk-free rate and the day count always come from `config`.
    #[must_use]
    pub fn from_record(record: &TradeRecord, config: &RiskConfig) -> Self {
        let instrument_name = record.instrument_name.clone().unwrap_or_default();

        let spot = record.spot.unwrap_or_else(|| {
            debug!("{instrument_name}: missing spot, using 0");
            0.0
        });
        let strike = record.resolved_strike().unwrap_or_else(|| {
            debug!("{instrument_name}: missing strike, using 0");
            0.0
        });
        let days_to_expiry = record.days_to_expiry.unwrap_or_else(|| {
            debug!("{instrument_name}: missing days to expiry, using 0");
            0.0
        });
        let iv_percent = record.iv.unwrap_or(0.0);
        let size = match record.size {
            Some(size) if size.is_finite() && size >= 0.0 => size,
            Some(size) => {
                debug!("{instrument_name}: invalid size {size}, using 1");
                1.0
            }
            None => 1.0,
        };

        let option_type = record.resolved_option_type();
        if option_type.is_none() {
            debug!("{instrument_name}: option type unresolved, leg will price to zero");
        }

        Self {
            time_to_expiry: config.years_from_days(days_to_expiry),
            volatility: iv_percent / 100.0,
            risk_free_rate: config.risk_free_rate,
            side: record.resolved_side(),
            instrument_name,
            spot,
            strike,
            option_type,
            size,
            days_per_year: config.days_per_year,
        }
    }
}

/// Converts a batch of records into legs.
#[must_use]
pub fn legs_from_records(records: &[TradeRecord], config: &RiskConfig) -> Vec<OptionLeg> {
    records
        .iter()
        .map(|record| OptionLeg::from_record(record, config))
        .collect()
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
