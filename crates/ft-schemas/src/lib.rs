//! ft-schemas
//!
//! Record types shared by every foliotrack crate:
//! - [`Trade`] — one broker execution, already normalized by the feed.
//! - [`InstrumentClass`] — closed equity/call/put discriminant, assigned
//!   once at ingestion (never re-derived from strings downstream).
//! - [`AccountEntry`] — one account-statement row for asset tracking.
//!
//! Plus the execution-timestamp parser, which owns the venue-time-zone
//! convention (see [`time`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod time;

pub use time::{parse_execution_time, TimeParseError, DEFAULT_VENUE};

// ---------------------------------------------------------------------------
// Instrument classification
// ---------------------------------------------------------------------------

/// What kind of instrument a trade is in.
///
/// Options (`Call` / `Put`) are never marked to market; everything else
/// (stock, ETF, cash equivalents) is treated as equity-like.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstrumentClass {
    #[default]
    #[serde(rename = "EQ")]
    Equity,
    #[serde(rename = "C")]
    Call,
    #[serde(rename = "P")]
    Put,
}

impl InstrumentClass {
    pub fn is_option(self) -> bool {
        matches!(self, InstrumentClass::Call | InstrumentClass::Put)
    }
}

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

fn one() -> f64 {
    1.0
}

/// A single broker execution.
///
/// Input fields come from the execution feed; the annotation fields
/// (`realized_pnl`, `remaining_qty`, `credit`, `mtm_price`, `mtm_value`)
/// default to zero and are written by the ft-engine pipeline.
///
/// Sign convention: positive `quantity` increases a long position (buy),
/// negative increases a short position (sell).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    pub symbol: String,
    /// Underlying symbol for derivatives. Absent for plain equity trades;
    /// aggregation then groups the trade under its own `symbol`.
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instrument: InstrumentClass,
    /// Signed execution quantity (+buy / −sell).
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
    /// Contract multiplier (100 for standard US options, 1 for stock).
    #[serde(default = "one")]
    pub multiplier: f64,
    #[serde(default)]
    pub commission: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub executed_at: DateTime<Utc>,

    // Annotations written by the pipeline.
    #[serde(default)]
    pub realized_pnl: f64,
    /// The portion of this specific execution still open, signed.
    #[serde(default)]
    pub remaining_qty: f64,
    /// Signed cash value of the open portion at its own price.
    #[serde(default)]
    pub credit: f64,
    #[serde(default)]
    pub mtm_price: f64,
    #[serde(default)]
    pub mtm_value: f64,
}

impl Trade {
    /// Grouping key for position aggregation: the underlying when present,
    /// otherwise the trade's own symbol.
    pub fn underlying_or_symbol(&self) -> &str {
        self.underlying.as_deref().unwrap_or(&self.symbol)
    }
}

// ---------------------------------------------------------------------------
// AccountEntry
// ---------------------------------------------------------------------------

/// One account-statement row: a running asset balance plus the period's
/// deposit and fee flows, as recorded on `date`.
///
/// `rate` converts a foreign-currency entry into the base currency;
/// normalization multiplies the monetary fields by it before bucketing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account: String,
    pub date: NaiveDate,
    pub currency: String,
    #[serde(default = "one")]
    pub rate: f64,
    #[serde(default)]
    pub deposit: f64,
    /// Running balance as of `date` (a snapshot, not a flow).
    #[serde(default)]
    pub asset: f64,
    #[serde(default)]
    pub fee: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_defaults_fill_partial_records() {
        // Legacy rows routinely omit multiplier/commission.
        let t: Trade = serde_json::from_str(
            r#"{
                "trade_id": "1",
                "symbol": "AAPL",
                "quantity": 10.0,
                "price": 100.0,
                "executed_at": "2025-03-03T15:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(t.multiplier, 1.0);
        assert_eq!(t.commission, 0.0);
        assert_eq!(t.instrument, InstrumentClass::Equity);
        assert_eq!(t.remaining_qty, 0.0);
        assert_eq!(t.underlying_or_symbol(), "AAPL");
    }

    #[test]
    fn instrument_class_serde_tags() {
        assert_eq!(
            serde_json::to_string(&InstrumentClass::Call).unwrap(),
            "\"C\""
        );
        let p: InstrumentClass = serde_json::from_str("\"P\"").unwrap();
        assert!(p.is_option());
        let eq: InstrumentClass = serde_json::from_str("\"EQ\"").unwrap();
        assert!(!eq.is_option());
    }
}
