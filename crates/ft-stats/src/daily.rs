//! Daily realized-P&L series.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use ft_schemas::Trade;

/// Realized P&L for one calendar date (venue-local).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    /// English weekday name, for display ("Monday", ...).
    pub day: String,
    pub pnl: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DailyReport {
    pub stats: Vec<DailyStat>,
    pub total: f64,
}

/// Bucket realized P&L by venue-local calendar date.
///
/// Business days between the first and last observed date always appear,
/// zero-filled when nothing was realized, so the series has no silent
/// weekday gaps. Weekend dates appear only when their P&L is non-zero.
pub fn daily_realized(trades: &[Trade], venue: Tz) -> DailyReport {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in trades {
        let date = t.executed_at.with_timezone(&venue).date_naive();
        *by_date.entry(date).or_insert(0.0) += t.realized_pnl;
    }

    let (Some((&first, _)), Some((&last, _))) =
        (by_date.first_key_value(), by_date.last_key_value())
    else {
        return DailyReport::default();
    };

    let mut report = DailyReport::default();
    let mut date = first;
    while date <= last {
        let pnl = by_date.get(&date).copied().unwrap_or(0.0);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend || pnl != 0.0 {
            report.total += pnl;
            report.stats.push(DailyStat {
                date,
                day: date.format("%A").to_string(),
                pnl,
            });
        }
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    report
}
