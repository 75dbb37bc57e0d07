//! Weekly realized-P&L series, weeks ending Friday.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use ft_schemas::Trade;

/// Realized P&L for the week ending on `week_ending` (a Friday).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeeklyStat {
    pub week_ending: NaiveDate,
    pub pnl: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub stats: Vec<WeeklyStat>,
    pub total: f64,
}

/// The Friday that ends `date`'s week: the date itself when it is a
/// Friday, otherwise the next one (Saturday and Sunday roll forward into
/// the following week).
pub fn week_ending_friday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (4 + 7 - date.weekday().num_days_from_monday() as u64) % 7;
    date.checked_add_days(Days::new(days_ahead)).unwrap_or(date)
}

/// Bucket realized P&L by week-ending-Friday (venue-local dates).
///
/// The series is contiguous: every Friday between the first and last
/// bucket is emitted, zero weeks included.
pub fn weekly_realized(trades: &[Trade], venue: Tz) -> WeeklyReport {
    let mut by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in trades {
        let date = t.executed_at.with_timezone(&venue).date_naive();
        *by_week.entry(week_ending_friday(date)).or_insert(0.0) += t.realized_pnl;
    }

    let (Some((&first, _)), Some((&last, _))) =
        (by_week.first_key_value(), by_week.last_key_value())
    else {
        return WeeklyReport::default();
    };

    let mut report = WeeklyReport::default();
    let mut friday = first;
    while friday <= last {
        let pnl = by_week.get(&friday).copied().unwrap_or(0.0);
        report.total += pnl;
        report.stats.push(WeeklyStat {
            week_ending: friday,
            pnl,
        });
        friday = match friday.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn friday_maps_to_itself() {
        let friday = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(friday.weekday(), Weekday::Fri);
        assert_eq!(week_ending_friday(friday), friday);
    }

    #[test]
    fn saturday_rolls_into_next_week() {
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let next_friday = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        assert_eq!(week_ending_friday(saturday), next_friday);
    }

    #[test]
    fn monday_maps_to_same_weeks_friday() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let friday = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(week_ending_friday(monday), friday);
    }
}
