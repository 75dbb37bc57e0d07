use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use ft_schemas::{InstrumentClass, Trade};
use ft_stats::daily_realized;

const VENUE: Tz = chrono_tz::America::New_York;

fn realized(id: &str, pnl: f64, y: i32, m: u32, d: u32, hour: u32) -> Trade {
    // executed_at is the venue wall clock converted to UTC, as ingestion
    // would produce it.
    let executed_at = VENUE
        .with_ymd_and_hms(y, m, d, hour, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    Trade {
        trade_id: id.to_string(),
        account_id: None,
        symbol: "AAPL".to_string(),
        underlying: None,
        description: None,
        instrument: InstrumentClass::Equity,
        quantity: 0.0,
        price: 0.0,
        multiplier: 1.0,
        commission: 0.0,
        currency: None,
        executed_at,
        realized_pnl: pnl,
        remaining_qty: 0.0,
        credit: 0.0,
        mtm_price: 0.0,
        mtm_value: 0.0,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn scenario_missing_weekdays_are_zero_filled() {
    // Monday 2025-03-10 and Thursday 2025-03-13; Tue/Wed must appear with 0.
    let trades = vec![
        realized("1", 100.0, 2025, 3, 10, 15),
        realized("2", -30.0, 2025, 3, 13, 15),
    ];
    let report = daily_realized(&trades, VENUE);

    let dates: Vec<NaiveDate> = report.stats.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 3, 10),
            date(2025, 3, 11),
            date(2025, 3, 12),
            date(2025, 3, 13),
        ]
    );
    assert_eq!(report.stats[1].pnl, 0.0);
    assert_eq!(report.stats[1].day, "Tuesday");
    assert_eq!(report.total, 70.0);
}

#[test]
fn scenario_weekends_appear_only_when_nonzero() {
    // Friday, active Saturday, quiet Sunday, Monday.
    let trades = vec![
        realized("1", 10.0, 2025, 3, 14, 15),
        realized("2", 5.0, 2025, 3, 15, 11),
        realized("3", 20.0, 2025, 3, 17, 15),
    ];
    let report = daily_realized(&trades, VENUE);

    let dates: Vec<NaiveDate> = report.stats.iter().map(|s| s.date).collect();
    // Saturday the 15th is in (non-zero); Sunday the 16th is not.
    assert_eq!(
        dates,
        vec![date(2025, 3, 14), date(2025, 3, 15), date(2025, 3, 17)]
    );
}

#[test]
fn scenario_weekend_activity_netting_to_zero_is_suppressed() {
    let trades = vec![
        realized("1", 10.0, 2025, 3, 14, 15),
        realized("2", 5.0, 2025, 3, 15, 11),
        realized("3", -5.0, 2025, 3, 15, 12),
        realized("4", 20.0, 2025, 3, 17, 15),
    ];
    let report = daily_realized(&trades, VENUE);
    assert!(report.stats.iter().all(|s| s.date != date(2025, 3, 15)));
}

#[test]
fn scenario_bucketing_uses_venue_dates_not_utc() {
    // 22:00 New York on March 10 is 02:00 UTC on March 11; the trade must
    // land in the March 10 bucket.
    let trades = vec![realized("1", 50.0, 2025, 3, 10, 22)];
    let report = daily_realized(&trades, VENUE);
    assert_eq!(report.stats.len(), 1);
    assert_eq!(report.stats[0].date, date(2025, 3, 10));
}

#[test]
fn scenario_empty_input_yields_empty_report() {
    let report = daily_realized(&[], VENUE);
    assert!(report.stats.is_empty());
    assert_eq!(report.total, 0.0);
}
