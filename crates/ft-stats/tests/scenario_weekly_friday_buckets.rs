use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use ft_engine::{annotate, MarkMap};
use ft_schemas::{InstrumentClass, Trade};
use ft_stats::weekly_realized;

const VENUE: Tz = chrono_tz::America::New_York;

fn trade(id: &str, qty: f64, price: f64, y: i32, m: u32, d: u32) -> Trade {
    let executed_at = VENUE
        .with_ymd_and_hms(y, m, d, 15, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    Trade {
        trade_id: id.to_string(),
        account_id: None,
        symbol: "AAPL".to_string(),
        underlying: None,
        description: None,
        instrument: InstrumentClass::Equity,
        quantity: qty,
        price,
        multiplier: 1.0,
        commission: 0.0,
        currency: None,
        executed_at,
        realized_pnl: 0.0,
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
fn scenario_weeks_end_on_friday_with_zero_weeks_kept() {
    // Buy Monday 2025-03-03, sell Wednesday 2025-03-19 (two weeks later).
    // Realized P&L lands in the week ending Friday 2025-03-21; the empty
    // weeks of 03-07 and 03-14 still appear.
    let mut trades = vec![
        trade("1", 10.0, 100.0, 2025, 3, 3),
        trade("2", -10.0, 110.0, 2025, 3, 19),
    ];
    annotate(&mut trades, &MarkMap::new());

    let report = weekly_realized(&trades, VENUE);
    let weeks: Vec<NaiveDate> = report.stats.iter().map(|s| s.week_ending).collect();
    assert_eq!(
        weeks,
        vec![date(2025, 3, 7), date(2025, 3, 14), date(2025, 3, 21)]
    );
    assert_eq!(report.stats[0].pnl, 0.0);
    assert_eq!(report.stats[1].pnl, 0.0);
    assert_eq!(report.stats[2].pnl, 100.0);
    assert_eq!(report.total, 100.0);
}

#[test]
fn scenario_friday_trade_belongs_to_that_friday() {
    let mut trades = vec![
        trade("1", 10.0, 100.0, 2025, 3, 10),
        trade("2", -10.0, 104.0, 2025, 3, 14), // a Friday
    ];
    annotate(&mut trades, &MarkMap::new());

    let report = weekly_realized(&trades, VENUE);
    assert_eq!(report.stats.len(), 1);
    assert_eq!(report.stats[0].week_ending, date(2025, 3, 14));
    assert_eq!(report.stats[0].pnl, 40.0);
}
