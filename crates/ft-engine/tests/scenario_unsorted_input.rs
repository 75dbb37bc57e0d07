use chrono::{TimeZone, Utc};
use ft_engine::{annotate, MarkMap};
use ft_schemas::{InstrumentClass, Trade};

fn trade(id: &str, qty: f64, price: f64, day: u32) -> Trade {
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
        executed_at: Utc.with_ymd_and_hms(2025, 3, day, 15, 0, 0).unwrap(),
        realized_pnl: 0.0,
        remaining_qty: 0.0,
        credit: 0.0,
        mtm_price: 0.0,
        mtm_value: 0.0,
    }
}

#[test]
fn scenario_unsorted_input_computes_in_time_order() {
    // Slice arrives newest-first; FIFO must still match the day-1 buy
    // against the day-2 sell.
    let mut trades = vec![
        trade("sell", -4.0, 110.0, 2),
        trade("buy", 10.0, 100.0, 1),
    ];
    annotate(&mut trades, &MarkMap::new());

    // Slice order is preserved for the caller...
    assert_eq!(trades[0].trade_id, "sell");
    assert_eq!(trades[1].trade_id, "buy");
    // ...while the computation used execution-time order.
    assert_eq!(trades[0].realized_pnl, 40.0);
    assert_eq!(trades[0].remaining_qty, 0.0);
    assert_eq!(trades[1].remaining_qty, 6.0);
}

#[test]
fn scenario_shuffled_input_matches_sorted_input() {
    let sorted = vec![
        trade("1", 100.0, 50.0, 1),
        trade("2", -30.0, 52.0, 2),
        trade("3", 20.0, 51.0, 3),
        trade("4", -40.0, 53.0, 4),
    ];

    let mut a = sorted.clone();
    let mut b = vec![
        sorted[2].clone(),
        sorted[0].clone(),
        sorted[3].clone(),
        sorted[1].clone(),
    ];
    annotate(&mut a, &MarkMap::new());
    annotate(&mut b, &MarkMap::new());

    for t in &a {
        let other = b.iter().find(|x| x.trade_id == t.trade_id).unwrap();
        assert_eq!(t.realized_pnl, other.realized_pnl, "trade {}", t.trade_id);
        assert_eq!(t.remaining_qty, other.remaining_qty, "trade {}", t.trade_id);
    }
}
