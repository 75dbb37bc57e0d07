//! Position aggregation.
//!
//! Groups annotated trades by underlying symbol (a trade with no
//! underlying groups under its own symbol), partitions each group into
//! equity / call / put, and reduces it into one [`PositionSummary`].
//! Groups whose every measured field is exactly zero are dropped — a
//! fully round-tripped symbol with no realized P&L leaves no footprint.
//!
//! Recomputed from scratch on every call; summaries carry no persisted
//! identity.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use ft_schemas::{InstrumentClass, Trade};

/// Allocation targets (symbol -> target percent of the portfolio).
pub type TargetMap = BTreeMap<String, f64>;

/// One aggregated position per underlying symbol.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PositionSummary {
    pub symbol: String,
    /// Net cost basis of the open equity position ("capital deployed"):
    /// −1 × Σ credit over the equity subset.
    pub value: f64,
    /// Σ mtm_value over the equity subset.
    pub mtm: f64,
    pub unrealized_pnl: f64,
    pub equity_qty: f64,
    pub call_qty: f64,
    pub put_qty: f64,
    pub equity_pnl: f64,
    pub call_pnl: f64,
    pub put_pnl: f64,
    /// Average cost per open equity unit, sign-consistent with credit.
    /// 0 when the open equity quantity is 0.
    pub book_price: f64,
    /// Share of total marked portfolio value, percent.
    pub mtm_pct: f64,
    /// Externally configured allocation target, percent.
    pub target_pct: f64,
}

/// Field-wise sums over the retained position summaries.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PositionTotals {
    pub value: f64,
    pub mtm: f64,
    pub unrealized_pnl: f64,
    pub equity_qty: f64,
    pub call_qty: f64,
    pub put_qty: f64,
    pub equity_pnl: f64,
    pub call_pnl: f64,
    pub put_pnl: f64,
    pub target_pct: f64,
}

/// Sort key for [`sort_positions`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PositionSort {
    Mtm,
    Value,
    Symbol,
    EquityQty,
}

/// Aggregate annotated trades into per-underlying position summaries plus
/// portfolio totals. Output defaults to MTM descending.
pub fn aggregate_positions(trades: &[Trade], targets: &TargetMap) -> (Vec<PositionSummary>, PositionTotals) {
    let mut groups: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
    for t in trades {
        groups.entry(t.underlying_or_symbol()).or_default().push(t);
    }

    let mut positions: Vec<PositionSummary> = Vec::new();

    for (symbol, group) in groups {
        let mut p = PositionSummary {
            symbol: symbol.to_string(),
            target_pct: targets.get(symbol).copied().unwrap_or(0.0),
            ..PositionSummary::default()
        };

        let mut equity_credit = 0.0;
        for t in &group {
            match t.instrument {
                InstrumentClass::Equity => {
                    equity_credit += t.credit;
                    p.mtm += t.mtm_value;
                    p.equity_qty += t.remaining_qty;
                    p.equity_pnl += t.realized_pnl;
                }
                InstrumentClass::Call => {
                    p.call_qty += t.remaining_qty;
                    p.call_pnl += t.realized_pnl;
                }
                InstrumentClass::Put => {
                    p.put_qty += t.remaining_qty;
                    p.put_pnl += t.realized_pnl;
                }
            }
        }

        p.value = equity_credit * -1.0;
        p.unrealized_pnl = p.mtm - p.value;
        p.book_price = if p.equity_qty != 0.0 {
            equity_credit / p.equity_qty
        } else {
            0.0
        };

        // Suppress fully-flat, fully-closed groups with no footprint.
        let measured = [
            p.value,
            p.mtm,
            p.equity_qty,
            p.call_qty,
            p.put_qty,
            p.equity_pnl,
            p.call_pnl,
            p.put_pnl,
        ];
        if measured.iter().any(|&x| x != 0.0) {
            positions.push(p);
        }
    }

    let total_mtm: f64 = positions.iter().map(|p| p.mtm).sum();
    for p in &mut positions {
        p.mtm_pct = if total_mtm != 0.0 {
            p.mtm / total_mtm * 100.0
        } else {
            0.0
        };
    }

    sort_positions(&mut positions, PositionSort::Mtm, false);

    let mut totals = PositionTotals::default();
    for p in &positions {
        totals.value += p.value;
        totals.mtm += p.mtm;
        totals.unrealized_pnl += p.unrealized_pnl;
        totals.equity_qty += p.equity_qty;
        totals.call_qty += p.call_qty;
        totals.put_qty += p.put_qty;
        totals.equity_pnl += p.equity_pnl;
        totals.call_pnl += p.call_pnl;
        totals.put_pnl += p.put_pnl;
        totals.target_pct += p.target_pct;
    }

    (positions, totals)
}

/// Re-sort position summaries for display. Symbol sort is
/// case-insensitive; numeric sorts treat NaN as equal (annotated values
/// are finite in practice).
pub fn sort_positions(positions: &mut [PositionSummary], key: PositionSort, ascending: bool) {
    positions.sort_by(|a, b| {
        let ord = match key {
            PositionSort::Symbol => a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()),
            PositionSort::Mtm => cmp_f64(a.mtm, b.mtm),
            PositionSort::Value => cmp_f64(a.value, b.value),
            PositionSort::EquityQty => cmp_f64(a.equity_qty, b.equity_qty),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Detail view for one symbol: its summary plus every trade whose symbol
/// or underlying matches, newest first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionDetail {
    pub symbol: String,
    pub book_price: f64,
    pub equity_qty: f64,
    pub call_qty: f64,
    pub put_qty: f64,
    pub equity_pnl: f64,
    pub call_pnl: f64,
    pub put_pnl: f64,
    pub trades: Vec<Trade>,
}

/// Build the single-symbol detail, or `None` when no trade references the
/// symbol.
pub fn position_detail(trades: &[Trade], symbol: &str) -> Option<PositionDetail> {
    let mut subset: Vec<Trade> = trades
        .iter()
        .filter(|t| t.symbol == symbol || t.underlying.as_deref() == Some(symbol))
        .cloned()
        .collect();

    if subset.is_empty() {
        return None;
    }

    subset.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));

    let mut detail = PositionDetail {
        symbol: symbol.to_string(),
        book_price: 0.0,
        equity_qty: 0.0,
        call_qty: 0.0,
        put_qty: 0.0,
        equity_pnl: 0.0,
        call_pnl: 0.0,
        put_pnl: 0.0,
        trades: Vec::new(),
    };

    let mut equity_credit = 0.0;
    for t in &subset {
        match t.instrument {
            InstrumentClass::Equity => {
                equity_credit += t.credit;
                detail.equity_qty += t.remaining_qty;
                detail.equity_pnl += t.realized_pnl;
            }
            InstrumentClass::Call => {
                detail.call_qty += t.remaining_qty;
                detail.call_pnl += t.realized_pnl;
            }
            InstrumentClass::Put => {
                detail.put_qty += t.remaining_qty;
                detail.put_pnl += t.realized_pnl;
            }
        }
    }
    detail.book_price = if detail.equity_qty != 0.0 {
        equity_credit / detail.equity_qty
    } else {
        0.0
    };
    detail.trades = subset;

    Some(detail)
}
