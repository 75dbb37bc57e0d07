//! FIFO lot ledger.
//!
//! `annotate_realized` walks the trades in execution-time order and keeps a
//! per-symbol queue of open lots. A trade whose sign matches the queue head
//! adds a lot; an opposite-sign trade consumes lots oldest-first, realizing
//! P&L against each consumed lot's entry price. A trade that consumes more
//! than the whole queue flips the position: the residual becomes the first
//! lot of a new position in the other direction.
//!
//! The P&L terms keep the source formulas as written (full consumption uses
//! the negated lot quantity as the matched amount). Both reduce to
//! `(close − open) × matched × multiplier`, but the sign handling around
//! the negations is easy to invert, so they are not rewritten.

use ft_schemas::Trade;

use crate::types::{Inventory, OpenLot};

/// Annotate every trade with `realized_pnl` and `remaining_qty` using
/// strict FIFO matching per instrument symbol.
///
/// Processing order is execution-time order regardless of slice order (a
/// stable index sort; ties keep their relative input position). The slice
/// itself is never reordered, so callers keep their display order.
///
/// Returns the open-lot inventory left at the end of the run.
pub fn annotate_realized(trades: &mut [Trade]) -> Inventory {
    for t in trades.iter_mut() {
        t.realized_pnl = 0.0;
        t.remaining_qty = 0.0;
    }

    let mut order: Vec<usize> = (0..trades.len()).collect();
    order.sort_by_key(|&i| trades[i].executed_at);

    let mut inventory = Inventory::default();

    for &idx in &order {
        let qty = trades[idx].quantity;
        let price = trades[idx].price;
        let multiplier = trades[idx].multiplier;

        let book = inventory
            .books
            .entry(trades[idx].symbol.clone())
            .or_default();

        // Empty book, or same sign as the head lot: open / add.
        let adds = match book.lots.front() {
            None => true,
            Some(head) => (qty > 0.0 && head.qty > 0.0) || (qty < 0.0 && head.qty < 0.0),
        };

        if adds {
            trades[idx].remaining_qty = qty;
            book.lots.push_back(OpenLot {
                trade_idx: idx,
                qty,
                price,
            });
            continue;
        }

        // Opposite sign: close/reduce against the oldest lots first.
        let mut to_close = qty;
        let mut total_pnl = 0.0;

        while to_close != 0.0 {
            let (open_qty, open_price, open_idx) = match book.lots.front() {
                Some(lot) => (lot.qty, lot.price, lot.trade_idx),
                None => break,
            };

            if to_close.abs() >= open_qty.abs() {
                // Fully consume this lot: the matched amount is exactly
                // enough to zero it.
                let match_qty = -open_qty;
                total_pnl += -(price - open_price) * match_qty * multiplier;
                to_close -= match_qty;
                trades[open_idx].remaining_qty = 0.0;
                book.lots.pop_front();
            } else {
                // Partial: the whole residual is absorbed by this lot,
                // which stays at the head with a smaller quantity.
                total_pnl += -(price - open_price) * to_close * multiplier;
                let lot = &mut book.lots[0];
                lot.qty += to_close;
                trades[open_idx].remaining_qty = lot.qty;
                to_close = 0.0;
            }
        }

        trades[idx].realized_pnl = total_pnl;

        // Over-close: the residual opens a new position in the opposite
        // direction, owned by this trade.
        if to_close != 0.0 {
            trades[idx].remaining_qty = to_close;
            book.lots.push_back(OpenLot {
                trade_idx: idx,
                qty: to_close,
                price,
            });
        }
    }

    inventory
}

/// Signed cash value required to unwind the open portion of each trade at
/// its own price. Pure per-trade; feeds book-price computation later.
pub fn apply_credit(trades: &mut [Trade]) {
    for t in trades.iter_mut() {
        t.credit = t.remaining_qty * t.price * t.multiplier * -1.0;
    }
}
