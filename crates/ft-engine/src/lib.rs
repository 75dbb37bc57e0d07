//! ft-engine
//!
//! The lot-matching P&L core:
//! - FIFO lot ledger: realized P&L + remaining-quantity annotation
//! - Credit accumulation (cash value of the open portion per trade)
//! - Mark-to-market application (options are never marked)
//! - Position aggregation by underlying, plus portfolio totals
//! - Pure deterministic logic (no IO, no time, no broker wiring)
//!
//! Each stage takes the full trade collection and annotates it; stages can
//! be run independently, or together via [`annotate`]. Every invocation
//! owns its own [`Inventory`] — there is no process-wide state.

mod ledger;
mod mtm;
mod positions;
mod types;

pub use ledger::{annotate_realized, apply_credit};
pub use mtm::{apply_marks, marks, MarkMap};
pub use positions::{
    aggregate_positions, position_detail, sort_positions, PositionDetail, PositionSort,
    PositionSummary, PositionTotals, TargetMap,
};
pub use types::{Inventory, LotBook, OpenLot};

use ft_schemas::Trade;

/// Run the full annotation pipeline: FIFO realized P&L, credit, then
/// mark-to-market. All-or-nothing per call; the slice keeps its original
/// order (the ledger sorts internally by execution time).
///
/// Returns the end-of-run open-lot inventory, mostly useful to callers
/// that want to inspect what is still open per instrument.
pub fn annotate(trades: &mut [Trade], mark_map: &MarkMap) -> Inventory {
    let inventory = ledger::annotate_realized(trades);
    ledger::apply_credit(trades);
    mtm::apply_marks(trades, mark_map);
    inventory
}
