use std::collections::{BTreeMap, VecDeque};

/// A FIFO lot: the still-open portion of a past trade.
///
/// `qty` is signed (+long / −short) and carries the direction of the
/// position. `trade_idx` points back at the originating trade in the
/// slice being processed; remaining-quantity writes go through it, so the
/// ledger never relies on shared-object aliasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpenLot {
    pub trade_idx: usize,
    pub qty: f64,
    pub price: f64,
}

/// Per-instrument FIFO queue of open lots.
///
/// One book per instrument *symbol* — each option contract and the equity
/// itself keep separate queues, even when they share an underlying.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LotBook {
    pub lots: VecDeque<OpenLot>,
}

impl LotBook {
    /// Signed open quantity (+long, −short, 0 flat).
    pub fn qty_signed(&self) -> f64 {
        self.lots.iter().map(|l| l.qty).sum()
    }

    pub fn is_flat(&self) -> bool {
        self.qty_signed() == 0.0
    }
}

/// All open lots of one ledger run, keyed by instrument symbol.
///
/// Owned by the call scope: created inside `annotate_realized` and handed
/// back to the caller, so concurrent runs never share state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    pub books: BTreeMap<String, LotBook>,
}

impl Inventory {
    pub fn book(&self, symbol: &str) -> Option<&LotBook> {
        self.books.get(symbol)
    }

    /// Signed open quantity for one instrument (0 when never traded).
    pub fn open_qty(&self, symbol: &str) -> f64 {
        self.books.get(symbol).map_or(0.0, LotBook::qty_signed)
    }
}
