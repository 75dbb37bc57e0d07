//! Mark-to-market application.

use std::collections::BTreeMap;

use ft_schemas::Trade;

/// Canonical mark map type (symbol -> current price).
pub type MarkMap = BTreeMap<String, f64>;

/// Helper to build a MarkMap with minimal boilerplate.
pub fn marks<I, S>(items: I) -> MarkMap
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    let mut m = MarkMap::new();
    for (sym, px) in items {
        m.insert(sym.into(), px);
    }
    m
}

/// Attach `mtm_price` / `mtm_value` to each trade's open portion.
///
/// Options are never marked: call and put trades always get 0 for both
/// fields, whatever the mark map says. Everything else gets the looked-up
/// price (0 when absent) and `mtm_value = mtm_price * remaining_qty`.
pub fn apply_marks(trades: &mut [Trade], mark_map: &MarkMap) {
    for t in trades.iter_mut() {
        if t.instrument.is_option() {
            t.mtm_price = 0.0;
            t.mtm_value = 0.0;
        } else {
            t.mtm_price = *mark_map.get(&t.symbol).unwrap_or(&0.0);
            t.mtm_value = t.mtm_price * t.remaining_qty;
        }
    }
}
