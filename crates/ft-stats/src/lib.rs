//! ft-stats
//!
//! Period aggregators over annotated trades and account-statement rows:
//! - daily realized-P&L series (venue-local dates, weekday back-fill)
//! - weekly realized-P&L series (weeks ending Friday)
//! - monthly/yearly account-asset statistics (snapshot + flow semantics)
//! - asset matrix views (period × account)
//!
//! Nothing here is incremental: every call recomputes from the full
//! history. Correctness rests on total time order, not on carried state.

pub mod daily;
pub mod period;
pub mod weekly;

pub use daily::{daily_realized, DailyReport, DailyStat};
pub use period::{
    asset_matrix, monthly_asset_stats, normalize_entries, yearly_asset_stats, AssetMatrix, Bucket,
    MatrixRow, PeriodReport, PeriodStat, PeriodTotals,
};
pub use weekly::{week_ending_friday, weekly_realized, WeeklyReport, WeeklyStat};
