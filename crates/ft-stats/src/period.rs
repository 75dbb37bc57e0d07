//! Monthly and yearly account-asset statistics.
//!
//! Account entries carry a running balance, so `asset` for a period is the
//! **last chronological entry's** balance (a snapshot), while `deposit`
//! and `fee` are flow sums within the period. Realized return follows
//! `pnl = asset − deposit − prev_asset`, with the percentage computed
//! against the prior period's closing balance.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use ft_schemas::AccountEntry;

/// Aggregated statistics for one calendar period (month or year; `period`
/// is the first day of the period).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodStat {
    pub period: NaiveDate,
    pub deposit: f64,
    pub asset: f64,
    pub fee: f64,
    pub pnl: f64,
    /// Percent return against the prior period's closing balance (0 for
    /// the first period).
    pub pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub deposit: f64,
    /// Final snapshot, not a sum.
    pub asset: f64,
    pub fee: f64,
    pub pnl: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PeriodReport {
    pub stats: Vec<PeriodStat>,
    pub totals: PeriodTotals,
}

/// Calendar bucket for [`asset_matrix`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bucket {
    Month,
    Year,
}

/// Convert foreign-currency entries into the base currency by multiplying
/// the monetary fields by the entry's exchange rate. Must run before any
/// bucketing. Returns a normalized copy; the input is untouched.
pub fn normalize_entries(entries: &[AccountEntry], base: &str) -> Vec<AccountEntry> {
    entries
        .iter()
        .map(|e| {
            if e.currency == base {
                e.clone()
            } else {
                AccountEntry {
                    deposit: e.deposit * e.rate,
                    asset: e.asset * e.rate,
                    fee: e.fee * e.rate,
                    currency: base.to_string(),
                    rate: 1.0,
                    ..e.clone()
                }
            }
        })
        .collect()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

#[derive(Default)]
struct PeriodAgg {
    deposit: f64,
    fee: f64,
    /// Per-account last balance seen within the period.
    last_asset: BTreeMap<String, f64>,
}

fn bucket_entries(entries: &[AccountEntry], bucket: Bucket) -> BTreeMap<NaiveDate, PeriodAgg> {
    // Chronological order so "last entry wins" holds per account.
    let mut sorted: Vec<&AccountEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut periods: BTreeMap<NaiveDate, PeriodAgg> = BTreeMap::new();
    for e in sorted {
        let key = match bucket {
            Bucket::Month => month_start(e.date),
            Bucket::Year => year_start(e.date),
        };
        let agg = periods.entry(key).or_default();
        agg.deposit += e.deposit;
        agg.fee += e.fee;
        agg.last_asset.insert(e.account.clone(), e.asset);
    }
    periods
}

fn fold_report(periods: BTreeMap<NaiveDate, PeriodAgg>) -> PeriodReport {
    let mut report = PeriodReport::default();
    let mut prev_asset = 0.0;

    for (period, agg) in periods {
        let asset: f64 = agg.last_asset.values().sum();
        let pnl = asset - agg.deposit - prev_asset;
        let pct = if prev_asset != 0.0 {
            pnl / prev_asset * 100.0
        } else {
            0.0
        };
        report.stats.push(PeriodStat {
            period,
            deposit: agg.deposit,
            asset,
            fee: agg.fee,
            pnl,
            pct,
        });
        report.totals.deposit += agg.deposit;
        report.totals.fee += agg.fee;
        report.totals.pnl += pnl;
        prev_asset = asset;
    }

    report.totals.asset = prev_asset;
    report
}

/// Monthly statistics over normalized account entries.
pub fn monthly_asset_stats(entries: &[AccountEntry]) -> PeriodReport {
    fold_report(bucket_entries(entries, Bucket::Month))
}

/// Yearly statistics: reduces the monthly rows, so a year's `asset` is its
/// last monthly snapshot while deposit/fee keep summing.
pub fn yearly_asset_stats(entries: &[AccountEntry]) -> PeriodReport {
    let monthly = monthly_asset_stats(entries);

    let mut years: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
    for stat in &monthly.stats {
        let key = year_start(stat.period);
        let slot = years.entry(key).or_insert((0.0, 0.0, 0.0));
        slot.0 += stat.deposit;
        slot.1 += stat.fee;
        slot.2 = stat.asset; // months are ordered, last one wins
    }

    let mut report = PeriodReport::default();
    let mut prev_asset = 0.0;
    for (period, (deposit, fee, asset)) in years {
        let pnl = asset - deposit - prev_asset;
        let pct = if prev_asset != 0.0 {
            pnl / prev_asset * 100.0
        } else {
            0.0
        };
        report.stats.push(PeriodStat {
            period,
            deposit,
            asset,
            fee,
            pnl,
            pct,
        });
        report.totals.deposit += deposit;
        report.totals.fee += fee;
        report.totals.pnl += pnl;
        prev_asset = asset;
    }
    report.totals.asset = prev_asset;
    report
}

// ---------------------------------------------------------------------------
// Matrix views
// ---------------------------------------------------------------------------

/// One matrix row: the per-account snapshots for a period. `assets` lines
/// up with [`AssetMatrix::accounts`]; `None` means the account has no
/// entry in that period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatrixRow {
    pub period: NaiveDate,
    pub assets: Vec<Option<f64>>,
    pub total: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AssetMatrix {
    pub accounts: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// Period × account matrix of asset snapshots. Account columns appear in
/// first-appearance order of the input.
pub fn asset_matrix(entries: &[AccountEntry], bucket: Bucket) -> AssetMatrix {
    let mut accounts: Vec<String> = Vec::new();
    for e in entries {
        if !accounts.iter().any(|a| a == &e.account) {
            accounts.push(e.account.clone());
        }
    }

    let periods = bucket_entries(entries, bucket);

    let rows = periods
        .into_iter()
        .map(|(period, agg)| {
            let assets: Vec<Option<f64>> = accounts
                .iter()
                .map(|a| agg.last_asset.get(a).copied())
                .collect();
            let total = assets.iter().flatten().sum();
            MatrixRow {
                period,
                assets,
                total,
            }
        })
        .collect();

    AssetMatrix { accounts, rows }
}
