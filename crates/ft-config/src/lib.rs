//! ft-config
//!
//! File-backed configuration for the portfolio tracker:
//! - target allocation percentages per symbol (YAML)
//! - venue time zone and base currency (same YAML)
//! - mark-price maps (JSON object of symbol -> price)
//!
//! Loading is strict: malformed files, negative or non-finite numbers and
//! unknown time-zone names all fail with a contextual error instead of
//! being silently defaulted.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Fallback venue zone when the config does not name one.
pub const DEFAULT_VENUE_TIMEZONE: &str = "America/New_York";

/// Fallback base currency for account statistics.
pub const DEFAULT_BASE_CURRENCY: &str = "CAD";

/// Allocation targets plus venue settings.
///
/// ```yaml
/// venue_timezone: America/New_York
/// base_currency: CAD
/// targets:
///   GOOGL: 10.0
///   NVDA: 10.0
///   AMZN: 2.5
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub targets: BTreeMap<String, f64>,
    #[serde(default)]
    pub venue_timezone: Option<String>,
    #[serde(default)]
    pub base_currency: Option<String>,
}

impl TargetConfig {
    /// Symbol -> target percent, for the position aggregator.
    pub fn target_map(&self) -> BTreeMap<String, f64> {
        self.targets.clone()
    }

    /// Resolved venue time zone.
    pub fn venue(&self) -> Result<Tz> {
        let name = self
            .venue_timezone
            .as_deref()
            .unwrap_or(DEFAULT_VENUE_TIMEZONE);
        name.parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("unknown venue_timezone '{name}'"))
    }

    pub fn base_currency(&self) -> &str {
        self.base_currency
            .as_deref()
            .unwrap_or(DEFAULT_BASE_CURRENCY)
    }

    /// Reject configs that would corrupt downstream arithmetic.
    pub fn validate(&self) -> Result<()> {
        let mut total = 0.0;
        for (symbol, pct) in &self.targets {
            if !pct.is_finite() || *pct < 0.0 {
                bail!("target for '{symbol}' must be a finite non-negative percent, got {pct}");
            }
            total += pct;
        }
        if total > 100.0 {
            bail!("targets sum to {total}%, which exceeds 100%");
        }
        // Surface a bad tz name at load time, not at first bucketing.
        self.venue()?;
        Ok(())
    }
}

/// Parse and validate a target config from YAML text.
pub fn parse_target_config(text: &str) -> Result<TargetConfig> {
    let cfg: TargetConfig = serde_yaml::from_str(text).context("invalid target config YAML")?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load a target config file.
pub fn load_target_config<P: AsRef<Path>>(path: P) -> Result<TargetConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read target config {}", path.display()))?;
    parse_target_config(&text)
        .with_context(|| format!("in target config {}", path.display()))
}

/// Parse a mark map from a JSON object of symbol -> current price.
pub fn parse_mark_map(text: &str) -> Result<BTreeMap<String, f64>> {
    let map: BTreeMap<String, f64> =
        serde_json::from_str(text).context("invalid mark map JSON")?;
    for (symbol, price) in &map {
        if !price.is_finite() || *price < 0.0 {
            bail!("mark for '{symbol}' must be a finite non-negative price, got {price}");
        }
    }
    Ok(map)
}

/// Load a mark-map file.
pub fn load_mark_map<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, f64>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read mark map {}", path.display()))?;
    parse_mark_map(&text).with_context(|| format!("in mark map {}", path.display()))
}
