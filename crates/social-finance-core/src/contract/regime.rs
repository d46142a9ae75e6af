//! The four financing regimes and the single classifier every piecewise
//! quantity dispatches through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contract::model::ContractModel;
use crate::types::Assets;

/// Financing regime for a given pledgeable-asset level. Bands are
/// contiguous and exhaustive over `A >= 0`; boundary points belong to the
/// band on the closed side nearer `a_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// `A > a_no_monitor`: diligence is incentive-compatible unmonitored.
    NoMonitorNeeded,
    /// `a_cross < A <= a_no_monitor`: monitor equity plus outside debt.
    Leveraged,
    /// `a_min <= A <= a_cross`: monitor equity alone.
    EquityOnly,
    /// `A < a_min`: no viable loan.
    NoLoan,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::NoMonitorNeeded => "no monitor needed",
            Regime::Leveraged => "leveraged intermediary",
            Regime::EquityOnly => "equity-only intermediary",
            Regime::NoLoan => "no loan",
        };
        f.write_str(label)
    }
}

impl ContractModel {
    /// Classify an asset level into its financing regime. The comparisons
    /// use `>` toward higher bands and `>=` toward lower ones, so every `A`
    /// maps to exactly one regime with no gap or overlap.
    pub fn classify(&self, assets: Assets) -> Regime {
        if assets > self.a_no_monitor() {
            Regime::NoMonitorNeeded
        } else if assets > self.a_cross() {
            Regime::Leveraged
        } else if assets >= self.a_min() {
            Regime::EquityOnly
        } else {
            Regime::NoLoan
        }
    }
}
