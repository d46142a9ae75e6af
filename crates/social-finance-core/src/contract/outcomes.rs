//! Regime-dependent outcomes: borrower return, borrower reach, and the
//! intermediary's funding split. Every piecewise formula dispatches through
//! [`ContractModel::classify`] so the band boundaries stay consistent.

use rust_decimal::Decimal;

use crate::contract::model::ContractModel;
use crate::contract::regime::Regime;
use crate::error::SocialFinanceError;
use crate::types::{Assets, Intensity, Money};
use crate::SocialFinanceResult;

impl ContractModel {
    /// Monitoring actually exerted in the regime that applies at `assets`.
    /// Zero in the unmonitored and no-loan bands.
    pub fn required_monitoring(&self, assets: Assets) -> Intensity {
        match self.classify(assets) {
            Regime::NoMonitorNeeded | Regime::NoLoan => Decimal::ZERO,
            Regime::Leveraged => self.optimal_monitoring_leveraged(assets),
            Regime::EquityOnly => self.optimal_monitoring_equity_only(assets),
        }
    }

    /// Borrower's expected return at asset level `assets`, piecewise by
    /// regime.
    pub fn borrower_return(&self, assets: Assets) -> Money {
        let p = self.params().prob_diligent;
        let q = self.params().prob_shirk;
        let x = self.params().project_return;
        let i = self.params().investment;
        let beta = self.params().cost_equity;
        let gamma = self.params().cost_uninformed;
        let f = self.params().fixed_cost_loan;

        match self.classify(assets) {
            Regime::NoMonitorNeeded => p * x - gamma * i - f,
            Regime::Leveraged => {
                let m = self.optimal_monitoring_leveraged(assets);
                let premium = Decimal::ONE + ((beta - gamma) / beta) * (q / (p - q));
                p * x - gamma * i - f - m * premium
            }
            Regime::EquityOnly => {
                p * x - beta * i - f - self.optimal_monitoring_equity_only(assets)
            }
            Regime::NoLoan => Decimal::ZERO,
        }
    }

    /// Elementwise [`borrower_return`](Self::borrower_return) over an asset
    /// sequence.
    pub fn borrower_return_series(&self, assets: &[Assets]) -> Vec<Money> {
        assets.iter().map(|&a| self.borrower_return(a)).collect()
    }

    /// Number of borrowers the zone's intermediary capital can finance at
    /// asset level `assets`. `None` in the unmonitored band, where the model
    /// leaves zone size undefined. A monitor-equity requirement that does
    /// not cover the zone fixed cost would imply an infinite or negative
    /// count and is rejected instead.
    pub fn borrowers_reached(&self, assets: Assets) -> SocialFinanceResult<Option<Decimal>> {
        let k = self.params().intermediary_capital;
        let zone_cost = self.params().fixed_cost_zone;

        match self.classify(assets) {
            Regime::NoMonitorNeeded => Ok(None),
            Regime::Leveraged => {
                let per_borrower =
                    self.monitor_equity(self.optimal_monitoring_leveraged(assets)) - zone_cost;
                if per_borrower <= Decimal::ZERO {
                    return Err(SocialFinanceError::DomainUndefined {
                        context: format!(
                            "monitor equity requirement net of zone fixed cost is {} at assets {}",
                            per_borrower, assets
                        ),
                    });
                }
                Ok(Some(k / per_borrower))
            }
            Regime::EquityOnly => Ok(Some(k / (self.params().investment + zone_cost))),
            Regime::NoLoan => Ok(Some(Decimal::ZERO)),
        }
    }

    /// Elementwise [`borrowers_reached`](Self::borrowers_reached). A
    /// per-element domain issue — the undefined no-monitor band or a
    /// degenerate monitor-equity denominator — yields `None` for that
    /// element only; the rest of the batch is unaffected.
    pub fn borrowers_reached_series(&self, assets: &[Assets]) -> Vec<Option<Decimal>> {
        assets
            .iter()
            .map(|&a| self.borrowers_reached(a).unwrap_or(None))
            .collect()
    }

    /// Equity the monitor invests at the optimum, capped by the project
    /// size: min(I, q m* / (p - q) / beta).
    pub fn monitor_equity_share(&self, assets: Assets) -> Money {
        self.params()
            .investment
            .min(self.monitor_equity(self.optimal_monitoring(assets)))
    }

    /// Uninformed outside debt filling the rest of the investment.
    pub fn uninformed_debt_share(&self, assets: Assets) -> Money {
        self.params().investment - self.monitor_equity_share(assets)
    }

    /// Outside-debt to monitor-equity ratio (I + F - Im) / Im. `None` once
    /// the monitor's stake hits zero at the top of the monitored range.
    pub fn debt_to_equity(&self, assets: Assets) -> Option<Decimal> {
        let total = self.params().investment + self.params().fixed_cost_zone;
        let im = total.min(self.monitor_equity(self.optimal_monitoring(assets)));
        if im <= Decimal::ZERO {
            None
        } else {
            Some((total - im) / im)
        }
    }
}
