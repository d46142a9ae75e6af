//! Batch analyses over monitoring and asset grids. These produce the numeric
//! series a downstream rendering layer consumes; no plotting objects are
//! built here.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contract::model::{ContractModel, ZoneParams};
use crate::contract::regime::Regime;
use crate::grid::linspace;
use crate::types::{with_metadata, Assets, ComputationOutput, Intensity, Money};
use crate::SocialFinanceResult;

fn default_curve_steps() -> usize {
    50
}

fn default_grid_steps() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// The five scalars separating the four financing regimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeThresholds {
    /// Monitoring level where the two collateral curves cross.
    pub m_cross: Intensity,
    /// Break-even monitoring bound for the equity-only monitor.
    pub m_max: Intensity,
    /// Lowest asset level at which any loan is viable.
    pub a_min: Assets,
    /// Asset level at the curve crossing.
    pub a_cross: Assets,
    /// Asset level above which no monitor is needed.
    pub a_no_monitor: Assets,
}

impl RegimeThresholds {
    pub fn from_model(model: &ContractModel) -> Self {
        Self {
            m_cross: model.m_cross(),
            m_max: model.m_max(),
            a_min: model.a_min(),
            a_cross: model.a_cross(),
            a_no_monitor: model.a_no_monitor(),
        }
    }
}

/// Input for the collateral-requirement curve analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralCurvesInput {
    pub params: ZoneParams,
    /// Number of grid points over the monitoring range.
    #[serde(default = "default_curve_steps")]
    pub steps: usize,
    /// Upper monitoring bound; defaults to the parameter set's grid range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_max: Option<Decimal>,
}

/// One sample of the collateral-requirement curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralPoint {
    pub monitoring: Intensity,
    pub equity_only: Assets,
    pub leveraged: Assets,
    pub best: Assets,
}

/// Output of the collateral-requirement curve analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralCurvesOutput {
    pub thresholds: RegimeThresholds,
    pub points: Vec<CollateralPoint>,
}

/// Input for the outreach analysis over an asset grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachInput {
    pub params: ZoneParams,
    /// Lower asset bound of the grid.
    #[serde(default)]
    pub asset_min: Assets,
    /// Upper asset bound; defaults to the parameter set's grid range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_max: Option<Assets>,
    #[serde(default = "default_grid_steps")]
    pub steps: usize,
}

/// One asset level's regime, monitoring, return, and reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachPoint {
    pub assets: Assets,
    pub regime: Regime,
    pub monitoring: Intensity,
    pub borrower_return: Money,
    /// `None` in the no-monitor band, where zone size is undefined, and at
    /// any element whose monitor-equity denominator degenerates.
    pub borrowers_reached: Option<Decimal>,
}

/// Output of the outreach analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachOutput {
    pub thresholds: RegimeThresholds,
    pub points: Vec<OutreachPoint>,
}

/// Input for the funding-mix analysis over the monitored asset range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingMixInput {
    pub params: ZoneParams,
    #[serde(default = "default_grid_steps")]
    pub steps: usize,
}

/// One asset level's investment decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingPoint {
    pub assets: Assets,
    pub monitoring: Intensity,
    /// Monitor's own equity stake, capped at the project size.
    pub monitor_equity: Money,
    /// Outside uninformed debt filling the rest of the investment.
    pub uninformed_debt: Money,
    /// (I + F - Im) / Im; `None` where the monitor stake is zero.
    pub debt_to_equity: Option<Decimal>,
}

/// Output of the funding-mix analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingMixOutput {
    pub thresholds: RegimeThresholds,
    pub points: Vec<FundingPoint>,
}

/// Input for solving the contract at a single asset level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveContractInput {
    pub params: ZoneParams,
    pub assets: Assets,
}

/// Full contract terms for one borrower class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractTerms {
    pub assets: Assets,
    pub regime: Regime,
    pub monitoring: Intensity,
    pub monitor_equity: Money,
    pub uninformed_debt: Money,
    pub borrower_return: Money,
    /// `None` in the no-monitor band.
    pub borrowers_reached: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sample both collateral-requirement curves and their pointwise minimum
/// over an evenly spaced monitoring grid.
pub fn analyze_collateral_curves(
    input: &CollateralCurvesInput,
) -> SocialFinanceResult<ComputationOutput<CollateralCurvesOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let model = ContractModel::new(input.params.clone())?;
    warn_on_cheap_equity(&model, &mut warnings);

    let m_hi = input
        .monitoring_max
        .unwrap_or(model.params().plot_range_max);
    let grid = linspace(Decimal::ZERO, m_hi, input.steps)?;

    let points = grid
        .into_iter()
        .map(|m| CollateralPoint {
            monitoring: m,
            equity_only: model.collateral_equity_only(m),
            leveraged: model.collateral_leveraged(m),
            best: model.collateral_best(m),
        })
        .collect();

    let output = CollateralCurvesOutput {
        thresholds: RegimeThresholds::from_model(&model),
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Minimum Collateral Requirement — equity-only vs leveraged monitor",
        &serde_json::json!({
            "monitoring_max": m_hi.to_string(),
            "steps": input.steps,
            "cost_equity": model.params().cost_equity.to_string(),
            "cost_uninformed": model.params().cost_uninformed.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Borrower return and borrower reach over an asset grid, with the regime
/// each level falls into.
pub fn analyze_outreach(
    input: &OutreachInput,
) -> SocialFinanceResult<ComputationOutput<OutreachOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let model = ContractModel::new(input.params.clone())?;
    warn_on_cheap_equity(&model, &mut warnings);

    let a_hi = input.asset_max.unwrap_or(model.params().plot_range_max);
    let grid = linspace(input.asset_min, a_hi, input.steps)?;

    let mut points = Vec::with_capacity(grid.len());
    for a in grid {
        // A degenerate reach denominator marks that element alone; the
        // rest of the grid stays usable.
        let borrowers_reached = match model.borrowers_reached(a) {
            Ok(reach) => reach,
            Err(e) => {
                warnings.push(format!("Reach undefined at assets {}: {}", a, e));
                None
            }
        };
        points.push(OutreachPoint {
            assets: a,
            regime: model.classify(a),
            monitoring: model.required_monitoring(a),
            borrower_return: model.borrower_return(a),
            borrowers_reached,
        });
    }

    let output = OutreachOutput {
        thresholds: RegimeThresholds::from_model(&model),
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Zone Outreach — borrower return and reach by pledgeable assets",
        &serde_json::json!({
            "asset_min": input.asset_min.to_string(),
            "asset_max": a_hi.to_string(),
            "steps": input.steps,
            "intermediary_capital": model.params().intermediary_capital.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Investment decomposition and debt-to-equity ratio over the monitored
/// asset range, from the lowest viable collateral to the no-monitor bound.
pub fn analyze_funding_mix(
    input: &FundingMixInput,
) -> SocialFinanceResult<ComputationOutput<FundingMixOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let model = ContractModel::new(input.params.clone())?;
    warn_on_cheap_equity(&model, &mut warnings);

    let grid = linspace(model.a_min(), model.a_no_monitor(), input.steps)?;

    let points = grid
        .into_iter()
        .map(|a| FundingPoint {
            assets: a,
            monitoring: model.optimal_monitoring(a),
            monitor_equity: model.monitor_equity_share(a),
            uninformed_debt: model.uninformed_debt_share(a),
            debt_to_equity: model.debt_to_equity(a),
        })
        .collect();

    let output = FundingMixOutput {
        thresholds: RegimeThresholds::from_model(&model),
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Intermediary Funding Mix — monitor equity vs uninformed debt",
        &serde_json::json!({
            "asset_min": model.a_min().to_string(),
            "asset_max": model.a_no_monitor().to_string(),
            "steps": input.steps,
            "investment": model.params().investment.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Solve the full financing contract for a single pledgeable-asset level.
pub fn solve_contract(
    input: &SolveContractInput,
) -> SocialFinanceResult<ComputationOutput<ContractTerms>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let model = ContractModel::new(input.params.clone())?;
    warn_on_cheap_equity(&model, &mut warnings);

    let a = input.assets;
    let regime = model.classify(a);
    let investment = model.params().investment;

    let (monitor_equity, uninformed_debt) = match regime {
        Regime::NoLoan => (Decimal::ZERO, Decimal::ZERO),
        Regime::NoMonitorNeeded => (Decimal::ZERO, investment),
        Regime::Leveraged | Regime::EquityOnly => {
            (model.monitor_equity_share(a), model.uninformed_debt_share(a))
        }
    };

    let terms = ContractTerms {
        assets: a,
        regime,
        monitoring: model.required_monitoring(a),
        monitor_equity,
        uninformed_debt,
        borrower_return: model.borrower_return(a),
        borrowers_reached: model.borrowers_reached(a)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Contract Solution — regime, monitoring, and funding split",
        &serde_json::json!({
            "assets": a.to_string(),
            "regime": regime.to_string(),
            "investment": investment.to_string(),
        }),
        warnings,
        elapsed,
        terms,
    ))
}

fn warn_on_cheap_equity(model: &ContractModel, warnings: &mut Vec<String>) {
    if model.params().cost_equity < model.params().cost_uninformed {
        warnings.push(format!(
            "Equity capital ({}) is cheaper than uninformed debt ({}); leverage never pays",
            model.params().cost_equity,
            model.params().cost_uninformed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::fixtures::{baseline_params, costly_equity_params};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_collateral_curves_grid_and_thresholds() {
        let input = CollateralCurvesInput {
            params: costly_equity_params(),
            steps: 25,
            monitoring_max: Some(dec!(60)),
        };
        let out = analyze_collateral_curves(&input).unwrap();
        let res = &out.result;

        assert_eq!(res.points.len(), 25);
        assert_eq!(res.points[0].monitoring, dec!(0));
        assert_eq!(res.points.last().unwrap().monitoring, dec!(60));
        assert!(res.thresholds.a_min <= res.thresholds.a_cross);
        assert!(res.thresholds.a_cross <= res.thresholds.a_no_monitor);
        for p in &res.points {
            assert_eq!(p.best, p.equity_only.min(p.leveraged));
        }
    }

    #[test]
    fn test_collateral_curves_default_range_from_params() {
        let input = CollateralCurvesInput {
            params: baseline_params(),
            steps: 10,
            monitoring_max: None,
        };
        let out = analyze_collateral_curves(&input).unwrap();
        assert_eq!(out.result.points.last().unwrap().monitoring, dec!(140));
    }

    #[test]
    fn test_outreach_points_agree_with_model() {
        let params = costly_equity_params();
        let model = ContractModel::new(params.clone()).unwrap();
        let input = OutreachInput {
            params,
            asset_min: dec!(0),
            asset_max: Some(dec!(125)),
            steps: 40,
        };
        let out = analyze_outreach(&input).unwrap();

        for p in &out.result.points {
            assert_eq!(p.regime, model.classify(p.assets));
            assert_eq!(p.borrower_return, model.borrower_return(p.assets));
            assert_eq!(
                p.borrowers_reached,
                model.borrowers_reached(p.assets).unwrap()
            );
        }
    }

    #[test]
    fn test_outreach_covers_all_regimes_on_wide_grid() {
        let input = OutreachInput {
            params: costly_equity_params(),
            asset_min: dec!(0),
            asset_max: Some(dec!(139)),
            steps: 200,
        };
        let out = analyze_outreach(&input).unwrap();
        for regime in [
            Regime::NoLoan,
            Regime::EquityOnly,
            Regime::Leveraged,
            Regime::NoMonitorNeeded,
        ] {
            assert!(
                out.result.points.iter().any(|p| p.regime == regime),
                "no grid point landed in {:?}",
                regime
            );
        }
    }

    #[test]
    fn test_funding_mix_spans_monitored_range() {
        let params = costly_equity_params();
        let model = ContractModel::new(params.clone()).unwrap();
        let input = FundingMixInput { params, steps: 50 };
        let out = analyze_funding_mix(&input).unwrap();
        let points = &out.result.points;

        assert_eq!(points.first().unwrap().assets, model.a_min());
        assert_eq!(points.last().unwrap().assets, model.a_no_monitor());
        // Monitor stake is zero at the top of the range, so no ratio there.
        assert_eq!(points.last().unwrap().debt_to_equity, None);
        for p in points {
            assert_eq!(
                p.monitor_equity + p.uninformed_debt,
                model.params().investment
            );
        }
    }

    #[test]
    fn test_solve_contract_each_band() {
        let params = costly_equity_params();
        let model = ContractModel::new(params.clone()).unwrap();

        let solve_at = |a| {
            solve_contract(&SolveContractInput {
                params: params.clone(),
                assets: a,
            })
            .unwrap()
            .result
        };

        let no_loan = solve_at(dec!(10));
        assert_eq!(no_loan.regime, Regime::NoLoan);
        assert_eq!(no_loan.monitor_equity, dec!(0));
        assert_eq!(no_loan.uninformed_debt, dec!(0));
        assert_eq!(no_loan.borrower_return, dec!(0));

        let equity = solve_at((model.a_min() + model.a_cross()) / dec!(2));
        assert_eq!(equity.regime, Regime::EquityOnly);
        assert!(equity.monitoring > dec!(0));

        let leveraged = solve_at((model.a_cross() + model.a_no_monitor()) / dec!(2));
        assert_eq!(leveraged.regime, Regime::Leveraged);
        assert!(leveraged.uninformed_debt > dec!(0));

        let unmonitored = solve_at(model.a_no_monitor() + dec!(5));
        assert_eq!(unmonitored.regime, Regime::NoMonitorNeeded);
        assert_eq!(unmonitored.monitoring, dec!(0));
        assert_eq!(unmonitored.uninformed_debt, model.params().investment);
        assert_eq!(unmonitored.borrowers_reached, None);
    }

    #[test]
    fn test_cheap_equity_warning_surfaced() {
        let params = ZoneParams {
            cost_equity: dec!(0.9),
            ..baseline_params()
        };
        let out = solve_contract(&SolveContractInput {
            params,
            assets: dec!(50),
        })
        .unwrap();
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_outreach_survives_boundary_grid_point() {
        // linspace pins its endpoint, so asset_max = a_no_monitor places a
        // grid point exactly on the degenerate reach denominator. That
        // element becomes the sentinel and is surfaced as a warning; the
        // remaining points still come back.
        let params = costly_equity_params();
        let model = ContractModel::new(params.clone()).unwrap();
        let out = analyze_outreach(&OutreachInput {
            params,
            asset_min: dec!(0),
            asset_max: Some(model.a_no_monitor()),
            steps: 10,
        })
        .unwrap();

        let points = &out.result.points;
        assert_eq!(points.len(), 10);
        let boundary = points.last().unwrap();
        assert_eq!(boundary.assets, model.a_no_monitor());
        assert_eq!(boundary.regime, Regime::Leveraged);
        assert_eq!(boundary.borrowers_reached, None);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("Reach undefined")));
        // Interior leveraged points keep their counts.
        assert!(points[points.len() - 2].borrowers_reached.is_some());
    }

    #[test]
    fn test_invalid_params_rejected_before_analysis() {
        let input = OutreachInput {
            params: ZoneParams {
                prob_shirk: dec!(0.99),
                ..baseline_params()
            },
            asset_min: dec!(0),
            asset_max: None,
            steps: 10,
        };
        assert!(analyze_outreach(&input).is_err());
    }
}
