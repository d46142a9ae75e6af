//! Zone parameters, validation, and the closed-form curves of the contract
//! model: private benefit, the two collateral-requirement curves, the regime
//! boundary scalars, and the optimal-monitoring formulas.
//!
//! Everything here is a pure function of the immutable parameter set. No
//! derived quantity is cached; a [`ContractModel`] can be shared freely
//! across threads.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SocialFinanceError;
use crate::types::{Assets, Intensity, Money, Rate};
use crate::SocialFinanceResult;

fn default_plot_range_max() -> Decimal {
    dec!(140)
}

/// Exogenous parameters for one lending zone. Immutable for the life of a
/// [`ContractModel`] built from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneParams {
    /// Gross cost of uninformed capital, 1 + r_u.
    pub cost_uninformed: Rate,
    /// Gross cost of the monitor's own equity capital, 1 + r_e.
    pub cost_equity: Rate,
    /// Intercept of the private-benefit function B(m) = B0 - alpha * m.
    pub benefit_intercept: Decimal,
    /// Slope of the private-benefit function.
    pub benefit_slope: Decimal,
    /// Gross payoff on project success.
    pub project_return: Money,
    /// Lump-sum investment required per project.
    pub investment: Money,
    /// Success probability under diligence.
    pub prob_diligent: Decimal,
    /// Success probability under shirking.
    pub prob_shirk: Decimal,
    /// Fixed cost shared across all borrowers in the zone.
    #[serde(default)]
    pub fixed_cost_zone: Money,
    /// Fixed cost per loan.
    #[serde(default)]
    pub fixed_cost_loan: Money,
    /// Total capital available to the intermediary in the zone.
    pub intermediary_capital: Money,
    /// Upper bound for generated monitoring/asset grids. Display range only;
    /// never enters a model formula.
    #[serde(default = "default_plot_range_max")]
    pub plot_range_max: Decimal,
}

impl ZoneParams {
    /// Average fixed cost per borrower when the zone serves `borrowers` loans:
    /// F / n + f.
    pub fn avg_fixed_cost(&self, borrowers: Decimal) -> SocialFinanceResult<Money> {
        if borrowers <= Decimal::ZERO {
            return Err(SocialFinanceError::InvalidParameter {
                field: "borrowers".into(),
                reason: "Average fixed cost needs a positive borrower count".into(),
            });
        }
        Ok(self.fixed_cost_zone / borrowers + self.fixed_cost_loan)
    }

    /// Scalar parameters as alphabetically sorted name/value pairs, for the
    /// parameter-display collaborator.
    pub fn scalar_pairs(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("benefit_intercept", self.benefit_intercept),
            ("benefit_slope", self.benefit_slope),
            ("cost_equity", self.cost_equity),
            ("cost_uninformed", self.cost_uninformed),
            ("fixed_cost_loan", self.fixed_cost_loan),
            ("fixed_cost_zone", self.fixed_cost_zone),
            ("intermediary_capital", self.intermediary_capital),
            ("investment", self.investment),
            ("plot_range_max", self.plot_range_max),
            ("prob_diligent", self.prob_diligent),
            ("prob_shirk", self.prob_shirk),
            ("project_return", self.project_return),
        ]
    }
}

/// A validated, immutable contract model for one zone. All derived
/// quantities are pure methods over the parameter set.
#[derive(Debug, Clone)]
pub struct ContractModel {
    params: ZoneParams,
}

impl ContractModel {
    /// Validate the parameter set and build a model. Fails fast with
    /// `InvalidParameter` so no later computation runs on an inconsistent
    /// sign structure.
    pub fn new(params: ZoneParams) -> SocialFinanceResult<Self> {
        validate_params(&params)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ZoneParams {
        &self.params
    }

    /// Private benefit the borrower can capture by shirking under monitoring
    /// `m`: B0 - alpha * m. May go negative for large `m`; the
    /// optimal-monitoring formulas keep callers inside the relevant range.
    pub fn private_benefit(&self, m: Intensity) -> Decimal {
        self.params.benefit_intercept - self.params.benefit_slope * m
    }

    /// Minimum collateral sustaining monitoring `m` with an unlevered,
    /// equity-only monitor: the monitor's incentive-compatibility rent net of
    /// its project NPV contribution, plus monitoring cost and the per-loan
    /// fixed cost.
    pub fn collateral_equity_only(&self, m: Intensity) -> Assets {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        let x = self.params.project_return;
        let i = self.params.investment;
        let beta = self.params.cost_equity;
        let f = self.params.fixed_cost_loan;

        (p / (p - q)) * self.private_benefit(m) - (p * x - beta * i) + m + f
    }

    /// Minimum collateral sustaining monitoring `m` when the intermediary
    /// levers up with outside uninformed debt at `gamma`. The extra term is
    /// the premium of funding the monitor's required equity stake at `beta`
    /// over the blended rate.
    pub fn collateral_leveraged(&self, m: Intensity) -> Assets {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        let x = self.params.project_return;
        let i = self.params.investment;
        let beta = self.params.cost_equity;
        let gamma = self.params.cost_uninformed;
        let f = self.params.fixed_cost_loan;

        (p / (p - q)) * self.private_benefit(m) - (p * x - gamma * i)
            + m
            + ((beta - gamma) / beta) * (q * m / (p - q))
            + f
    }

    /// Lower of the two collateral requirements at `m`: the financing
    /// structure picks whichever curve is cheaper.
    pub fn collateral_best(&self, m: Intensity) -> Assets {
        self.collateral_equity_only(m)
            .min(self.collateral_leveraged(m))
    }

    /// Minimum equity stake the monitor itself must post to implement
    /// monitoring `m`: (1/beta) * q * m / (p - q).
    pub fn monitor_equity(&self, m: Intensity) -> Money {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        q * m / (p - q) / self.params.cost_equity
    }

    /// Monitoring level where the equity-only and leveraged collateral
    /// curves cross: beta * I * (p - q) / q.
    pub fn m_cross(&self) -> Intensity {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        self.params.cost_equity * self.params.investment * (p - q) / q
    }

    /// Asset level at the curve crossing.
    pub fn a_cross(&self) -> Assets {
        self.collateral_leveraged(self.m_cross())
    }

    /// Maximal monitoring at which the equity-only monitor just breaks even:
    /// p * X - beta * I - f.
    pub fn m_max(&self) -> Intensity {
        self.params.prob_diligent * self.params.project_return
            - self.params.cost_equity * self.params.investment
            - self.params.fixed_cost_loan
    }

    /// Lowest viable collateral level, reached at maximal feasible
    /// monitoring.
    pub fn a_min(&self) -> Assets {
        self.collateral_equity_only(self.m_max())
    }

    /// Collateral level above which no monitor is needed at all:
    /// the leveraged curve at zero monitoring.
    pub fn a_no_monitor(&self) -> Assets {
        self.collateral_leveraged(Decimal::ZERO)
    }

    /// Optimal monitoring in the leveraged structure, linear in `A`. Only
    /// meaningful inside the leveraged band; callers dispatch through
    /// [`classify`](Self::classify) first.
    pub fn optimal_monitoring_leveraged(&self, assets: Assets) -> Intensity {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        let alpha = self.params.benefit_slope;
        let beta = self.params.cost_equity;
        let gamma = self.params.cost_uninformed;

        let a_hi = self.a_no_monitor();
        (a_hi - assets) * beta * (p - q) / ((alpha - Decimal::ONE) * beta * p + gamma * q)
    }

    /// Optimal monitoring in the equity-only structure, linear in `A`.
    pub fn optimal_monitoring_equity_only(&self, assets: Assets) -> Intensity {
        let p = self.params.prob_diligent;
        let q = self.params.prob_shirk;
        let alpha = self.params.benefit_slope;

        let a_hi = self.collateral_equity_only(Decimal::ZERO);
        (a_hi - assets) * (p - q) / (q + (alpha - Decimal::ONE) * p)
    }

    /// Lower of the two regime-specific optimal-monitoring levels. Taking
    /// the minimum of monitoring levels directly, rather than re-deriving
    /// from [`collateral_best`](Self::collateral_best), is inherited from
    /// the underlying model and preserved as-is.
    pub fn optimal_monitoring(&self, assets: Assets) -> Intensity {
        self.optimal_monitoring_equity_only(assets)
            .min(self.optimal_monitoring_leveraged(assets))
    }
}

fn validate_params(params: &ZoneParams) -> SocialFinanceResult<()> {
    if params.cost_uninformed <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "cost_uninformed".into(),
            reason: "Gross cost of uninformed capital must be positive".into(),
        });
    }
    if params.cost_equity <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "cost_equity".into(),
            reason: "Gross cost of equity capital must be positive".into(),
        });
    }
    if params.project_return <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "project_return".into(),
            reason: "Project success return must be positive".into(),
        });
    }
    if params.investment <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "investment".into(),
            reason: "Lump-sum investment must be positive".into(),
        });
    }
    if params.prob_shirk <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "prob_shirk".into(),
            reason: "Shirking success probability must be strictly positive".into(),
        });
    }
    if params.prob_diligent > Decimal::ONE {
        return Err(SocialFinanceError::InvalidParameter {
            field: "prob_diligent".into(),
            reason: "Diligent success probability cannot exceed one".into(),
        });
    }
    if params.prob_shirk >= params.prob_diligent {
        return Err(SocialFinanceError::InvalidParameter {
            field: "prob_shirk".into(),
            reason: "Shirking success probability must lie strictly below the diligent one"
                .into(),
        });
    }
    if params.fixed_cost_zone < Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "fixed_cost_zone".into(),
            reason: "Zone fixed cost cannot be negative".into(),
        });
    }
    if params.fixed_cost_loan < Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "fixed_cost_loan".into(),
            reason: "Per-loan fixed cost cannot be negative".into(),
        });
    }
    if params.intermediary_capital < Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "intermediary_capital".into(),
            reason: "Intermediary capital cannot be negative".into(),
        });
    }
    if params.plot_range_max <= Decimal::ZERO {
        return Err(SocialFinanceError::InvalidParameter {
            field: "plot_range_max".into(),
            reason: "Grid range bound must be positive".into(),
        });
    }

    // Denominators of the optimal-monitoring closed forms.
    let equity_denom = params.prob_shirk
        + (params.benefit_slope - Decimal::ONE) * params.prob_diligent;
    if equity_denom.is_zero() {
        return Err(SocialFinanceError::InvalidParameter {
            field: "benefit_slope".into(),
            reason: "Equity-only optimal-monitoring denominator q + (alpha - 1) p vanishes"
                .into(),
        });
    }
    let leveraged_denom = (params.benefit_slope - Decimal::ONE)
        * params.cost_equity
        * params.prob_diligent
        + params.cost_uninformed * params.prob_shirk;
    if leveraged_denom.is_zero() {
        return Err(SocialFinanceError::InvalidParameter {
            field: "benefit_slope".into(),
            reason:
                "Leveraged optimal-monitoring denominator (alpha - 1) beta p + gamma q vanishes"
                    .into(),
        });
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::{baseline_params, costly_equity_params};
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {} within {} of {}",
            actual,
            tol,
            expected
        );
    }

    #[test]
    fn test_private_benefit_linear() {
        let model = ContractModel::new(baseline_params()).unwrap();
        assert_eq!(model.private_benefit(dec!(0)), dec!(30));
        assert_eq!(model.private_benefit(dec!(10)), dec!(25));
        assert_eq!(model.private_benefit(dec!(60)), dec!(0));
    }

    #[test]
    fn test_m_max_known_value() {
        // p X - beta I - f = 0.97 * 200 - 100 - 30 = 64
        let model = ContractModel::new(baseline_params()).unwrap();
        assert_eq!(model.m_max(), dec!(64.00));
    }

    #[test]
    fn test_m_cross_known_value() {
        // beta I (p - q) / q = 100 * 0.15 / 0.82 ~ 18.2927
        let model = ContractModel::new(baseline_params()).unwrap();
        assert_close(model.m_cross(), dec!(18.2927), dec!(0.001));
    }

    #[test]
    fn test_curves_coincide_at_crossing() {
        let model = ContractModel::new(costly_equity_params()).unwrap();
        let mc = model.m_cross();
        assert_close(
            model.collateral_equity_only(mc),
            model.collateral_leveraged(mc),
            dec!(0.000001),
        );
    }

    #[test]
    fn test_curves_identical_when_equity_costs_match_debt() {
        // With beta = gamma the leverage premium term drops out entirely.
        let model = ContractModel::new(baseline_params()).unwrap();
        for m in [dec!(0), dec!(10), dec!(25), dec!(50)] {
            assert_eq!(
                model.collateral_equity_only(m),
                model.collateral_leveraged(m)
            );
        }
    }

    #[test]
    fn test_regime_ordering_invariant() {
        for params in [baseline_params(), costly_equity_params()] {
            let model = ContractModel::new(params).unwrap();
            assert!(model.a_min() <= model.a_cross());
            assert!(model.a_cross() <= model.a_no_monitor());
        }
    }

    #[test]
    fn test_collateral_best_takes_lower_curve() {
        let model = ContractModel::new(costly_equity_params()).unwrap();
        let mc = model.m_cross();
        // Below the crossing the leveraged curve is cheaper, above it the
        // equity-only curve is.
        let below = mc / dec!(2);
        let above = mc * dec!(2);
        assert_eq!(model.collateral_best(below), model.collateral_leveraged(below));
        assert_eq!(model.collateral_best(above), model.collateral_equity_only(above));
    }

    #[test]
    fn test_optimal_monitoring_consistent_at_crossing() {
        // Both optimal-monitoring formulas recover m_cross at a_cross.
        let model = ContractModel::new(costly_equity_params()).unwrap();
        let ac = model.a_cross();
        assert_close(model.optimal_monitoring_leveraged(ac), model.m_cross(), dec!(0.0001));
        assert_close(model.optimal_monitoring_equity_only(ac), model.m_cross(), dec!(0.0001));
    }

    #[test]
    fn test_optimal_monitoring_zero_at_band_top() {
        let model = ContractModel::new(costly_equity_params()).unwrap();
        assert_close(
            model.optimal_monitoring_leveraged(model.a_no_monitor()),
            dec!(0),
            dec!(0.000001),
        );
    }

    #[test]
    fn test_monitor_equity_scales_linearly() {
        let model = ContractModel::new(costly_equity_params()).unwrap();
        // q m / (p - q) / beta = 0.82 * 12 / 0.15 / 1.2 = 54.6666...
        assert_close(model.monitor_equity(dec!(12)), dec!(54.6667), dec!(0.001));
    }

    #[test]
    fn test_avg_fixed_cost() {
        let params = ZoneParams {
            fixed_cost_zone: dec!(600),
            ..baseline_params()
        };
        assert_eq!(params.avg_fixed_cost(dec!(20)).unwrap(), dec!(60));
        assert!(params.avg_fixed_cost(dec!(0)).is_err());
    }

    #[test]
    fn test_scalar_pairs_sorted() {
        let pairs = baseline_params().scalar_pairs();
        let names: Vec<&str> = pairs.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_rejects_shirk_probability_above_diligent() {
        let params = ZoneParams {
            prob_shirk: dec!(0.98),
            ..baseline_params()
        };
        assert!(matches!(
            ContractModel::new(params),
            Err(SocialFinanceError::InvalidParameter { ref field, .. }) if field == "prob_shirk"
        ));
    }

    #[test]
    fn test_rejects_zero_shirk_probability() {
        // q = 0 would divide m_cross by zero; fail fast instead.
        let params = ZoneParams {
            prob_shirk: dec!(0),
            ..baseline_params()
        };
        assert!(matches!(
            ContractModel::new(params),
            Err(SocialFinanceError::InvalidParameter { ref field, .. }) if field == "prob_shirk"
        ));
    }

    #[test]
    fn test_rejects_vanishing_equity_denominator() {
        // q + (alpha - 1) p = 0.45 - 0.5 * 0.9 = 0
        let params = ZoneParams {
            prob_diligent: dec!(0.9),
            prob_shirk: dec!(0.45),
            ..baseline_params()
        };
        assert!(matches!(
            ContractModel::new(params),
            Err(SocialFinanceError::InvalidParameter { ref field, .. }) if field == "benefit_slope"
        ));
    }

    #[test]
    fn test_rejects_vanishing_leveraged_denominator() {
        // (alpha - 1) beta p + gamma q = -0.25 * 2 * 0.9 + 1 * 0.45 = 0,
        // while the equity-only denominator 0.45 - 0.25 * 0.9 stays nonzero.
        let params = ZoneParams {
            benefit_slope: dec!(0.75),
            cost_equity: dec!(2.0),
            prob_diligent: dec!(0.9),
            prob_shirk: dec!(0.45),
            ..baseline_params()
        };
        assert!(matches!(
            ContractModel::new(params),
            Err(SocialFinanceError::InvalidParameter { ref field, .. }) if field == "benefit_slope"
        ));
    }

    #[test]
    fn test_rejects_non_positive_costs_and_investment() {
        for (field, params) in [
            ("cost_uninformed", ZoneParams { cost_uninformed: dec!(0), ..baseline_params() }),
            ("cost_equity", ZoneParams { cost_equity: dec!(-1), ..baseline_params() }),
            ("investment", ZoneParams { investment: dec!(0), ..baseline_params() }),
            ("project_return", ZoneParams { project_return: dec!(0), ..baseline_params() }),
        ] {
            assert!(
                matches!(
                    ContractModel::new(params),
                    Err(SocialFinanceError::InvalidParameter { field: ref f, .. }) if f == field
                ),
                "expected InvalidParameter on {}",
                field
            );
        }
    }
}
