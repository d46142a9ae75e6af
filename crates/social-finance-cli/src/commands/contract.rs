use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use social_finance_core::contract::{solve_contract, RegimeThresholds, SolveContractInput};
use social_finance_core::{ContractModel, ZoneParams};

use crate::input;

/// Zone parameters shared by every command. Resolution order: `--input`
/// file, piped stdin JSON, then individual flags (which default to the
/// lecture-example zone).
#[derive(Args)]
pub struct ZoneArgs {
    /// Path to a JSON or YAML file with the zone parameter record
    #[arg(long)]
    pub input: Option<String>,

    /// Gross cost of uninformed capital (1 + r_u)
    #[arg(long, default_value = "1.0")]
    pub cost_uninformed: Decimal,

    /// Gross cost of the monitor's equity capital (1 + r_e)
    #[arg(long, default_value = "1.0")]
    pub cost_equity: Decimal,

    /// Intercept of the private-benefit function B(m) = B0 - alpha * m
    #[arg(long, default_value = "30")]
    pub benefit_intercept: Decimal,

    /// Slope of the private-benefit function
    #[arg(long, default_value = "0.5")]
    pub benefit_slope: Decimal,

    /// Gross payoff on project success
    #[arg(long, default_value = "200")]
    pub project_return: Decimal,

    /// Lump-sum investment required per project
    #[arg(long, default_value = "100")]
    pub investment: Decimal,

    /// Success probability under diligence
    #[arg(long, default_value = "0.97")]
    pub prob_diligent: Decimal,

    /// Success probability under shirking
    #[arg(long, default_value = "0.82")]
    pub prob_shirk: Decimal,

    /// Fixed cost shared across all borrowers in the zone
    #[arg(long, default_value = "0")]
    pub fixed_cost_zone: Decimal,

    /// Fixed cost per loan
    #[arg(long, default_value = "30")]
    pub fixed_cost_loan: Decimal,

    /// Total intermediary capital in the zone
    #[arg(long, default_value = "12000")]
    pub intermediary_capital: Decimal,

    /// Upper bound for generated monitoring/asset grids
    #[arg(long, default_value = "140")]
    pub plot_range_max: Decimal,
}

impl ZoneArgs {
    pub fn resolve(&self) -> Result<ZoneParams, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_params(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }
        Ok(ZoneParams {
            cost_uninformed: self.cost_uninformed,
            cost_equity: self.cost_equity,
            benefit_intercept: self.benefit_intercept,
            benefit_slope: self.benefit_slope,
            project_return: self.project_return,
            investment: self.investment,
            prob_diligent: self.prob_diligent,
            prob_shirk: self.prob_shirk,
            fixed_cost_zone: self.fixed_cost_zone,
            fixed_cost_loan: self.fixed_cost_loan,
            intermediary_capital: self.intermediary_capital,
            plot_range_max: self.plot_range_max,
        })
    }
}

/// Arguments for solving a single-asset-level contract
#[derive(Args)]
pub struct SolveArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// Pledgeable-asset level of the representative borrower
    #[arg(long)]
    pub assets: Decimal,
}

/// Arguments for printing the regime thresholds
#[derive(Args)]
pub struct ThresholdsArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,
}

/// Arguments for displaying the parameter set
#[derive(Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    let result = solve_contract(&SolveContractInput {
        params,
        assets: args.assets,
    })?;
    Ok(serde_json::to_value(&result)?)
}

pub fn run_thresholds(args: ThresholdsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    let model = ContractModel::new(params)?;
    let thresholds = RegimeThresholds::from_model(&model);
    Ok(serde_json::to_value(&thresholds)?)
}

pub fn run_params(args: ParamsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    // Validate before displaying so a bad file fails loudly here too.
    let model = ContractModel::new(params)?;

    let mut map = serde_json::Map::new();
    for (name, value) in model.params().scalar_pairs() {
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    Ok(Value::Object(map))
}
