use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use social_finance_core::contract::{
    analyze_collateral_curves, analyze_funding_mix, analyze_outreach, CollateralCurvesInput,
    FundingMixInput, OutreachInput,
};

use super::contract::ZoneArgs;

/// Arguments for the collateral-requirement curve series
#[derive(Args)]
pub struct CollateralArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// Number of grid points over the monitoring range
    #[arg(long, default_value = "50")]
    pub steps: usize,

    /// Upper monitoring bound (defaults to --plot-range-max)
    #[arg(long)]
    pub monitoring_max: Option<Decimal>,
}

/// Arguments for the borrower-return and reach series
#[derive(Args)]
pub struct OutreachArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// Lower asset bound of the grid
    #[arg(long, default_value = "0")]
    pub asset_min: Decimal,

    /// Upper asset bound (defaults to --plot-range-max)
    #[arg(long)]
    pub asset_max: Option<Decimal>,

    /// Number of grid points over the asset range
    #[arg(long, default_value = "100")]
    pub steps: usize,
}

/// Arguments for the investment split and debt-to-equity series
#[derive(Args)]
pub struct FundingArgs {
    #[command(flatten)]
    pub zone: ZoneArgs,

    /// Number of grid points over the monitored asset range
    #[arg(long, default_value = "100")]
    pub steps: usize,
}

pub fn run_collateral(args: CollateralArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    let result = analyze_collateral_curves(&CollateralCurvesInput {
        params,
        steps: args.steps,
        monitoring_max: args.monitoring_max,
    })?;
    Ok(serde_json::to_value(&result)?)
}

pub fn run_outreach(args: OutreachArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    let result = analyze_outreach(&OutreachInput {
        params,
        asset_min: args.asset_min,
        asset_max: args.asset_max,
        steps: args.steps,
    })?;
    Ok(serde_json::to_value(&result)?)
}

pub fn run_funding(args: FundingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.zone.resolve()?;
    let result = analyze_funding_mix(&FundingMixInput {
        params,
        steps: args.steps,
    })?;
    Ok(serde_json::to_value(&result)?)
}
