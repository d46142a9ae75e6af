//! Contract-solving engine for monitored lending in a credit market with
//! moral hazard.
//!
//! A representative borrower in a zone holds pledgeable assets `A` and needs
//! a lump-sum investment `I` to run a project. A financing intermediary
//! monitors at intensity `m` to curb the borrower's private benefit of
//! shirking, funding itself with its own equity (gross cost `beta`) and,
//! in the leveraged structure, outside uninformed debt (gross cost `gamma`).
//!
//! Two collateral-requirement curves cross and define four contiguous
//! financing regimes over the asset line; every downstream quantity
//! (optimal monitoring, borrower return, borrower reach, funding split)
//! dispatches through the single [`Regime`] classifier so the band
//! boundaries are applied consistently everywhere.

pub mod model;
pub mod outcomes;
pub mod regime;
pub mod series;

pub use model::{ContractModel, ZoneParams};
pub use regime::Regime;
pub use series::{
    analyze_collateral_curves, analyze_funding_mix, analyze_outreach, solve_contract,
    CollateralCurvesInput, CollateralCurvesOutput, CollateralPoint, ContractTerms,
    FundingMixInput, FundingMixOutput, FundingPoint, OutreachInput, OutreachOutput,
    OutreachPoint, RegimeThresholds, SolveContractInput,
};
