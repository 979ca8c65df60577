use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lanekompass_core::config::{LoanPredicate, RatePolicy};
use lanekompass_core::metrics::{project_scenario, run_scenarios};
use lanekompass_core::{DashboardConfig, KompassError, LoanCategory, LoanRepository};

use crate::input;

/// Arguments for scenario projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenarioArgs {
    /// Path to JSON loan file
    #[arg(long)]
    pub input: Option<String>,

    /// Run a named preset from the configuration
    #[arg(
        long,
        conflicts_with_all = ["flat_rate", "rate_delta", "min_rate", "above_rate", "categories"]
    )]
    pub preset: Option<String>,

    /// Scenario name for ad-hoc projections
    #[arg(long, default_value = "custom")]
    pub name: String,

    /// Apply to loans with a rate at or above this percentage
    #[arg(long)]
    pub min_rate: Option<Decimal>,

    /// Apply to loans with a rate strictly above this percentage
    #[arg(long, conflicts_with = "min_rate")]
    pub above_rate: Option<Decimal>,

    /// Apply to these categories (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<LoanCategory>,

    /// Replace the rate of matched loans with this percentage
    #[arg(long, conflicts_with = "rate_delta")]
    pub flat_rate: Option<Decimal>,

    /// Shift the rate of matched loans by this many percentage points
    #[arg(long)]
    pub rate_delta: Option<Decimal>,
}

impl ScenarioArgs {
    fn predicate(&self) -> Result<LoanPredicate, KompassError> {
        let filters = [
            self.min_rate.is_some(),
            self.above_rate.is_some(),
            !self.categories.is_empty(),
        ];
        if filters.iter().filter(|f| **f).count() > 1 {
            return Err(KompassError::InvalidInput {
                field: "predicate".into(),
                reason: "Use only one of --min-rate, --above-rate or --category.".into(),
            });
        }
        Ok(if let Some(r) = self.min_rate {
            LoanPredicate::RateAtLeast(r)
        } else if let Some(r) = self.above_rate {
            LoanPredicate::RateAbove(r)
        } else if !self.categories.is_empty() {
            LoanPredicate::Categories(self.categories.clone())
        } else {
            LoanPredicate::All
        })
    }

    fn policy(&self) -> Option<RatePolicy> {
        self.flat_rate
            .map(RatePolicy::FlatRate)
            .or(self.rate_delta.map(RatePolicy::Delta))
    }

    /// Ad-hoc projection requested on the command line, if any. Loan filters
    /// without a rate policy are an error rather than silently ignored.
    fn ad_hoc(&self) -> Result<Option<(LoanPredicate, RatePolicy)>, KompassError> {
        let predicate = self.predicate()?;
        match self.policy() {
            Some(policy) => {
                policy.validate()?;
                Ok(Some((predicate, policy)))
            }
            None if predicate != LoanPredicate::All => Err(KompassError::InvalidInput {
                field: "policy".into(),
                reason: "Loan filters need --flat-rate or --rate-delta.".into(),
            }),
            None => Ok(None),
        }
    }
}

pub fn run_scenario(
    args: ScenarioArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (repo, _) = input::load_portfolio(args.input.as_deref())?;

    if let Some(ref name) = args.preset {
        let preset = config
            .scenario(name)
            .ok_or_else(|| KompassError::NotFound(format!("scenario preset '{name}'")))?;
        let scenario =
            project_scenario(&preset.name, repo.loans(), &preset.predicate, &preset.policy);
        return Ok(serde_json::to_value(scenario)?);
    }

    match args.ad_hoc()? {
        Some((predicate, policy)) => {
            let scenario = project_scenario(&args.name, repo.loans(), &predicate, &policy);
            Ok(serde_json::to_value(scenario)?)
        }
        None => Ok(serde_json::to_value(run_scenarios(
            repo.loans(),
            &config.scenarios,
        ))?),
    }
}
