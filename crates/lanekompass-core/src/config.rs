use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{types::*, KompassError, KompassResult, LoanCategory};

// ---------------------------------------------------------------------------
// Health score
// ---------------------------------------------------------------------------

/// Parameters of the portfolio health heuristic.
///
/// score = base - high_rate_share * share_penalty - avg_rate * avg_rate_penalty,
/// rounded and clamped to `[min_score, max_score]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoreConfig {
    pub base: Decimal,
    /// Loans strictly above this rate count as high-rate.
    pub high_rate_threshold: Percent,
    pub share_penalty: Decimal,
    /// Points deducted per percentage point of weighted average rate.
    pub avg_rate_penalty: Decimal,
    pub min_score: u32,
    pub max_score: u32,
}

impl Default for HealthScoreConfig {
    fn default() -> Self {
        Self {
            base: dec!(85),
            high_rate_threshold: dec!(10),
            share_penalty: dec!(25),
            avg_rate_penalty: dec!(1),
            min_score: 30,
            max_score: 95,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTier {
    pub label: String,
    /// Inclusive lower bound of the tier.
    pub min_rate: Percent,
}

/// Ordered rate tiers; a loan gets the label of the highest tier whose
/// `min_rate` it reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskTiers(pub Vec<RiskTier>);

impl Default for RiskTiers {
    fn default() -> Self {
        Self(vec![
            RiskTier { label: "Low".into(), min_rate: Decimal::ZERO },
            RiskTier { label: "High".into(), min_rate: dec!(8) },
            RiskTier { label: "Severe".into(), min_rate: dec!(15) },
        ])
    }
}

impl RiskTiers {
    /// Label for a rate. Rates below the first bound fall into the first tier.
    pub fn classify(&self, rate: Percent) -> &str {
        self.0
            .iter()
            .rev()
            .find(|t| rate >= t.min_rate)
            .or_else(|| self.0.first())
            .map(|t| t.label.as_str())
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Which loans a scenario applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LoanPredicate {
    All,
    RateAtLeast(Percent),
    RateAbove(Percent),
    Categories(Vec<LoanCategory>),
}

/// How the hypothetical rate is derived from the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RatePolicy {
    /// Replace the rate outright.
    FlatRate(Percent),
    /// Add a signed delta in percentage points, floored at zero.
    Delta(Decimal),
}

impl RatePolicy {
    /// Flat rates must lie in `[0, MAX_RATE]`, deltas in `[-MAX_RATE, MAX_RATE]`.
    pub fn validate(&self) -> KompassResult<()> {
        let ok = match self {
            Self::FlatRate(r) => *r >= Decimal::ZERO && *r <= MAX_RATE,
            Self::Delta(d) => d.abs() <= MAX_RATE,
        };
        if ok {
            Ok(())
        } else {
            Err(invalid(
                "policy",
                format!("Rate policy {self:?} is outside the accepted range (max {MAX_RATE})."),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub name: String,
    pub predicate: LoanPredicate,
    pub policy: RatePolicy,
}

pub const CONSOLIDATION_PRESET: &str = "consolidate-8pct";

fn default_scenarios() -> Vec<ScenarioPreset> {
    vec![
        ScenarioPreset {
            name: "rate-cut-2pp".into(),
            predicate: LoanPredicate::All,
            policy: RatePolicy::Delta(dec!(-2)),
        },
        ScenarioPreset {
            name: CONSOLIDATION_PRESET.into(),
            predicate: LoanPredicate::RateAbove(dec!(8)),
            policy: RatePolicy::FlatRate(dec!(8)),
        },
    ]
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn default_category_labels() -> BTreeMap<LoanCategory, String> {
    BTreeMap::from([
        (LoanCategory::Mortgage, "Bolån".to_string()),
        (LoanCategory::PersonalLoan, "Privatlån".to_string()),
        (LoanCategory::AutoLoan, "Billån".to_string()),
        (LoanCategory::CreditCard, "Kreditkort".to_string()),
    ])
}

/// Tunable thresholds, labels and scenario presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub health: HealthScoreConfig,
    pub risk_tiers: RiskTiers,
    /// Minimum rate applied by the "high interest only" toggle.
    pub high_interest_threshold: Percent,
    /// Loans strictly above this rate are shown on the offers tab.
    pub offer_rate_threshold: Percent,
    /// Rate cut (percentage points) used in the per-loan savings advice.
    pub advice_rate_cut: Percent,
    pub scenarios: Vec<ScenarioPreset>,
    pub category_labels: BTreeMap<LoanCategory, String>,
    /// Selecting a loan also opens the loans tab.
    pub select_switches_tab: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            health: HealthScoreConfig::default(),
            risk_tiers: RiskTiers::default(),
            high_interest_threshold: dec!(10),
            offer_rate_threshold: dec!(8),
            advice_rate_cut: dec!(1),
            scenarios: default_scenarios(),
            category_labels: default_category_labels(),
            select_switches_tab: true,
        }
    }
}

impl DashboardConfig {
    pub fn category_label(&self, category: LoanCategory) -> String {
        self.category_labels
            .get(&category)
            .cloned()
            .unwrap_or_else(|| category.to_string())
    }

    pub fn scenario(&self, name: &str) -> Option<&ScenarioPreset> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn validate(&self) -> KompassResult<()> {
        let h = &self.health;
        if h.min_score > h.max_score {
            return Err(invalid(
                "health.min_score",
                format!("min_score {} exceeds max_score {}", h.min_score, h.max_score),
            ));
        }
        if h.share_penalty < Decimal::ZERO || h.avg_rate_penalty < Decimal::ZERO {
            return Err(invalid("health", "Penalties must be non-negative.".into()));
        }
        if h.base.abs() > MAX_AMOUNT
            || h.share_penalty > MAX_AMOUNT
            || h.avg_rate_penalty > MAX_AMOUNT
        {
            return Err(invalid(
                "health",
                format!("Base and penalties must not exceed {MAX_AMOUNT} in magnitude."),
            ));
        }
        if self.risk_tiers.0.is_empty() {
            return Err(invalid("risk_tiers", "At least one tier required.".into()));
        }
        if self
            .risk_tiers
            .0
            .windows(2)
            .any(|w| w[0].min_rate >= w[1].min_rate)
        {
            return Err(invalid(
                "risk_tiers",
                "Tiers must be ordered by strictly increasing min_rate.".into(),
            ));
        }
        let thresholds = [
            ("high_interest_threshold", self.high_interest_threshold),
            ("offer_rate_threshold", self.offer_rate_threshold),
            ("advice_rate_cut", self.advice_rate_cut),
        ];
        for (field, value) in thresholds {
            if value < Decimal::ZERO {
                return Err(invalid(field, "Must be non-negative.".into()));
            }
            if value > MAX_RATE {
                return Err(invalid(field, format!("Must not exceed {MAX_RATE}.")));
            }
        }
        for preset in &self.scenarios {
            preset.policy.validate().map_err(|_| {
                invalid(
                    "scenarios",
                    format!("Preset '{}' has an out-of-range rate policy.", preset.name),
                )
            })?;
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> KompassError {
    KompassError::InvalidInput {
        field: field.into(),
        reason,
    }
}
