use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LoanPredicate, RatePolicy, CONSOLIDATION_PRESET};
use crate::detail::{loan_detail, LoanDetail};
use crate::metrics::{
    compute_category_breakdown, compute_debt_to_income_ratio, compute_health_score,
    compute_totals, filter_and_sort, project_scenario, run_scenarios, AggregateTotals, LoanQuery,
    Scenario,
};
use crate::{types::*, DashboardConfig, KompassResult, Loan, LoanCategory, LoanRepository};

use super::format::{format_percent, format_ratio, format_sek};
use super::state::{DashboardState, Tab};

pub const EMPTY_DETAIL_MESSAGE: &str = "Välj ett lån i listan för att se detaljer.";
pub const HEALTHY_OFFERS_MESSAGE: &str =
    "Just nu ser din lånebild relativt sund ut. Förbättringsförslag visas här om dina villkor förändras.";

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub accent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCard {
    pub category: LoanCategory,
    pub label: String,
    /// No loans in this category.
    pub empty: bool,
    pub principal: Money,
    pub monthly: Money,
    pub loan_count: usize,
    pub share_of_principal: Rate,
    pub principal_display: String,
    pub monthly_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub id: String,
    pub lender: String,
    pub category: String,
    pub principal: String,
    pub rate: String,
    pub monthly: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTable {
    pub query: LoanQuery,
    pub rows: Vec<LoanRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffersPanel {
    pub rate_threshold: Percent,
    pub expensive_loan_count: usize,
    pub expensive_monthly: Money,
    pub expensive_monthly_display: String,
    pub consolidation: Option<Scenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabContent {
    Overview {
        categories: Vec<CategoryCard>,
        loans: LoanTable,
    },
    Loans {
        loans: LoanTable,
    },
    Offers(OffersPanel),
    Actions {
        scenarios: Vec<Scenario>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailPanel {
    pub loan: Loan,
    pub category_label: String,
    pub detail: LoanDetail,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailPanel {
    Selected(Box<LoanDetailPanel>),
    Empty { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub active_tab: Tab,
    pub totals: AggregateTotals,
    pub health_score: u32,
    pub debt_to_income: Option<Rate>,
    pub kpis: Vec<Kpi>,
    pub content: TabContent,
    pub detail: DetailPanel,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the complete dashboard view for a state. Pure: the repository and
/// state are only read.
pub fn render_dashboard<R: LoanRepository + ?Sized>(
    repo: &R,
    state: &DashboardState,
    config: &DashboardConfig,
) -> KompassResult<DashboardView> {
    config.validate()?;
    let loans = repo.loans();
    let mut warnings = Vec::new();

    let totals = compute_totals(loans);
    let health_score = compute_health_score(loans, &config.health);
    let debt_to_income = match state.monthly_income {
        Some(income) => match compute_debt_to_income_ratio(loans, income) {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                warnings.push(e.to_string());
                None
            }
        },
        None => None,
    };

    let kpis = build_kpis(&totals, health_score, debt_to_income);

    let content = match state.active_tab {
        Tab::Overview => TabContent::Overview {
            categories: category_cards(loans, config),
            loans: loan_table(
                loans,
                &LoanQuery {
                    sort_key: state.sort_key,
                    sort_direction: state.sort_direction,
                    ..Default::default()
                },
                state,
                config,
            ),
        },
        Tab::Loans => TabContent::Loans {
            loans: loan_table(loans, &state.query(config), state, config),
        },
        Tab::Offers => TabContent::Offers(offers_panel(loans, config)),
        Tab::Actions => TabContent::Actions {
            scenarios: run_scenarios(loans, &config.scenarios),
        },
    };

    let detail = match state.selected_loan_id.as_deref() {
        Some(id) => match repo.find(id) {
            Some(loan) => DetailPanel::Selected(Box::new(detail_panel(loan, config))),
            None => {
                warnings.push(format!("Selected loan '{id}' is not in the portfolio."));
                empty_detail()
            }
        },
        None => empty_detail(),
    };

    debug!(tab = ?state.active_tab, loans = loans.len(), "rendered dashboard");

    Ok(DashboardView {
        active_tab: state.active_tab,
        totals,
        health_score,
        debt_to_income,
        kpis,
        content,
        detail,
        warnings,
    })
}

fn build_kpis(
    totals: &AggregateTotals,
    health_score: u32,
    debt_to_income: Option<Rate>,
) -> Vec<Kpi> {
    let mut kpis = vec![
        kpi("Totalt lånebelopp", format_sek(totals.total_principal), false),
        kpi("Total månadskostnad", format_sek(totals.total_monthly), false),
        kpi("Genomsnittlig ränta", format_percent(totals.avg_rate), false),
        kpi("Lånehälsa", format!("{health_score} / 100"), true),
    ];
    if let Some(ratio) = debt_to_income {
        kpis.push(kpi("Skuldkvot", format_ratio(ratio), false));
    }
    kpis
}

fn kpi(label: &str, value: String, accent: bool) -> Kpi {
    Kpi {
        label: label.to_string(),
        value,
        accent,
    }
}

/// One card per category in display order, including empty ones.
fn category_cards(loans: &[Loan], config: &DashboardConfig) -> Vec<CategoryCard> {
    let breakdown = compute_category_breakdown(loans);
    LoanCategory::ALL
        .iter()
        .map(|&category| {
            let label = config.category_label(category);
            match breakdown.get(&category) {
                Some(b) => CategoryCard {
                    category,
                    label,
                    empty: false,
                    principal: b.principal,
                    monthly: b.monthly,
                    loan_count: b.loan_count,
                    share_of_principal: b.share_of_principal,
                    principal_display: format_sek(b.principal),
                    monthly_display: format_sek(b.monthly),
                },
                None => CategoryCard {
                    category,
                    label,
                    empty: true,
                    principal: Money::ZERO,
                    monthly: Money::ZERO,
                    loan_count: 0,
                    share_of_principal: Rate::ZERO,
                    principal_display: format_sek(Money::ZERO),
                    monthly_display: format_sek(Money::ZERO),
                },
            }
        })
        .collect()
}

fn loan_table(
    loans: &[Loan],
    query: &LoanQuery,
    state: &DashboardState,
    config: &DashboardConfig,
) -> LoanTable {
    let rows = filter_and_sort(loans, query)
        .into_iter()
        .map(|loan| LoanRow {
            selected: state.selected_loan_id.as_deref() == Some(loan.id.as_str()),
            category: config.category_label(loan.category),
            principal: format_sek(loan.principal_remaining),
            rate: format_percent(loan.interest_rate),
            monthly: format_sek(loan.monthly_payment),
            id: loan.id,
            lender: loan.lender,
        })
        .collect();
    LoanTable {
        query: query.clone(),
        rows,
    }
}

fn offers_panel(loans: &[Loan], config: &DashboardConfig) -> OffersPanel {
    let threshold = config.offer_rate_threshold;
    let expensive: Vec<&Loan> = loans.iter().filter(|l| l.interest_rate > threshold).collect();
    let expensive_monthly: Money = expensive.iter().map(|l| l.monthly_payment).sum();

    if expensive.is_empty() {
        return OffersPanel {
            rate_threshold: threshold,
            expensive_loan_count: 0,
            expensive_monthly,
            expensive_monthly_display: format_sek(expensive_monthly),
            consolidation: None,
            message: Some(HEALTHY_OFFERS_MESSAGE.to_string()),
        };
    }

    // The preset only supplies the policy; the panel's threshold picks the
    // loans so the scenario covers exactly the loans counted above.
    let policy = config
        .scenario(CONSOLIDATION_PRESET)
        .map(|p| p.policy.clone())
        .unwrap_or(RatePolicy::FlatRate(threshold));
    let consolidation = project_scenario(
        CONSOLIDATION_PRESET,
        loans,
        &LoanPredicate::RateAbove(threshold),
        &policy,
    );

    OffersPanel {
        rate_threshold: threshold,
        expensive_loan_count: expensive.len(),
        expensive_monthly,
        expensive_monthly_display: format_sek(expensive_monthly),
        consolidation: Some(consolidation),
        message: None,
    }
}

fn detail_panel(loan: &Loan, config: &DashboardConfig) -> LoanDetailPanel {
    let detail = loan_detail(loan, config);
    let category_label = config.category_label(loan.category);
    let fields = vec![
        ("Kategori".to_string(), category_label.clone()),
        ("Kvarvarande skuld".to_string(), format_sek(loan.principal_remaining)),
        ("Ränta".to_string(), format_percent(loan.interest_rate)),
        ("Månadskostnad".to_string(), format_sek(loan.monthly_payment)),
        ("Månader kvar".to_string(), loan.months_remaining.to_string()),
        ("Total kvarvarande kostnad".to_string(), format_sek(detail.total_remaining_cost)),
        ("Amortering (ungefär)".to_string(), format_sek(detail.amortization_approx)),
        ("Räntekostnad (ungefär)".to_string(), format_sek(detail.interest_approx)),
        ("Risknivå".to_string(), detail.risk_label.clone()),
    ];
    LoanDetailPanel {
        loan: loan.clone(),
        category_label,
        detail,
        fields,
    }
}

fn empty_detail() -> DetailPanel {
    DetailPanel::Empty {
        message: EMPTY_DETAIL_MESSAGE.to_string(),
    }
}
