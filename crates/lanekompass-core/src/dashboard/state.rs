//! Explicit dashboard UI state.
//!
//! All interaction state lives in [`DashboardState`]. Events are folded into
//! a new state by [`DashboardState::apply`]; views are rendered from the
//! state without touching it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{LoanQuery, SortDirection, SortKey};
use crate::{types::*, DashboardConfig, LoanCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Overview,
    Loans,
    Offers,
    Actions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub selected_loan_id: Option<String>,
    /// `None` shows every category.
    pub category_filter: Option<LoanCategory>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub high_interest_only: bool,
    pub monthly_income: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DashboardEvent {
    SelectTab(Tab),
    SelectLoan(String),
    ClearSelection,
    SetCategoryFilter(Option<LoanCategory>),
    SetSortKey(SortKey),
    ToggleSortDirection,
    SetHighInterestOnly(bool),
    /// Non-positive amounts clear the income.
    SetMonthlyIncome(Option<Money>),
}

impl DashboardState {
    /// State with the first loan preselected, as the dashboard opens.
    pub fn with_selection(id: impl Into<String>) -> Self {
        Self {
            selected_loan_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Fold one event into a new state. `self` is left untouched.
    pub fn apply(&self, event: DashboardEvent, config: &DashboardConfig) -> DashboardState {
        let mut next = self.clone();
        match event {
            DashboardEvent::SelectTab(tab) => next.active_tab = tab,
            DashboardEvent::SelectLoan(id) => {
                next.selected_loan_id = Some(id);
                if config.select_switches_tab {
                    next.active_tab = Tab::Loans;
                }
            }
            DashboardEvent::ClearSelection => next.selected_loan_id = None,
            DashboardEvent::SetCategoryFilter(category) => next.category_filter = category,
            DashboardEvent::SetSortKey(key) => next.sort_key = key,
            DashboardEvent::ToggleSortDirection => {
                next.sort_direction = next.sort_direction.toggled()
            }
            DashboardEvent::SetHighInterestOnly(on) => next.high_interest_only = on,
            DashboardEvent::SetMonthlyIncome(income) => {
                next.monthly_income = income.filter(|v| *v > Decimal::ZERO)
            }
        }
        debug!(from = ?self, to = ?next, "dashboard state transition");
        next
    }

    /// Fold a sequence of events.
    pub fn apply_all(
        &self,
        events: impl IntoIterator<Item = DashboardEvent>,
        config: &DashboardConfig,
    ) -> DashboardState {
        events
            .into_iter()
            .fold(self.clone(), |state, event| state.apply(event, config))
    }

    /// Table query implied by the current filter and sort controls.
    pub fn query(&self, config: &DashboardConfig) -> LoanQuery {
        LoanQuery {
            category: self.category_filter,
            min_rate: self
                .high_interest_only
                .then_some(config.high_interest_threshold),
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_select_loan_switches_tab() {
        let config = DashboardConfig::default();
        let state = DashboardState::default();
        let next = state.apply(DashboardEvent::SelectLoan("4".into()), &config);
        assert_eq!(next.selected_loan_id.as_deref(), Some("4"));
        assert_eq!(next.active_tab, Tab::Loans);
        // input state untouched
        assert_eq!(state, DashboardState::default());
    }

    #[test]
    fn test_select_loan_keeps_tab_when_disabled() {
        let config = DashboardConfig {
            select_switches_tab: false,
            ..Default::default()
        };
        let next = DashboardState::default().apply(DashboardEvent::SelectLoan("2".into()), &config);
        assert_eq!(next.active_tab, Tab::Overview);
    }

    #[test]
    fn test_event_sequence() {
        let config = DashboardConfig::default();
        let state = DashboardState::with_selection("1").apply_all(
            [
                DashboardEvent::SelectTab(Tab::Offers),
                DashboardEvent::SetCategoryFilter(Some(LoanCategory::CreditCard)),
                DashboardEvent::SetSortKey(SortKey::InterestRate),
                DashboardEvent::ToggleSortDirection,
                DashboardEvent::SetHighInterestOnly(true),
                DashboardEvent::ClearSelection,
            ],
            &config,
        );
        assert_eq!(
            state,
            DashboardState {
                active_tab: Tab::Offers,
                selected_loan_id: None,
                category_filter: Some(LoanCategory::CreditCard),
                sort_key: SortKey::InterestRate,
                sort_direction: SortDirection::Ascending,
                high_interest_only: true,
                monthly_income: None,
            }
        );
    }

    #[test]
    fn test_non_positive_income_cleared() {
        let config = DashboardConfig::default();
        let state = DashboardState::default()
            .apply(DashboardEvent::SetMonthlyIncome(Some(dec!(42_000))), &config);
        assert_eq!(state.monthly_income, Some(dec!(42_000)));
        let state = state.apply(DashboardEvent::SetMonthlyIncome(Some(Decimal::ZERO)), &config);
        assert_eq!(state.monthly_income, None);
    }

    #[test]
    fn test_query_from_state() {
        let config = DashboardConfig::default();
        let state = DashboardState {
            high_interest_only: true,
            ..Default::default()
        };
        let q = state.query(&config);
        assert_eq!(q.min_rate, Some(dec!(10)));
        assert_eq!(q.category, None);
        assert_eq!(DashboardState::default().query(&config).min_rate, None);
    }

    #[test]
    fn test_state_and_events_serialize() {
        let state = DashboardState::with_selection("3");
        let json = serde_json::to_string(&state).unwrap();
        let back: DashboardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "set_category_filter", "value": "Kreditkort"}"#)
                .unwrap();
        assert_eq!(
            event,
            DashboardEvent::SetCategoryFilter(Some(LoanCategory::CreditCard))
        );
        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "toggle_sort_direction"}"#).unwrap();
        assert_eq!(event, DashboardEvent::ToggleSortDirection);
    }
}
