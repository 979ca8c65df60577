use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use lanekompass_core::dashboard::{render_dashboard, DashboardEvent, DashboardState, Tab};
use lanekompass_core::{DashboardConfig, LoanRepository};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Overview,
    Loans,
    Offers,
    Actions,
}

impl From<TabArg> for Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Overview => Tab::Overview,
            TabArg::Loans => Tab::Loans,
            TabArg::Offers => Tab::Offers,
            TabArg::Actions => Tab::Actions,
        }
    }
}

/// Arguments for rendering the dashboard
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to JSON loan file
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON dashboard state to start from
    #[arg(long)]
    pub state: Option<String>,

    /// Path to a JSON array of dashboard events applied in order
    #[arg(long)]
    pub events: Option<String>,

    /// Inline JSON event, e.g. '{"type":"select_loan","value":"4"}' (repeatable)
    #[arg(long = "event")]
    pub inline_events: Vec<String>,

    /// Switch to a tab after applying events
    #[arg(long, value_enum)]
    pub tab: Option<TabArg>,

    /// Select a loan after applying events
    #[arg(long)]
    pub select: Option<String>,

    /// Net monthly income used for the debt-to-income KPI
    #[arg(long, alias = "income")]
    pub monthly_income: Option<Decimal>,
}

impl DashboardArgs {
    /// Events from the file, then inline events, then the shorthand flags.
    fn collect_events(&self) -> Result<Vec<DashboardEvent>, Box<dyn std::error::Error>> {
        let mut events: Vec<DashboardEvent> = match self.events {
            Some(ref path) => input::file::read_json(path)?,
            None => Vec::new(),
        };
        for raw in &self.inline_events {
            let event: DashboardEvent = serde_json::from_str(raw)
                .map_err(|e| format!("Invalid --event '{raw}': {e}"))?;
            events.push(event);
        }
        if let Some(income) = self.monthly_income {
            events.push(DashboardEvent::SetMonthlyIncome(Some(income)));
        }
        if let Some(ref id) = self.select {
            events.push(DashboardEvent::SelectLoan(id.clone()));
        }
        if let Some(tab) = self.tab {
            events.push(DashboardEvent::SelectTab(tab.into()));
        }
        Ok(events)
    }
}

pub fn run_dashboard(
    args: DashboardArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (repo, file_income) = input::load_portfolio(args.input.as_deref())?;

    let initial: DashboardState = match args.state {
        Some(ref path) => input::file::read_json(path)?,
        // The dashboard opens with the first loan selected.
        None => match repo.loans().first() {
            Some(loan) => DashboardState::with_selection(loan.id.clone()),
            None => DashboardState::default(),
        },
    };
    let initial = DashboardState {
        monthly_income: initial.monthly_income.or(file_income),
        ..initial
    };

    let events = args.collect_events()?;
    debug!(events = events.len(), "applying dashboard events");
    let state = initial.apply_all(events, config);

    let view = render_dashboard(&repo, &state, config)?;
    Ok(serde_json::json!({
        "state": state,
        "view": view,
    }))
}
