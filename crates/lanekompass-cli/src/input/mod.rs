pub mod file;
pub mod stdin;

use serde::Deserialize;
use tracing::debug;

use lanekompass_core::metrics::PortfolioInput;
use lanekompass_core::{DashboardConfig, Loan, StaticLoanRepository};

/// Loan input accepted on the command line: a bare array of loans, or a
/// portfolio object carrying the monthly income as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoanSource {
    Portfolio(PortfolioInput),
    List(Vec<Loan>),
}

impl LoanSource {
    pub fn into_parts(self) -> (Vec<Loan>, Option<rust_decimal::Decimal>) {
        match self {
            LoanSource::Portfolio(p) => (p.loans, p.monthly_income),
            LoanSource::List(loans) => (loans, None),
        }
    }
}

/// Resolve the loan portfolio from `--input`, piped stdin, or the demo data.
pub fn load_portfolio(
    path: Option<&str>,
) -> Result<(StaticLoanRepository, Option<rust_decimal::Decimal>), Box<dyn std::error::Error>> {
    let source: Option<LoanSource> = if let Some(path) = path {
        Some(file::read_json(path)?)
    } else {
        stdin::read_stdin()?
    };

    match source {
        Some(source) => {
            let (loans, income) = source.into_parts();
            debug!(count = loans.len(), "loaded loans from input");
            Ok((StaticLoanRepository::new(loans)?, income))
        }
        None => {
            debug!("no loan input given; using demo portfolio");
            Ok((StaticLoanRepository::demo(), None))
        }
    }
}

/// Load and validate the dashboard configuration, falling back to defaults.
pub fn load_config(path: Option<&str>) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let config: DashboardConfig = match path {
        Some(p) if file::is_yaml(p) => file::read_yaml(p)?,
        Some(p) => file::read_json(p)?,
        None => DashboardConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
