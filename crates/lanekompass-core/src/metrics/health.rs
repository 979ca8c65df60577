use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::HealthScoreConfig;
use crate::Loan;

use super::totals::compute_totals;

/// Bounded portfolio favourability score.
///
/// Penalises the share of loans above `high_rate_threshold` and the weighted
/// average rate. With non-negative penalties the score never increases as
/// either input grows.
pub fn compute_health_score(loans: &[Loan], config: &HealthScoreConfig) -> u32 {
    let high_rate_share = if loans.is_empty() {
        Decimal::ZERO
    } else {
        let high = loans
            .iter()
            .filter(|l| l.interest_rate > config.high_rate_threshold)
            .count();
        Decimal::from(high) / Decimal::from(loans.len())
    };
    let avg_rate = compute_totals(loans).avg_rate;

    let raw = config.base
        - high_rate_share * config.share_penalty
        - avg_rate * config.avg_rate_penalty;
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let min = Decimal::from(config.min_score);
    let max = Decimal::from(config.max_score);
    rounded
        .max(min)
        .min(max)
        .to_u32()
        .unwrap_or(config.min_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_health_score() {
        // 85 - 0.25*25 - 4.3716 = 74.38 => 74
        assert_eq!(compute_health_score(&demo_loans(), &HealthScoreConfig::default()), 74);
    }

    #[test]
    fn test_empty_portfolio_scores_base() {
        assert_eq!(compute_health_score(&[], &HealthScoreConfig::default()), 85);
    }

    #[test]
    fn test_bounds_hold_at_extremes() {
        let config = HealthScoreConfig::default();
        let mut loans = demo_loans();

        for loan in &mut loans {
            loan.interest_rate = Decimal::ZERO;
        }
        let best = compute_health_score(&loans, &config);
        assert!((config.min_score..=config.max_score).contains(&best));

        for loan in &mut loans {
            loan.interest_rate = dec!(100);
        }
        assert_eq!(compute_health_score(&loans, &config), config.min_score);
    }

    #[test]
    fn test_upper_clamp() {
        let config = HealthScoreConfig {
            base: dec!(150),
            ..Default::default()
        };
        assert_eq!(compute_health_score(&[], &config), 95);
    }

    #[test]
    fn test_monotonic_in_rates() {
        let config = HealthScoreConfig::default();
        let mut loans = demo_loans();
        let mut previous = compute_health_score(&loans, &config);
        for _ in 0..20 {
            for loan in &mut loans {
                loan.interest_rate += dec!(0.75);
            }
            let next = compute_health_score(&loans, &config);
            assert!(next <= previous, "score rose from {previous} to {next}");
            previous = next;
        }
    }

    #[test]
    fn test_share_only_heuristic() {
        // Disabling the average-rate term reproduces the plain 80 - share*25 rule.
        let config = HealthScoreConfig {
            base: dec!(80),
            avg_rate_penalty: Decimal::ZERO,
            ..Default::default()
        };
        // 80 - 6.25 = 73.75 => 74
        assert_eq!(compute_health_score(&demo_loans(), &config), 74);
    }
}
