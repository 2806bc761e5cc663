//! Comparison of an existing loan against a proposed balance transfer.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::error::LendingResult;
use crate::fees::FeeSchedule;
use crate::policy::LendingPolicy;
use crate::types::{LoanPurpose, LoanRequest, Money, Rate};

/// Month at which cumulative savings repay the one-time fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Months(u64),
    /// Savings are zero or negative; the fees are never recovered.
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    /// Principal released above the existing balance.
    pub cashout_amount: Money,
    pub current_payment: Money,
    pub new_payment: Money,
    /// Current minus new payment. Negative when the transfer costs more.
    pub monthly_savings: Money,
    /// Monthly savings over the full new term.
    pub total_savings: Money,
    pub total_fees: Money,
    pub net_benefit: Money,
    pub break_even: BreakEven,
    /// New rate below which switching is suggested.
    pub suggested_rate_threshold: Rate,
}

/// Compares the existing loan with the proposed one.
///
/// Returns `Ok(None)` unless the request is a balance transfer naming a
/// non-zero existing balance, rate and remaining term.
pub fn analyze_refinance(
    policy: &LendingPolicy,
    request: &LoanRequest,
    new_loan_amount: Money,
    new_term_years: u32,
    fees: &FeeSchedule,
) -> LendingResult<Option<RefinanceAnalysis>> {
    if request.purpose != LoanPurpose::BalanceTransfer {
        return Ok(None);
    }
    let (Some(balance), Some(existing_rate), Some(existing_term)) = (
        request.existing_balance.filter(|b| !b.is_zero()),
        request.existing_rate.filter(|r| !r.is_zero()),
        request.existing_term_years.filter(|t| *t != 0),
    ) else {
        return Ok(None);
    };
    let new_rate = request.resolved_rates(policy).new_rate;

    let cashout_amount = (new_loan_amount - balance).max(Decimal::ZERO);
    let current_payment = monthly_payment(policy, balance, existing_term, Some(existing_rate))?;
    let new_payment = monthly_payment(policy, new_loan_amount, new_term_years, Some(new_rate))?;

    let monthly_savings = current_payment - new_payment;
    let total_savings = monthly_savings * Decimal::from(new_term_years) * dec!(12);
    let total_fees = fees.total();

    Ok(Some(RefinanceAnalysis {
        cashout_amount,
        current_payment,
        new_payment,
        monthly_savings,
        total_savings,
        total_fees,
        net_benefit: total_savings - total_fees,
        break_even: break_even(total_fees, monthly_savings),
        suggested_rate_threshold: suggest_rate_threshold(
            policy,
            balance,
            existing_rate,
            existing_term,
            total_fees,
        ),
    }))
}

/// Whole months of savings needed to cover `total_fees`.
pub fn break_even(total_fees: Money, monthly_savings: Money) -> BreakEven {
    if monthly_savings <= Decimal::ZERO {
        return BreakEven::Never;
    }
    total_fees
        .checked_div(monthly_savings)
        .and_then(|months| months.ceil().max(Decimal::ZERO).to_u64())
        .map_or(BreakEven::Never, BreakEven::Months)
}

/// Heuristic switch-over rate for a balance transfer.
///
/// Spreads the fees over every remaining month of the existing loan as a
/// rate-equivalent, takes that plus a minimum reduction off the current
/// rate, then a further safety margin. Both steps are floored at 1%.
///
/// This is not a break-even rate solver: it does not find the rate that
/// equalizes total cost, it only estimates one.
pub fn suggest_rate_threshold(
    policy: &LendingPolicy,
    balance: Money,
    current_rate: Rate,
    remaining_term_years: u32,
    total_fees: Money,
) -> Rate {
    let margins = &policy.threshold;
    let remaining_months = Decimal::from(remaining_term_years) * dec!(12);
    let exposure = balance * remaining_months;
    // Fee load as a rate-equivalent percentage of the remaining exposure.
    let reduction_pct = if exposure.is_zero() {
        Decimal::ZERO
    } else {
        total_fees / exposure * dec!(100)
    };

    let suggested =
        (current_rate - reduction_pct / dec!(100) - margins.minimum_reduction).max(margins.floor);
    (suggested - margins.safety_margin).max(margins.floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_even_rounds_up() {
        assert_eq!(break_even(dec!(1000), dec!(300)), BreakEven::Months(4));
        assert_eq!(break_even(dec!(900), dec!(300)), BreakEven::Months(3));
    }

    #[test]
    fn test_break_even_never_without_savings() {
        assert_eq!(break_even(dec!(1000), dec!(0)), BreakEven::Never);
        assert_eq!(break_even(dec!(1000), dec!(-25)), BreakEven::Never);
    }

    #[test]
    fn test_break_even_never_when_horizon_leaves_decimal_range() {
        assert_eq!(
            break_even(dec!(1_000_000), dec!(0.0000000000000000000000000001)),
            BreakEven::Never
        );
    }

    #[test]
    fn test_free_refinance_breaks_even_immediately() {
        assert_eq!(break_even(dec!(0), dec!(50)), BreakEven::Months(0));
    }

    #[test]
    fn test_threshold_subtracts_fee_load_and_margins() {
        let policy = LendingPolicy::default();
        // 12,000 fees over 100,000 * 120 months = 0.1% -> 0.06 - 0.001 - 0.005 - 0.0025
        let threshold = suggest_rate_threshold(&policy, dec!(100_000), dec!(0.06), 10, dec!(12_000));
        assert_eq!(threshold, dec!(0.0515));
    }

    #[test]
    fn test_threshold_floored_at_one_percent() {
        let policy = LendingPolicy::default();
        let threshold = suggest_rate_threshold(&policy, dec!(100_000), dec!(0.012), 10, dec!(12_000));
        assert_eq!(threshold, dec!(0.01));
    }
}
