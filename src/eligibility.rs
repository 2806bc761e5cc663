//! Maximum loan amount, LTV and term for a borrower profile.
//!
//! The income ceiling is a simplified, undiscounted capacity proxy: the
//! affordable monthly payment times the number of months in the term. It is
//! not an inversion of the annuity formula and overstates capacity whenever
//! the rate is positive. That is the rule as lenders quote it, not a bug.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::policy::LendingPolicy;
use crate::types::{BorrowerClass, LoanRequest, Money, Rate};

/// Intermediate figures of the eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub max_loan_amount: Money,
    pub max_term_years: u32,
    pub max_ltv: Rate,
    pub max_loan_by_ltv: Money,
    pub max_loan_by_income: Money,
    /// Monthly income left for the new loan after the debt-service ceiling.
    pub max_monthly_payment: Money,
}

/// Longest term the borrower qualifies for.
///
/// Bounded by the years left until the maturity age (65 for non-residents,
/// 70 for residents) and by the absolute 25-year ceiling.
pub fn max_term_years(policy: &LendingPolicy, borrower: BorrowerClass, age: u32) -> u32 {
    let by_age = policy.max_age_at_maturity(borrower).saturating_sub(age);
    by_age.min(policy.max_term_years)
}

/// Loan-to-value ratio applied to the request.
pub fn max_loan_to_value(policy: &LendingPolicy, request: &LoanRequest) -> Rate {
    match request.borrower {
        BorrowerClass::NonResident => policy
            .non_resident_ltv
            .lookup(request.property_class, request.property_value),
        BorrowerClass::Resident => policy.resident_ltv,
    }
}

/// Derives the maximum loan amount and term.
///
/// Purchase, cash-out and combined loans take the lower of the LTV and income
/// ceilings. A balance transfer with an outstanding balance is further capped
/// by what is asked for: the balance plus the desired cash-out.
///
/// Results are not clamped. Debt above the income ceiling yields a negative
/// amount, which the caller reports rather than hides.
pub fn compute_max_loan(
    policy: &LendingPolicy,
    request: &LoanRequest,
    total_monthly_debt: Money,
) -> Eligibility {
    let max_term_years = max_term_years(policy, request.borrower, request.age);
    let max_ltv = max_loan_to_value(policy, request);

    let max_monthly_payment = request.monthly_income * policy.debt_service_ratio - total_monthly_debt;
    let max_loan_by_income = max_monthly_payment * Decimal::from(max_term_years) * dec!(12);
    let max_loan_by_ltv = request.property_value * max_ltv;

    let mut max_loan_amount = max_loan_by_ltv.min(max_loan_by_income);
    if let Some(balance) = request.transfer_balance() {
        let desired_amount = balance + request.desired_cashout_or_zero();
        max_loan_amount = max_loan_amount.min(desired_amount);
    }

    Eligibility {
        max_loan_amount,
        max_term_years,
        max_ltv,
        max_loan_by_ltv,
        max_loan_by_income,
        max_monthly_payment,
    }
}
