//! `uae_mortgage` is a Rust library for calculating mortgage eligibility in the UAE.
//!
//! Given a borrower and property profile it derives:
//! - **Eligibility**: maximum loan amount, loan-to-value ratio and term, bounded
//!   by the tiered LTV tables, the borrower's age at maturity and a 50%
//!   debt-service ceiling on gross income.
//! - **Payment**: the level monthly payment of the approved loan.
//! - **Fees**: evaluation, registration, transfer and bank fees, plus the early
//!   repayment and mortgage discharge fees of a balance transfer.
//! - **Refinance analysis**: for balance transfers, monthly and total savings,
//!   net benefit, break-even horizon and a suggested switch-over rate.
//!
//! Every calculation is a pure function of the request; nothing is stored.
//!
//! ## Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use uae_mortgage::{
//!     calculate_loan, BorrowerClass, LoanPurpose, LoanRequest, PropertyClass,
//! };
//!
//! let request = LoanRequest {
//!     borrower: BorrowerClass::NonResident,
//!     property_value: dec!(2_000_000),
//!     property_class: PropertyClass::FirstHome,
//!     monthly_income: dec!(50_000),
//!     existing_loan_payment: dec!(2_000),
//!     credit_card_limit: dec!(20_000),
//!     purpose: LoanPurpose::Purchase,
//!     age: 40,
//!     existing_balance: None,
//!     existing_rate: None,
//!     existing_term_years: None,
//!     desired_cashout: None,
//!     new_rate: None,
//! };
//!
//! match calculate_loan(&request) {
//!     Ok(result) => {
//!         println!("Max loan:        {:.2}", result.max_loan_amount);
//!         println!("Term (years):    {}", result.max_term_years);
//!         println!("Monthly payment: {:.2}", result.monthly_payment);
//!         println!("Total fees:      {:.2}", result.fees.total());
//!     }
//!     Err(e) => {
//!         eprintln!("Error calculating loan: {}", e);
//!     }
//! }
//! ```

pub mod amortization;
pub mod debt;
pub mod eligibility;
pub mod error;
pub mod fees;
pub mod input;
pub mod policy;
pub mod refinance;
pub mod types;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use amortization::monthly_payment;
pub use debt::aggregate_debt;
pub use eligibility::{compute_max_loan, Eligibility};
pub use error::{LendingError, LendingResult};
pub use fees::{compute_fees, FeeSchedule};
pub use input::parse_rate_percent;
pub use policy::LendingPolicy;
pub use refinance::{analyze_refinance, suggest_rate_threshold, BreakEven, RefinanceAnalysis};
pub use types::{BorrowerClass, LoanPurpose, LoanRequest, Money, PropertyClass, Rate};

/// Everything the engine derives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub max_loan_amount: Money,
    pub max_term_years: u32,
    /// Loan-to-value ratio applied to the property.
    pub max_ltv: Rate,
    pub monthly_payment: Money,
    /// Existing obligations folded into one monthly figure.
    pub total_monthly_debt: Money,
    pub fees: FeeSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinance_analysis: Option<RefinanceAnalysis>,
    /// Degenerate outcomes worth showing to the borrower.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// The request as received, for redisplay.
    pub input: LoanRequest,
}

/// Runs the full calculation under the default lending policy.
///
/// # Errors
///
/// Only fails with [`LendingError::Overflow`] when a figure leaves the decimal
/// range; every well-formed request produces a result.
pub fn calculate_loan(request: &LoanRequest) -> LendingResult<LoanResult> {
    calculate_loan_with_policy(request, &LendingPolicy::default())
}

/// Runs the full calculation under a caller-supplied lending policy.
///
/// # Errors
///
/// Only fails with [`LendingError::Overflow`] when a figure leaves the decimal
/// range, e.g. an extreme rate compounded over the term.
pub fn calculate_loan_with_policy(
    request: &LoanRequest,
    policy: &LendingPolicy,
) -> LendingResult<LoanResult> {
    let rates = request.resolved_rates(policy);

    let total_monthly_debt =
        aggregate_debt(policy, request.existing_loan_payment, request.credit_card_limit);
    let eligibility = compute_max_loan(policy, request, total_monthly_debt);
    tracing::debug!(
        total_monthly_debt = %total_monthly_debt,
        max_ltv = %eligibility.max_ltv,
        max_loan_by_ltv = %eligibility.max_loan_by_ltv,
        max_loan_by_income = %eligibility.max_loan_by_income,
        max_term_years = eligibility.max_term_years,
        "eligibility computed"
    );

    let monthly_payment = monthly_payment(
        policy,
        eligibility.max_loan_amount,
        eligibility.max_term_years,
        Some(rates.new_rate),
    )?;
    let fees = compute_fees(policy, request, eligibility.max_loan_amount);
    let refinance_analysis = analyze_refinance(
        policy,
        request,
        eligibility.max_loan_amount,
        eligibility.max_term_years,
        &fees,
    )?;

    let warnings = collect_warnings(&eligibility, refinance_analysis.as_ref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(
        max_loan_amount = %eligibility.max_loan_amount,
        monthly_payment = %monthly_payment,
        total_fees = %fees.total(),
        refinance = refinance_analysis.is_some(),
        "loan calculated"
    );

    Ok(LoanResult {
        max_loan_amount: eligibility.max_loan_amount,
        max_term_years: eligibility.max_term_years,
        max_ltv: eligibility.max_ltv,
        monthly_payment,
        total_monthly_debt,
        fees,
        refinance_analysis,
        warnings,
        input: request.clone(),
    })
}

fn collect_warnings(eligibility: &Eligibility, refinance: Option<&RefinanceAnalysis>) -> Vec<String> {
    let mut warnings = Vec::new();

    if eligibility.max_term_years == 0 {
        warnings.push("Borrower has reached the maximum age at maturity; no term is available".into());
    }
    if eligibility.max_monthly_payment <= Decimal::ZERO {
        warnings.push(format!(
            "Existing debt leaves no room under the debt-service ceiling (available monthly payment {})",
            eligibility.max_monthly_payment.round_dp(2)
        ));
    }
    if eligibility.max_loan_by_ltv <= Decimal::ZERO {
        warnings.push("Property value supports no lending".into());
    }
    if let Some(analysis) = refinance {
        if analysis.break_even == BreakEven::Never {
            warnings.push(format!(
                "Transfer does not lower the monthly payment (savings {}); fees are never recovered",
                analysis.monthly_savings.round_dp(2)
            ));
        }
    }

    warnings
}
