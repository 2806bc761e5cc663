use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::{LendingError, LendingResult};
use crate::policy::LendingPolicy;
use crate::types::{Money, Rate};

/// Level monthly payment for a loan (annuity formula).
///
/// The formula is: PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1], with `i` the
/// annual rate divided by 12 and `n` the term in months.
///
/// # Arguments
///
/// * `principal` - The loan amount. A non-positive principal pays nothing.
/// * `term_years` - Term in whole years. A zero term pays nothing.
/// * `annual_rate` - Contractual rate as a decimal fraction. When `None`,
///   the policy's stress-test rate (3.5% + 2%) is used instead.
///
/// A zero rate amortizes linearly as `principal / n`.
///
/// # Errors
///
/// Returns [`LendingError::Overflow`] if `(1 + i)^n` leaves the decimal range.
pub fn monthly_payment(
    policy: &LendingPolicy,
    principal: Money,
    term_years: u32,
    annual_rate: Option<Rate>,
) -> LendingResult<Money> {
    if term_years == 0 || principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let rate = annual_rate.unwrap_or_else(|| policy.stress_test_rate());
    let total_months = u64::from(term_years) * 12;

    if rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    let monthly_rate = rate / dec!(12);
    let growth = (dec!(1) + monthly_rate)
        .checked_powu(total_months)
        .ok_or_else(|| LendingError::Overflow {
            context: format!("compounding {rate} over {term_years} years"),
        })?;

    let denominator = growth - dec!(1);
    if denominator.is_zero() {
        // Rate too small to register over the term at decimal precision.
        return Ok(principal / Decimal::from(total_months));
    }

    monthly_rate
        .checked_mul(growth)
        .and_then(|factor| principal.checked_mul(factor))
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(|| LendingError::Overflow {
            context: format!("monthly payment at {rate} over {term_years} years"),
        })
}
