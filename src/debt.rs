use crate::policy::LendingPolicy;
use crate::types::Money;

/// Folds existing obligations into one monthly debt figure.
///
/// Revolving credit counts at a flat share of its limit
/// (`credit_card_payment_rate`, 5% by default) as an assumed minimum payment.
/// Negative inputs pass through unchanged.
pub fn aggregate_debt(
    policy: &LendingPolicy,
    existing_loan_payment: Money,
    credit_card_limit: Money,
) -> Money {
    existing_loan_payment + credit_card_limit * policy.credit_card_payment_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_credit_limit_charged_at_five_percent() {
        let policy = LendingPolicy::default();
        assert_eq!(aggregate_debt(&policy, dec!(2_000), dec!(20_000)), dec!(3_000));
    }

    #[test]
    fn test_no_obligations_is_zero_debt() {
        let policy = LendingPolicy::default();
        assert_eq!(aggregate_debt(&policy, dec!(0), dec!(0)), dec!(0));
    }
}
