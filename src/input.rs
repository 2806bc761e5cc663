//! Input rules the calculator form applies before calling the engine.
//!
//! The engine itself never validates; these helpers let a front end reject
//! or normalise raw input the same way the form does.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{LendingError, LendingResult};
use crate::types::{LoanRequest, Money, Rate};

pub const MIN_BORROWER_AGE: u32 = 18;
pub const MAX_BORROWER_AGE: u32 = 80;
pub const MAX_EXISTING_TERM_YEARS: u32 = 35;

/// Parses a percentage typed by the user ("4.5", "5.80%") into a rate.
///
/// Only digits and the first decimal point are kept, and at most two
/// fractional digits survive. Returns `None` for empty input or a lone ".",
/// in which case the caller falls back to the default rate.
pub fn parse_rate_percent(text: &str) -> Option<Rate> {
    let mut cleaned = String::with_capacity(text.len());
    let mut fraction_digits: Option<usize> = None;

    for c in text.chars() {
        match (c, fraction_digits) {
            ('.', None) => {
                cleaned.push('.');
                fraction_digits = Some(0);
            }
            ('0'..='9', None) => cleaned.push(c),
            ('0'..='9', Some(n)) if n < 2 => {
                cleaned.push(c);
                fraction_digits = Some(n + 1);
            }
            _ => {}
        }
    }

    if cleaned.is_empty() || cleaned == "." {
        return None;
    }
    let cleaned = cleaned.trim_end_matches('.');
    let cleaned = if cleaned.starts_with('.') {
        format!("0{cleaned}")
    } else {
        cleaned.to_string()
    };
    Decimal::from_str(&cleaned).ok().map(|pct| pct / dec!(100))
}

fn ensure_non_negative(field: &str, value: Decimal) -> LendingResult<()> {
    if value < Decimal::ZERO {
        return Err(LendingError::InvalidInput {
            field: field.into(),
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

impl LoanRequest {
    /// Checks the ranges the form enforces.
    ///
    /// # Errors
    ///
    /// Returns [`LendingError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> LendingResult<()> {
        if !(MIN_BORROWER_AGE..=MAX_BORROWER_AGE).contains(&self.age) {
            return Err(LendingError::InvalidInput {
                field: "age".into(),
                reason: format!(
                    "must be between {MIN_BORROWER_AGE} and {MAX_BORROWER_AGE}, got {}",
                    self.age
                ),
            });
        }

        let amounts: [(&str, Money); 4] = [
            ("property_value", self.property_value),
            ("monthly_income", self.monthly_income),
            ("existing_loan_payment", self.existing_loan_payment),
            ("credit_card_limit", self.credit_card_limit),
        ];
        for (field, value) in amounts {
            ensure_non_negative(field, value)?;
        }

        let optional: [(&str, Option<Decimal>); 4] = [
            ("existing_balance", self.existing_balance),
            ("existing_rate", self.existing_rate),
            ("desired_cashout", self.desired_cashout),
            ("new_rate", self.new_rate),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                ensure_non_negative(field, value)?;
            }
        }

        if let Some(term) = self
            .existing_term_years
            .filter(|term| *term > MAX_EXISTING_TERM_YEARS)
        {
            return Err(LendingError::InvalidInput {
                field: "existing_term_years".into(),
                reason: format!("must not exceed {MAX_EXISTING_TERM_YEARS} years, got {term}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorrowerClass, LoanPurpose, PropertyClass};

    fn valid_request() -> LoanRequest {
        LoanRequest {
            borrower: BorrowerClass::NonResident,
            property_value: dec!(1_500_000),
            property_class: PropertyClass::SecondHome,
            monthly_income: dec!(30_000),
            existing_loan_payment: dec!(1_000),
            credit_card_limit: dec!(10_000),
            purpose: LoanPurpose::BalanceTransfer,
            age: 45,
            existing_balance: Some(dec!(600_000)),
            existing_rate: Some(dec!(0.058)),
            existing_term_years: Some(18),
            desired_cashout: None,
            new_rate: Some(dec!(0.045)),
        }
    }

    #[test]
    fn test_parse_plain_percent() {
        assert_eq!(parse_rate_percent("4.5"), Some(dec!(0.045)));
        assert_eq!(parse_rate_percent("5.80"), Some(dec!(0.058)));
        assert_eq!(parse_rate_percent("6"), Some(dec!(0.06)));
    }

    #[test]
    fn test_parse_strips_noise_and_truncates() {
        assert_eq!(parse_rate_percent(" 4.567% "), Some(dec!(0.0456)));
        assert_eq!(parse_rate_percent("3.2.1"), Some(dec!(0.0321)));
        assert_eq!(parse_rate_percent(".75"), Some(dec!(0.0075)));
        assert_eq!(parse_rate_percent("4."), Some(dec!(0.04)));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse_rate_percent(""), None);
        assert_eq!(parse_rate_percent("."), None);
        assert_eq!(parse_rate_percent("abc"), None);
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_age_out_of_range_rejected() {
        let mut request = valid_request();
        request.age = 17;
        let err = request.validate().unwrap_err();
        assert!(matches!(err, LendingError::InvalidInput { ref field, .. } if field == "age"));

        request.age = 81;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut request = valid_request();
        request.credit_card_limit = dec!(-1);
        let err = request.validate().unwrap_err();
        assert!(
            matches!(err, LendingError::InvalidInput { ref field, .. } if field == "credit_card_limit")
        );
    }

    #[test]
    fn test_existing_term_limit() {
        let mut request = valid_request();
        request.existing_term_years = Some(36);
        assert!(request.validate().is_err());
    }
}
