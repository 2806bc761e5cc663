use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::LendingPolicy;

/// Currency amounts (AED). Decimal keeps fee arithmetic exact.
pub type Money = Decimal;

/// Rates expressed as decimal fractions (0.045 = 4.5%). Never as percentages.
pub type Rate = Decimal;

/// Residency status of the borrower; decides the LTV table and maturity age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowerClass {
    Resident,
    NonResident,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyClass {
    FirstHome,
    SecondHome,
    UnderConstruction,
    /// Any class the rule tables do not name; receives the fallback LTV.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Purchase,
    BalanceTransfer,
    CashOut,
    Combined,
    /// Unrecognised purpose; carries no transfer fee.
    #[serde(other)]
    Other,
}

/// Borrower and property profile handed to the engine.
///
/// The refinance fields only matter when `purpose` is
/// [`LoanPurpose::BalanceTransfer`]; the engine ignores them otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub borrower: BorrowerClass,
    pub property_value: Money,
    pub property_class: PropertyClass,
    pub monthly_income: Money,
    /// Monthly payment on loans the borrower already services.
    pub existing_loan_payment: Money,
    /// Total revolving credit limit across all cards.
    pub credit_card_limit: Money,
    pub purpose: LoanPurpose,
    /// Borrower age in whole years. The form restricts it to 18-80.
    pub age: u32,
    /// Outstanding balance of the loan being transferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_balance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_rate: Option<Rate>,
    /// Remaining term of the loan being transferred, in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_term_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_cashout: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_rate: Option<Rate>,
}

/// Rates after default substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRates {
    pub new_rate: Rate,
    pub existing_rate: Rate,
}

impl LoanRequest {
    /// Outstanding balance to transfer, present only for a balance transfer
    /// with a non-zero balance.
    pub fn transfer_balance(&self) -> Option<Money> {
        match (self.purpose, self.existing_balance) {
            (LoanPurpose::BalanceTransfer, Some(balance)) if !balance.is_zero() => Some(balance),
            _ => None,
        }
    }

    pub fn desired_cashout_or_zero(&self) -> Money {
        self.desired_cashout.unwrap_or(Decimal::ZERO)
    }

    /// Substitutes the policy defaults for absent rates. A supplied zero rate
    /// is kept and amortizes interest-free.
    pub fn resolved_rates(&self, policy: &LendingPolicy) -> ResolvedRates {
        ResolvedRates {
            new_rate: self.new_rate.unwrap_or(policy.default_new_rate),
            existing_rate: self.existing_rate.unwrap_or(policy.default_existing_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request_without_rates() -> LoanRequest {
        LoanRequest {
            borrower: BorrowerClass::Resident,
            property_value: dec!(1_000_000),
            property_class: PropertyClass::FirstHome,
            monthly_income: dec!(30_000),
            existing_loan_payment: dec!(0),
            credit_card_limit: dec!(0),
            purpose: LoanPurpose::BalanceTransfer,
            age: 40,
            existing_balance: Some(dec!(500_000)),
            existing_rate: None,
            existing_term_years: Some(15),
            desired_cashout: None,
            new_rate: None,
        }
    }

    #[test]
    fn test_absent_rates_take_policy_defaults() {
        let rates = request_without_rates().resolved_rates(&LendingPolicy::default());
        assert_eq!(rates.existing_rate, dec!(0.058));
        assert_eq!(rates.new_rate, dec!(0.045));
    }

    #[test]
    fn test_supplied_zero_rates_are_kept() {
        let mut request = request_without_rates();
        request.existing_rate = Some(dec!(0));
        request.new_rate = Some(dec!(0));
        let rates = request.resolved_rates(&LendingPolicy::default());
        assert_eq!(rates.existing_rate, dec!(0));
        assert_eq!(rates.new_rate, dec!(0));
    }

    #[test]
    fn test_transfer_balance_requires_balance_transfer_purpose() {
        let mut request = request_without_rates();
        assert_eq!(request.transfer_balance(), Some(dec!(500_000)));
        request.purpose = LoanPurpose::CashOut;
        assert_eq!(request.transfer_balance(), None);
    }
}
