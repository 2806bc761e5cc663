use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::LendingPolicy;
use crate::types::{LoanRequest, Money};

/// One-time costs of taking out (or transferring) the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Property evaluation, flat.
    pub evaluation: Money,
    /// Mortgage registration: 0.25% of the loan plus a flat 290.
    pub registration: Money,
    /// Land-department transfer fee; depends on the loan purpose.
    pub transfer: Money,
    /// Bank processing fee: 1% of the loan, capped at 10,000.
    pub bank_fee: Money,
    /// Balance transfers only: early settlement of the existing loan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_repayment: Option<Money>,
    /// Balance transfers only: release of the existing mortgage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortgage_discharge: Option<Money>,
}

impl FeeSchedule {
    /// Sum of every fee present in the schedule.
    pub fn total(&self) -> Money {
        [self.evaluation, self.registration, self.transfer, self.bank_fee]
            .into_iter()
            .chain(self.early_repayment)
            .chain(self.mortgage_discharge)
            .sum()
    }
}

/// Derives the fee schedule for the request and approved loan amount.
pub fn compute_fees(policy: &LendingPolicy, request: &LoanRequest, loan_amount: Money) -> FeeSchedule {
    let rules = &policy.fees;
    let transfer_balance = request.transfer_balance();

    let transfer = rules
        .transfer_rate(request.purpose, transfer_balance.is_some())
        .map_or(Decimal::ZERO, |rate| request.property_value * rate);

    FeeSchedule {
        evaluation: rules.evaluation,
        registration: loan_amount * rules.registration_rate + rules.registration_flat,
        transfer,
        bank_fee: (loan_amount * rules.bank_fee_rate).min(rules.bank_fee_cap),
        early_repayment: transfer_balance
            .map(|balance| (balance * rules.early_repayment_rate).min(rules.early_repayment_cap)),
        mortgage_discharge: transfer_balance.map(|_| rules.mortgage_discharge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorrowerClass, LoanPurpose, PropertyClass};
    use rust_decimal_macros::dec;

    fn request(purpose: LoanPurpose, existing_balance: Option<Money>) -> LoanRequest {
        LoanRequest {
            borrower: BorrowerClass::Resident,
            property_value: dec!(1_200_000),
            property_class: PropertyClass::FirstHome,
            monthly_income: dec!(40_000),
            existing_loan_payment: dec!(0),
            credit_card_limit: dec!(0),
            purpose,
            age: 35,
            existing_balance,
            existing_rate: None,
            existing_term_years: None,
            desired_cashout: None,
            new_rate: None,
        }
    }

    #[test]
    fn test_purchase_fees() {
        let policy = LendingPolicy::default();
        let fees = compute_fees(&policy, &request(LoanPurpose::Purchase, None), dec!(1_000_000));

        assert_eq!(fees.evaluation, dec!(3000));
        assert_eq!(fees.registration, dec!(2790));
        assert_eq!(fees.bank_fee, dec!(10_000));
        assert_eq!(fees.transfer, dec!(24_000));
        assert_eq!(fees.early_repayment, None);
        assert_eq!(fees.mortgage_discharge, None);
        assert_eq!(fees.total(), dec!(39_790));
    }

    #[test]
    fn test_balance_transfer_adds_settlement_fees() {
        let policy = LendingPolicy::default();
        let req = request(LoanPurpose::BalanceTransfer, Some(dec!(500_000)));
        let fees = compute_fees(&policy, &req, dec!(550_000));

        assert_eq!(fees.transfer, dec!(12_000));
        assert_eq!(fees.bank_fee, dec!(5_500));
        assert_eq!(fees.early_repayment, Some(dec!(5_000)));
        assert_eq!(fees.mortgage_discharge, Some(dec!(1500)));
        // 3000 + 1665 + 12000 + 5500 + 5000 + 1500
        assert_eq!(fees.total(), dec!(28_665));
    }

    #[test]
    fn test_early_repayment_capped() {
        let policy = LendingPolicy::default();
        let req = request(LoanPurpose::BalanceTransfer, Some(dec!(3_000_000)));
        let fees = compute_fees(&policy, &req, dec!(900_000));

        assert_eq!(fees.early_repayment, Some(dec!(10_000)));
    }

    #[test]
    fn test_balance_transfer_without_balance_has_no_transfer_fees() {
        let policy = LendingPolicy::default();
        let fees = compute_fees(&policy, &request(LoanPurpose::BalanceTransfer, None), dec!(500_000));

        assert_eq!(fees.transfer, dec!(0));
        assert_eq!(fees.early_repayment, None);
        assert_eq!(fees.mortgage_discharge, None);
    }

    #[test]
    fn test_absent_fees_are_not_serialized() {
        let policy = LendingPolicy::default();
        let fees = compute_fees(&policy, &request(LoanPurpose::CashOut, None), dec!(100_000));
        let json = serde_json::to_value(&fees).unwrap();

        assert!(json.get("early_repayment").is_none());
        assert!(json.get("mortgage_discharge").is_none());
    }
}
