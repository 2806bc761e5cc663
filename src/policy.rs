//! Jurisdictional lending rules.
//!
//! Every constant the calculators consult lives here so a caller can load an
//! adjusted rule set from JSON. `LendingPolicy::default()` carries the
//! current UAE rules; a partial JSON document overrides only the keys it names.

use std::fs;
use std::path::Path;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendingResult;
use crate::types::{BorrowerClass, LoanPurpose, Money, PropertyClass, Rate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    /// Share of the revolving limit treated as a monthly minimum payment.
    pub credit_card_payment_rate: Rate,
    /// Maximum age at maturity for residents.
    pub resident_max_age: u32,
    /// Maximum age at maturity for non-residents.
    pub non_resident_max_age: u32,
    /// Absolute term ceiling in years, regardless of age headroom.
    pub max_term_years: u32,
    /// Flat LTV for residents.
    pub resident_ltv: Rate,
    pub non_resident_ltv: NonResidentLtv,
    /// Share of gross monthly income that may go to debt service.
    pub debt_service_ratio: Rate,
    /// Baseline rate used when no contractual rate is supplied.
    pub stress_base_rate: Rate,
    /// Buffer added on top of the baseline for the stress test.
    pub stress_buffer: Rate,
    pub default_new_rate: Rate,
    pub default_existing_rate: Rate,
    pub fees: FeePolicy,
    pub threshold: ThresholdPolicy,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            credit_card_payment_rate: dec!(0.05),
            resident_max_age: 70,
            non_resident_max_age: 65,
            max_term_years: 25,
            resident_ltv: dec!(0.80),
            non_resident_ltv: NonResidentLtv::default(),
            debt_service_ratio: dec!(0.5),
            stress_base_rate: dec!(0.035),
            stress_buffer: dec!(0.02),
            default_new_rate: dec!(0.045),
            default_existing_rate: dec!(0.058),
            fees: FeePolicy::default(),
            threshold: ThresholdPolicy::default(),
        }
    }
}

impl LendingPolicy {
    /// Parses a (possibly partial) JSON policy document.
    pub fn from_json_str(json: &str) -> LendingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> LendingResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn max_age_at_maturity(&self, borrower: BorrowerClass) -> u32 {
        match borrower {
            BorrowerClass::Resident => self.resident_max_age,
            BorrowerClass::NonResident => self.non_resident_max_age,
        }
    }

    /// Annual rate used when the caller supplies none.
    pub fn stress_test_rate(&self) -> Rate {
        self.stress_base_rate + self.stress_buffer
    }
}

/// Tiered LTV table applied to non-resident borrowers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonResidentLtv {
    /// First homes valued at or below this amount get `first_home_standard`.
    pub first_home_value_threshold: Money,
    pub first_home_standard: Rate,
    pub first_home_high_value: Rate,
    pub second_home: Rate,
    pub under_construction: Rate,
    pub fallback: Rate,
}

impl Default for NonResidentLtv {
    fn default() -> Self {
        Self {
            first_home_value_threshold: dec!(5_000_000),
            first_home_standard: dec!(0.80),
            first_home_high_value: dec!(0.70),
            second_home: dec!(0.60),
            under_construction: dec!(0.50),
            fallback: dec!(0.70),
        }
    }
}

impl NonResidentLtv {
    pub fn lookup(&self, class: PropertyClass, property_value: Money) -> Rate {
        match class {
            PropertyClass::FirstHome if property_value <= self.first_home_value_threshold => {
                self.first_home_standard
            }
            PropertyClass::FirstHome => self.first_home_high_value,
            PropertyClass::SecondHome => self.second_home,
            PropertyClass::UnderConstruction => self.under_construction,
            PropertyClass::Other => self.fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeePolicy {
    pub evaluation: Money,
    pub registration_rate: Rate,
    pub registration_flat: Money,
    pub bank_fee_rate: Rate,
    pub bank_fee_cap: Money,
    pub purchase_transfer_rate: Rate,
    pub balance_transfer_rate: Rate,
    pub cash_out_transfer_rate: Rate,
    pub combined_transfer_rate: Rate,
    pub early_repayment_rate: Rate,
    pub early_repayment_cap: Money,
    pub mortgage_discharge: Money,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            evaluation: dec!(3000),
            registration_rate: dec!(0.0025),
            registration_flat: dec!(290),
            bank_fee_rate: dec!(0.01),
            bank_fee_cap: dec!(10_000),
            purchase_transfer_rate: dec!(0.02),
            balance_transfer_rate: dec!(0.01),
            cash_out_transfer_rate: dec!(0.015),
            combined_transfer_rate: dec!(0.025),
            early_repayment_rate: dec!(0.01),
            early_repayment_cap: dec!(10_000),
            mortgage_discharge: dec!(1500),
        }
    }
}

impl FeePolicy {
    /// Transfer fee rate on the property value. `has_transfer_balance` is
    /// false for a balance transfer that names no balance, which then
    /// carries no transfer fee.
    pub fn transfer_rate(&self, purpose: LoanPurpose, has_transfer_balance: bool) -> Option<Rate> {
        match purpose {
            LoanPurpose::Purchase => Some(self.purchase_transfer_rate),
            LoanPurpose::BalanceTransfer if has_transfer_balance => {
                Some(self.balance_transfer_rate)
            }
            LoanPurpose::CashOut => Some(self.cash_out_transfer_rate),
            LoanPurpose::Combined => Some(self.combined_transfer_rate),
            LoanPurpose::BalanceTransfer | LoanPurpose::Other => None,
        }
    }
}

/// Margins used by the suggested switch-over rate heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    /// Minimum reduction below the current rate before a switch pays.
    pub minimum_reduction: Rate,
    pub safety_margin: Rate,
    pub floor: Rate,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            minimum_reduction: dec!(0.005),
            safety_margin: dec!(0.0025),
            floor: dec!(0.01),
        }
    }
}
