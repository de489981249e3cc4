pub mod ledger;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::AllocationError;
use crate::types::SequenceNumber;

pub use ledger::{AllocationLedger, InstallmentPosition};

/// unique identifier for a received payment
pub type PaymentId = Uuid;

/// payment received against a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Money,
    pub received_on: NaiveDate,
    pub reference: String,
}

impl Payment {
    pub fn new(amount: Money, received_on: NaiveDate, reference: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            received_on,
            reference: reference.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AllocationError> {
        if !self.amount.is_positive() {
            return Err(AllocationError::InvalidPaymentAmount { amount: self.amount });
        }
        Ok(())
    }
}

/// portion of one payment applied to one installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub payment_id: PaymentId,
    pub sequence_number: SequenceNumber,
    pub to_interest: Money,
    pub to_principal: Money,
    pub applied_on: NaiveDate,
}

impl AllocationEntry {
    pub fn total(&self) -> Money {
        self.to_interest + self.to_principal
    }
}

/// result of applying one payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAllocation {
    pub payment_id: PaymentId,
    pub amount: Money,
    pub entries: Vec<AllocationEntry>,
    /// left over once every installment is paid
    pub excess: Money,
    pub remaining_balance: Money,
}

impl PaymentAllocation {
    pub fn amount_applied(&self) -> Money {
        self.entries.iter().map(AllocationEntry::total).sum()
    }
}
