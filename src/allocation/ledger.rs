use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::AllocationError;
use crate::schedule::Schedule;
use crate::types::{InstallmentStatus, SequenceNumber};

use super::{AllocationEntry, Payment, PaymentAllocation};

/// repayment position of one installment, keyed by its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPosition {
    pub sequence_number: SequenceNumber,
    pub due_date: NaiveDate,
    pub interest_due: Money,
    pub principal_due: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub status: InstallmentStatus,
}

impl InstallmentPosition {
    pub fn remaining_interest(&self) -> Money {
        self.interest_due - self.interest_paid
    }

    pub fn remaining_principal(&self) -> Money {
        self.principal_due - self.principal_paid
    }

    pub fn remaining(&self) -> Money {
        self.remaining_interest() + self.remaining_principal()
    }

    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// settle interest then principal, returns (to_interest, to_principal)
    fn settle(&mut self, available: Money) -> (Money, Money) {
        let to_interest = available.min(self.remaining_interest());
        let to_principal = (available - to_interest).min(self.remaining_principal());

        self.interest_paid += to_interest;
        self.principal_paid += to_principal;
        self.status = if self.remaining().is_zero() {
            InstallmentStatus::Paid
        } else if self.interest_paid.is_positive() || self.principal_paid.is_positive() {
            InstallmentStatus::Partial
        } else {
            InstallmentStatus::Pending
        };

        (to_interest, to_principal)
    }
}

/// payments applied against a schedule, kept alongside it
///
/// The ledger copies what each installment owes when it is created; the schedule
/// itself is never touched. Payments settle installments strictly in sequence
/// order, interest before principal within each installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationLedger {
    positions: Vec<InstallmentPosition>,
    entries: Vec<AllocationEntry>,
    excess: Money,
}

impl AllocationLedger {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let positions = schedule
            .iter()
            .map(|installment| InstallmentPosition {
                sequence_number: installment.sequence_number,
                due_date: installment.due_date,
                interest_due: installment.interest_component,
                principal_due: installment.principal_component,
                interest_paid: Money::ZERO,
                principal_paid: Money::ZERO,
                // a zero-amount installment has nothing left to collect
                status: if installment.total_due.is_zero() {
                    InstallmentStatus::Paid
                } else {
                    InstallmentStatus::Pending
                },
            })
            .collect();

        Self {
            positions,
            entries: Vec::new(),
            excess: Money::ZERO,
        }
    }

    /// apply a payment to unpaid installments in order
    pub fn apply(&mut self, payment: &Payment) -> Result<PaymentAllocation, AllocationError> {
        if let Err(err) = payment.validate() {
            warn!("rejected payment {}: {}", payment.id, err);
            return Err(err);
        }

        let mut remaining = payment.amount;
        let mut entries = Vec::new();

        for position in self.positions.iter_mut().filter(|p| !p.is_paid()) {
            if remaining.is_zero() {
                break;
            }

            let (to_interest, to_principal) = position.settle(remaining);
            remaining -= to_interest + to_principal;

            entries.push(AllocationEntry {
                payment_id: payment.id,
                sequence_number: position.sequence_number,
                to_interest,
                to_principal,
                applied_on: payment.received_on,
            });
        }

        self.excess += remaining;
        self.entries.extend(entries.iter().cloned());

        debug!(
            "payment {} of {} covered {} installments, excess {}",
            payment.id,
            payment.amount,
            entries.len(),
            remaining
        );

        Ok(PaymentAllocation {
            payment_id: payment.id,
            amount: payment.amount,
            entries,
            excess: remaining,
            remaining_balance: self.outstanding(),
        })
    }

    pub fn positions(&self) -> &[InstallmentPosition] {
        &self.positions
    }

    pub fn position(&self, sequence_number: SequenceNumber) -> Option<&InstallmentPosition> {
        let index = sequence_number.checked_sub(1)? as usize;
        self.positions.get(index)
    }

    pub fn status(&self, sequence_number: SequenceNumber) -> Option<InstallmentStatus> {
        self.position(sequence_number).map(|p| p.status)
    }

    /// every allocation recorded so far, in application order
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn entries_for(&self, sequence_number: SequenceNumber) -> impl Iterator<Item = &AllocationEntry> {
        self.entries
            .iter()
            .filter(move |e| e.sequence_number == sequence_number)
    }

    /// total received beyond what the schedule owes
    pub fn excess(&self) -> Money {
        self.excess
    }

    /// interest and principal still owed across all installments
    pub fn outstanding(&self) -> Money {
        self.positions.iter().map(InstallmentPosition::remaining).sum()
    }

    pub fn total_applied(&self) -> Money {
        self.entries.iter().map(AllocationEntry::total).sum()
    }

    pub fn is_settled(&self) -> bool {
        self.positions.iter().all(InstallmentPosition::is_paid)
    }

    /// earliest installment not yet fully paid
    pub fn next_unpaid(&self) -> Option<&InstallmentPosition> {
        self.positions.iter().find(|p| !p.is_paid())
    }

    /// unpaid amounts of installments due strictly before `as_of`
    pub fn overdue_amount(&self, as_of: NaiveDate) -> Money {
        self.positions
            .iter()
            .filter(|p| !p.is_paid() && p.due_date < as_of)
            .map(InstallmentPosition::remaining)
            .sum()
    }

    /// days past due of the oldest unpaid installment, zero when nothing is overdue
    pub fn days_past_due(&self, as_of: NaiveDate) -> u32 {
        self.next_unpaid()
            .filter(|p| p.due_date < as_of)
            .map(|p| u32::try_from((as_of - p.due_date).num_days()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    /// days past due at the provider's current date
    pub fn days_past_due_now(&self, time_provider: &SafeTimeProvider) -> u32 {
        self.days_past_due(time_provider.now().date_naive())
    }
}
