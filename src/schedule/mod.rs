pub mod amortization;
pub mod view;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::InvalidTermsError;
use crate::types::SequenceNumber;

pub use amortization::{generate_schedule, AmortizationEngine};
pub use view::ScheduleView;

/// one scheduled installment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub sequence_number: SequenceNumber,
    pub due_date: NaiveDate,
    pub principal_component: Money,
    /// interest on the balance outstanding at the start of the period
    pub interest_component: Money,
    pub total_due: Money,
    pub outstanding_principal_after: Money,
}

/// ordered installments for one loan, produced in a single call and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schedule {
    terms: LoanTerms,
    installment_amount: Money,
    installments: Vec<Installment>,
}

impl Schedule {
    pub(crate) fn new(terms: LoanTerms, installment_amount: Money, installments: Vec<Installment>) -> Self {
        Self {
            terms,
            installment_amount,
            installments,
        }
    }

    /// generate payment schedule
    pub fn generate(terms: &LoanTerms) -> Result<Self, InvalidTermsError> {
        generate_schedule(terms)
    }

    /// terms this schedule was generated from
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// fixed periodic payment, rounded to currency precision
    pub fn installment_amount(&self) -> Money {
        self.installment_amount
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installment> {
        self.installments.iter()
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// get installment by 1-based sequence number
    pub fn get(&self, sequence_number: SequenceNumber) -> Option<&Installment> {
        let index = sequence_number.checked_sub(1)? as usize;
        self.installments.get(index)
    }

    pub fn first_due_date(&self) -> Option<NaiveDate> {
        self.installments.first().map(|i| i.due_date)
    }

    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.installments.last().map(|i| i.due_date)
    }

    pub fn total_principal(&self) -> Money {
        self.installments.iter().map(|i| i.principal_component).sum()
    }

    pub fn total_interest(&self) -> Money {
        self.installments.iter().map(|i| i.interest_component).sum()
    }

    pub fn total_payable(&self) -> Money {
        self.installments.iter().map(|i| i.total_due).sum()
    }

    /// remaining principal once `sequence_number` installments are paid
    pub fn balance_after(&self, sequence_number: SequenceNumber) -> Money {
        self.get(sequence_number)
            .map(|i| i.outstanding_principal_after)
            .unwrap_or(self.terms.principal)
    }

    /// fresh schedule for the same loan at a corrected rate; `self` is left as is
    pub fn regenerate_with_rate(&self, annual_rate: Rate) -> Result<Schedule, InvalidTermsError> {
        generate_schedule(&self.terms.with_rate(annual_rate))
    }

    pub fn into_installments(self) -> Vec<Installment> {
        self.installments
    }

    /// serializable view with summary totals
    pub fn view(&self) -> ScheduleView {
        ScheduleView::from_schedule(self)
    }

    /// pretty-printed json of the view
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        self.view().to_json_pretty()
    }

    /// bare json array of installments
    pub fn installments_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.installments)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Installment;
    type IntoIter = std::slice::Iter<'a, Installment>;

    fn into_iter(self) -> Self::IntoIter {
        self.installments.iter()
    }
}
