use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::TermsField;

/// loan terms that cannot produce a schedule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTermsError {
    #[error("principal must be positive: got {principal}")]
    NonPositivePrincipal {
        principal: Money,
    },

    #[error("tenure must be at least one installment: got {tenure}")]
    InvalidTenure {
        tenure: u32,
    },

    #[error("annual rate must not be negative: got {rate}")]
    NegativeRate {
        rate: Rate,
    },

    #[error("unsupported periodicity: {value}")]
    UnsupportedPeriodicity {
        value: String,
    },

    #[error("numeric overflow in {field}: {message}")]
    NumericOverflow {
        field: TermsField,
        message: String,
    },

    #[error("{tenure} installments from {start_date} run past the end of the calendar")]
    DateOutOfRange {
        start_date: NaiveDate,
        tenure: u32,
    },
}

impl InvalidTermsError {
    /// the loan term responsible for the failure
    pub fn field(&self) -> TermsField {
        match self {
            InvalidTermsError::NonPositivePrincipal { .. } => TermsField::Principal,
            InvalidTermsError::InvalidTenure { .. } => TermsField::TenureCount,
            InvalidTermsError::NegativeRate { .. } => TermsField::AnnualRatePercent,
            InvalidTermsError::UnsupportedPeriodicity { .. } => TermsField::Periodicity,
            InvalidTermsError::NumericOverflow { field, .. } => *field,
            InvalidTermsError::DateOutOfRange { .. } => TermsField::StartDate,
        }
    }
}

/// payment that cannot be allocated against a schedule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid loan terms: {0}")]
    InvalidTerms(#[from] InvalidTermsError),

    #[error("allocation failed: {0}")]
    Allocation(#[from] AllocationError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
