use log::{debug, warn};
use rust_decimal::Decimal;

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::errors::InvalidTermsError;
use crate::types::TermsField;

use super::{Installment, Schedule};

/// fixed-installment (annuity) reducing-balance schedule generator
///
/// Stateless: every call works only on the terms it is given, so one engine can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine;

impl AmortizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// generate the full schedule for `terms`
    ///
    /// Each period charges interest on the balance at the start of the period,
    /// the rest of the rounded fixed payment goes to principal. The final
    /// installment (or any installment whose principal share would overshoot)
    /// takes exactly the remaining balance, so principal shares always sum to the
    /// loan principal.
    pub fn generate_schedule(&self, terms: &LoanTerms) -> Result<Schedule, InvalidTermsError> {
        if let Err(err) = terms.validate() {
            warn!("rejected loan terms ({}): {}", err.field(), err);
            return Err(err);
        }

        let rate = terms.periodic_rate();
        let payment = Money::from_decimal(periodic_payment(terms)?);
        let tenure = terms.tenure_count;

        let payable_overflow = || InvalidTermsError::NumericOverflow {
            field: TermsField::Principal,
            message: format!("total payable on principal {} exceeds decimal range", terms.principal),
        };

        let mut installments = Vec::with_capacity(tenure as usize);
        let mut balance = terms.principal;
        let mut due_date = terms.start_date;
        // every schedule total is bounded by this one
        let mut total_payable = Money::ZERO;

        for sequence_number in 1..=tenure {
            let interest_component = balance * rate;
            let mut principal_component = payment - interest_component;

            if sequence_number == tenure || principal_component > balance {
                principal_component = balance;
            }

            let total_due = principal_component
                .checked_add(interest_component)
                .ok_or_else(payable_overflow)?;
            total_payable = total_payable.checked_add(total_due).ok_or_else(payable_overflow)?;

            balance = (balance - principal_component).max(Money::ZERO);
            // validation already bounded the maturity date
            due_date = terms
                .periodicity
                .advance(due_date)
                .ok_or(InvalidTermsError::DateOutOfRange {
                    start_date: terms.start_date,
                    tenure,
                })?;

            installments.push(Installment {
                sequence_number,
                due_date,
                principal_component,
                interest_component,
                total_due,
                outstanding_principal_after: balance,
            });
        }

        debug!(
            "generated {} {} installments of {} for principal {} at {}",
            tenure, terms.periodicity, payment, terms.principal, terms.annual_rate
        );

        Ok(Schedule::new(terms.clone(), payment, installments))
    }

    /// fixed periodic payment for `terms`, rounded to currency precision
    pub fn calculate_installment_amount(&self, terms: &LoanTerms) -> Result<Money, InvalidTermsError> {
        terms.validate()?;
        periodic_payment(terms).map(Money::from_decimal)
    }
}

/// generate schedule with the default engine
pub fn generate_schedule(terms: &LoanTerms) -> Result<Schedule, InvalidTermsError> {
    AmortizationEngine::new().generate_schedule(terms)
}

/// unrounded fixed payment
fn periodic_payment(terms: &LoanTerms) -> Result<Decimal, InvalidTermsError> {
    let principal = terms.principal.as_decimal();
    let periods = Decimal::from(terms.tenure_count);
    let r = terms.periodic_rate();

    if r.is_zero() {
        return Ok(principal / periods);
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(r, terms.tenure_count)?;
    let denominator = compound - Decimal::ONE;

    // rate below decimal resolution, (1 + r)^n collapses to exactly one
    if denominator <= Decimal::ZERO {
        return Ok(principal / periods);
    }

    let numerator = principal
        .checked_mul(r)
        .and_then(|x| x.checked_mul(compound))
        .ok_or_else(|| InvalidTermsError::NumericOverflow {
            field: TermsField::Principal,
            message: format!("payment for principal {} exceeds decimal range", terms.principal),
        })?;

    numerator
        .checked_div(denominator)
        .ok_or_else(|| InvalidTermsError::NumericOverflow {
            field: TermsField::AnnualRatePercent,
            message: "payment division out of range".to_string(),
        })
}

/// (1 + r)^n by repeated squaring
fn compound_factor(r: Decimal, n: u32) -> Result<Decimal, InvalidTermsError> {
    let overflow = || InvalidTermsError::NumericOverflow {
        field: TermsField::AnnualRatePercent,
        message: format!("(1 + {})^{} exceeds decimal range", r.normalize(), n),
    };

    let mut base = Decimal::ONE.checked_add(r).ok_or_else(overflow)?;
    let mut exponent = n;
    let mut result = Decimal::ONE;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.checked_mul(base).ok_or_else(overflow)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = base.checked_mul(base).ok_or_else(overflow)?;
        }
    }

    Ok(result)
}
