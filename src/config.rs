use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::InvalidTermsError;
use crate::types::Periodicity;

/// loan parameters a schedule is generated from
///
/// Built once per schedule request. Fields are public so callers can map stored
/// loan-account records straight in; [`LoanTerms::validate`] runs again inside the
/// engine, so an invalid value never yields installments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Money,
    #[serde(rename = "annualRatePercent")]
    pub annual_rate: Rate,
    pub tenure_count: u32,
    pub periodicity: Periodicity,
    /// disbursement date, the first due date is one period after it
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// create validated terms
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        tenure_count: u32,
        periodicity: Periodicity,
        start_date: NaiveDate,
    ) -> Result<Self, InvalidTermsError> {
        let terms = Self {
            principal,
            annual_rate,
            tenure_count,
            periodicity,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// monthly installment loan, rate given as a percentage figure
    pub fn monthly(
        principal: Money,
        annual_rate_percent: Decimal,
        months: u32,
        start_date: NaiveDate,
    ) -> Result<Self, InvalidTermsError> {
        Self::new(
            principal,
            Rate::from_percent(annual_rate_percent),
            months,
            Periodicity::Monthly,
            start_date,
        )
    }

    /// weekly installment loan, rate given as a percentage figure
    pub fn weekly(
        principal: Money,
        annual_rate_percent: Decimal,
        weeks: u32,
        start_date: NaiveDate,
    ) -> Result<Self, InvalidTermsError> {
        Self::new(
            principal,
            Rate::from_percent(annual_rate_percent),
            weeks,
            Periodicity::Weekly,
            start_date,
        )
    }

    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// check input constraints, principal first, then tenure, then rate, then the
    /// maturity date
    pub fn validate(&self) -> Result<(), InvalidTermsError> {
        if !self.principal.is_positive() {
            return Err(InvalidTermsError::NonPositivePrincipal {
                principal: self.principal,
            });
        }

        if self.tenure_count < 1 {
            return Err(InvalidTermsError::InvalidTenure {
                tenure: self.tenure_count,
            });
        }

        if self.annual_rate.is_negative() {
            return Err(InvalidTermsError::NegativeRate {
                rate: self.annual_rate,
            });
        }

        // the maturity date bounds every due date before it
        if self.maturity_date().is_none() {
            return Err(InvalidTermsError::DateOutOfRange {
                start_date: self.start_date,
                tenure: self.tenure_count,
            });
        }

        Ok(())
    }

    /// due date of the final installment, `None` past the end of the calendar
    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.periodicity.advance_by(self.start_date, self.tenure_count)
    }

    /// unrounded interest rate applied per installment period
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_rate.periodic_rate(self.periodicity)
    }

    /// same terms at a corrected annual rate
    pub fn with_rate(&self, annual_rate: Rate) -> Self {
        Self {
            annual_rate,
            ..self.clone()
        }
    }
}

/// builder for loan terms, defaults to a monthly schedule at zero interest
#[derive(Debug, Clone)]
pub struct LoanTermsBuilder {
    principal: Money,
    annual_rate: Rate,
    tenure_count: u32,
    periodicity: Periodicity,
    start_date: Option<NaiveDate>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self {
            principal: Money::ZERO,
            annual_rate: Rate::ZERO,
            tenure_count: 0,
            periodicity: Periodicity::Monthly,
            start_date: None,
        }
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    pub fn rate(mut self, annual_rate: Rate) -> Self {
        self.annual_rate = annual_rate;
        self
    }

    pub fn rate_percent(mut self, annual_rate_percent: Decimal) -> Self {
        self.annual_rate = Rate::from_percent(annual_rate_percent);
        self
    }

    pub fn tenure(mut self, tenure_count: u32) -> Self {
        self.tenure_count = tenure_count;
        self
    }

    pub fn periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// build validated terms, disbursement date defaults to today
    pub fn build(self) -> Result<LoanTerms, InvalidTermsError> {
        let start_date = self
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        LoanTerms::new(
            self.principal,
            self.annual_rate,
            self.tenure_count,
            self.periodicity,
            start_date,
        )
    }
}

impl Default for LoanTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
