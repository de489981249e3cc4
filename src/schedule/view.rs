/// serialization support for schedules
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::Money;
use crate::schedule::{Installment, Schedule};

/// serializable view of a schedule with its summary figures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub terms: LoanTerms,
    pub summary: SummaryView,
    pub installments: Vec<Installment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub installment_amount: Money,
    pub installment_count: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_payable: Money,
    pub first_due_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        ScheduleView {
            terms: schedule.terms().clone(),
            summary: SummaryView {
                installment_amount: schedule.installment_amount(),
                installment_count: schedule.len() as u32,
                total_principal: schedule.total_principal(),
                total_interest: schedule.total_interest(),
                total_payable: schedule.total_payable(),
                first_due_date: schedule.first_due_date(),
                maturity_date: schedule.maturity_date(),
            },
            installments: schedule.installments().to_vec(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
