use log::{debug, info};
use rayon::prelude::*;

use crate::config::LoanTerms;
use crate::errors::InvalidTermsError;
use crate::schedule::{AmortizationEngine, Schedule};

/// generate schedules for many loans in parallel
///
/// Results line up with `loans` by index. A loan with invalid terms yields its own
/// error and does not affect the rest of the batch.
pub fn generate_batch(loans: &[LoanTerms]) -> Vec<Result<Schedule, InvalidTermsError>> {
    let engine = AmortizationEngine::new();

    let results: Vec<_> = loans
        .par_iter()
        .map(|terms| engine.generate_schedule(terms))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        "generated {} schedules ({} rejected)",
        results.len() - failed,
        failed
    );

    results
}

/// outcome counts for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub generated: usize,
    pub rejected: usize,
    pub installments: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<Schedule, InvalidTermsError>]) -> Self {
        results.iter().fold(Self::default(), |mut acc, result| {
            match result {
                Ok(schedule) => {
                    acc.generated += 1;
                    acc.installments += schedule.len();
                }
                Err(err) => {
                    debug!("batch entry rejected on {}: {}", err.field(), err);
                    acc.rejected += 1;
                }
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::Periodicity;
    use crate::schedule::generate_schedule;
    use chrono::NaiveDate;

    fn loan(principal: i64, tenure: u32) -> LoanTerms {
        LoanTerms {
            principal: Money::from_major(principal),
            annual_rate: Rate::from_percentage(24),
            tenure_count: tenure,
            periodicity: Periodicity::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let loans: Vec<LoanTerms> = (1..=50).map(|i| loan(1_000 * i, (i % 24 + 1) as u32)).collect();
        let results = generate_batch(&loans);

        assert_eq!(results.len(), loans.len());
        for (terms, result) in loans.iter().zip(&results) {
            let schedule = result.as_ref().unwrap();
            assert_eq!(schedule.terms(), terms);
            assert_eq!(schedule, &generate_schedule(terms).unwrap());
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let loans = vec![loan(5_000, 12), loan(0, 12), loan(5_000, 0), loan(7_500, 6)];
        let results = generate_batch(&loans);

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(InvalidTermsError::NonPositivePrincipal { .. })));
        assert!(matches!(results[2], Err(InvalidTermsError::InvalidTenure { .. })));
        assert!(results[3].is_ok());

        let summary = BatchSummary::from_results(&results);
        assert_eq!(
            summary,
            BatchSummary {
                generated: 2,
                rejected: 2,
                installments: 18,
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(generate_batch(&[]).is_empty());
        assert_eq!(BatchSummary::from_results(&[]), BatchSummary::default());
    }
}
