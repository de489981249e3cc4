// property tests for schedule invariants over random valid loan terms

use chrono::{Duration, Months, NaiveDate};
use emi_schedule::{generate_schedule, LoanTerms, Money, Periodicity, Rate};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn periodicity() -> impl Strategy<Value = Periodicity> {
    prop_oneof![Just(Periodicity::Monthly), Just(Periodicity::Weekly)]
}

fn start_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~40 years
    (0i64..14_600).prop_map(|offset| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset))
}

prop_compose! {
    fn loan_terms()(
        principal_cents in 100i64..1_000_000_000,
        rate_bps in 0u32..6_000,
        tenure in 1u32..=360,
        periodicity in periodicity(),
        start_date in start_date(),
    ) -> LoanTerms {
        LoanTerms {
            principal: Money::from_minor(principal_cents),
            annual_rate: Rate::from_bps(rate_bps),
            tenure_count: tenure,
            periodicity,
            start_date,
        }
    }
}

prop_compose! {
    // at least 1,000 per installment and moderate compounding, so rounding residue
    // stays well below one installment
    fn sizeable_loan_terms()(
        tenure in 1u32..=120,
        per_installment_cents in 100_000i64..50_000_000,
        rate_bps in 0u32..3_600,
        periodicity in periodicity(),
        start_date in start_date(),
    ) -> LoanTerms {
        LoanTerms {
            principal: Money::from_minor(per_installment_cents * tenure as i64),
            annual_rate: Rate::from_bps(rate_bps),
            tenure_count: tenure,
            periodicity,
            start_date,
        }
    }
}

proptest! {
    #[test]
    fn principal_fully_amortized(terms in loan_terms()) {
        let schedule = generate_schedule(&terms).unwrap();

        prop_assert_eq!(schedule.len(), terms.tenure_count as usize);
        prop_assert_eq!(schedule.total_principal(), terms.principal);
        prop_assert_eq!(schedule.installments().last().unwrap().outstanding_principal_after, Money::ZERO);
    }

    #[test]
    fn outstanding_never_increases(terms in loan_terms()) {
        let schedule = generate_schedule(&terms).unwrap();

        let mut previous = terms.principal;
        for installment in &schedule {
            prop_assert!(installment.outstanding_principal_after <= previous);
            prop_assert_eq!(installment.outstanding_principal_after, previous - installment.principal_component);
            previous = installment.outstanding_principal_after;
        }
    }

    #[test]
    fn no_negative_components(terms in loan_terms()) {
        let schedule = generate_schedule(&terms).unwrap();

        for installment in &schedule {
            prop_assert!(!installment.principal_component.is_negative());
            prop_assert!(!installment.interest_component.is_negative());
            prop_assert!(!installment.outstanding_principal_after.is_negative());
            prop_assert_eq!(installment.total_due, installment.principal_component + installment.interest_component);
        }
    }

    #[test]
    fn due_dates_step_one_period(terms in loan_terms()) {
        let schedule = generate_schedule(&terms).unwrap();

        let mut previous = terms.start_date;
        for (index, installment) in schedule.iter().enumerate() {
            prop_assert_eq!(installment.sequence_number as usize, index + 1);
            prop_assert!(installment.due_date > previous);

            let expected = match terms.periodicity {
                Periodicity::Monthly => previous.checked_add_months(Months::new(1)).unwrap(),
                Periodicity::Weekly => previous + Duration::days(7),
            };
            prop_assert_eq!(installment.due_date, expected);
            previous = installment.due_date;
        }
    }

    #[test]
    fn generation_is_deterministic(terms in loan_terms()) {
        let first = generate_schedule(&terms).unwrap();
        let second = generate_schedule(&terms.clone()).unwrap();

        prop_assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fixed_payment_until_last(terms in sizeable_loan_terms()) {
        let schedule = generate_schedule(&terms).unwrap();
        let (last, rest) = schedule.installments().split_last().unwrap();

        for installment in rest {
            prop_assert_eq!(installment.total_due, schedule.installment_amount());
        }
        // last differs from the fixed payment only by rounding, at most a cent per
        // period carried forward with interest
        let growth = Decimal::ONE + terms.periodic_rate();
        let mut carried = Decimal::ZERO;
        for _ in 0..terms.tenure_count {
            carried = carried * growth + Money::CENT.as_decimal();
        }
        let residual = (last.total_due - schedule.installment_amount()).abs();
        let bound = Money::from_decimal(carried);
        prop_assert!(residual <= bound, "residual {} over bound {}", residual, bound);
    }

    #[test]
    fn zero_rate_splits_evenly(
        principal_cents in 100i64..1_000_000_000,
        tenure in 1u32..=120,
        periodicity in periodicity(),
    ) {
        let terms = LoanTerms {
            principal: Money::from_minor(principal_cents),
            annual_rate: Rate::ZERO,
            tenure_count: tenure,
            periodicity,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let schedule = generate_schedule(&terms).unwrap();
        let share = terms.principal / Decimal::from(tenure);

        prop_assert_eq!(schedule.installment_amount(), share);
        prop_assert!(schedule.iter().all(|i| i.interest_component.is_zero()));
        prop_assert_eq!(schedule.total_principal(), terms.principal);
    }
}
