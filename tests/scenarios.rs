use chrono::NaiveDate;
use emi_schedule::{
    generate_batch, generate_schedule, AllocationLedger, InstallmentStatus, InvalidTermsError, LoanTerms,
    Money, Payment, Periodicity, Rate, Schedule, ScheduleError, TermsField,
};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(s: &str) -> Money {
    Money::from_str_exact(s).unwrap()
}

fn terms(principal: i64, rate: u32, tenure: u32, periodicity: Periodicity, start: NaiveDate) -> LoanTerms {
    LoanTerms {
        principal: Money::from_major(principal),
        annual_rate: Rate::from_percentage(rate),
        tenure_count: tenure,
        periodicity,
        start_date: start,
    }
}

#[test]
fn monthly_personal_loan() {
    let schedule = generate_schedule(&terms(50_000, 24, 12, Periodicity::Monthly, date(2024, 1, 1))).unwrap();

    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.first_due_date(), Some(date(2024, 2, 1)));
    assert_eq!(schedule.installment_amount(), money("4727.98"));
    assert_eq!(schedule.get(12).unwrap().outstanding_principal_after, Money::ZERO);
    assert_eq!(schedule.total_principal(), Money::from_major(50_000));
}

#[test]
fn weekly_microfinance_loan() {
    let schedule = generate_schedule(&terms(15_000, 24, 14, Periodicity::Weekly, date(2025, 3, 20))).unwrap();

    let due_dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
    assert_eq!(due_dates.len(), 14);
    assert_eq!(due_dates[0], date(2025, 3, 27));
    assert_eq!(due_dates[1], date(2025, 4, 3));
    assert_eq!(due_dates[13], date(2025, 6, 26));
    assert_eq!(schedule.get(14).unwrap().outstanding_principal_after, Money::ZERO);
}

#[test]
fn single_installment_loan() {
    let schedule = generate_schedule(&terms(20_000, 18, 1, Periodicity::Monthly, date(2024, 6, 1))).unwrap();

    assert_eq!(schedule.len(), 1);
    let only = &schedule.installments()[0];
    assert_eq!(only.principal_component, Money::from_major(20_000));
    // 20,000 * 18% / 12
    assert_eq!(only.interest_component, money("300.00"));
    assert_eq!(only.due_date, date(2024, 7, 1));
}

#[test]
fn interest_free_loan() {
    let schedule = generate_schedule(&terms(12_000, 0, 12, Periodicity::Monthly, date(2024, 1, 1))).unwrap();

    for installment in &schedule {
        assert_eq!(installment.total_due, Money::from_major(1_000));
        assert!(installment.interest_component.is_zero());
    }
}

#[test]
fn boundary_rejections() {
    let base = terms(10_000, 24, 12, Periodicity::Monthly, date(2024, 1, 1));

    let cases = [
        (LoanTerms { principal: Money::ZERO, ..base.clone() }, TermsField::Principal),
        (LoanTerms { tenure_count: 0, ..base.clone() }, TermsField::TenureCount),
        (
            LoanTerms { annual_rate: Rate::from_percent(dec!(-5)), ..base.clone() },
            TermsField::AnnualRatePercent,
        ),
    ];

    for (invalid, field) in cases {
        let err = generate_schedule(&invalid).unwrap_err();
        assert_eq!(err.field(), field);
    }

    let err = "BIWEEKLY".parse::<Periodicity>().unwrap_err();
    assert!(matches!(err, InvalidTermsError::UnsupportedPeriodicity { .. }));
}

#[test]
fn json_wire_format() {
    let schedule = generate_schedule(&terms(50_000, 24, 12, Periodicity::Monthly, date(2024, 1, 1))).unwrap();
    let json = schedule.installments_to_json().unwrap();

    assert!(json.contains(r#""dueDate":"2024-02-01""#));
    assert!(json.contains(r#""principalComponent":3727.98"#));
    assert!(json.contains(r#""interestComponent":1000.00"#));
    assert!(json.contains(r#""outstandingPrincipalAfter":0.00"#));
}

#[test]
fn terms_from_json_document() {
    let raw = r#"[
        {"principal": 15000, "annualRatePercent": 24, "tenureCount": 14, "periodicity": "WEEKLY", "startDate": "2025-03-20"},
        {"principal": 0, "annualRatePercent": 24, "tenureCount": 12, "periodicity": "MONTHLY", "startDate": "2024-01-01"}
    ]"#;
    let loans: Vec<LoanTerms> = serde_json::from_str(raw).unwrap();
    let results = generate_batch(&loans);

    assert_eq!(results[0].as_ref().unwrap().len(), 14);
    assert_eq!(results[1].as_ref().unwrap_err().field(), TermsField::Principal);
}

#[test]
fn allocation_runs_alongside_schedule() -> Result<(), ScheduleError> {
    let schedule = Schedule::generate(&terms(15_000, 24, 14, Periodicity::Weekly, date(2025, 3, 20)))?;
    let mut ledger = AllocationLedger::from_schedule(&schedule);

    for installment in schedule.iter().take(3) {
        ledger.apply(&Payment::new(installment.total_due, installment.due_date, "weekly collection"))?;
    }
    ledger.apply(&Payment::new(money("500.00"), date(2025, 4, 17), "part"))?;

    assert_eq!(ledger.status(3), Some(InstallmentStatus::Paid));
    assert_eq!(ledger.status(4), Some(InstallmentStatus::Partial));
    assert_eq!(ledger.status(5), Some(InstallmentStatus::Pending));
    // fourth installment fell due on 2025-04-17
    assert_eq!(ledger.days_past_due(date(2025, 4, 20)), 3);

    let paid: Money = schedule.iter().take(3).map(|i| i.total_due).sum();
    assert_eq!(ledger.outstanding(), schedule.total_payable() - paid - money("500.00"));
    Ok(())
}
