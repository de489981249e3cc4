/// weekly collections - apply payments against a weekly schedule and track dpd
use emi_schedule::chrono::{Duration, NaiveDate};
use emi_schedule::{AllocationLedger, LoanTerms, Money, Payment, Schedule};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let disbursed = NaiveDate::from_ymd_opt(2025, 3, 20).ok_or("bad date")?;
    let terms = LoanTerms::weekly(Money::from_major(15_000), dec!(24), 14, disbursed)?;
    let schedule = Schedule::generate(&terms)?;
    let mut ledger = AllocationLedger::from_schedule(&schedule);

    // borrower pays the first four weeks on time, then half of week five late
    for installment in schedule.iter().take(4) {
        ledger.apply(&Payment::new(installment.total_due, installment.due_date, "field collection"))?;
    }

    let fifth = schedule.get(5).ok_or("short schedule")?;
    let late_day = fifth.due_date + Duration::days(3);
    let allocation = ledger.apply(&Payment::new(Money::from_major(550), late_day, "partial"))?;

    for entry in &allocation.entries {
        println!(
            "installment {}: interest {}, principal {}",
            entry.sequence_number, entry.to_interest, entry.to_principal
        );
    }

    for position in ledger.positions().iter().take(6) {
        println!("#{} due {} {:?}", position.sequence_number, position.due_date, position.status);
    }

    println!("outstanding: {}", ledger.outstanding());
    println!("dpd on {}: {}", late_day, ledger.days_past_due(late_day));

    Ok(())
}
