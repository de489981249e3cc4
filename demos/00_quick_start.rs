/// quick start - generate a monthly EMI schedule and print it as json
use emi_schedule::chrono::NaiveDate;
use emi_schedule::{generate_schedule, LoanTerms, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 50,000 at 24% a year over 12 months
    let terms = LoanTerms::monthly(
        Money::from_major(50_000),
        dec!(24),
        12,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    )?;

    let schedule = generate_schedule(&terms)?;

    println!("fixed payment: {}", schedule.installment_amount());
    println!("total interest: {}", schedule.total_interest());
    println!("{}", schedule.to_json_pretty()?);

    Ok(())
}
