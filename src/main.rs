//! emi command line
//!
//! Generates equal-installment amortization schedules for one loan or a batch of
//! loans and prints them as json, a table or csv.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

use emi_schedule::{
    generate_batch, generate_schedule, BatchSummary, Decimal, InvalidTermsError, LoanTerms, Money,
    Periodicity, Rate, Schedule,
};

/// Equal-installment loan schedule generator
#[derive(Parser)]
#[command(name = "emi", version, about = "Generate EMI amortization schedules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schedule for a single loan
    Schedule(ScheduleArgs),
    /// Generate schedules for every loan in a json array file
    Batch(BatchArgs),
}

#[derive(Args)]
struct ScheduleArgs {
    /// Read loan terms from a json file instead of flags
    #[arg(long, conflicts_with_all = ["principal", "rate", "tenure", "start_date"])]
    terms: Option<PathBuf>,

    /// Amount financed
    #[arg(long, required_unless_present = "terms")]
    principal: Option<Money>,

    /// Nominal annual interest rate in percent (24 for 24%)
    #[arg(long, required_unless_present = "terms")]
    rate: Option<Decimal>,

    /// Number of installments
    #[arg(long, required_unless_present = "terms")]
    tenure: Option<u32>,

    /// Installment frequency: monthly or weekly
    #[arg(long, default_value = "monthly")]
    periodicity: Periodicity,

    /// Disbursement date (YYYY-MM-DD), first installment falls one period later
    #[arg(long, required_unless_present = "terms")]
    start_date: Option<NaiveDate>,
}

#[derive(Args)]
struct BatchArgs {
    /// Json file holding an array of loan terms
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Csv,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Schedule(args) => run_schedule(args, cli.output),
        Commands::Batch(args) => run_batch(args, cli.output),
    };

    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn rejected(err: InvalidTermsError) -> anyhow::Error {
    anyhow!("loan setup rejected, check `{}`: {}", err.field(), err)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn terms_from_args(args: ScheduleArgs) -> Result<LoanTerms> {
    if let Some(path) = args.terms {
        return load_json(&path);
    }

    let principal = args.principal.context("--principal is required")?;
    let rate = args.rate.context("--rate is required")?;
    let tenure = args.tenure.context("--tenure is required")?;
    let start_date = args.start_date.context("--start-date is required")?;

    LoanTerms::new(principal, Rate::from_percent(rate), tenure, args.periodicity, start_date)
        .map_err(rejected)
}

fn run_schedule(args: ScheduleArgs, output: OutputFormat) -> Result<()> {
    let terms = terms_from_args(args)?;
    let schedule = generate_schedule(&terms).map_err(rejected)?;

    match output {
        OutputFormat::Json => println!("{}", schedule.to_json_pretty()?),
        OutputFormat::Table => print_table(&schedule),
        OutputFormat::Csv => write_csv(&[(0, &schedule)])?,
    }

    Ok(())
}

fn run_batch(args: BatchArgs, output: OutputFormat) -> Result<()> {
    let loans: Vec<LoanTerms> = load_json(&args.file)?;
    let results = generate_batch(&loans);
    let summary = BatchSummary::from_results(&results);

    match output {
        OutputFormat::Json => {
            let mut entries = Vec::with_capacity(results.len());
            for (index, result) in results.iter().enumerate() {
                let entry = match result {
                    Ok(schedule) => json!({
                        "index": index,
                        "schedule": serde_json::to_value(schedule.view())?,
                    }),
                    Err(err) => json!({
                        "index": index,
                        "error": { "field": err.field().to_string(), "message": err.to_string() },
                    }),
                };
                entries.push(entry);
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => {
            for (index, result) in results.iter().enumerate() {
                println!("loan #{}", index);
                match result {
                    Ok(schedule) => print_table(schedule),
                    Err(err) => println!("  rejected ({}): {}", err.field(), err),
                }
                println!();
            }
        }
        OutputFormat::Csv => {
            let schedules: Vec<(usize, &Schedule)> = results
                .iter()
                .enumerate()
                .filter_map(|(index, result)| result.as_ref().ok().map(|s| (index, s)))
                .collect();
            write_csv(&schedules)?;
        }
    }

    eprintln!(
        "{} schedules generated, {} rejected, {} installments",
        summary.generated, summary.rejected, summary.installments
    );

    Ok(())
}

fn print_table(schedule: &Schedule) {
    let terms = schedule.terms();
    println!(
        "principal {} at {} over {} {} installments, fixed payment {}",
        terms.principal,
        terms.annual_rate,
        terms.tenure_count,
        terms.periodicity,
        schedule.installment_amount()
    );
    println!(
        "{:>4} {:>12} {:>14} {:>14} {:>14} {:>16}",
        "No", "Due", "Principal", "Interest", "Total", "Outstanding"
    );
    println!("{}", "-".repeat(79));

    for installment in schedule {
        println!(
            "{:>4} {:>12} {:>14} {:>14} {:>14} {:>16}",
            installment.sequence_number,
            installment.due_date.to_string(),
            installment.principal_component,
            installment.interest_component,
            installment.total_due,
            installment.outstanding_principal_after
        );
    }

    println!("{}", "-".repeat(79));
    println!(
        "{:>4} {:>12} {:>14} {:>14} {:>14}",
        "",
        "",
        schedule.total_principal(),
        schedule.total_interest(),
        schedule.total_payable()
    );
}

fn write_csv(schedules: &[(usize, &Schedule)]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "loan",
        "sequenceNumber",
        "dueDate",
        "principalComponent",
        "interestComponent",
        "totalDue",
        "outstandingPrincipalAfter",
    ])?;

    for (index, schedule) in schedules {
        for installment in *schedule {
            writer.write_record([
                index.to_string(),
                installment.sequence_number.to_string(),
                installment.due_date.to_string(),
                installment.principal_component.to_string(),
                installment.interest_component.to_string(),
                installment.total_due.to_string(),
                installment.outstanding_principal_after.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
