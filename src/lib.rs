pub mod allocation;
pub mod batch;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod schedule;
pub mod types;

// re-export key types
pub use allocation::{AllocationEntry, AllocationLedger, InstallmentPosition, Payment, PaymentAllocation, PaymentId};
pub use batch::{generate_batch, BatchSummary};
pub use config::{LoanTerms, LoanTermsBuilder};
pub use decimal::{Money, Rate};
pub use errors::{AllocationError, InvalidTermsError, Result, ScheduleError};
pub use schedule::{generate_schedule, AmortizationEngine, Installment, Schedule, ScheduleView};
pub use types::{InstallmentStatus, Periodicity, SequenceNumber, TermsField};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
