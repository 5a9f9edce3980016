//! Error types for the Rescisão Engine.
//!
//! The engine has no I/O and cannot fail transiently.  The only failures
//! are caller contract violations, reported as [`InvalidInputError`].

use crate::models::TerminationReason;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Input that the engine refuses to compute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("monthly salary must be positive, got {salary}")]
    NonPositiveSalary { salary: Decimal },

    #[error("monthly salary {salary} exceeds the supported maximum of {max}")]
    SalaryAboveLimit { salary: Decimal, max: Decimal },

    #[error("termination date {termination} precedes admission date {admission}")]
    TerminationBeforeAdmission {
        admission: NaiveDate,
        termination: NaiveDate,
    },

    #[error("probationary elapsed days must be between 1 and 90, got {days}")]
    ElapsedDaysOutOfRange { days: u32 },

    #[error("termination reason {reason} does not apply to a probationary contract")]
    ReasonNotApplicable { reason: TerminationReason },

    /// Raised by the validation layer, never by the engine itself.
    #[error("{field} {date} is after today ({today})")]
    DateInFuture {
        field: &'static str,
        date: NaiveDate,
        today: NaiveDate,
    },
}

pub type EngineResult<T> = Result<T, InvalidInputError>;
