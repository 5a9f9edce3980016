//! Date checks that depend on the current day.
//!
//! The engine never reads the clock, so "is this date in the future"
//! is decided here, against a [`Clock`] supplied by the caller.  The
//! HTTP layer uses [`SystemClock`]; tests pin the date with
//! [`FixedClock`].

use crate::error::{EngineResult, InvalidInputError};
use crate::models::EmploymentPeriod;
use chrono::NaiveDate;

/// A source for today's date.
///
/// Clocks must be thread‑safe (`Send + Sync`) because the API shares
/// one across concurrent requests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Check that the period is ordered and does not reach past today.
pub fn validate_period(period: &EmploymentPeriod, clock: &dyn Clock) -> EngineResult<()> {
    let today = clock.today();
    if period.admission_date > today {
        return Err(InvalidInputError::DateInFuture {
            field: "admission_date",
            date: period.admission_date,
            today,
        });
    }
    if period.termination_date > today {
        return Err(InvalidInputError::DateInFuture {
            field: "termination_date",
            date: period.termination_date,
            today,
        });
    }
    if period.termination_date < period.admission_date {
        return Err(InvalidInputError::TerminationBeforeAdmission {
            admission: period.admission_date,
            termination: period.termination_date,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepts_termination_today() {
        let clock = FixedClock(date(2024, 9, 15));
        let period = EmploymentPeriod::new(date(2024, 1, 1), date(2024, 9, 15));
        assert_eq!(validate_period(&period, &clock), Ok(()));
    }

    #[test]
    fn test_rejects_future_termination() {
        let clock = FixedClock(date(2024, 9, 14));
        let period = EmploymentPeriod::new(date(2024, 1, 1), date(2024, 9, 15));
        let err = validate_period(&period, &clock).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::DateInFuture {
                field: "termination_date",
                date: date(2024, 9, 15),
                today: date(2024, 9, 14),
            }
        );
    }

    #[test]
    fn test_rejects_future_admission_first() {
        let clock = FixedClock(date(2024, 1, 1));
        let period = EmploymentPeriod::new(date(2024, 6, 1), date(2024, 3, 1));
        assert!(matches!(
            validate_period(&period, &clock),
            Err(InvalidInputError::DateInFuture {
                field: "admission_date",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_reversed_period() {
        let clock = FixedClock(date(2025, 1, 1));
        let period = EmploymentPeriod::new(date(2024, 6, 1), date(2024, 3, 1));
        assert!(matches!(
            validate_period(&period, &clock),
            Err(InvalidInputError::TerminationBeforeAdmission { .. })
        ));
    }
}
