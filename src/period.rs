//! Calendar arithmetic for standard contracts.
//!
//! Severance items are counted in months, but employment rarely ends
//! on a monthly anniversary.  [`Tenure`] splits an [`EmploymentPeriod`]
//! into whole calendar months plus the days worked in the termination
//! month, and applies the CLT 15-day rule: a fraction of more than 14
//! days counts as a full month, anything less is dropped.

use crate::models::{EmploymentPeriod, WorkedPeriod};
use chrono::Datelike;

/// Fractions above this many days count as a whole month.
pub const FRACTION_THRESHOLD_DAYS: u32 = 14;

/// Elapsed service decomposed into whole months and trailing days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tenure {
    pub whole_months: u32,
    /// Days worked in the termination month.
    pub proportional_days: u32,
    /// Calendar days from admission to termination, both inclusive.
    pub total_days: u32,
}

impl Tenure {
    /// Decompose a period.  Admission and termination on the same day
    /// is zero elapsed time; a reversed period also yields zero.
    pub fn between(period: &EmploymentPeriod) -> Self {
        let admission = period.admission_date;
        let termination = period.termination_date;
        if termination <= admission {
            return Tenure::default();
        }

        let mut months = (termination.year() - admission.year()) * 12
            + termination.month() as i32
            - admission.month() as i32;
        if termination.day() < admission.day() {
            months -= 1;
        }

        let same_month =
            admission.year() == termination.year() && admission.month() == termination.month();
        // Within one month the inclusive span never exceeds its length.
        let proportional_days = if same_month {
            termination.day() - admission.day() + 1
        } else {
            termination.day()
        };

        Tenure {
            whole_months: months.max(0) as u32,
            proportional_days,
            total_days: ((termination - admission).num_days() + 1) as u32,
        }
    }

    /// Whether the trailing days count as one more month.
    pub fn fraction_counts(&self) -> bool {
        self.proportional_days > FRACTION_THRESHOLD_DAYS
    }

    /// Whole months plus the rounded-up fraction.  Used for the 13th
    /// salary and FGTS.
    pub fn counted_months(&self) -> u32 {
        self.whole_months + u32::from(self.fraction_counts())
    }

    /// Complete 12-month periods, each of which vests one vacation.
    pub fn complete_years(&self) -> u32 {
        self.whole_months / 12
    }

    /// Months of the current, not yet vested, vacation period.
    pub fn proportional_vacation_months(&self) -> u32 {
        self.whole_months % 12 + u32::from(self.fraction_counts())
    }

    pub fn worked_period(&self) -> WorkedPeriod {
        WorkedPeriod {
            years: self.complete_years(),
            months: self.whole_months % 12,
            days: self.proportional_days,
            total_days: self.total_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> EmploymentPeriod {
        EmploymentPeriod::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
    }

    #[test]
    fn test_months_and_days_across_months() {
        let tenure = Tenure::between(&period((2024, 1, 1), (2024, 9, 15)));
        assert_eq!(tenure.whole_months, 8);
        assert_eq!(tenure.proportional_days, 15);
        assert!(tenure.fraction_counts());
        assert_eq!(tenure.counted_months(), 9);
    }

    #[test]
    fn test_month_decremented_before_anniversary_day() {
        let tenure = Tenure::between(&period((2024, 1, 20), (2024, 9, 5)));
        assert_eq!(tenure.whole_months, 7);
        assert_eq!(tenure.proportional_days, 5);
        assert_eq!(tenure.counted_months(), 7);
    }

    #[test]
    fn test_same_month_counts_inclusive_days() {
        let tenure = Tenure::between(&period((2024, 3, 5), (2024, 3, 20)));
        assert_eq!(tenure.whole_months, 0);
        assert_eq!(tenure.proportional_days, 16);
        assert_eq!(tenure.counted_months(), 1);
        assert_eq!(tenure.total_days, 16);
    }

    #[test]
    fn test_fifteen_day_boundary() {
        let on_14th = Tenure::between(&period((2024, 1, 1), (2024, 9, 14)));
        let on_15th = Tenure::between(&period((2024, 1, 1), (2024, 9, 15)));
        assert_eq!(on_14th.counted_months() + 1, on_15th.counted_months());
        assert_eq!(
            on_14th.proportional_vacation_months() + 1,
            on_15th.proportional_vacation_months()
        );
    }

    #[test]
    fn test_zero_elapsed_time() {
        let tenure = Tenure::between(&period((2024, 5, 10), (2024, 5, 10)));
        assert_eq!(tenure, Tenure::default());
    }

    #[test]
    fn test_multi_year_split() {
        let tenure = Tenure::between(&period((2021, 3, 1), (2024, 7, 20)));
        assert_eq!(tenure.whole_months, 40);
        assert_eq!(tenure.complete_years(), 3);
        assert_eq!(tenure.proportional_vacation_months(), 5);
        let worked = tenure.worked_period();
        assert_eq!((worked.years, worked.months, worked.days), (3, 4, 20));
    }

    #[test]
    fn test_whole_month_within_february() {
        let tenure = Tenure::between(&period((2024, 2, 1), (2024, 2, 29)));
        assert_eq!(tenure.whole_months, 0);
        assert_eq!(tenure.proportional_days, 29);
        assert_eq!(tenure.counted_months(), 1);
        assert_eq!(tenure.total_days, 29);
    }
}
