//! Severance computation engine.
//!
//! The `engine` module is responsible for turning a [`CalculationInput`]
//! into a [`CalculationResult`].  Computation is pure: the same input
//! always yields the same result, nothing is read from the environment
//! and nothing is retained between calls.  Entitlements are taken from
//! the rule table in [`crate::rules`]; calendar arithmetic lives in
//! [`crate::period`].  [`compute_batch`] uses the [`rayon`] crate to
//! spread independent calculations across CPU cores.

use crate::error::{EngineResult, InvalidInputError};
use crate::models::{
    CalculationDetails, CalculationInput, CalculationResult, ContractType, EmploymentPeriod,
    NoticeMode, Observation, TerminationReason, WorkedPeriod,
};
use crate::period::Tenure;
use crate::rules::{profile_for, EntitlementProfile};
use rayon::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

/// Monthly FGTS deposit as a share of salary.
pub const FGTS_RATE: Decimal = dec!(0.08);
/// Maximum length of a probationary contract, in days.
pub const PROBATION_MAX_DAYS: u32 = 90;
/// Probationary contracts only earn vacation and 13th beyond this.
pub const PROBATION_MIN_DAYS_FOR_PROPORTIONALS: u32 = 15;
/// Largest monthly salary accepted.  Keeps every intermediate product
/// inside `Decimal`'s range.
pub const MAX_MONTHLY_SALARY: Decimal = dec!(1000000000);
/// Notice period grows by this many days per complete year of service.
const NOTICE_DAYS_BASE: u32 = 30;
const NOTICE_DAYS_PER_YEAR: u32 = 3;
const NOTICE_DAYS_MAX: u32 = 90;

const DAYS_PER_MONTH: Decimal = dec!(30);
const DAYS_PER_YEAR: Decimal = dec!(360);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Compute the severance owed for one employment relationship.
///
/// Dates are taken as given; rejecting dates in the future is the job of
/// [`crate::validation`].  Returns an [`InvalidInputError`] when the
/// input violates the calling contract (salary not positive or above
/// [`MAX_MONTHLY_SALARY`], reversed
/// period, out-of-range probation days or a reason that cannot end a
/// probationary contract).
pub fn compute(input: CalculationInput) -> EngineResult<CalculationResult> {
    check_input(&input)?;
    let salary = round_money(input.monthly_salary);
    let profile = profile_for(input.reason);

    let items = match input.contract {
        ContractType::Standard { notice } => {
            standard_items(salary, &input.period, notice, input.reason, profile, input.has_fgts)
        }
        ContractType::Probationary { elapsed_days } => {
            probationary_items(salary, elapsed_days, input.reason, profile, input.has_fgts)
        }
    };
    let result = items.finish(&input, profile);
    debug!(
        reason = %input.reason,
        total = %result.total,
        "severance computed"
    );
    Ok(result)
}

/// Compute many independent requests in parallel.
///
/// Results come back in input order.  A rejected input only affects its
/// own slot.
pub fn compute_batch(inputs: Vec<CalculationInput>) -> Vec<EngineResult<CalculationResult>> {
    inputs.into_par_iter().map(compute).collect()
}

fn check_input(input: &CalculationInput) -> EngineResult<()> {
    // Negative salaries round to zero as well.
    if round_money(input.monthly_salary) <= Decimal::ZERO {
        return Err(InvalidInputError::NonPositiveSalary {
            salary: input.monthly_salary,
        });
    }
    if input.monthly_salary > MAX_MONTHLY_SALARY {
        return Err(InvalidInputError::SalaryAboveLimit {
            salary: input.monthly_salary,
            max: MAX_MONTHLY_SALARY,
        });
    }
    let EmploymentPeriod {
        admission_date,
        termination_date,
    } = input.period;
    if termination_date < admission_date {
        return Err(InvalidInputError::TerminationBeforeAdmission {
            admission: admission_date,
            termination: termination_date,
        });
    }
    if let ContractType::Probationary { elapsed_days } = input.contract {
        if !(1..=PROBATION_MAX_DAYS).contains(&elapsed_days) {
            return Err(InvalidInputError::ElapsedDaysOutOfRange { days: elapsed_days });
        }
        if !input.reason.applies_to_probation() {
            return Err(InvalidInputError::ReasonNotApplicable {
                reason: input.reason,
            });
        }
    }
    Ok(())
}

/// Unrounded amounts gathered by one of the contract branches.
#[derive(Debug, Default)]
struct Items {
    salary_balance: Decimal,
    accrued_vacation: Decimal,
    proportional_vacation: Decimal,
    thirteenth_salary: Decimal,
    fgts_balance: Decimal,
    fgts_penalty: Decimal,
    notice_indemnity: Decimal,
    probation_indemnity: Decimal,
    details: CalculationDetails,
}

impl Items {
    fn finish(self, input: &CalculationInput, profile: &EntitlementProfile) -> CalculationResult {
        let salary_balance = round_money(self.salary_balance);
        let vacation = round_money(self.accrued_vacation + self.proportional_vacation);
        let thirteenth_salary = round_money(self.thirteenth_salary);
        let fgts = round_money(self.fgts_balance + self.fgts_penalty);
        let notice_indemnity = round_money(self.notice_indemnity);
        let probation_indemnity = round_money(self.probation_indemnity);
        let total = salary_balance
            + vacation
            + thirteenth_salary
            + fgts
            + notice_indemnity
            + probation_indemnity;

        let mut details = self.details;
        details.fgts_balance = round_money(self.fgts_balance);
        details.fgts_penalty = round_money(self.fgts_penalty);

        CalculationResult {
            salary_balance,
            vacation,
            thirteenth_salary,
            fgts,
            notice_indemnity,
            probation_indemnity,
            total,
            observations: observations(input, profile),
            details,
        }
    }
}

fn standard_items(
    salary: Decimal,
    period: &EmploymentPeriod,
    notice: NoticeMode,
    reason: TerminationReason,
    profile: &EntitlementProfile,
    has_fgts: bool,
) -> Items {
    let tenure = Tenure::between(period);
    let daily_salary = round_money(salary / DAYS_PER_MONTH);
    if tenure.total_days == 0 {
        return Items {
            details: CalculationDetails {
                daily_salary,
                fgts_penalty_percent: applied_penalty_percent(profile),
                ..CalculationDetails::default()
            },
            ..Items::default()
        };
    }

    let salary_balance = salary * Decimal::from(tenure.proportional_days) / DAYS_PER_MONTH;

    // Vested periods are owed whatever the reason.
    let accrued_periods = tenure.complete_years();
    let accrued_vacation = with_vacation_bonus(salary * Decimal::from(accrued_periods));
    let vacation_months = if profile.proportional_vacation {
        tenure.proportional_vacation_months()
    } else {
        0
    };
    let proportional_vacation =
        with_vacation_bonus(salary * Decimal::from(vacation_months) / MONTHS_PER_YEAR);

    let thirteenth_months = if profile.proportional_thirteenth {
        tenure.counted_months()
    } else {
        0
    };
    let thirteenth_salary = salary * Decimal::from(thirteenth_months) / MONTHS_PER_YEAR;

    let notice_indemnity = match notice {
        NoticeMode::Indemnified if profile.notice_indemnity => {
            if reason == TerminationReason::MutualAgreement {
                salary / dec!(2)
            } else {
                salary
            }
        }
        _ => Decimal::ZERO,
    };
    let statutory_notice_days = if profile.notice_indemnity {
        (NOTICE_DAYS_BASE + NOTICE_DAYS_PER_YEAR * tenure.complete_years()).min(NOTICE_DAYS_MAX)
    } else {
        0
    };

    let fgts_balance = if has_fgts {
        salary * FGTS_RATE * Decimal::from(tenure.counted_months())
    } else {
        Decimal::ZERO
    };
    let fgts_penalty = fgts_penalty(fgts_balance, profile);

    Items {
        salary_balance,
        accrued_vacation,
        proportional_vacation,
        thirteenth_salary,
        fgts_balance,
        fgts_penalty,
        notice_indemnity,
        probation_indemnity: Decimal::ZERO,
        details: CalculationDetails {
            worked_period: tenure.worked_period(),
            daily_salary,
            fgts_penalty_percent: applied_penalty_percent(profile),
            vacation_months,
            accrued_vacation_periods: accrued_periods,
            thirteenth_months,
            statutory_notice_days,
            ..CalculationDetails::default()
        },
    }
}

fn probationary_items(
    salary: Decimal,
    elapsed_days: u32,
    reason: TerminationReason,
    profile: &EntitlementProfile,
    has_fgts: bool,
) -> Items {
    let days = Decimal::from(elapsed_days);
    let remaining_days = PROBATION_MAX_DAYS - elapsed_days;

    let salary_balance = salary * days / DAYS_PER_MONTH;

    // Art. 479 CLT: half the pay for the unexpired term.  What an
    // employee owes for leaving early (Art. 480) is not an amount owed
    // to the employee and is left out here.
    let probation_indemnity = if reason == TerminationReason::EmployerNoCause {
        salary * Decimal::from(remaining_days) / dec!(2) / DAYS_PER_MONTH
    } else {
        Decimal::ZERO
    };

    let (proportional_vacation, thirteenth_salary) =
        if elapsed_days > PROBATION_MIN_DAYS_FOR_PROPORTIONALS {
            let base = salary * days / DAYS_PER_YEAR;
            let vacation = if profile.proportional_vacation {
                with_vacation_bonus(base)
            } else {
                Decimal::ZERO
            };
            let thirteenth = if profile.proportional_thirteenth {
                base
            } else {
                Decimal::ZERO
            };
            (vacation, thirteenth)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

    let fgts_balance = if has_fgts {
        salary * days / DAYS_PER_MONTH * FGTS_RATE
    } else {
        Decimal::ZERO
    };
    let fgts_penalty = fgts_penalty(fgts_balance, profile);

    Items {
        salary_balance,
        accrued_vacation: Decimal::ZERO,
        proportional_vacation,
        thirteenth_salary,
        fgts_balance,
        fgts_penalty,
        notice_indemnity: Decimal::ZERO,
        probation_indemnity,
        details: CalculationDetails {
            worked_period: WorkedPeriod {
                years: 0,
                months: elapsed_days / 30,
                days: elapsed_days % 30,
                total_days: elapsed_days,
            },
            daily_salary: round_money(salary / DAYS_PER_MONTH),
            fgts_penalty_percent: applied_penalty_percent(profile),
            remaining_probation_days: remaining_days,
            ..CalculationDetails::default()
        },
    }
}

fn observations(input: &CalculationInput, profile: &EntitlementProfile) -> Vec<Observation> {
    let mut notes = Vec::new();
    if !input.has_fgts {
        notes.push(Observation::NoFgtsDeposits);
    } else if profile.fgts_withdrawable_percent > 0 {
        notes.push(Observation::FgtsWithdrawal {
            percent: profile.fgts_withdrawable_percent,
        });
    } else {
        notes.push(Observation::FgtsWithdrawalBlocked);
    }
    if !profile.proportional_vacation {
        notes.push(Observation::AccruedVacationOnly);
    }
    match input.contract {
        ContractType::Standard { .. } => {
            if profile.unemployment_insurance {
                notes.push(Observation::UnemploymentInsurance);
            }
        }
        ContractType::Probationary { elapsed_days } => {
            let remaining_days = PROBATION_MAX_DAYS.saturating_sub(elapsed_days);
            if input.reason == TerminationReason::EmployeeResignation && remaining_days > 0 {
                notes.push(Observation::EmployeeOwesProbationIndemnity { remaining_days });
            }
        }
    }
    notes
}

fn fgts_penalty(balance: Decimal, profile: &EntitlementProfile) -> Decimal {
    if profile.fgts_penalty {
        balance * Decimal::from(profile.fgts_penalty_percent) / dec!(100)
    } else {
        Decimal::ZERO
    }
}

fn applied_penalty_percent(profile: &EntitlementProfile) -> u8 {
    if profile.fgts_penalty {
        profile.fgts_penalty_percent
    } else {
        0
    }
}

/// Add the constitutional one-third vacation bonus.
fn with_vacation_bonus(base: Decimal) -> Decimal {
    base + base / dec!(3)
}

/// Floor at zero and round to centavos.
fn round_money(value: Decimal) -> Decimal {
    value
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
