//! Data models for the Rescisão Engine.
//!
//! The `models` module defines the serialisable structs and enums that
//! describe an employment relationship, the event that ended it and the
//! itemised amounts owed.  These types derive `Serialize` and
//! `Deserialize` so they can be received from and returned to a
//! presentation layer without any translation.  They form the basis of
//! the engine's input and output structures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The calendar interval of an employment relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentPeriod {
    /// First day of employment ("data de admissão").
    pub admission_date: NaiveDate,
    /// Last day of employment ("data de demissão").  Must not precede
    /// `admission_date`.
    pub termination_date: NaiveDate,
}

impl EmploymentPeriod {
    pub fn new(admission_date: NaiveDate, termination_date: NaiveDate) -> Self {
        Self {
            admission_date,
            termination_date,
        }
    }
}

/// Why the employment relationship ended.
///
/// Each reason maps to exactly one [`crate::rules::EntitlementProfile`].
/// The Portuguese identifiers used by existing front-ends are accepted
/// as aliases when deserialising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Dismissal by the employer without just cause.
    #[serde(alias = "dispensa_sem_justa_causa")]
    EmployerNoCause,
    /// Dismissal by the employer for just cause.
    #[serde(alias = "dispensa_com_justa_causa")]
    EmployerWithCause,
    /// The employee resigned.
    #[serde(alias = "pedido_demissao")]
    EmployeeResignation,
    /// Termination agreed by both parties.
    #[serde(alias = "comum_acordo")]
    MutualAgreement,
    /// A fixed-term contract reached its end.
    #[serde(alias = "termino_contrato")]
    ContractExpiry,
    /// The employee retired.
    #[serde(alias = "aposentadoria")]
    Retirement,
    /// Death of the employer when the employer is an individual.
    #[serde(alias = "falecimento_empregador")]
    EmployerDeath,
}

impl TerminationReason {
    /// Every reason, in rule-table order.
    pub const ALL: [TerminationReason; 7] = [
        TerminationReason::EmployerNoCause,
        TerminationReason::EmployerWithCause,
        TerminationReason::EmployeeResignation,
        TerminationReason::MutualAgreement,
        TerminationReason::ContractExpiry,
        TerminationReason::Retirement,
        TerminationReason::EmployerDeath,
    ];

    /// Whether a probationary contract can end for this reason.
    pub fn applies_to_probation(self) -> bool {
        !matches!(
            self,
            TerminationReason::Retirement | TerminationReason::EmployerDeath
        )
    }

    /// Whether the employer initiated the termination.
    pub fn is_employer_initiated(self) -> bool {
        matches!(
            self,
            TerminationReason::EmployerNoCause | TerminationReason::EmployerWithCause
        )
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminationReason::EmployerNoCause => "employer_no_cause",
            TerminationReason::EmployerWithCause => "employer_with_cause",
            TerminationReason::EmployeeResignation => "employee_resignation",
            TerminationReason::MutualAgreement => "mutual_agreement",
            TerminationReason::ContractExpiry => "contract_expiry",
            TerminationReason::Retirement => "retirement",
            TerminationReason::EmployerDeath => "employer_death",
        };
        f.write_str(name)
    }
}

/// How the notice period ("aviso prévio") was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeMode {
    /// The notice period is paid instead of worked.
    #[serde(alias = "indenizado")]
    Indemnified,
    /// The notice period was worked; its salary is part of the regular
    /// payroll, not the severance.
    #[serde(alias = "trabalhado")]
    Worked,
    #[serde(alias = "nao_aplicavel")]
    NotApplicable,
}

/// The kind of contract, carrying the fields only that kind needs.
///
/// A notice mode exists only on standard contracts, so a notice
/// indemnity cannot be requested for a probationary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractType {
    /// Indefinite-term contract.
    #[serde(alias = "normal")]
    Standard { notice: NoticeMode },
    /// Fixed-term trial contract of at most 90 days.
    #[serde(alias = "experiencia")]
    Probationary {
        /// Days worked so far, between 1 and 90.
        elapsed_days: u32,
    },
}

/// Input to the severance engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross monthly salary in reais.  Normalised to two decimal places
    /// before any computation.
    pub monthly_salary: Decimal,
    pub period: EmploymentPeriod,
    pub contract: ContractType,
    pub reason: TerminationReason,
    /// Whether the employer deposited FGTS for this employee.
    pub has_fgts: bool,
}

/// A derived note attached to a result.
///
/// Observations carry no money; they tell the caller which follow-up
/// rights or obligations apply.  `Display` renders a short sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// The employee may withdraw this share of the FGTS balance.
    FgtsWithdrawal { percent: u8 },
    /// The FGTS balance stays locked in the account.
    FgtsWithdrawalBlocked,
    /// The employee may apply for unemployment insurance.
    UnemploymentInsurance,
    /// No FGTS deposits were declared, so no FGTS amount was computed.
    NoFgtsDeposits,
    /// Only fully vested vacation periods are owed.
    AccruedVacationOnly,
    /// The employee left a probationary contract early and may owe the
    /// employer an indemnity for the unexpired days.
    EmployeeOwesProbationIndemnity { remaining_days: u32 },
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::FgtsWithdrawal { percent } => {
                write!(f, "entitled to withdraw {}% of FGTS", percent)
            }
            Observation::FgtsWithdrawalBlocked => f.write_str("FGTS balance is not withdrawable"),
            Observation::UnemploymentInsurance => {
                f.write_str("eligible for unemployment insurance")
            }
            Observation::NoFgtsDeposits => f.write_str("no FGTS deposits declared"),
            Observation::AccruedVacationOnly => {
                f.write_str("only fully accrued vacation periods are owed")
            }
            Observation::EmployeeOwesProbationIndemnity { remaining_days } => write!(
                f,
                "employee may owe the employer an indemnity for {} unexpired probation days",
                remaining_days
            ),
        }
    }
}

/// Years, months and days of service, as shown in a calculation memo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedPeriod {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Calendar days from admission to termination, both inclusive.
    pub total_days: u32,
}

/// The intermediate figures behind a result ("memória de cálculo").
///
/// Nothing here feeds back into the totals; it exists so a caller can
/// explain how each item was reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub worked_period: WorkedPeriod,
    /// Monthly salary divided by 30.
    pub daily_salary: Decimal,
    pub fgts_balance: Decimal,
    pub fgts_penalty: Decimal,
    pub fgts_penalty_percent: u8,
    /// Months counted towards proportional vacation (after the 15-day
    /// rule).
    pub vacation_months: u32,
    /// Complete 12-month periods of vested vacation.
    pub accrued_vacation_periods: u32,
    pub thirteenth_months: u32,
    /// 30 days plus 3 per complete year of service, at most 90.  This is
    /// informational; the notice indemnity itself is one monthly salary.
    pub statutory_notice_days: u32,
    pub remaining_probation_days: u32,
}

/// The itemised severance owed to the employee.
///
/// All monetary fields are in reais, rounded to two decimal places and
/// never negative.  `total` is the exact sum of the six items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Salary for the days worked in the final month.
    pub salary_balance: Decimal,
    /// Accrued and proportional vacation, including the 1/3 bonus.
    pub vacation: Decimal,
    pub thirteenth_salary: Decimal,
    /// FGTS balance plus the statutory penalty, if any.
    pub fgts: Decimal,
    pub notice_indemnity: Decimal,
    /// Early-termination indemnity for probationary contracts.
    pub probation_indemnity: Decimal,
    pub total: Decimal,
    pub observations: Vec<Observation>,
    pub details: CalculationDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portuguese_aliases_deserialize() {
        let input: CalculationInput = serde_json::from_value(json!({
            "monthly_salary": 3000.0,
            "period": {"admission_date": "2024-01-01", "termination_date": "2024-09-15"},
            "contract": {"type": "normal", "notice": "indenizado"},
            "reason": "dispensa_sem_justa_causa",
            "has_fgts": true
        }))
        .unwrap();
        assert_eq!(input.reason, TerminationReason::EmployerNoCause);
        assert_eq!(
            input.contract,
            ContractType::Standard {
                notice: NoticeMode::Indemnified
            }
        );
    }

    #[test]
    fn test_unknown_reason_is_rejected() {
        let err = serde_json::from_value::<TerminationReason>(json!("layoff"));
        assert!(err.is_err());
    }

    #[test]
    fn test_probationary_contract_shape() {
        let contract: ContractType =
            serde_json::from_value(json!({"type": "probationary", "elapsed_days": 45})).unwrap();
        assert_eq!(contract, ContractType::Probationary { elapsed_days: 45 });
    }

    #[test]
    fn test_observation_display() {
        let obs = Observation::FgtsWithdrawal { percent: 80 };
        assert_eq!(obs.to_string(), "entitled to withdraw 80% of FGTS");
        assert_eq!(
            Observation::UnemploymentInsurance.to_string(),
            "eligible for unemployment insurance"
        );
    }

    #[test]
    fn test_probation_reason_subset() {
        assert!(TerminationReason::EmployerNoCause.applies_to_probation());
        assert!(TerminationReason::ContractExpiry.applies_to_probation());
        assert!(!TerminationReason::Retirement.applies_to_probation());
        assert!(!TerminationReason::EmployerDeath.applies_to_probation());
    }
}
