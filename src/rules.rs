//! Entitlement rules by termination reason.
//!
//! Which amounts an employee receives depends on why the contract
//! ended.  Rather than scattering conditionals through the engine, the
//! rules live in a single immutable table, [`PROFILES`], with one
//! [`EntitlementProfile`] per [`TerminationReason`].  The engine looks a
//! profile up once per calculation and consults its flags uniformly.

use crate::models::TerminationReason;
use serde::{Deserialize, Serialize};

/// What a termination reason entitles the employee to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementProfile {
    pub reason: TerminationReason,
    /// Proportional (not yet vested) vacation is owed.  Vested vacation
    /// is owed regardless.
    pub proportional_vacation: bool,
    pub proportional_thirteenth: bool,
    /// An indemnified notice period is owed when the caller selected it.
    pub notice_indemnity: bool,
    pub fgts_penalty: bool,
    /// Penalty on the FGTS balance, in percent: 0, 20 or 40.
    pub fgts_penalty_percent: u8,
    /// Share of the FGTS balance the employee may withdraw, in percent.
    pub fgts_withdrawable_percent: u8,
    pub unemployment_insurance: bool,
}

/// The rule base, in [`TerminationReason::ALL`] order.
pub static PROFILES: [EntitlementProfile; 7] = [
    EntitlementProfile {
        reason: TerminationReason::EmployerNoCause,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: true,
        fgts_penalty: true,
        fgts_penalty_percent: 40,
        fgts_withdrawable_percent: 100,
        unemployment_insurance: true,
    },
    EntitlementProfile {
        reason: TerminationReason::EmployerWithCause,
        proportional_vacation: false,
        proportional_thirteenth: false,
        notice_indemnity: false,
        fgts_penalty: false,
        fgts_penalty_percent: 0,
        fgts_withdrawable_percent: 0,
        unemployment_insurance: false,
    },
    EntitlementProfile {
        reason: TerminationReason::EmployeeResignation,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: false,
        fgts_penalty: false,
        fgts_penalty_percent: 0,
        fgts_withdrawable_percent: 0,
        unemployment_insurance: false,
    },
    // Art. 484-A CLT: half notice, 20% penalty, 80% withdrawal.
    EntitlementProfile {
        reason: TerminationReason::MutualAgreement,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: true,
        fgts_penalty: true,
        fgts_penalty_percent: 20,
        fgts_withdrawable_percent: 80,
        unemployment_insurance: false,
    },
    EntitlementProfile {
        reason: TerminationReason::ContractExpiry,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: false,
        fgts_penalty: false,
        fgts_penalty_percent: 0,
        fgts_withdrawable_percent: 100,
        unemployment_insurance: false,
    },
    EntitlementProfile {
        reason: TerminationReason::Retirement,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: false,
        fgts_penalty: false,
        fgts_penalty_percent: 0,
        fgts_withdrawable_percent: 100,
        unemployment_insurance: false,
    },
    EntitlementProfile {
        reason: TerminationReason::EmployerDeath,
        proportional_vacation: true,
        proportional_thirteenth: true,
        notice_indemnity: false,
        fgts_penalty: false,
        fgts_penalty_percent: 0,
        fgts_withdrawable_percent: 100,
        unemployment_insurance: false,
    },
];

/// Look up the profile for a termination reason.
pub fn profile_for(reason: TerminationReason) -> &'static EntitlementProfile {
    let index = match reason {
        TerminationReason::EmployerNoCause => 0,
        TerminationReason::EmployerWithCause => 1,
        TerminationReason::EmployeeResignation => 2,
        TerminationReason::MutualAgreement => 3,
        TerminationReason::ContractExpiry => 4,
        TerminationReason::Retirement => 5,
        TerminationReason::EmployerDeath => 6,
    };
    &PROFILES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reason_has_its_own_profile() {
        for reason in TerminationReason::ALL {
            assert_eq!(profile_for(reason).reason, reason);
        }
    }

    #[test]
    fn test_penalty_percentages() {
        for profile in PROFILES.iter() {
            assert!(matches!(profile.fgts_penalty_percent, 0 | 20 | 40));
            assert!(profile.fgts_withdrawable_percent <= 100);
            // A zero percentage only makes sense when no penalty applies.
            assert_eq!(profile.fgts_penalty, profile.fgts_penalty_percent > 0);
        }
        assert_eq!(
            profile_for(TerminationReason::EmployerNoCause).fgts_penalty_percent,
            40
        );
        assert_eq!(
            profile_for(TerminationReason::MutualAgreement).fgts_penalty_percent,
            20
        );
    }

    #[test]
    fn test_with_cause_denies_everything_optional() {
        let p = profile_for(TerminationReason::EmployerWithCause);
        assert!(!p.proportional_vacation);
        assert!(!p.proportional_thirteenth);
        assert!(!p.notice_indemnity);
        assert!(!p.fgts_penalty);
        assert_eq!(p.fgts_withdrawable_percent, 0);
        assert!(!p.unemployment_insurance);
    }

    #[test]
    fn test_resignation_keeps_proportional_items() {
        let p = profile_for(TerminationReason::EmployeeResignation);
        assert!(p.proportional_vacation);
        assert!(p.proportional_thirteenth);
        assert!(!p.notice_indemnity);
        assert!(!p.fgts_penalty);
    }
}
