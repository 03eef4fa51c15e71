//! Indemnified notice pay (*aviso prévio indenizado*).
//!
//! This module decides whether notice is paid in cash and, when it is,
//! projects the contract's effective end date forward by the notice days.
//! Every later entitlement is accrued against that effective date.

use chrono::{Days, NaiveDate};

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, Cents, NoticeType, TerminationInput, TerminationReason,
};

use super::accrual::ServiceAccrual;
use super::rounding::{floor_div, multiply};

/// The result of the notice pay calculation.
#[derive(Debug, Clone)]
pub struct NoticePayResult {
    /// Notice pay in centavos.
    pub amount: Cents,
    /// The end date downstream calculators accrue against.
    pub effective_end_date: NaiveDate,
    /// Whether the end date was projected by the notice days.
    pub projected: bool,
    /// A warning when indemnified notice was requested but not paid.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates notice pay and the effective end date.
///
/// Only a no-cause dismissal with indemnified notice pays anything:
/// `floor(salary / 30) × notice_days`. Resignation and just cause always
/// yield 0, as do worked or inapplicable notice.
///
/// Two policy flags shape the outcome:
/// - `notice_minimum_months`: below this many accrued months nothing is paid
/// - `project_indemnified_notice`: whether the paid notice days extend the
///   effective end date
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::{calculate_notice_pay, calculate_service_accrual};
/// use severance_engine::config::StatutoryConfig;
/// use severance_engine::models::{NoticeType, TerminationInput, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TerminationInput {
///     contract_start: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     contract_end: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
///     gross_monthly_salary: 151_800,
///     termination_reason: TerminationReason::NoCauseDismissal,
///     notice_type: NoticeType::Indemnified,
///     unused_vacation_periods: 0,
///     dependents_for_tax: 0,
///     alimony_percentage: Decimal::ZERO,
/// };
/// let config = StatutoryConfig::clt_2025();
/// let accrual = calculate_service_accrual(&input, &config, 1).accrual;
///
/// let result = calculate_notice_pay(&input, &accrual, &config, 2).unwrap();
/// assert_eq!(result.amount, 5_060 * 36);
/// assert_eq!(result.effective_end_date, NaiveDate::from_ymd_opt(2026, 1, 30).unwrap());
/// ```
pub fn calculate_notice_pay(
    input: &TerminationInput,
    accrual: &ServiceAccrual,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<NoticePayResult> {
    let policy = config.policy();
    let daily_rate = floor_div(input.gross_monthly_salary, config.accrual().days_per_month);

    let step_input = serde_json::json!({
        "termination_reason": input.termination_reason.as_str(),
        "notice_type": input.notice_type.as_str(),
        "notice_days": accrual.notice_days,
        "accrued_months": accrual.accrued_months,
        "notice_minimum_months": policy.notice_minimum_months,
        "project_indemnified_notice": policy.project_indemnified_notice
    });

    let not_paid = |reasoning: String, warning: Option<AuditWarning>| NoticePayResult {
        amount: 0,
        effective_end_date: input.contract_end,
        projected: false,
        warning,
        audit_step: AuditStep {
            step_number,
            rule_id: "notice_pay".to_string(),
            rule_name: "Indemnified Notice Pay".to_string(),
            legal_ref: "CLT art. 487".to_string(),
            input: step_input.clone(),
            output: serde_json::json!({
                "notice_pay": 0,
                "effective_end_date": input.contract_end.to_string(),
                "projected": false
            }),
            reasoning,
        },
    };

    if input.termination_reason != TerminationReason::NoCauseDismissal {
        let warning = (input.notice_type == NoticeType::Indemnified).then(|| AuditWarning {
            code: "INDEMNIFIED_NOTICE_NOT_OWED".to_string(),
            message: format!(
                "Indemnified notice ignored: the employer owes no notice on {}",
                input.termination_reason.as_str()
            ),
            severity: "low".to_string(),
        });
        return Ok(not_paid(
            format!(
                "No notice pay - termination reason is {} (only no-cause dismissal qualifies)",
                input.termination_reason.as_str()
            ),
            warning,
        ));
    }

    if input.notice_type != NoticeType::Indemnified {
        return Ok(not_paid(
            format!(
                "No notice pay - notice is {}, not indemnified",
                input.notice_type.as_str()
            ),
            None,
        ));
    }

    if accrual.accrued_months < policy.notice_minimum_months {
        let warning = AuditWarning {
            code: "NOTICE_BELOW_MINIMUM_MONTHS".to_string(),
            message: format!(
                "Notice pay withheld: {} accrued months is below the configured minimum of {}",
                accrual.accrued_months, policy.notice_minimum_months
            ),
            severity: "medium".to_string(),
        };
        return Ok(not_paid(
            format!(
                "No notice pay - {} accrued months is below the minimum of {}",
                accrual.accrued_months, policy.notice_minimum_months
            ),
            Some(warning),
        ));
    }

    let amount = multiply(daily_rate, i64::from(accrual.notice_days), "notice pay")?;

    let effective_end_date = if policy.project_indemnified_notice {
        input
            .contract_end
            .checked_add_days(Days::new(u64::from(accrual.notice_days)))
            .ok_or_else(|| {
                EngineError::computation(format!(
                    "projecting {} notice days past {} leaves the calendar",
                    accrual.notice_days, input.contract_end
                ))
            })?
    } else {
        input.contract_end
    };
    let projected = effective_end_date != input.contract_end;

    let audit_step = AuditStep {
        step_number,
        rule_id: "notice_pay".to_string(),
        rule_name: "Indemnified Notice Pay".to_string(),
        legal_ref: "CLT art. 487; Lei 12.506/2011".to_string(),
        input: step_input,
        output: serde_json::json!({
            "daily_rate": daily_rate,
            "notice_pay": amount,
            "effective_end_date": effective_end_date.to_string(),
            "projected": projected
        }),
        reasoning: if projected {
            format!(
                "{} per day x {} notice days = {}; effective end date projected to {}",
                daily_rate, accrual.notice_days, amount, effective_end_date
            )
        } else {
            format!(
                "{} per day x {} notice days = {}; effective end date kept at {}",
                daily_rate, accrual.notice_days, amount, effective_end_date
            )
        },
    };

    Ok(NoticePayResult {
        amount,
        effective_end_date,
        projected,
        warning: None,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::accrual::calculate_service_accrual;
    use crate::config::PolicyFlags;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_input(reason: TerminationReason, notice: NoticeType) -> TerminationInput {
        TerminationInput {
            contract_start: date(2023, 1, 15),
            contract_end: date(2025, 12, 25),
            gross_monthly_salary: 151_800,
            termination_reason: reason,
            notice_type: notice,
            unused_vacation_periods: 0,
            dependents_for_tax: 0,
            alimony_percentage: Decimal::ZERO,
        }
    }

    fn run(input: &TerminationInput, config: &StatutoryConfig) -> NoticePayResult {
        let accrual = calculate_service_accrual(input, config, 1).accrual;
        calculate_notice_pay(input, &accrual, config, 2).unwrap()
    }

    /// NP-001: no-cause indemnified notice pays and projects
    #[test]
    fn test_no_cause_indemnified_pays_and_projects() {
        let config = StatutoryConfig::clt_2025();
        let input = create_test_input(TerminationReason::NoCauseDismissal, NoticeType::Indemnified);

        let result = run(&input, &config);

        assert_eq!(result.amount, 182_160);
        assert!(result.projected);
        assert_eq!(result.effective_end_date, date(2026, 1, 30));
        assert!(result.warning.is_none());
        assert_eq!(result.audit_step.legal_ref, "CLT art. 487; Lei 12.506/2011");
    }

    /// NP-002: worked notice pays nothing and keeps the end date
    #[test]
    fn test_worked_notice_pays_nothing() {
        let config = StatutoryConfig::clt_2025();
        let input = create_test_input(TerminationReason::NoCauseDismissal, NoticeType::Worked);

        let result = run(&input, &config);

        assert_eq!(result.amount, 0);
        assert!(!result.projected);
        assert_eq!(result.effective_end_date, input.contract_end);
    }

    /// NP-003: resignation and just cause never pay notice
    #[test]
    fn test_resignation_and_just_cause_pay_nothing() {
        let config = StatutoryConfig::clt_2025();
        for reason in [
            TerminationReason::EmployeeResignation,
            TerminationReason::JustCauseDismissal,
        ] {
            let input = create_test_input(reason, NoticeType::Indemnified);
            let result = run(&input, &config);

            assert_eq!(result.amount, 0);
            assert_eq!(result.effective_end_date, input.contract_end);
            let warning = result.warning.expect("indemnified notice should warn");
            assert_eq!(warning.code, "INDEMNIFIED_NOTICE_NOT_OWED");
        }
    }

    #[test]
    fn test_projection_disabled_keeps_end_date() {
        let config = StatutoryConfig::clt_2025().with_policy(PolicyFlags {
            notice_minimum_months: 0,
            project_indemnified_notice: false,
        });
        let input = create_test_input(TerminationReason::NoCauseDismissal, NoticeType::Indemnified);

        let result = run(&input, &config);

        assert_eq!(result.amount, 182_160);
        assert!(!result.projected);
        assert_eq!(result.effective_end_date, input.contract_end);
    }

    #[test]
    fn test_minimum_months_threshold_withholds_pay() {
        let config = StatutoryConfig::clt_2025().with_policy(PolicyFlags {
            notice_minimum_months: 3,
            project_indemnified_notice: true,
        });
        let mut input =
            create_test_input(TerminationReason::NoCauseDismissal, NoticeType::Indemnified);
        input.contract_start = date(2025, 11, 1);

        let result = run(&input, &config);

        assert_eq!(result.amount, 0);
        assert!(!result.projected);
        assert_eq!(
            result.warning.unwrap().code,
            "NOTICE_BELOW_MINIMUM_MONTHS"
        );
    }

    #[test]
    fn test_minimum_months_threshold_met() {
        let config = StatutoryConfig::clt_2025().with_policy(PolicyFlags {
            notice_minimum_months: 3,
            project_indemnified_notice: true,
        });
        let mut input =
            create_test_input(TerminationReason::NoCauseDismissal, NoticeType::Indemnified);
        input.contract_start = date(2025, 10, 1);

        let result = run(&input, &config);

        assert_eq!(result.amount, 5_060 * 30);
        assert!(result.projected);
    }
}
