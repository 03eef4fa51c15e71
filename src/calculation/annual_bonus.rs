//! Proportional 13th salary (*décimo terceiro proporcional*).

use chrono::{Datelike, NaiveDate};

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Cents, TerminationInput};

use super::accrual::months_accrued;
use super::rounding::{floor_div, multiply};

/// The result of the 13th salary calculation.
#[derive(Debug, Clone)]
pub struct AnnualBonusResult {
    /// Proportional 13th salary in centavos.
    pub amount: Cents,
    /// Months accrued in the effective end date's calendar year.
    pub months_in_year: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `floor(salary × months / 12)` for the months accrued from the
/// later of contract start and 1 January of the effective end date's year.
///
/// Just-cause dismissal forfeits the 13th salary.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::calculate_annual_bonus;
/// use severance_engine::config::StatutoryConfig;
/// use severance_engine::models::{NoticeType, TerminationInput, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TerminationInput {
///     contract_start: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
///     contract_end: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
///     gross_monthly_salary: 240_000,
///     termination_reason: TerminationReason::EmployeeResignation,
///     notice_type: NoticeType::Worked,
///     unused_vacation_periods: 0,
///     dependents_for_tax: 0,
///     alimony_percentage: Decimal::ZERO,
/// };
///
/// let result = calculate_annual_bonus(&input, input.contract_end, &StatutoryConfig::clt_2025(), 1).unwrap();
/// assert_eq!(result.months_in_year, 6);
/// assert_eq!(result.amount, 120_000);
/// ```
pub fn calculate_annual_bonus(
    input: &TerminationInput,
    effective_end_date: NaiveDate,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<AnnualBonusResult> {
    if input.termination_reason.is_just_cause() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "annual_bonus".to_string(),
            rule_name: "Proportional 13th Salary".to_string(),
            legal_ref: "Lei 4.090/1962".to_string(),
            input: serde_json::json!({
                "termination_reason": input.termination_reason.as_str()
            }),
            output: serde_json::json!({ "annual_bonus_proportional": 0 }),
            reasoning: "No 13th salary - just-cause dismissal forfeits it".to_string(),
        };
        return Ok(AnnualBonusResult {
            amount: 0,
            months_in_year: 0,
            audit_step,
        });
    }

    let year_start = NaiveDate::from_ymd_opt(effective_end_date.year(), 1, 1).ok_or_else(|| {
        EngineError::computation(format!(
            "no 1 January in the year of {}",
            effective_end_date
        ))
    })?;
    let count_from = input.contract_start.max(year_start);
    let months_in_year = months_accrued(
        count_from,
        effective_end_date,
        config.accrual().full_month_min_days,
    );

    let months_per_year = config.accrual().months_per_year;
    let amount = floor_div(
        multiply(
            input.gross_monthly_salary,
            i64::from(months_in_year),
            "13th salary",
        )?,
        months_per_year,
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "annual_bonus".to_string(),
        rule_name: "Proportional 13th Salary".to_string(),
        legal_ref: "Lei 4.090/1962; Lei 4.749/1965".to_string(),
        input: serde_json::json!({
            "gross_monthly_salary": input.gross_monthly_salary,
            "count_from": count_from.to_string(),
            "effective_end_date": effective_end_date.to_string()
        }),
        output: serde_json::json!({
            "months_in_year": months_in_year,
            "annual_bonus_proportional": amount
        }),
        reasoning: format!(
            "{} x {}/{} months worked since {} = {}",
            input.gross_monthly_salary, months_in_year, months_per_year, count_from, amount
        ),
    };

    Ok(AnnualBonusResult {
        amount,
        months_in_year,
        audit_step,
    })
}
