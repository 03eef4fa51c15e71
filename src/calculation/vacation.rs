//! Vacation pay (*férias vencidas e proporcionais*).
//!
//! This module sums expired vacation periods and the proportional vacation
//! of the current acquisition period, each with the constitutional
//! one-third bonus.

use chrono::NaiveDate;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, Cents, TerminationInput};

use super::accrual::{add_years, completed_years, months_accrued};
use super::rounding::{add, floor_div, multiply};

/// The result of the vacation calculation.
#[derive(Debug, Clone)]
pub struct VacationResult {
    /// Total vacation pay in centavos.
    pub amount: Cents,
    /// Expired vacation including its one-third bonus.
    pub expired: Cents,
    /// Proportional vacation including its one-third bonus.
    pub proportional: Cents,
    /// Start of the acquisition period still in progress.
    pub acquisition_start: NaiveDate,
    /// Months accrued in the current acquisition period.
    pub proportional_months: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates vacation pay against the effective end date.
///
/// - Expired: `salary × unused periods`, plus `floor(value / 3)`
/// - Proportional: months accrued since the last anniversary of the
///   contract, `floor(salary × months / 12)`, plus `floor(value / 3)`.
///   Counting calendar months can find 13 inside one acquisition period
///   when it starts and ends mid-month; the count is capped at 12.
///
/// Just-cause dismissal forfeits both components.
pub fn calculate_vacation_pay(
    input: &TerminationInput,
    effective_end_date: NaiveDate,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<VacationResult> {
    let divisor = config.vacation().bonus_divisor;
    let months_per_year = config.accrual().months_per_year;
    let salary = input.gross_monthly_salary;

    let acquisition_start = add_years(
        input.contract_start,
        completed_years(input.contract_start, effective_end_date),
    );

    if input.termination_reason.is_just_cause() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "vacation_pay".to_string(),
            rule_name: "Vacation Pay".to_string(),
            legal_ref: "CLT art. 146-147".to_string(),
            input: serde_json::json!({
                "termination_reason": input.termination_reason.as_str()
            }),
            output: serde_json::json!({ "vacation_pay": 0 }),
            reasoning: "No vacation pay - just-cause dismissal forfeits vacation".to_string(),
        };
        return Ok(VacationResult {
            amount: 0,
            expired: 0,
            proportional: 0,
            acquisition_start,
            proportional_months: 0,
            audit_step,
        });
    }

    let expired_base = multiply(
        salary,
        i64::from(input.unused_vacation_periods),
        "expired vacation",
    )?;
    let expired = add(expired_base, floor_div(expired_base, divisor), "expired vacation")?;

    let proportional_months = months_accrued(
        acquisition_start,
        effective_end_date,
        config.accrual().full_month_min_days,
    )
    .min(u32::try_from(months_per_year).unwrap_or(u32::MAX));
    let proportional_base = floor_div(
        multiply(salary, i64::from(proportional_months), "proportional vacation")?,
        months_per_year,
    );
    let proportional = add(
        proportional_base,
        floor_div(proportional_base, divisor),
        "proportional vacation",
    )?;

    let amount = add(expired, proportional, "vacation pay")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "vacation_pay".to_string(),
        rule_name: "Vacation Pay".to_string(),
        legal_ref: "CLT art. 146-147; CF art. 7, XVII".to_string(),
        input: serde_json::json!({
            "gross_monthly_salary": salary,
            "unused_vacation_periods": input.unused_vacation_periods,
            "acquisition_start": acquisition_start.to_string(),
            "effective_end_date": effective_end_date.to_string(),
            "bonus_divisor": divisor
        }),
        output: serde_json::json!({
            "expired_base": expired_base,
            "expired": expired,
            "proportional_months": proportional_months,
            "proportional_base": proportional_base,
            "proportional": proportional,
            "vacation_pay": amount
        }),
        reasoning: format!(
            "Expired: {} x {} periods + 1/{} = {}; proportional: {} x {}/{} + 1/{} = {}; total {}",
            salary,
            input.unused_vacation_periods,
            divisor,
            expired,
            salary,
            proportional_months,
            months_per_year,
            divisor,
            proportional,
            amount
        ),
    };

    Ok(VacationResult {
        amount,
        expired,
        proportional,
        acquisition_start,
        proportional_months,
        audit_step,
    })
}
