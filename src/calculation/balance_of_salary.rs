//! Balance of salary (*saldo de salário*).
//!
//! Pays the days worked in the final calendar month at the daily rate.
//! Owed for every termination reason, including just cause.

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, Cents, TerminationInput};

use super::rounding::{floor_div, multiply};

/// The result of calculating the balance of salary.
#[derive(Debug, Clone)]
pub struct BalanceOfSalaryResult {
    /// The amount owed, in centavos.
    pub amount: Cents,
    /// Days worked in the final month.
    pub days_worked: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `floor(salary / 30) × days worked in the final month`.
///
/// The daily rate is floored before multiplying, so the result is always a
/// whole multiple of it.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::calculate_balance_of_salary;
/// use severance_engine::config::StatutoryConfig;
/// use severance_engine::models::{NoticeType, TerminationInput, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TerminationInput {
///     contract_start: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     contract_end: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
///     gross_monthly_salary: 151_800,
///     termination_reason: TerminationReason::JustCauseDismissal,
///     notice_type: NoticeType::NotApplicable,
///     unused_vacation_periods: 0,
///     dependents_for_tax: 0,
///     alimony_percentage: Decimal::ZERO,
/// };
///
/// let result = calculate_balance_of_salary(&input, &StatutoryConfig::clt_2025(), 1).unwrap();
/// assert_eq!(result.amount, 5_060 * 25);
/// ```
pub fn calculate_balance_of_salary(
    input: &TerminationInput,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<BalanceOfSalaryResult> {
    let days_per_month = config.accrual().days_per_month;
    let daily_rate = floor_div(input.gross_monthly_salary, days_per_month);
    let days_worked = input.days_worked_in_final_month();
    let amount = multiply(daily_rate, days_worked, "balance of salary")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "balance_of_salary".to_string(),
        rule_name: "Balance of Salary".to_string(),
        legal_ref: "CLT art. 477".to_string(),
        input: serde_json::json!({
            "gross_monthly_salary": input.gross_monthly_salary,
            "contract_end": input.contract_end.to_string(),
            "days_per_month": days_per_month
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate,
            "days_worked": days_worked,
            "balance_of_salary": amount
        }),
        reasoning: format!(
            "{} / {} = {} per day x {} days worked in the final month = {}",
            input.gross_monthly_salary, days_per_month, daily_rate, days_worked, amount
        ),
    };

    Ok(BalanceOfSalaryResult {
        amount,
        days_worked,
        audit_step,
    })
}
