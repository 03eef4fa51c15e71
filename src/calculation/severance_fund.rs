//! FGTS termination penalty (*multa rescisória de 40%*).
//!
//! The engine does not know the real fund balance, so it estimates one from
//! the monthly deposit rate over every accrued month of the contract and
//! applies the penalty rate to that estimate.

use chrono::NaiveDate;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, Cents, TerminationInput, TerminationReason};

use super::accrual::months_accrued;
use super::rounding::{apply_rate, multiply};

/// The result of the FGTS penalty calculation.
#[derive(Debug, Clone)]
pub struct SeveranceFundResult {
    /// The penalty owed, in centavos.
    pub amount: Cents,
    /// Estimated fund balance the penalty is applied to.
    pub estimated_balance: Cents,
    /// Months of deposits in the estimate.
    pub deposit_months: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the FGTS penalty.
///
/// Only a no-cause dismissal is penalised:
/// `balance = floor(salary × months × deposit_rate)`,
/// `penalty = floor(balance × penalty_rate)`.
pub fn calculate_severance_fund_penalty(
    input: &TerminationInput,
    effective_end_date: NaiveDate,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<SeveranceFundResult> {
    let rates = config.severance_fund();

    if input.termination_reason != TerminationReason::NoCauseDismissal {
        let audit_step = AuditStep {
            step_number,
            rule_id: "severance_fund_penalty".to_string(),
            rule_name: "FGTS Termination Penalty".to_string(),
            legal_ref: "Lei 8.036/1990 art. 18".to_string(),
            input: serde_json::json!({
                "termination_reason": input.termination_reason.as_str()
            }),
            output: serde_json::json!({ "severance_fund_penalty": 0 }),
            reasoning: format!(
                "No FGTS penalty - termination reason is {} (only no-cause dismissal qualifies)",
                input.termination_reason.as_str()
            ),
        };
        return Ok(SeveranceFundResult {
            amount: 0,
            estimated_balance: 0,
            deposit_months: 0,
            audit_step,
        });
    }

    let deposit_months = months_accrued(
        input.contract_start,
        effective_end_date,
        config.accrual().full_month_min_days,
    );
    let salary_months = multiply(
        input.gross_monthly_salary,
        i64::from(deposit_months),
        "FGTS deposits",
    )?;
    let estimated_balance = apply_rate(salary_months, rates.deposit_rate, "FGTS balance")?;
    let amount = apply_rate(estimated_balance, rates.penalty_rate, "FGTS penalty")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "severance_fund_penalty".to_string(),
        rule_name: "FGTS Termination Penalty".to_string(),
        legal_ref: "Lei 8.036/1990 art. 15 and 18".to_string(),
        input: serde_json::json!({
            "gross_monthly_salary": input.gross_monthly_salary,
            "contract_start": input.contract_start.to_string(),
            "effective_end_date": effective_end_date.to_string(),
            "deposit_rate": rates.deposit_rate.to_string(),
            "penalty_rate": rates.penalty_rate.to_string()
        }),
        output: serde_json::json!({
            "deposit_months": deposit_months,
            "estimated_balance": estimated_balance,
            "severance_fund_penalty": amount
        }),
        reasoning: format!(
            "Estimated balance {} x {} months x {} = {}; penalty {} x {} = {}",
            input.gross_monthly_salary,
            deposit_months,
            rates.deposit_rate,
            estimated_balance,
            estimated_balance,
            rates.penalty_rate,
            amount
        ),
    };

    Ok(SeveranceFundResult {
        amount,
        estimated_balance,
        deposit_months,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeType;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_input(reason: TerminationReason) -> TerminationInput {
        TerminationInput {
            contract_start: date(2023, 1, 15),
            contract_end: date(2025, 12, 25),
            gross_monthly_salary: 151_800,
            termination_reason: reason,
            notice_type: NoticeType::Indemnified,
            unused_vacation_periods: 1,
            dependents_for_tax: 0,
            alimony_percentage: Decimal::ZERO,
        }
    }

    /// FG-001: balance over the projected window, then 40%
    #[test]
    fn test_penalty_over_projected_window() {
        let config = StatutoryConfig::clt_2025();
        let input = create_test_input(TerminationReason::NoCauseDismissal);

        let result =
            calculate_severance_fund_penalty(&input, date(2026, 1, 30), &config, 1).unwrap();

        assert_eq!(result.deposit_months, 37);
        // 151800 x 37 x 0.08 = 449328
        assert_eq!(result.estimated_balance, 449_328);
        // 449328 x 0.40 = 179731.2
        assert_eq!(result.amount, 179_731);
    }

    /// FG-002: resignation and just cause pay no penalty
    #[test]
    fn test_other_reasons_pay_no_penalty() {
        let config = StatutoryConfig::clt_2025();
        for reason in [
            TerminationReason::EmployeeResignation,
            TerminationReason::JustCauseDismissal,
        ] {
            let input = create_test_input(reason);
            let result =
                calculate_severance_fund_penalty(&input, input.contract_end, &config, 1).unwrap();

            assert_eq!(result.amount, 0);
            assert_eq!(result.estimated_balance, 0);
        }
    }

    #[test]
    fn test_short_contract_has_no_deposits() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_test_input(TerminationReason::NoCauseDismissal);
        input.contract_start = date(2025, 12, 15);

        let result =
            calculate_severance_fund_penalty(&input, input.contract_end, &config, 1).unwrap();

        // Dec 15-25 is 11 days
        assert_eq!(result.deposit_months, 0);
        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_audit_step_records_rates() {
        let config = StatutoryConfig::clt_2025();
        let input = create_test_input(TerminationReason::NoCauseDismissal);

        let result =
            calculate_severance_fund_penalty(&input, input.contract_end, &config, 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.input["deposit_rate"], "0.08");
        assert_eq!(result.audit_step.input["penalty_rate"], "0.40");
    }
}
