//! The settlement pipeline.
//!
//! Runs every calculator in order, threading the effective end date from
//! the notice step into the accrual-based entitlements and the INSS
//! amounts into IRRF and alimony, then aggregates and re-checks the totals.

use tracing::debug;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionSet, EntitlementSet, SettlementResult,
    TerminationInput, WithholdingBreakdown,
};

use super::accrual::{calculate_service_accrual, months_accrued};
use super::alimony::calculate_alimony;
use super::annual_bonus::calculate_annual_bonus;
use super::balance_of_salary::calculate_balance_of_salary;
use super::income_tax::{IncomeTaxBases, calculate_income_tax};
use super::notice_pay::calculate_notice_pay;
use super::severance_fund::calculate_severance_fund_penalty;
use super::social_security::calculate_social_security;
use super::vacation::calculate_vacation_pay;
use super::validation::validate_input;

/// Calculates the complete termination settlement.
///
/// The input is validated first; an invalid input returns
/// [`EngineError::Validation`] listing every offending field. The function
/// is pure: the same input and configuration always produce the same result.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::calculate_settlement;
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
///     unused_vacation_periods: 1,
///     dependents_for_tax: 0,
///     alimony_percentage: Decimal::ZERO,
/// };
///
/// let result = calculate_settlement(&input, &StatutoryConfig::clt_2025()).unwrap();
/// assert_eq!(result.net_total, result.gross_total - result.total_deductions);
/// assert!(result.net_total < result.gross_total);
/// ```
pub fn calculate_settlement(
    input: &TerminationInput,
    config: &StatutoryConfig,
) -> EngineResult<SettlementResult> {
    validate_input(input)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let service = calculate_service_accrual(input, config, step_number);
    let accrual = service.accrual;
    steps.push(service.audit_step);
    step_number += 1;
    debug!(
        accrued_months = accrual.accrued_months,
        notice_days = accrual.notice_days,
        "Service time measured"
    );

    let balance = calculate_balance_of_salary(input, config, step_number)?;
    steps.push(balance.audit_step);
    step_number += 1;
    debug!(amount = balance.amount, days = balance.days_worked, "Balance of salary");

    let notice = calculate_notice_pay(input, &accrual, config, step_number)?;
    steps.push(notice.audit_step);
    warnings.extend(notice.warning);
    step_number += 1;
    let effective_end_date = notice.effective_end_date;
    debug!(
        amount = notice.amount,
        effective_end_date = %effective_end_date,
        projected = notice.projected,
        "Notice pay"
    );

    let vacation = calculate_vacation_pay(input, effective_end_date, config, step_number)?;
    steps.push(vacation.audit_step);
    step_number += 1;
    debug!(
        amount = vacation.amount,
        expired = vacation.expired,
        proportional = vacation.proportional,
        "Vacation pay"
    );

    let bonus = calculate_annual_bonus(input, effective_end_date, config, step_number)?;
    steps.push(bonus.audit_step);
    step_number += 1;
    debug!(amount = bonus.amount, months = bonus.months_in_year, "13th salary");

    let fund = calculate_severance_fund_penalty(input, effective_end_date, config, step_number)?;
    steps.push(fund.audit_step);
    step_number += 1;
    debug!(
        amount = fund.amount,
        estimated_balance = fund.estimated_balance,
        "FGTS penalty"
    );

    let entitlements = EntitlementSet {
        balance_of_salary: balance.amount,
        notice_pay: notice.amount,
        vacation_pay: vacation.amount,
        annual_bonus_proportional: bonus.amount,
        severance_fund_penalty: fund.amount,
    };

    let social_security =
        calculate_social_security(balance.amount, bonus.amount, config, step_number)?;
    steps.push(social_security.audit_step);
    warnings.extend(social_security.warnings);
    step_number += 1;
    debug!(amount = social_security.amount, "INSS withheld");

    let income_tax = calculate_income_tax(
        &IncomeTaxBases {
            balance_of_salary: balance.amount,
            social_security_on_salary: social_security.on_salary,
            annual_bonus: bonus.amount,
            social_security_on_annual_bonus: social_security.on_annual_bonus,
        },
        input.dependents_for_tax,
        config,
        step_number,
    )?;
    steps.push(income_tax.audit_step);
    step_number += 1;
    debug!(amount = income_tax.amount, "IRRF withheld");

    let alimony = calculate_alimony(
        &entitlements,
        social_security.amount,
        income_tax.amount,
        input.alimony_percentage,
        step_number,
    )?;
    steps.push(alimony.audit_step);
    step_number += 1;
    debug!(amount = alimony.amount, base = alimony.base, "Alimony withheld");

    let deductions = DeductionSet {
        social_security_withholding: social_security.amount,
        income_tax_withholding: income_tax.amount,
        alimony_withholding: alimony.amount,
    };

    let gross_total = entitlements
        .total()
        .ok_or_else(|| EngineError::computation("gross total overflowed"))?;
    let total_deductions = deductions
        .total()
        .ok_or_else(|| EngineError::computation("total deductions overflowed"))?;
    let net_total = gross_total
        .checked_sub(total_deductions)
        .ok_or_else(|| EngineError::computation("net total overflowed"))?;

    steps.push(AuditStep {
        step_number,
        rule_id: "settlement_totals".to_string(),
        rule_name: "Settlement Totals".to_string(),
        legal_ref: "CLT art. 477".to_string(),
        input: serde_json::json!({
            "entitlements": entitlements,
            "deductions": deductions
        }),
        output: serde_json::json!({
            "gross_total": gross_total,
            "total_deductions": total_deductions,
            "net_total": net_total
        }),
        reasoning: format!(
            "Gross {} - deductions {} = net {}",
            gross_total, total_deductions, net_total
        ),
    });

    let result = SettlementResult {
        entitlements,
        deductions,
        withholding_breakdown: WithholdingBreakdown {
            social_security_on_salary: social_security.on_salary,
            social_security_on_annual_bonus: social_security.on_annual_bonus,
            income_tax_on_salary: income_tax.on_salary,
            income_tax_on_annual_bonus: income_tax.on_annual_bonus,
        },
        gross_total,
        total_deductions,
        net_total,
        effective_end_date,
        accrued_months: months_accrued(
            input.contract_start,
            effective_end_date,
            config.accrual().full_month_min_days,
        ),
        notice_days: accrual.notice_days,
        audit_trace: AuditTrace { steps, warnings },
    };

    check_invariants(&result)?;
    debug!(
        gross_total = result.gross_total,
        total_deductions = result.total_deductions,
        net_total = result.net_total,
        "Settlement aggregated"
    );

    Ok(result)
}

/// Re-checks the aggregate sums and the sign of every amount.
fn check_invariants(result: &SettlementResult) -> EngineResult<()> {
    if result.entitlements.total() != Some(result.gross_total) {
        return Err(EngineError::computation(format!(
            "gross total {} does not match the entitlements",
            result.gross_total
        )));
    }
    if result.deductions.total() != Some(result.total_deductions) {
        return Err(EngineError::computation(format!(
            "total deductions {} do not match the withholdings",
            result.total_deductions
        )));
    }
    if result.gross_total - result.total_deductions != result.net_total {
        return Err(EngineError::computation(format!(
            "net total {} is not gross minus deductions",
            result.net_total
        )));
    }

    let negative = result
        .entitlements
        .amounts()
        .into_iter()
        .chain(result.deductions.amounts())
        .chain([result.gross_total, result.total_deductions])
        .any(|amount| amount < 0);
    if negative {
        return Err(EngineError::computation(
            "settlement contains a negative amount",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyFlags;
    use crate::models::{NoticeType, TerminationReason};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_default_input() -> TerminationInput {
        TerminationInput {
            contract_start: date(2023, 1, 15),
            contract_end: date(2025, 12, 25),
            gross_monthly_salary: 151_800,
            termination_reason: TerminationReason::NoCauseDismissal,
            notice_type: NoticeType::Indemnified,
            unused_vacation_periods: 1,
            dependents_for_tax: 0,
            alimony_percentage: Decimal::ZERO,
        }
    }

    /// ST-001: default scenario, every entitlement present
    #[test]
    fn test_default_scenario() {
        let config = StatutoryConfig::clt_2025();
        let result = calculate_settlement(&create_default_input(), &config).unwrap();

        assert_eq!(result.entitlements.balance_of_salary, 126_500);
        assert_eq!(result.entitlements.notice_pay, 182_160);
        assert_eq!(result.entitlements.vacation_pay, 219_266);
        assert_eq!(result.entitlements.annual_bonus_proportional, 12_650);
        assert_eq!(result.entitlements.severance_fund_penalty, 179_731);
        assert_eq!(result.gross_total, 720_307);

        assert_eq!(result.withholding_breakdown.social_security_on_salary, 9_487);
        assert_eq!(result.withholding_breakdown.social_security_on_annual_bonus, 948);
        assert_eq!(result.deductions.social_security_withholding, 10_435);
        assert_eq!(result.deductions.income_tax_withholding, 0);
        assert_eq!(result.deductions.alimony_withholding, 0);
        assert_eq!(result.net_total, 720_307 - 10_435);

        assert_eq!(result.effective_end_date, date(2026, 1, 30));
        assert_eq!(result.notice_days, 36);
        assert_eq!(result.accrued_months, 37);
    }

    /// ST-002: just cause keeps only the balance of salary
    #[test]
    fn test_just_cause_only_balance_of_salary() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_default_input();
        input.termination_reason = TerminationReason::JustCauseDismissal;
        input.notice_type = NoticeType::NotApplicable;

        let result = calculate_settlement(&input, &config).unwrap();

        assert_eq!(result.entitlements.notice_pay, 0);
        assert_eq!(result.entitlements.vacation_pay, 0);
        assert_eq!(result.entitlements.annual_bonus_proportional, 0);
        assert_eq!(result.entitlements.severance_fund_penalty, 0);
        assert_eq!(result.gross_total, result.entitlements.balance_of_salary);
        assert_eq!(result.effective_end_date, input.contract_end);
    }

    #[test]
    fn test_audit_steps_numbered_in_order() {
        let config = StatutoryConfig::clt_2025();
        let result = calculate_settlement(&create_default_input(), &config).unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "service_accrual",
                "balance_of_salary",
                "notice_pay",
                "vacation_pay",
                "annual_bonus",
                "severance_fund_penalty",
                "social_security_withholding",
                "income_tax_withholding",
                "alimony_withholding",
                "settlement_totals",
            ]
        );
        for (index, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, index + 1);
        }
    }

    #[test]
    fn test_invalid_input_rejected_before_calculation() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_default_input();
        input.contract_start = date(2026, 1, 1);
        input.gross_monthly_salary = -1;

        match calculate_settlement(&input, &config) {
            Err(EngineError::Validation(err)) => {
                assert!(err.has_field("contract_start"));
                assert!(err.has_field("gross_monthly_salary"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_salary_is_a_validation_error() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_default_input();
        input.gross_monthly_salary = i64::MAX / 100;

        match calculate_settlement(&input, &config) {
            Err(EngineError::Validation(err)) => {
                assert_eq!(err.fields(), vec!["gross_monthly_salary"]);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_salary_at_ceiling_settles() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_default_input();
        input.gross_monthly_salary = crate::calculation::MAX_GROSS_MONTHLY_SALARY;

        let result = calculate_settlement(&input, &config).unwrap();

        assert!(result.entitlements.severance_fund_penalty > 0);
        assert_eq!(result.net_total, result.gross_total - result.total_deductions);
    }

    #[test]
    fn test_alimony_applied_to_net_base() {
        let config = StatutoryConfig::clt_2025();
        let mut input = create_default_input();
        input.alimony_percentage = Decimal::new(20, 0);

        let result = calculate_settlement(&input, &config).unwrap();

        // (126500 + 12650 + 182160 + 219266 - 10435 - 0) x 20%
        assert_eq!(result.deductions.alimony_withholding, 106_028);
        assert_eq!(
            result.net_total,
            result.gross_total - 10_435 - 106_028
        );
    }

    #[test]
    fn test_policy_without_projection() {
        let config = StatutoryConfig::clt_2025().with_policy(PolicyFlags {
            notice_minimum_months: 0,
            project_indemnified_notice: false,
        });

        let result = calculate_settlement(&create_default_input(), &config).unwrap();

        assert_eq!(result.effective_end_date, date(2025, 12, 25));
        assert_eq!(result.entitlements.notice_pay, 182_160);
        assert_eq!(result.entitlements.annual_bonus_proportional, 151_800);
        assert_eq!(result.accrued_months, 36);
    }

    #[test]
    fn test_deterministic() {
        let config = StatutoryConfig::clt_2025();
        let input = create_default_input();

        let first = calculate_settlement(&input, &config).unwrap();
        let second = calculate_settlement(&input, &config).unwrap();

        assert_eq!(first, second);
    }
}
