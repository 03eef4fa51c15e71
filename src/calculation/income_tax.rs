//! Income tax withholding (IRRF).
//!
//! Uses the simplified bracket formula: the whole base is taxed at the rate
//! of the bracket it falls in, minus that bracket's deduction constant. The
//! 13th salary is taxed exclusively, on its own base and without the
//! dependent deduction.

use crate::config::{BracketTable, StatutoryConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Cents};

use super::rounding::{add, apply_rate, multiply};

/// `max(0, floor(base × rate − deduction))` for the first bracket whose
/// upper bound is at or above `base`.
///
/// A base of zero or less is not taxed.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::bracket_tax;
/// use severance_engine::config::StatutoryConfig;
///
/// let config = StatutoryConfig::clt_2025();
/// let table = config.income_tax_table();
///
/// assert_eq!(bracket_tax(200_000, table).unwrap(), 0);
/// // 300000 x 15% - 39416
/// assert_eq!(bracket_tax(300_000, table).unwrap(), 5_584);
/// ```
pub fn bracket_tax(base: Cents, table: &BracketTable) -> EngineResult<Cents> {
    if base <= 0 {
        return Ok(0);
    }

    let bracket = table
        .brackets()
        .iter()
        .find(|b| b.upper_bound.is_none_or(|upper| base <= upper))
        .or_else(|| table.brackets().last())
        .ok_or_else(|| EngineError::computation("income tax table is empty"))?;

    let tax = apply_rate(base, bracket.rate, "income tax")? - bracket.deduction;
    Ok(tax.max(0))
}

/// The result of the IRRF calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// IRRF over the balance of salary.
    pub on_salary: Cents,
    /// IRRF over the 13th salary.
    pub on_annual_bonus: Cents,
    /// Sum of both.
    pub amount: Cents,
    /// Taxable salary base after INSS and dependents.
    pub salary_base: Cents,
    /// Taxable 13th salary base after its INSS.
    pub annual_bonus_base: Cents,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The two INSS-reduced bases IRRF is withheld from.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxBases {
    /// Balance of salary.
    pub balance_of_salary: Cents,
    /// INSS withheld from the balance of salary.
    pub social_security_on_salary: Cents,
    /// Proportional 13th salary.
    pub annual_bonus: Cents,
    /// INSS withheld from the 13th salary.
    pub social_security_on_annual_bonus: Cents,
}

/// Withholds IRRF from the salary and 13th salary bases.
///
/// - Salary base: `balance − INSS − dependent_deduction × dependents`
/// - 13th salary base: `bonus − INSS`
pub fn calculate_income_tax(
    bases: &IncomeTaxBases,
    dependents: u32,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    let table = config.income_tax_table();
    let dependent_total = multiply(
        config.dependent_deduction(),
        i64::from(dependents),
        "dependent deduction",
    )?;

    let salary_base = bases.balance_of_salary - bases.social_security_on_salary - dependent_total;
    let annual_bonus_base = bases.annual_bonus - bases.social_security_on_annual_bonus;

    let on_salary = bracket_tax(salary_base, table)?;
    let on_annual_bonus = bracket_tax(annual_bonus_base, table)?;
    let amount = add(on_salary, on_annual_bonus, "IRRF")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax_withholding".to_string(),
        rule_name: "Income Tax Withholding (IRRF)".to_string(),
        legal_ref: "Lei 7.713/1988 art. 7 and 26; Lei 9.250/1995 art. 4".to_string(),
        input: serde_json::json!({
            "balance_of_salary": bases.balance_of_salary,
            "social_security_on_salary": bases.social_security_on_salary,
            "annual_bonus_proportional": bases.annual_bonus,
            "social_security_on_annual_bonus": bases.social_security_on_annual_bonus,
            "dependents": dependents,
            "dependent_deduction": config.dependent_deduction()
        }),
        output: serde_json::json!({
            "salary_base": salary_base,
            "annual_bonus_base": annual_bonus_base,
            "on_salary": on_salary,
            "on_annual_bonus": on_annual_bonus,
            "income_tax_withholding": amount
        }),
        reasoning: format!(
            "Salary base {} - {} INSS - {} x {} dependents = {}, tax {}; 13th salary base {} - {} INSS = {}, tax {}",
            bases.balance_of_salary,
            bases.social_security_on_salary,
            config.dependent_deduction(),
            dependents,
            salary_base,
            on_salary,
            bases.annual_bonus,
            bases.social_security_on_annual_bonus,
            annual_bonus_base,
            on_annual_bonus
        ),
    };

    Ok(IncomeTaxResult {
        on_salary,
        on_annual_bonus,
        amount,
        salary_base,
        annual_bonus_base,
        audit_step,
    })
}
