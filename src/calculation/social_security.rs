//! Social security withholding (INSS).
//!
//! The contribution is progressive: each bracket's rate applies only to the
//! slice of the base that falls inside it, and each slice is floored on its
//! own. The balance of salary and the 13th salary are separate bases.
//! Notice pay and vacation pay are exempt.

use crate::config::{BracketTable, StatutoryConfig};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, Cents};

use super::rounding::{add, apply_rate};

/// Progressive contribution over `base`.
///
/// Slices above a bounded last bracket (the ceiling) are not taxed.
/// A base of zero or less contributes nothing.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::progressive_contribution;
/// use severance_engine::config::StatutoryConfig;
///
/// let config = StatutoryConfig::clt_2025();
/// let table = config.social_security_table();
///
/// // 151800 x 7.5% + 127588 x 9% + 20612 x 12%
/// assert_eq!(progressive_contribution(300_000, table).unwrap(), 11_385 + 11_482 + 2_473);
/// ```
pub fn progressive_contribution(base: Cents, table: &BracketTable) -> EngineResult<Cents> {
    let mut remaining = base.max(0);
    let mut previous_upper: Cents = 0;
    let mut total: Cents = 0;

    for bracket in table.brackets() {
        if remaining == 0 {
            break;
        }
        let slice = match bracket.upper_bound {
            Some(upper) => remaining.min(upper - previous_upper),
            None => remaining,
        };
        total = add(total, apply_rate(slice, bracket.rate, "INSS slice")?, "INSS")?;
        remaining -= slice;
        if let Some(upper) = bracket.upper_bound {
            previous_upper = upper;
        }
    }

    Ok(total)
}

/// The result of the INSS calculation.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// INSS over the balance of salary.
    pub on_salary: Cents,
    /// INSS over the 13th salary.
    pub on_annual_bonus: Cents,
    /// Sum of both.
    pub amount: Cents,
    /// Ceiling warnings, one per capped base.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Withholds INSS from the balance of salary and the 13th salary separately.
pub fn calculate_social_security(
    balance_of_salary: Cents,
    annual_bonus: Cents,
    config: &StatutoryConfig,
    step_number: u32,
) -> EngineResult<SocialSecurityResult> {
    let table = config.social_security_table();
    let on_salary = progressive_contribution(balance_of_salary, table)?;
    let on_annual_bonus = progressive_contribution(annual_bonus, table)?;
    let amount = add(on_salary, on_annual_bonus, "INSS")?;

    let mut warnings = Vec::new();
    if let Some(ceiling) = table.ceiling() {
        for (label, base) in [
            ("balance of salary", balance_of_salary),
            ("13th salary", annual_bonus),
        ] {
            if base > ceiling {
                warnings.push(AuditWarning {
                    code: "SOCIAL_SECURITY_CEILING_REACHED".to_string(),
                    message: format!(
                        "INSS base for the {} ({}) exceeds the contribution ceiling of {}",
                        label, base, ceiling
                    ),
                    severity: "low".to_string(),
                });
            }
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security_withholding".to_string(),
        rule_name: "Social Security Withholding (INSS)".to_string(),
        legal_ref: "Lei 8.212/1991 art. 20 and 28; EC 103/2019".to_string(),
        input: serde_json::json!({
            "balance_of_salary": balance_of_salary,
            "annual_bonus_proportional": annual_bonus,
            "ceiling": table.ceiling()
        }),
        output: serde_json::json!({
            "on_salary": on_salary,
            "on_annual_bonus": on_annual_bonus,
            "social_security_withholding": amount
        }),
        reasoning: format!(
            "Progressive INSS on the balance of salary {} = {}, on the 13th salary {} = {}; notice and vacation are exempt",
            balance_of_salary, on_salary, annual_bonus, on_annual_bonus
        ),
    };

    Ok(SocialSecurityResult {
        on_salary,
        on_annual_bonus,
        amount,
        warnings,
        audit_step,
    })
}
