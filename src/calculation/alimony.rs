//! Alimony withholding (*pensão alimentícia*).

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Cents, EntitlementSet};

use super::rounding::floor_cents;

/// The result of the alimony calculation.
#[derive(Debug, Clone)]
pub struct AlimonyResult {
    /// Alimony withheld, in centavos.
    pub amount: Cents,
    /// Net base the percentage applies to.
    pub base: Cents,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Withholds `floor(base × percentage / 100)` where the base is the
/// balance of salary, notice, vacation and 13th salary, net of INSS and
/// IRRF. The FGTS penalty is not part of the base.
pub fn calculate_alimony(
    entitlements: &EntitlementSet,
    social_security: Cents,
    income_tax: Cents,
    percentage: Decimal,
    step_number: u32,
) -> EngineResult<AlimonyResult> {
    let gross_base = [
        entitlements.balance_of_salary,
        entitlements.annual_bonus_proportional,
        entitlements.notice_pay,
        entitlements.vacation_pay,
    ]
    .iter()
    .try_fold(0 as Cents, |acc, value| acc.checked_add(*value))
    .ok_or_else(|| EngineError::computation("alimony base overflowed"))?;
    let base = (gross_base - social_security - income_tax).max(0);

    let amount = if percentage <= Decimal::ZERO {
        0
    } else {
        let scaled = Decimal::from(base)
            .checked_mul(percentage)
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| EngineError::computation("alimony overflowed"))?;
        floor_cents(scaled, "alimony")?
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "alimony_withholding".to_string(),
        rule_name: "Alimony Withholding".to_string(),
        legal_ref: "CPC art. 529; Lei 5.478/1968".to_string(),
        input: serde_json::json!({
            "gross_base": gross_base,
            "social_security_withholding": social_security,
            "income_tax_withholding": income_tax,
            "alimony_percentage": percentage.to_string()
        }),
        output: serde_json::json!({
            "base": base,
            "alimony_withholding": amount
        }),
        reasoning: if amount == 0 && percentage <= Decimal::ZERO {
            "No alimony - no percentage ordered".to_string()
        } else {
            format!(
                "({} - {} INSS - {} IRRF) = {} x {}% = {}",
                gross_base, social_security, income_tax, base, percentage, amount
            )
        },
    };

    Ok(AlimonyResult {
        amount,
        base,
        audit_step,
    })
}
