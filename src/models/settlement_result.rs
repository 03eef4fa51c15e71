//! Settlement result models for the Severance Settlement Engine.
//!
//! This module contains the [`SettlementResult`] type and its associated
//! structures that capture every output of a settlement calculation:
//! entitlements, withholdings, totals and the audit trace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

/// The amounts owed to the employee, before withholdings.
///
/// # Example
///
/// ```
/// use severance_engine::models::EntitlementSet;
///
/// let entitlements = EntitlementSet {
///     balance_of_salary: 126_500,
///     notice_pay: 182_160,
///     vacation_pay: 219_266,
///     annual_bonus_proportional: 12_650,
///     severance_fund_penalty: 41_299,
/// };
/// assert_eq!(entitlements.total(), Some(581_875));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementSet {
    /// Pay for the days worked in the final month (*saldo de salário*).
    pub balance_of_salary: Cents,
    /// Indemnified notice pay (*aviso prévio indenizado*).
    pub notice_pay: Cents,
    /// Expired plus proportional vacation, each with the one-third bonus.
    pub vacation_pay: Cents,
    /// Proportional 13th salary.
    pub annual_bonus_proportional: Cents,
    /// 40% penalty over the estimated FGTS balance.
    pub severance_fund_penalty: Cents,
}

impl EntitlementSet {
    /// Returns the fields in display order.
    pub fn amounts(&self) -> [Cents; 5] {
        [
            self.balance_of_salary,
            self.notice_pay,
            self.vacation_pay,
            self.annual_bonus_proportional,
            self.severance_fund_penalty,
        ]
    }

    /// Exact sum of all entitlements, or `None` on overflow.
    pub fn total(&self) -> Option<Cents> {
        self.amounts()
            .iter()
            .try_fold(0 as Cents, |acc, value| acc.checked_add(*value))
    }
}

/// The mandatory withholdings taken from the settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSet {
    /// Social security (INSS) over balance of salary and 13th salary.
    pub social_security_withholding: Cents,
    /// Income tax (IRRF) over balance of salary and 13th salary.
    pub income_tax_withholding: Cents,
    /// Alimony (*pensão alimentícia*).
    pub alimony_withholding: Cents,
}

impl DeductionSet {
    /// Returns the fields in display order.
    pub fn amounts(&self) -> [Cents; 3] {
        [
            self.social_security_withholding,
            self.income_tax_withholding,
            self.alimony_withholding,
        ]
    }

    /// Exact sum of all withholdings, or `None` on overflow.
    pub fn total(&self) -> Option<Cents> {
        self.amounts()
            .iter()
            .try_fold(0 as Cents, |acc, value| acc.checked_add(*value))
    }
}

/// Social security and income tax split by taxable base.
///
/// The 13th salary is taxed exclusively, separate from the salary balance,
/// so each withholding is reported per base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBreakdown {
    /// INSS over the balance of salary.
    pub social_security_on_salary: Cents,
    /// INSS over the 13th salary.
    pub social_security_on_annual_bonus: Cents,
    /// IRRF over the balance of salary (after dependent deduction).
    pub income_tax_on_salary: Cents,
    /// IRRF over the 13th salary (exclusive taxation).
    pub income_tax_on_annual_bonus: Cents,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute backing this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag policy outcomes a reviewer should notice; they never
/// change the computed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a settlement, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete, immutable result of one settlement calculation.
///
/// `gross_total` is always the exact sum of `entitlements` and
/// `net_total` is always `gross_total` minus the exact sum of `deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Amounts owed before withholdings.
    pub entitlements: EntitlementSet,
    /// Mandatory withholdings.
    pub deductions: DeductionSet,
    /// INSS and IRRF split by taxable base.
    pub withholding_breakdown: WithholdingBreakdown,
    /// Sum of all entitlements.
    pub gross_total: Cents,
    /// Sum of all deductions.
    pub total_deductions: Cents,
    /// `gross_total - total_deductions`.
    pub net_total: Cents,
    /// Contract end, projected by indemnified notice when applicable.
    pub effective_end_date: NaiveDate,
    /// Completed service months up to the effective end date.
    pub accrued_months: u32,
    /// Notice entitlement in days (30 + 3 per completed year, capped).
    pub notice_days: u32,
    /// Every rule applied, with its inputs and outputs.
    pub audit_trace: AuditTrace,
}
