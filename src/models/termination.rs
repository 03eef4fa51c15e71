//! Termination input model and related types.
//!
//! This module defines the [`TerminationInput`] struct together with the
//! [`TerminationReason`] and [`NoticeType`] enums that drive eligibility.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Cents;

/// Why the employment contract ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Dismissal by the employer without just cause (*sem justa causa*).
    NoCauseDismissal,
    /// Resignation requested by the employee (*pedido de demissão*).
    EmployeeResignation,
    /// Dismissal for just cause (*justa causa*).
    JustCauseDismissal,
}

impl TerminationReason {
    /// Returns the snake_case identifier used in audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::NoCauseDismissal => "no_cause_dismissal",
            TerminationReason::EmployeeResignation => "employee_resignation",
            TerminationReason::JustCauseDismissal => "just_cause_dismissal",
        }
    }

    /// Returns true for dismissal for just cause.
    pub fn is_just_cause(&self) -> bool {
        *self == TerminationReason::JustCauseDismissal
    }
}

/// How the notice period is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeType {
    /// No notice period applies.
    #[default]
    NotApplicable,
    /// The notice period is waived and paid in cash (*indenizado*).
    Indemnified,
    /// The employee works through the notice period (*trabalhado*).
    Worked,
}

impl NoticeType {
    /// Returns the snake_case identifier used in audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::NotApplicable => "not_applicable",
            NoticeType::Indemnified => "indemnified",
            NoticeType::Worked => "worked",
        }
    }
}

/// Everything the engine needs to compute one settlement.
///
/// Monetary values are integer centavos; conversion from a user-entered
/// decimal salary happens once, at the boundary.
///
/// # Example
///
/// ```
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
/// assert_eq!(input.days_worked_in_final_month(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationInput {
    /// First day of the contract.
    pub contract_start: NaiveDate,
    /// Last worked day of the contract.
    pub contract_end: NaiveDate,
    /// Gross monthly salary in centavos.
    pub gross_monthly_salary: Cents,
    /// Why the contract ended.
    pub termination_reason: TerminationReason,
    /// How the notice period is honoured.
    #[serde(default)]
    pub notice_type: NoticeType,
    /// Complete acquisition periods whose vacation was never taken.
    #[serde(default)]
    pub unused_vacation_periods: u32,
    /// Dependents declared for income tax purposes.
    #[serde(default)]
    pub dependents_for_tax: u32,
    /// Court-ordered alimony as a percentage (0-100) of the net settlement.
    #[serde(default)]
    pub alimony_percentage: Decimal,
}

impl TerminationInput {
    /// Days worked in the calendar month of `contract_end`.
    ///
    /// Counts from the later of the contract start and the first day of
    /// that month, inclusive of both ends. Returns 0 if the dates are
    /// inverted.
    pub fn days_worked_in_final_month(&self) -> i64 {
        let month_start = self.contract_end.with_day(1).unwrap_or(self.contract_end);
        let from = self.contract_start.max(month_start);
        ((self.contract_end - from).num_days() + 1).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_input() -> TerminationInput {
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

    #[test]
    fn test_deserialize_input_with_defaults() {
        let json = r#"{
            "contract_start": "2024-03-01",
            "contract_end": "2025-02-10",
            "gross_monthly_salary": 300000,
            "termination_reason": "employee_resignation"
        }"#;

        let input: TerminationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.contract_start, date(2024, 3, 1));
        assert_eq!(input.gross_monthly_salary, 300_000);
        assert_eq!(input.termination_reason, TerminationReason::EmployeeResignation);
        assert_eq!(input.notice_type, NoticeType::NotApplicable);
        assert_eq!(input.unused_vacation_periods, 0);
        assert_eq!(input.alimony_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&TerminationReason::JustCauseDismissal).unwrap(),
            "\"just_cause_dismissal\""
        );
        assert_eq!(
            serde_json::to_string(&NoticeType::Indemnified).unwrap(),
            "\"indemnified\""
        );
    }

    #[test]
    fn test_as_str_matches_serde_names() {
        for reason in [
            TerminationReason::NoCauseDismissal,
            TerminationReason::EmployeeResignation,
            TerminationReason::JustCauseDismissal,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }

    #[test]
    fn test_days_worked_in_final_month_from_first_of_month() {
        let input = create_test_input();
        assert_eq!(input.days_worked_in_final_month(), 25);
    }

    #[test]
    fn test_days_worked_when_contract_starts_in_final_month() {
        let mut input = create_test_input();
        input.contract_start = date(2025, 12, 10);
        assert_eq!(input.days_worked_in_final_month(), 16);
    }

    #[test]
    fn test_days_worked_on_31st() {
        let mut input = create_test_input();
        input.contract_end = date(2025, 1, 31);
        assert_eq!(input.days_worked_in_final_month(), 31);
    }

    #[test]
    fn test_days_worked_inverted_dates_is_zero() {
        let mut input = create_test_input();
        input.contract_start = date(2026, 1, 1);
        assert_eq!(input.days_worked_in_final_month(), 0);
    }
}
