//! Input validation.
//!
//! Rejects malformed termination input before any computation, reporting
//! every offending field in one pass rather than stopping at the first.

use rust_decimal::Decimal;

use crate::error::{FieldIssue, ValidationError};
use crate::models::{Cents, TerminationInput};

/// Largest accepted monthly salary, R$ 1.000.000.000,00 in centavos.
///
/// Keeps every salary-by-months product of the pipeline inside `i64`.
pub const MAX_GROSS_MONTHLY_SALARY: Cents = 100_000_000_000;

/// Checks a termination input against the engine's preconditions.
///
/// - `contract_start` must not be after `contract_end`
/// - `gross_monthly_salary` must lie within 0..=[`MAX_GROSS_MONTHLY_SALARY`]
/// - `alimony_percentage` must lie within 0..=100
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::validate_input;
/// use severance_engine::models::{NoticeType, TerminationInput, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = TerminationInput {
///     contract_start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     contract_end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     gross_monthly_salary: -1,
///     termination_reason: TerminationReason::EmployeeResignation,
///     notice_type: NoticeType::NotApplicable,
///     unused_vacation_periods: 0,
///     dependents_for_tax: 0,
///     alimony_percentage: Decimal::ZERO,
/// };
///
/// let error = validate_input(&input).unwrap_err();
/// assert_eq!(error.fields(), vec!["contract_start", "gross_monthly_salary"]);
/// ```
pub fn validate_input(input: &TerminationInput) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if input.contract_start > input.contract_end {
        issues.push(FieldIssue::new(
            "contract_start",
            format!(
                "must not be after contract_end ({} > {})",
                input.contract_start, input.contract_end
            ),
        ));
    }

    if input.gross_monthly_salary < 0 {
        issues.push(FieldIssue::new(
            "gross_monthly_salary",
            "must not be negative",
        ));
    } else if input.gross_monthly_salary > MAX_GROSS_MONTHLY_SALARY {
        issues.push(FieldIssue::new(
            "gross_monthly_salary",
            format!(
                "must not exceed {}, got {}",
                MAX_GROSS_MONTHLY_SALARY, input.gross_monthly_salary
            ),
        ));
    }

    if input.alimony_percentage < Decimal::ZERO || input.alimony_percentage > Decimal::ONE_HUNDRED
    {
        issues.push(FieldIssue::new(
            "alimony_percentage",
            format!("must be between 0 and 100, got {}", input.alimony_percentage),
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoticeType, TerminationReason};
    use chrono::NaiveDate;

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
    fn test_valid_input_passes() {
        assert!(validate_input(&create_test_input()).is_ok());
    }

    #[test]
    fn test_same_day_contract_is_valid() {
        let mut input = create_test_input();
        input.contract_start = input.contract_end;
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_zero_salary_is_valid() {
        let mut input = create_test_input();
        input.gross_monthly_salary = 0;
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_salary_ceiling_inclusive() {
        let mut input = create_test_input();
        input.gross_monthly_salary = MAX_GROSS_MONTHLY_SALARY;
        assert!(validate_input(&input).is_ok());

        input.gross_monthly_salary = i64::MAX / 100;
        let error = validate_input(&input).unwrap_err();
        assert_eq!(error.fields(), vec!["gross_monthly_salary"]);
        assert!(error.issues[0].message.contains("must not exceed"));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let mut input = create_test_input();
        input.contract_start = date(2026, 1, 1);

        let error = validate_input(&input).unwrap_err();
        assert_eq!(error.fields(), vec!["contract_start"]);
        assert!(error.issues[0].message.contains("2026-01-01"));
    }

    #[test]
    fn test_alimony_bounds_inclusive() {
        let mut input = create_test_input();
        input.alimony_percentage = Decimal::ONE_HUNDRED;
        assert!(validate_input(&input).is_ok());

        input.alimony_percentage = Decimal::new(10001, 2);
        let error = validate_input(&input).unwrap_err();
        assert!(error.has_field("alimony_percentage"));

        input.alimony_percentage = Decimal::new(-1, 0);
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn test_every_offending_field_reported() {
        let mut input = create_test_input();
        input.contract_start = date(2026, 1, 1);
        input.gross_monthly_salary = -100;
        input.alimony_percentage = Decimal::new(150, 0);

        let error = validate_input(&input).unwrap_err();
        assert_eq!(
            error.fields(),
            vec!["contract_start", "gross_monthly_salary", "alimony_percentage"]
        );
    }
}
