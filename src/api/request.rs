//! Request types for the Severance Settlement Engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint and its conversion into a [`TerminationInput`]. Every field is
//! read leniently so that one response can name all the problems at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::MAX_GROSS_MONTHLY_SALARY;
use crate::error::{FieldIssue, ValidationError};
use crate::models::{Cents, NoticeType, TerminationInput, TerminationReason};

/// Request body for the `/calculate` endpoint.
///
/// Dates accept `YYYY-MM-DD` or `DD/MM/YYYY`. Amounts accept a JSON number
/// or a string (`1518.00` or `"1518.00"`) in reais.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// First day of the contract.
    #[serde(default)]
    pub contract_start: Option<String>,
    /// Last worked day.
    #[serde(default)]
    pub contract_end: Option<String>,
    /// Gross monthly salary in reais, at most two decimal places.
    #[serde(default)]
    pub gross_salary: Option<Value>,
    /// `no_cause_dismissal`, `employee_resignation` or `just_cause_dismissal`.
    #[serde(default)]
    pub termination_reason: Option<String>,
    /// `indemnified`, `worked` or `not_applicable` (the default).
    #[serde(default)]
    pub notice_type: Option<String>,
    /// Expired, unused vacation periods (default 0).
    #[serde(default)]
    pub unused_vacation_periods: Option<i64>,
    /// Dependents declared for income tax (default 0).
    #[serde(default)]
    pub dependents_for_tax: Option<i64>,
    /// Court-ordered alimony percentage, 0 to 100 (default 0).
    #[serde(default)]
    pub alimony_percentage: Option<Value>,
}

impl CalculationRequest {
    /// Validates the request and converts it into engine input.
    ///
    /// The salary is converted from reais to centavos here and nowhere else.
    pub fn into_input(self) -> Result<TerminationInput, ValidationError> {
        let mut issues = Vec::new();

        let contract_start = required(&mut issues, "contract_start", self.contract_start)
            .and_then(|raw| record(&mut issues, "contract_start", parse_date(&raw)));
        let contract_end = required(&mut issues, "contract_end", self.contract_end)
            .and_then(|raw| record(&mut issues, "contract_end", parse_date(&raw)));

        if let (Some(start), Some(end)) = (contract_start, contract_end) {
            if start > end {
                issues.push(FieldIssue::new(
                    "contract_start",
                    format!("must not be after contract_end ({} > {})", start, end),
                ));
            }
        }

        let gross_monthly_salary = required(&mut issues, "gross_salary", self.gross_salary)
            .and_then(|raw| record(&mut issues, "gross_salary", parse_salary(&raw)));

        let termination_reason =
            required(&mut issues, "termination_reason", self.termination_reason)
                .and_then(|raw| record(&mut issues, "termination_reason", parse_reason(&raw)));

        let notice_type = match self.notice_type {
            Some(raw) => record(&mut issues, "notice_type", parse_notice(&raw)),
            None => Some(NoticeType::default()),
        };

        let unused_vacation_periods = record(
            &mut issues,
            "unused_vacation_periods",
            parse_count(self.unused_vacation_periods),
        );
        let dependents_for_tax = record(
            &mut issues,
            "dependents_for_tax",
            parse_count(self.dependents_for_tax),
        );

        let alimony_percentage = match self.alimony_percentage {
            Some(raw) => record(&mut issues, "alimony_percentage", parse_percentage(&raw)),
            None => Some(Decimal::ZERO),
        };

        match (
            contract_start,
            contract_end,
            gross_monthly_salary,
            termination_reason,
            notice_type,
            unused_vacation_periods,
            dependents_for_tax,
            alimony_percentage,
        ) {
            (
                Some(contract_start),
                Some(contract_end),
                Some(gross_monthly_salary),
                Some(termination_reason),
                Some(notice_type),
                Some(unused_vacation_periods),
                Some(dependents_for_tax),
                Some(alimony_percentage),
            ) if issues.is_empty() => Ok(TerminationInput {
                contract_start,
                contract_end,
                gross_monthly_salary,
                termination_reason,
                notice_type,
                unused_vacation_periods,
                dependents_for_tax,
                alimony_percentage,
            }),
            _ => Err(ValidationError::new(issues)),
        }
    }
}

fn required<T>(issues: &mut Vec<FieldIssue>, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        issues.push(FieldIssue::new(field, "is required"));
    }
    value
}

fn record<T>(issues: &mut Vec<FieldIssue>, field: &str, parsed: Result<T, String>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue::new(field, message));
            None
        }
    }
}

/// Parses `YYYY-MM-DD` or `DD/MM/YYYY`.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| format!("must be a date as YYYY-MM-DD or DD/MM/YYYY, got '{}'", raw))
}

fn parse_decimal(raw: &Value) -> Result<Decimal, String> {
    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(format!("must be a number, got {}", other)),
    };
    text.parse::<Decimal>()
        .map_err(|_| format!("must be a number, got '{}'", text))
}

/// Converts a salary in reais to centavos, exactly.
pub(crate) fn parse_salary(raw: &Value) -> Result<Cents, String> {
    let reais = parse_decimal(raw)?.normalize();
    if reais <= Decimal::ZERO {
        return Err(format!("must be positive, got {}", reais));
    }
    if reais.scale() > 2 {
        return Err(format!("must have at most two decimal places, got {}", reais));
    }
    let cents = reais
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| format!("is too large: {}", reais))?;
    if cents > MAX_GROSS_MONTHLY_SALARY {
        return Err(format!(
            "must not exceed {}, got {}",
            Decimal::new(MAX_GROSS_MONTHLY_SALARY, 2),
            reais
        ));
    }
    Ok(cents)
}

fn parse_percentage(raw: &Value) -> Result<Decimal, String> {
    let percentage = parse_decimal(raw)?;
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(format!("must be between 0 and 100, got {}", percentage));
    }
    Ok(percentage)
}

fn parse_count(raw: Option<i64>) -> Result<u32, String> {
    match raw {
        None => Ok(0),
        Some(n) if n < 0 => Err(format!("must not be negative, got {}", n)),
        Some(n) => u32::try_from(n).map_err(|_| format!("is too large: {}", n)),
    }
}

fn parse_reason(raw: &str) -> Result<TerminationReason, String> {
    serde_json::from_value(Value::String(raw.trim().to_string())).map_err(|_| {
        format!(
            "must be one of no_cause_dismissal, employee_resignation, just_cause_dismissal, got '{}'",
            raw
        )
    })
}

fn parse_notice(raw: &str) -> Result<NoticeType, String> {
    serde_json::from_value(Value::String(raw.trim().to_string())).map_err(|_| {
        format!(
            "must be one of indemnified, worked, not_applicable, got '{}'",
            raw
        )
    })
}
