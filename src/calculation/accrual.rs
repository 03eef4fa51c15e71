//! Service-time accrual.
//!
//! This module counts completed service months under the 15-day rule,
//! completed years of service, and the proportional notice entitlement.
//! It knows nothing about termination reasons; the entitlement
//! calculators call it with whatever window they need.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::{NoticeRules, StatutoryConfig};
use crate::models::{AuditStep, TerminationInput};

/// Counts completed months between two dates, inclusive of both ends.
///
/// Walks each calendar month the period touches. The days of the period
/// falling inside that month are
/// `min(month_end, end) - max(month_start, start) + 1`, and the month
/// counts only when that reaches `full_month_min_days`.
///
/// Returns 0 when `start` is after `end`.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::months_accrued;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
///
/// // Jan: 14 days, Feb: 28 days, Mar: 14 days
/// assert_eq!(months_accrued(start, end, 15), 1);
/// ```
pub fn months_accrued(start: NaiveDate, end: NaiveDate, full_month_min_days: u32) -> u32 {
    if start > end {
        return 0;
    }

    let Some(mut month_start) = start.with_day(1) else {
        return 0;
    };
    let mut months = 0;

    while month_start <= end {
        let next_month = month_start.checked_add_months(Months::new(1));
        let month_end = next_month
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        let from = start.max(month_start);
        let to = end.min(month_end);
        let days_in_range = (to - from).num_days() + 1;

        if days_in_range >= i64::from(full_month_min_days) {
            months += 1;
        }

        match next_month {
            Some(next) => month_start = next,
            None => break,
        }
    }

    months
}

/// Counts whole anniversaries elapsed from `start` to `end`.
///
/// A contract started on 2023-01-15 completes its second year on
/// 2025-01-15, not a day before.
pub fn completed_years(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Adds whole years to a date, clamping 29 February to the 28th.
pub fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .unwrap_or(NaiveDate::MAX)
}

/// Notice entitlement in days: base days plus extra days per completed
/// year of service, capped at the maximum.
///
/// # Examples
///
/// ```
/// use severance_engine::calculation::notice_days;
/// use severance_engine::config::StatutoryConfig;
/// use chrono::NaiveDate;
///
/// let config = StatutoryConfig::clt_2025();
/// let start = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
///
/// assert_eq!(notice_days(start, end, config.notice()), 36);
/// ```
pub fn notice_days(start: NaiveDate, end: NaiveDate, rules: &NoticeRules) -> u32 {
    let years = completed_years(start, end);
    let days = rules
        .additional_days_per_year
        .saturating_mul(years)
        .saturating_add(rules.base_days);
    days.min(rules.max_days)
}

/// Service time measured from contract start to the last worked day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAccrual {
    /// Completed months under the 15-day rule.
    pub accrued_months: u32,
    /// Whole years of service.
    pub completed_years: u32,
    /// Notice entitlement in days.
    pub notice_days: u32,
}

/// The result of measuring service time, including the audit step.
#[derive(Debug, Clone)]
pub struct ServiceAccrualResult {
    /// The measured service time.
    pub accrual: ServiceAccrual,
    /// The audit step recording this measurement.
    pub audit_step: AuditStep,
}

/// Measures the contract's service time up to the last worked day.
///
/// Notice days are measured against `contract_end`, since the effective
/// end date is itself derived from them.
pub fn calculate_service_accrual(
    input: &TerminationInput,
    config: &StatutoryConfig,
    step_number: u32,
) -> ServiceAccrualResult {
    let min_days = config.accrual().full_month_min_days;
    let accrual = ServiceAccrual {
        accrued_months: months_accrued(input.contract_start, input.contract_end, min_days),
        completed_years: completed_years(input.contract_start, input.contract_end),
        notice_days: notice_days(input.contract_start, input.contract_end, config.notice()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "service_accrual".to_string(),
        rule_name: "Service Time Accrual".to_string(),
        legal_ref: "CLT art. 478; Lei 12.506/2011".to_string(),
        input: serde_json::json!({
            "contract_start": input.contract_start.to_string(),
            "contract_end": input.contract_end.to_string(),
            "full_month_min_days": min_days
        }),
        output: serde_json::json!({
            "accrued_months": accrual.accrued_months,
            "completed_years": accrual.completed_years,
            "notice_days": accrual.notice_days
        }),
        reasoning: format!(
            "{} completed months and {} completed years; notice = {} + {} x {} days, capped at {} = {} days",
            accrual.accrued_months,
            accrual.completed_years,
            config.notice().base_days,
            config.notice().additional_days_per_year,
            accrual.completed_years,
            config.notice().max_days,
            accrual.notice_days
        ),
    };

    ServiceAccrualResult {
        accrual,
        audit_step,
    }
}
