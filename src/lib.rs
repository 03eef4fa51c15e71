//! Severance Settlement Engine for Brazilian employment terminations
//!
//! This crate computes the final settlement (*rescisão*) owed when a CLT
//! employment contract ends: balance of salary, indemnified notice,
//! vacation, 13th salary and the FGTS penalty, less INSS, IRRF and alimony.
//! Amounts are integer centavos, floored at every step, and each applied
//! rule is recorded in an audit trace.
//!
//! ```
//! use severance_engine::{StatutoryConfig, TerminationInput, calculate_settlement};
//! use severance_engine::models::{NoticeType, TerminationReason};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let input = TerminationInput {
//!     contract_start: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
//!     contract_end: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
//!     gross_monthly_salary: 151_800,
//!     termination_reason: TerminationReason::NoCauseDismissal,
//!     notice_type: NoticeType::Indemnified,
//!     unused_vacation_periods: 1,
//!     dependents_for_tax: 0,
//!     alimony_percentage: Decimal::ZERO,
//! };
//!
//! let result = calculate_settlement(&input, &StatutoryConfig::clt_2025()).unwrap();
//! assert_eq!(result.notice_days, 36);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use calculation::calculate_settlement;
pub use config::StatutoryConfig;
pub use error::{EngineError, EngineResult};
pub use models::{SettlementResult, TerminationInput};
