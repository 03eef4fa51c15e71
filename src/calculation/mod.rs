//! Calculation logic for the Severance Settlement Engine.
//!
//! This module contains every step of a settlement: input validation,
//! service-time accrual under the 15-day rule, balance of salary,
//! indemnified notice, vacation, 13th salary, the FGTS penalty, and the
//! INSS, IRRF and alimony withholdings. [`calculate_settlement`] runs them
//! in order and aggregates the result.

mod accrual;
mod alimony;
mod annual_bonus;
mod balance_of_salary;
mod income_tax;
mod notice_pay;
mod rounding;
mod settlement;
mod severance_fund;
mod social_security;
mod vacation;
mod validation;

pub use accrual::{
    ServiceAccrual, ServiceAccrualResult, add_years, calculate_service_accrual, completed_years,
    months_accrued, notice_days,
};
pub use alimony::{AlimonyResult, calculate_alimony};
pub use annual_bonus::{AnnualBonusResult, calculate_annual_bonus};
pub use balance_of_salary::{BalanceOfSalaryResult, calculate_balance_of_salary};
pub use income_tax::{IncomeTaxBases, IncomeTaxResult, bracket_tax, calculate_income_tax};
pub use notice_pay::{NoticePayResult, calculate_notice_pay};
pub use settlement::calculate_settlement;
pub use severance_fund::{SeveranceFundResult, calculate_severance_fund_penalty};
pub use social_security::{
    SocialSecurityResult, calculate_social_security, progressive_contribution,
};
pub use vacation::{VacationResult, calculate_vacation_pay};
pub use validation::{MAX_GROSS_MONTHLY_SALARY, validate_input};
