//! Core data models for the Severance Settlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod settlement_result;
mod termination;

/// A monetary amount in centavos (minor currency units).
///
/// Every amount in the engine is an integer count of centavos; rates are
/// applied with an explicit floor back to whole centavos.
pub type Cents = i64;

pub use settlement_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionSet, EntitlementSet, SettlementResult,
    WithholdingBreakdown,
};
pub use termination::{NoticeType, TerminationInput, TerminationReason};
