//! Configuration loading and management for the Severance Settlement Engine.
//!
//! This module provides the statutory configuration injected into every
//! calculation: INSS and IRRF tables, legal constants and the policy flags
//! for choices the law leaves open. It can be loaded from YAML files or
//! built in code.
//!
//! # Example
//!
//! ```no_run
//! use severance_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/clt-2025").unwrap();
//! println!("Loaded tables: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualRules, BracketTable, IncomeTaxConfig, NoticeRules, PolicyFlags, SeveranceFundRules,
    SocialSecurityConfig, StatuteConfig, StatuteMetadata, StatutoryConfig, TaxBracket,
    VacationRules,
};
