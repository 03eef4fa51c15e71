//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed statutory configuration that is
//! deserialized from YAML files or built in code. Nothing in the calculation
//! modules hard-codes a legal constant; they all read it from here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Cents;

/// Metadata identifying a statutory table set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteMetadata {
    /// Short identifier of the table set (e.g., "CLT-2025").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date of the tables.
    pub version: String,
    /// URL to the official source.
    pub source_url: String,
}

/// One row of a progressive tax table.
///
/// `upper_bound` is inclusive; `None` marks the unbounded final bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound in centavos, or `None` for "and above".
    #[serde(default)]
    pub upper_bound: Option<Cents>,
    /// Marginal rate as an exact fraction (0.075 for 7.5%).
    pub rate: Decimal,
    /// Deduction constant subtracted after applying the rate.
    #[serde(default)]
    pub deduction: Cents,
}

/// An ascending, gap-free, non-overlapping sequence of brackets.
///
/// Each bracket starts right after the previous upper bound, so gaps and
/// overlaps are impossible once the bounds are strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table, rejecting empty, unordered or malformed brackets.
    ///
    /// # Example
    ///
    /// ```
    /// use severance_engine::config::{BracketTable, TaxBracket};
    /// use rust_decimal::Decimal;
    ///
    /// let table = BracketTable::new(vec![
    ///     TaxBracket { upper_bound: Some(100_000), rate: Decimal::ZERO, deduction: 0 },
    ///     TaxBracket { upper_bound: None, rate: Decimal::new(10, 2), deduction: 10_000 },
    /// ]).unwrap();
    /// assert_eq!(table.ceiling(), None);
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::invalid_config("bracket table is empty"));
        }

        let last_index = brackets.len() - 1;
        let mut previous_bound: Cents = 0;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "bracket {} has rate {} outside 0..=1",
                    index + 1,
                    bracket.rate
                )));
            }
            if bracket.deduction < 0 {
                return Err(EngineError::invalid_config(format!(
                    "bracket {} has a negative deduction",
                    index + 1
                )));
            }
            match bracket.upper_bound {
                Some(bound) if bound <= previous_bound => {
                    return Err(EngineError::invalid_config(format!(
                        "bracket {} upper bound {} does not exceed the previous bound {}",
                        index + 1,
                        bound,
                        previous_bound
                    )));
                }
                Some(bound) => previous_bound = bound,
                None if index != last_index => {
                    return Err(EngineError::invalid_config(format!(
                        "only the last bracket may be unbounded, bracket {} is not last",
                        index + 1
                    )));
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Checks that every deduction constant continues the bracket before it.
    ///
    /// The simplified formula `base × rate − deduction` is continuous at a
    /// bound only when
    /// `deduction[i] = deduction[i-1] + bound[i-1] × (rate[i] − rate[i-1])`.
    /// Published deductions are rounded to the centavo, so a difference of
    /// at most one centavo is accepted.
    pub fn check_deduction_continuity(&self) -> EngineResult<()> {
        for (index, pair) in self.brackets.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let Some(bound) = previous.upper_bound else {
                continue;
            };
            let expected = Decimal::from(previous.deduction)
                + Decimal::from(bound) * (current.rate - previous.rate);
            if (Decimal::from(current.deduction) - expected).abs() > Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "bracket {} deduction {} does not continue bracket {} at {} (expected {})",
                    index + 2,
                    current.deduction,
                    index + 1,
                    bound,
                    expected.round_dp(2)
                )));
            }
        }
        Ok(())
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the upper bound of the last bracket, if the table is capped.
    pub fn ceiling(&self) -> Option<Cents> {
        self.brackets.last().and_then(|b| b.upper_bound)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        BracketTable::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

/// Constants for counting service time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualRules {
    /// Minimum days inside a calendar month for it to count as complete.
    pub full_month_min_days: u32,
    /// Divisor turning a monthly salary into a daily rate.
    pub days_per_month: i64,
    /// Divisor turning a monthly salary into a per-twelfth amount.
    pub months_per_year: i64,
}

/// Constants for the proportional notice period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeRules {
    /// Notice days owed regardless of tenure.
    pub base_days: u32,
    /// Extra days per completed year of service.
    pub additional_days_per_year: u32,
    /// Maximum notice days.
    pub max_days: u32,
}

/// Constants for vacation pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRules {
    /// Divisor of the constitutional bonus (3 for one third).
    pub bonus_divisor: i64,
}

/// Rates for the severance fund (FGTS) estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceFundRules {
    /// Monthly deposit as a fraction of salary (0.08).
    pub deposit_rate: Decimal,
    /// Penalty over the fund balance (0.40).
    pub penalty_rate: Decimal,
}

/// Policy choices the law leaves open.
///
/// Revisions of the rule set disagree on both; they are explicit here so
/// the caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFlags {
    /// Service months required before notice pay is owed (0 disables).
    #[serde(default)]
    pub notice_minimum_months: u32,
    /// Whether indemnified notice extends the accrual window of vacation,
    /// 13th salary and FGTS.
    #[serde(default = "default_project_indemnified_notice")]
    pub project_indemnified_notice: bool,
}

fn default_project_indemnified_notice() -> bool {
    true
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self {
            notice_minimum_months: 0,
            project_indemnified_notice: true,
        }
    }
}

/// Contents of `statute.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteConfig {
    /// Metadata identifying the table set.
    pub metadata: StatuteMetadata,
    /// Service-time counting constants.
    pub accrual: AccrualRules,
    /// Notice period constants.
    pub notice: NoticeRules,
    /// Vacation constants.
    pub vacation: VacationRules,
    /// FGTS rates.
    pub severance_fund: SeveranceFundRules,
    /// Open policy choices.
    #[serde(default)]
    pub policy: PolicyFlags,
}

/// Contents of `social_security.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityConfig {
    /// INSS progressive table; a bounded last bracket is the contribution ceiling.
    pub brackets: BracketTable,
}

/// Contents of `income_tax.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Deduction per declared dependent, in centavos.
    pub dependent_deduction: Cents,
    /// IRRF table.
    pub brackets: BracketTable,
}

/// The complete statutory configuration injected into every calculation.
///
/// This struct aggregates the constants, tax tables and policy flags
/// loaded from a configuration directory or built in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryConfig {
    statute: StatuteConfig,
    social_security: SocialSecurityConfig,
    income_tax: IncomeTaxConfig,
}

impl StatutoryConfig {
    /// Creates a configuration from its component parts, validating the constants.
    pub fn new(
        statute: StatuteConfig,
        social_security: SocialSecurityConfig,
        income_tax: IncomeTaxConfig,
    ) -> EngineResult<Self> {
        if statute.accrual.days_per_month <= 0 || statute.accrual.months_per_year <= 0 {
            return Err(EngineError::invalid_config(
                "days_per_month and months_per_year must be positive",
            ));
        }
        if statute.accrual.full_month_min_days == 0 || statute.accrual.full_month_min_days > 31 {
            return Err(EngineError::invalid_config(
                "full_month_min_days must be between 1 and 31",
            ));
        }
        if statute.vacation.bonus_divisor <= 0 {
            return Err(EngineError::invalid_config(
                "vacation bonus_divisor must be positive",
            ));
        }
        if statute.notice.max_days < statute.notice.base_days {
            return Err(EngineError::invalid_config(
                "notice max_days must not be below base_days",
            ));
        }
        let fund = &statute.severance_fund;
        for (name, rate) in [
            ("deposit_rate", fund.deposit_rate),
            ("penalty_rate", fund.penalty_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "severance fund {} {} outside 0..=1",
                    name, rate
                )));
            }
        }
        if income_tax.dependent_deduction < 0 {
            return Err(EngineError::invalid_config(
                "dependent_deduction must not be negative",
            ));
        }
        income_tax.brackets.check_deduction_continuity()?;

        Ok(Self {
            statute,
            social_security,
            income_tax,
        })
    }

    /// The 2025 CLT tables and constants.
    ///
    /// INSS is the January 2025 table and IRRF the May 2025 table, both in
    /// centavos; the dependent deduction is R$ 189,59.
    pub fn clt_2025() -> Self {
        let bracket = |upper_bound: Option<Cents>, rate: Decimal, deduction: Cents| TaxBracket {
            upper_bound,
            rate,
            deduction,
        };

        Self {
            statute: StatuteConfig {
                metadata: StatuteMetadata {
                    code: "CLT-2025".to_string(),
                    name: "Consolidação das Leis do Trabalho - tabelas 2025".to_string(),
                    version: "2025-05-01".to_string(),
                    source_url: "https://www.planalto.gov.br/ccivil_03/decreto-lei/del5452.htm"
                        .to_string(),
                },
                accrual: AccrualRules {
                    full_month_min_days: 15,
                    days_per_month: 30,
                    months_per_year: 12,
                },
                notice: NoticeRules {
                    base_days: 30,
                    additional_days_per_year: 3,
                    max_days: 90,
                },
                vacation: VacationRules { bonus_divisor: 3 },
                severance_fund: SeveranceFundRules {
                    deposit_rate: Decimal::new(8, 2),
                    penalty_rate: Decimal::new(40, 2),
                },
                policy: PolicyFlags::default(),
            },
            social_security: SocialSecurityConfig {
                brackets: BracketTable {
                    brackets: vec![
                        bracket(Some(151_800), Decimal::new(75, 3), 0),
                        bracket(Some(279_388), Decimal::new(9, 2), 0),
                        bracket(Some(419_083), Decimal::new(12, 2), 0),
                        bracket(Some(815_741), Decimal::new(14, 2), 0),
                    ],
                },
            },
            income_tax: IncomeTaxConfig {
                dependent_deduction: 18_959,
                brackets: BracketTable {
                    brackets: vec![
                        bracket(Some(242_880), Decimal::ZERO, 0),
                        bracket(Some(282_665), Decimal::new(75, 3), 18_216),
                        bracket(Some(375_105), Decimal::new(15, 2), 39_416),
                        bracket(Some(466_468), Decimal::new(225, 3), 67_549),
                        bracket(None, Decimal::new(275, 3), 90_873),
                    ],
                },
            },
        }
    }

    /// Returns a copy of this configuration with different policy flags.
    pub fn with_policy(mut self, policy: PolicyFlags) -> Self {
        self.statute.policy = policy;
        self
    }

    /// Returns the statute metadata.
    pub fn metadata(&self) -> &StatuteMetadata {
        &self.statute.metadata
    }

    /// Returns the service-time counting constants.
    pub fn accrual(&self) -> &AccrualRules {
        &self.statute.accrual
    }

    /// Returns the notice period constants.
    pub fn notice(&self) -> &NoticeRules {
        &self.statute.notice
    }

    /// Returns the vacation constants.
    pub fn vacation(&self) -> &VacationRules {
        &self.statute.vacation
    }

    /// Returns the FGTS rates.
    pub fn severance_fund(&self) -> &SeveranceFundRules {
        &self.statute.severance_fund
    }

    /// Returns the policy flags.
    pub fn policy(&self) -> &PolicyFlags {
        &self.statute.policy
    }

    /// Returns the INSS table.
    pub fn social_security_table(&self) -> &BracketTable {
        &self.social_security.brackets
    }

    /// Returns the IRRF table.
    pub fn income_tax_table(&self) -> &BracketTable {
        &self.income_tax.brackets
    }

    /// Returns the IRRF deduction per dependent.
    pub fn dependent_deduction(&self) -> Cents {
        self.income_tax.dependent_deduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(upper_bound: Option<Cents>, rate: &str) -> TaxBracket {
        TaxBracket {
            upper_bound,
            rate: rate.parse().unwrap(),
            deduction: 0,
        }
    }

    fn deducting(upper_bound: Option<Cents>, rate: &str, deduction: Cents) -> TaxBracket {
        TaxBracket {
            deduction,
            ..bracket(upper_bound, rate)
        }
    }

    #[test]
    fn test_clt_2025_tables_are_valid() {
        let config = StatutoryConfig::clt_2025();
        let ss = config.social_security_table().brackets().to_vec();
        let ir = config.income_tax_table().brackets().to_vec();
        assert!(BracketTable::new(ss).is_ok());
        assert!(BracketTable::new(ir).is_ok());
        assert_eq!(config.social_security_table().ceiling(), Some(815_741));
        assert_eq!(config.income_tax_table().ceiling(), None);
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = BracketTable::new(vec![]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_descending_bounds_rejected() {
        let result = BracketTable::new(vec![
            bracket(Some(200), "0.1"),
            bracket(Some(100), "0.2"),
        ]);
        match result {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("bracket 2"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_bounds_rejected() {
        let result = BracketTable::new(vec![
            bracket(Some(100), "0.1"),
            bracket(Some(100), "0.2"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unbounded_bracket_must_be_last() {
        let result = BracketTable::new(vec![bracket(None, "0.1"), bracket(Some(100), "0.2")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let result = BracketTable::new(vec![bracket(None, "1.5")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_deserializes_through_validation() {
        let yaml = "- upper_bound: 100\n  rate: \"0.1\"\n- upper_bound: 50\n  rate: \"0.2\"\n";
        let result: Result<BracketTable, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());

        let yaml = "- upper_bound: 100\n  rate: \"0.1\"\n- rate: \"0.2\"\n  deduction: 10\n";
        let table: BracketTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.brackets().len(), 2);
        assert_eq!(table.brackets()[1].deduction, 10);
    }

    #[test]
    fn test_builtin_configuration_passes_validation() {
        let config = StatutoryConfig::clt_2025();
        let rebuilt = StatutoryConfig::new(
            config.statute.clone(),
            config.social_security.clone(),
            config.income_tax.clone(),
        );
        assert_eq!(rebuilt.unwrap(), config);
    }

    #[test]
    fn test_discontinuous_income_tax_deductions_rejected() {
        let config = StatutoryConfig::clt_2025();
        let mut income_tax = config.income_tax.clone();
        // 15840 + 280500 x 0.075 = 36877.5, not 37062
        income_tax.brackets = BracketTable::new(vec![
            deducting(Some(211_200), "0", 0),
            deducting(Some(280_500), "0.075", 15_840),
            deducting(Some(370_300), "0.15", 37_062),
            deducting(None, "0.225", 90_989),
        ])
        .unwrap();

        let result = StatutoryConfig::new(
            config.statute.clone(),
            config.social_security.clone(),
            income_tax,
        );
        match result {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("bracket 3"));
                assert!(message.contains("280500"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_deduction_rounding_tolerates_one_centavo() {
        // 100000 x 0.075 = 7500
        let within = BracketTable::new(vec![
            deducting(Some(100_000), "0", 0),
            deducting(None, "0.075", 7_501),
        ])
        .unwrap();
        assert!(within.check_deduction_continuity().is_ok());

        let beyond = BracketTable::new(vec![
            deducting(Some(100_000), "0", 0),
            deducting(None, "0.075", 7_502),
        ])
        .unwrap();
        assert!(beyond.check_deduction_continuity().is_err());
    }

    #[test]
    fn test_notice_cap_below_base_rejected() {
        let config = StatutoryConfig::clt_2025();
        let mut statute = config.statute.clone();
        statute.notice.max_days = 10;
        let result = StatutoryConfig::new(
            statute,
            config.social_security.clone(),
            config.income_tax.clone(),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_with_policy_replaces_flags() {
        let config = StatutoryConfig::clt_2025().with_policy(PolicyFlags {
            notice_minimum_months: 3,
            project_indemnified_notice: false,
        });
        assert_eq!(config.policy().notice_minimum_months, 3);
        assert!(!config.policy().project_indemnified_notice);
    }

    #[test]
    fn test_policy_flags_default_when_missing() {
        let flags: PolicyFlags = serde_yaml::from_str("{}").unwrap();
        assert_eq!(flags, PolicyFlags::default());
        assert!(flags.project_indemnified_notice);
    }
}
