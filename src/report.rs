//! Presentation of a settlement for Brazilian readers.
//!
//! The engine's result is typed integer centavos; this module turns it into
//! labelled `R$` strings and `dd/mm/yyyy` dates. Nothing here feeds back
//! into a calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Cents, SettlementResult, TerminationInput, TerminationReason};

/// Formats centavos as Brazilian reais: `R$ 1.518,00`.
///
/// # Examples
///
/// ```
/// use severance_engine::report::format_brl;
///
/// assert_eq!(format_brl(151_800), "R$ 1.518,00");
/// assert_eq!(format_brl(5), "R$ 0,05");
/// assert_eq!(format_brl(-123_456_789), "-R$ 1.234.567,89");
/// ```
pub fn format_brl(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let reais = (magnitude / 100).to_string();
    let centavos = magnitude % 100;

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, digit) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{:02}", sign, grouped, centavos)
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn reason_label(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::NoCauseDismissal => "Dispensa sem justa causa",
        TerminationReason::EmployeeResignation => "Pedido de demissão",
        TerminationReason::JustCauseDismissal => "Dispensa por justa causa",
    }
}

/// One `label: value` line of a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// What the value is.
    pub label: String,
    /// The formatted value.
    pub value: String,
}

impl ReportLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    fn money(label: impl Into<String>, cents: Cents) -> Self {
        Self::new(label, format_brl(cents))
    }
}

/// An ordered, titled group of report lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section heading.
    pub title: String,
    /// Lines in display order.
    pub lines: Vec<ReportLine>,
}

impl ReportSection {
    /// Looks up a line's value by label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// A settlement rendered as the four sections of a termination statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Contract dates, months worked, notice days and reason.
    pub information: ReportSection,
    /// Each entitlement and the gross total.
    pub entitlements: ReportSection,
    /// Each withholding and the total deductions.
    pub deductions: ReportSection,
    /// Gross, deductions and net.
    pub summary: ReportSection,
}

impl SettlementReport {
    /// Builds the report for a calculated settlement.
    ///
    /// # Example
    ///
    /// ```
    /// use severance_engine::calculation::calculate_settlement;
    /// use severance_engine::config::StatutoryConfig;
    /// use severance_engine::models::{NoticeType, TerminationInput, TerminationReason};
    /// use severance_engine::report::SettlementReport;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let input = TerminationInput {
    ///     contract_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     contract_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    ///     gross_monthly_salary: 300_000,
    ///     termination_reason: TerminationReason::JustCauseDismissal,
    ///     notice_type: NoticeType::NotApplicable,
    ///     unused_vacation_periods: 0,
    ///     dependents_for_tax: 0,
    ///     alimony_percentage: Decimal::ZERO,
    /// };
    /// let result = calculate_settlement(&input, &StatutoryConfig::clt_2025()).unwrap();
    ///
    /// let report = SettlementReport::from_result(&input, &result);
    /// assert_eq!(report.information.value("Data de Início"), Some("01/03/2024"));
    /// assert_eq!(report.entitlements.value("Saldo de Salário"), Some("R$ 3.100,00"));
    /// ```
    pub fn from_result(input: &TerminationInput, result: &SettlementResult) -> Self {
        let mut information = vec![
            ReportLine::new("Data de Início", format_date(input.contract_start)),
            ReportLine::new("Data de Fim", format_date(input.contract_end)),
        ];
        if result.effective_end_date != input.contract_end {
            information.push(ReportLine::new(
                "Data de Fim Projetada",
                format_date(result.effective_end_date),
            ));
        }
        information.extend([
            ReportLine::new("Salário Bruto", format_brl(input.gross_monthly_salary)),
            ReportLine::new("Meses Trabalhados", result.accrued_months.to_string()),
            ReportLine::new("Dias de Aviso Prévio", result.notice_days.to_string()),
            ReportLine::new("Motivo", reason_label(input.termination_reason)),
        ]);

        let e = &result.entitlements;
        let d = &result.deductions;

        Self {
            information: ReportSection {
                title: "Informações".to_string(),
                lines: information,
            },
            entitlements: ReportSection {
                title: "Verbas Rescisórias".to_string(),
                lines: vec![
                    ReportLine::money("Saldo de Salário", e.balance_of_salary),
                    ReportLine::money("Aviso Prévio Indenizado", e.notice_pay),
                    ReportLine::money("Férias (Vencidas + Proporcionais)", e.vacation_pay),
                    ReportLine::money("13º Salário Proporcional", e.annual_bonus_proportional),
                    ReportLine::money("Multa 40% FGTS", e.severance_fund_penalty),
                    ReportLine::money("TOTAL BRUTO", result.gross_total),
                ],
            },
            deductions: ReportSection {
                title: "Descontos".to_string(),
                lines: vec![
                    ReportLine::money("INSS", d.social_security_withholding),
                    ReportLine::money("IRRF", d.income_tax_withholding),
                    ReportLine::money("Pensão Alimentícia", d.alimony_withholding),
                    ReportLine::money("TOTAL DESCONTOS", result.total_deductions),
                ],
            },
            summary: ReportSection {
                title: "Resumo".to_string(),
                lines: vec![
                    ReportLine::money("Total Bruto", result.gross_total),
                    ReportLine::money("Total Descontos", result.total_deductions),
                    ReportLine::money("TOTAL LÍQUIDO A RECEBER", result.net_total),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_settlement;
    use crate::config::StatutoryConfig;
    use crate::models::NoticeType;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_brl_grouping() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(99_999), "R$ 999,99");
        assert_eq!(format_brl(100_000), "R$ 1.000,00");
        assert_eq!(format_brl(72_030_700), "R$ 720.307,00");
        assert_eq!(format_brl(100_000_000_000), "R$ 1.000.000.000,00");
    }

    #[test]
    fn test_format_brl_negative() {
        assert_eq!(format_brl(-1), "-R$ 0,01");
        assert!(format_brl(Cents::MIN).starts_with("-R$ 92.233.720.368.547.758,"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2025, 12, 25)), "25/12/2025");
    }

    #[test]
    fn test_report_sections_for_default_scenario() {
        let input = TerminationInput {
            contract_start: date(2023, 1, 15),
            contract_end: date(2025, 12, 25),
            gross_monthly_salary: 151_800,
            termination_reason: TerminationReason::NoCauseDismissal,
            notice_type: NoticeType::Indemnified,
            unused_vacation_periods: 1,
            dependents_for_tax: 0,
            alimony_percentage: Decimal::ZERO,
        };
        let result = calculate_settlement(&input, &StatutoryConfig::clt_2025()).unwrap();

        let report = SettlementReport::from_result(&input, &result);

        assert_eq!(report.information.value("Data de Fim"), Some("25/12/2025"));
        assert_eq!(
            report.information.value("Data de Fim Projetada"),
            Some("30/01/2026")
        );
        assert_eq!(report.information.value("Dias de Aviso Prévio"), Some("36"));
        assert_eq!(
            report.information.value("Motivo"),
            Some("Dispensa sem justa causa")
        );
        assert_eq!(
            report.entitlements.value("Saldo de Salário"),
            Some("R$ 1.265,00")
        );
        assert_eq!(
            report.entitlements.value("Aviso Prévio Indenizado"),
            Some("R$ 1.821,60")
        );
        assert_eq!(report.deductions.value("INSS"), Some("R$ 104,35"));
        assert_eq!(report.entitlements.lines.len(), 6);
        assert_eq!(report.summary.lines.len(), 3);
    }

    #[test]
    fn test_no_projected_line_when_end_date_unchanged() {
        let input = TerminationInput {
            contract_start: date(2024, 1, 1),
            contract_end: date(2025, 6, 30),
            gross_monthly_salary: 200_000,
            termination_reason: TerminationReason::EmployeeResignation,
            notice_type: NoticeType::Worked,
            unused_vacation_periods: 0,
            dependents_for_tax: 0,
            alimony_percentage: Decimal::ZERO,
        };
        let result = calculate_settlement(&input, &StatutoryConfig::clt_2025()).unwrap();

        let report = SettlementReport::from_result(&input, &result);

        assert_eq!(report.information.value("Data de Fim Projetada"), None);
        assert_eq!(
            report.information.value("Motivo"),
            Some("Pedido de demissão")
        );
    }
}
