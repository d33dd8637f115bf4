use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

/// Patient benefit state at the time of the estimate.
///
/// Amounts are currency, coverages are the insurer's share in percent.
/// The allocator never mutates a snapshot; it keeps its own running
/// balances for the duration of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitsSnapshot {
    pub deductible_remaining: Decimal,
    pub annual_max_remaining: Decimal,
    pub preventive_coverage: Decimal,
    pub basic_coverage: Decimal,
    pub major_coverage: Decimal,
}

impl BenefitsSnapshot {
    /// Coverage percentage for a procedure category
    pub fn coverage_for(&self, category: ProcedureCategory) -> Decimal {
        match category {
            ProcedureCategory::Preventive => self.preventive_coverage,
            ProcedureCategory::Basic => self.basic_coverage,
            ProcedureCategory::Major => self.major_coverage,
        }
    }
}

/// Dental procedure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureCategory {
    /// Cleanings, exams, x-rays
    Preventive,
    /// Fillings, simple extractions
    Basic,
    /// Crowns, bridges, implants
    Major,
}

impl ProcedureCategory {
    pub const ALL: [ProcedureCategory; 3] = [
        ProcedureCategory::Preventive,
        ProcedureCategory::Basic,
        ProcedureCategory::Major,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureCategory::Preventive => "preventive",
            ProcedureCategory::Basic => "basic",
            ProcedureCategory::Major => "major",
        }
    }
}

impl fmt::Display for ProcedureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcedureCategory {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| {
                CalculatorError::invalid_input(format!(
                    "unrecognized procedure category '{s}' (expected preventive, basic or major)"
                ))
            })
    }
}

/// Proposed procedure in a treatment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    /// CDT code, e.g. "D2391"
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// Free-form category text, resolved during validation
    pub category: String,
    #[serde(alias = "fee")]
    pub dentist_fee: Decimal,
}

impl Procedure {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        dentist_fee: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            category: category.into(),
            dentist_fee,
        }
    }
}

/// Cost split for one procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureBreakdown {
    pub code: String,
    pub description: String,
    pub dentist_fee: Decimal,
    pub coverage_percentage: Decimal,
    /// Amount the insurer considers; equal to the fee without a fee schedule
    pub insurance_allowed: Decimal,
    pub deductible_applied: Decimal,
    pub insurance_pays: Decimal,
    pub patient_coinsurance: Decimal,
    pub patient_pays: Decimal,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Per-procedure breakdowns plus plan-level totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub procedures: Vec<ProcedureBreakdown>,
    pub total_dentist_fees: Decimal,
    pub total_insurance_pays: Decimal,
    pub total_patient_pays: Decimal,
    pub total_deductible_used: Decimal,
    pub remaining_annual_max: Decimal,
    pub summary: String,
}

impl AllocationResult {
    /// Sum breakdowns into plan totals.
    pub(crate) fn from_breakdowns(
        procedures: Vec<ProcedureBreakdown>,
        remaining_annual_max: Decimal,
    ) -> Self {
        let total_dentist_fees = procedures.iter().map(|p| p.dentist_fee).sum();
        let total_insurance_pays = procedures.iter().map(|p| p.insurance_pays).sum();
        let total_patient_pays = procedures.iter().map(|p| p.patient_pays).sum();
        let total_deductible_used = procedures.iter().map(|p| p.deductible_applied).sum();

        let summary = crate::summary::treatment_summary(
            total_dentist_fees,
            procedures.len(),
            total_insurance_pays,
            total_patient_pays,
        );

        Self {
            procedures,
            total_dentist_fees,
            total_insurance_pays,
            total_patient_pays,
            total_deductible_used,
            remaining_annual_max,
            summary,
        }
    }
}
