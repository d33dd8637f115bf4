use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::CalculatorResult;
use crate::models::{AllocationResult, BenefitsSnapshot, Procedure, ProcedureBreakdown, ProcedureCategory};
use crate::policy::AllocationPolicy;
use crate::summary::{format_currency, format_percent};
use crate::validation::validate_request;

pub const ANNUAL_MAX_EXHAUSTED_NOTE: &str =
    "Annual maximum exhausted — full remaining fee is patient responsibility";
pub const ANNUAL_MAX_CAPPED_NOTE: &str = "Annual maximum reached mid-procedure — coverage capped";
pub const PREVENTIVE_DEDUCTIBLE_WAIVED_NOTE: &str = "Deductible waived for preventive care";
pub const FULL_COVERAGE_NOTE: &str = "Covered at 100% - no patient cost";

/// Deductible and annual maximum left while walking a treatment plan.
/// Lives for exactly one `allocate` call.
#[derive(Debug, Clone, Copy)]
struct RunningBalances {
    deductible: Decimal,
    annual_max: Decimal,
}

/// Splits a treatment plan between insurer and patient.
///
/// Procedures are processed in the order given: earlier procedures consume
/// the deductible and the annual maximum first. The allocator holds only its
/// policy, so one instance can serve any number of concurrent calculations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreatmentCostAllocator {
    policy: AllocationPolicy,
}

impl TreatmentCostAllocator {
    /// Create an allocator with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with a custom policy
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the policy fails validation.
    pub fn with_policy(policy: AllocationPolicy) -> CalculatorResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Allocate the cost of each procedure between insurer and patient.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CalculatorError::InvalidInput`] when the procedure list
    /// is empty, a fee is not positive, a fee or the plan total exceeds
    /// [`crate::MAX_PLAN_AMOUNT`], a category is not recognized, or a snapshot
    /// amount or coverage is out of range. Nothing is allocated in that case.
    pub fn allocate(
        &self,
        snapshot: &BenefitsSnapshot,
        procedures: &[Procedure],
    ) -> CalculatorResult<AllocationResult> {
        let categories = validate_request(snapshot, procedures).map_err(|err| {
            warn!(reason = %err.reason(), "Rejected treatment calculation request");
            err
        })?;

        let mut balances = RunningBalances {
            deductible: snapshot.deductible_remaining,
            annual_max: snapshot.annual_max_remaining,
        };

        let breakdowns: Vec<ProcedureBreakdown> = procedures
            .iter()
            .zip(categories)
            .map(|(procedure, category)| {
                let coverage = snapshot.coverage_for(category);
                let breakdown = self.allocate_procedure(procedure, category, coverage, &mut balances);
                debug!(
                    code = %breakdown.code,
                    category = %category,
                    deductible_applied = %breakdown.deductible_applied,
                    insurance_pays = %breakdown.insurance_pays,
                    patient_pays = %breakdown.patient_pays,
                    "Allocated procedure"
                );
                breakdown
            })
            .collect();

        let result = AllocationResult::from_breakdowns(breakdowns, balances.annual_max);

        info!(
            procedures = result.procedures.len(),
            total_dentist_fees = %result.total_dentist_fees,
            total_insurance_pays = %result.total_insurance_pays,
            total_patient_pays = %result.total_patient_pays,
            remaining_annual_max = %result.remaining_annual_max,
            "Treatment cost calculated"
        );

        Ok(result)
    }

    fn allocate_procedure(
        &self,
        procedure: &Procedure,
        category: ProcedureCategory,
        coverage_percentage: Decimal,
        balances: &mut RunningBalances,
    ) -> ProcedureBreakdown {
        let mut notes = Vec::new();
        let insurance_allowed = procedure.dentist_fee;

        let deductible_applied = if self.policy.deductible_applies(category) {
            insurance_allowed.min(balances.deductible)
        } else {
            if balances.deductible > Decimal::ZERO {
                notes.push(PREVENTIVE_DEDUCTIBLE_WAIVED_NOTE.to_string());
            }
            Decimal::ZERO
        };
        balances.deductible -= deductible_applied;
        if deductible_applied > Decimal::ZERO {
            notes.push(format!("{} applied to deductible", format_currency(deductible_applied)));
        }

        // Deductible is patient-borne and comes off the allowed amount before coinsurance
        let payable_base = insurance_allowed - deductible_applied;
        // Rounding up must never push the insurer past the payable base
        let insurance_pays_raw = self
            .policy
            .round(payable_base * coverage_percentage / Decimal::ONE_HUNDRED)
            .min(payable_base);

        let (insurance_pays, annual_max_note) = if balances.annual_max <= Decimal::ZERO {
            (Decimal::ZERO, Some(ANNUAL_MAX_EXHAUSTED_NOTE))
        } else {
            let pays = insurance_pays_raw.min(balances.annual_max);
            balances.annual_max -= pays;
            (pays, (pays < insurance_pays_raw).then_some(ANNUAL_MAX_CAPPED_NOTE))
        };

        let patient_coinsurance = payable_base - insurance_pays;
        let patient_pays = deductible_applied + patient_coinsurance;

        if coverage_percentage < Decimal::ONE_HUNDRED {
            notes.push(format!(
                "Patient pays {} coinsurance",
                format_percent(Decimal::ONE_HUNDRED - coverage_percentage)
            ));
        } else if patient_pays.is_zero() {
            notes.push(FULL_COVERAGE_NOTE.to_string());
        }
        if let Some(note) = annual_max_note {
            notes.push(note.to_string());
        }

        ProcedureBreakdown {
            code: procedure.code.clone(),
            description: procedure.description.clone(),
            dentist_fee: procedure.dentist_fee,
            coverage_percentage,
            insurance_allowed,
            deductible_applied,
            insurance_pays,
            patient_coinsurance,
            patient_pays,
            notes,
        }
    }
}

/// Allocate with the default policy.
///
/// # Errors
///
/// See [`TreatmentCostAllocator::allocate`].
pub fn allocate(
    snapshot: &BenefitsSnapshot,
    procedures: &[Procedure],
) -> CalculatorResult<AllocationResult> {
    TreatmentCostAllocator::new().allocate(snapshot, procedures)
}
