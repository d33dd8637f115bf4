use rust_decimal::Decimal;

use crate::error::{CalculatorError, CalculatorResult};
use crate::models::{BenefitsSnapshot, Procedure, ProcedureCategory};

const MAX_COVERAGE: Decimal = Decimal::ONE_HUNDRED;

/// Largest accepted dentist fee, and largest accepted plan total (10^15).
///
/// Every product and sum taken during allocation stays far inside `Decimal`
/// range below this bound.
pub const MAX_PLAN_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Validate a calculation request up front and resolve every procedure's
/// category, in input order.
pub(crate) fn validate_request(
    snapshot: &BenefitsSnapshot,
    procedures: &[Procedure],
) -> CalculatorResult<Vec<ProcedureCategory>> {
    validate_snapshot(snapshot)?;

    if procedures.is_empty() {
        return Err(CalculatorError::invalid_input("at least one procedure is required"));
    }

    let categories = procedures
        .iter()
        .enumerate()
        .map(|(index, procedure)| validate_procedure(index, procedure))
        .collect::<CalculatorResult<Vec<_>>>()?;

    let total = procedures
        .iter()
        .try_fold(Decimal::ZERO, |total, procedure| total.checked_add(procedure.dentist_fee))
        .filter(|total| *total <= MAX_PLAN_AMOUNT);
    if total.is_none() {
        return Err(CalculatorError::invalid_input(format!(
            "total dentist fees exceed the maximum of {MAX_PLAN_AMOUNT}"
        )));
    }

    Ok(categories)
}

fn validate_snapshot(snapshot: &BenefitsSnapshot) -> CalculatorResult<()> {
    non_negative("deductible_remaining", snapshot.deductible_remaining)?;
    non_negative("annual_max_remaining", snapshot.annual_max_remaining)?;

    for (field, coverage) in [
        ("preventive_coverage", snapshot.preventive_coverage),
        ("basic_coverage", snapshot.basic_coverage),
        ("major_coverage", snapshot.major_coverage),
    ] {
        non_negative(field, coverage)?;
        if coverage > MAX_COVERAGE {
            return Err(CalculatorError::invalid_input(format!(
                "{field} must be at most 100, got {coverage}"
            )));
        }
    }
    Ok(())
}

fn validate_procedure(index: usize, procedure: &Procedure) -> CalculatorResult<ProcedureCategory> {
    if procedure.dentist_fee <= Decimal::ZERO {
        return Err(CalculatorError::invalid_input(format!(
            "procedure #{} ({}) must have a positive dentist_fee, got {}",
            index + 1,
            procedure.code,
            procedure.dentist_fee
        )));
    }
    if procedure.dentist_fee > MAX_PLAN_AMOUNT {
        return Err(CalculatorError::invalid_input(format!(
            "procedure #{} ({}) dentist_fee {} exceeds the maximum of {}",
            index + 1,
            procedure.code,
            procedure.dentist_fee,
            MAX_PLAN_AMOUNT
        )));
    }

    procedure.category.parse().map_err(|err: CalculatorError| {
        CalculatorError::invalid_input(format!(
            "procedure #{} ({}): {}",
            index + 1,
            procedure.code,
            err.reason()
        ))
    })
}

fn non_negative(field: &str, value: Decimal) -> CalculatorResult<()> {
    if value < Decimal::ZERO {
        return Err(CalculatorError::invalid_input(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
