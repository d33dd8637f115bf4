// Display helpers for notes and the plan summary
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as dollars with cents, e.g. `$1250.00`
pub fn format_currency(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

/// Format a percentage without trailing zeros, e.g. `20%` or `12.5%`
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.round_dp(2).normalize())
}

pub(crate) fn treatment_summary(
    total_dentist_fees: Decimal,
    procedure_count: usize,
    total_insurance_pays: Decimal,
    total_patient_pays: Decimal,
) -> String {
    let noun = if procedure_count == 1 { "procedure" } else { "procedures" };
    format!(
        "Total treatment cost {} across {} {}: insurance pays {}, patient pays {}.",
        format_currency(total_dentist_fees),
        procedure_count,
        noun,
        format_currency(total_insurance_pays),
        format_currency(total_patient_pays),
    )
}
