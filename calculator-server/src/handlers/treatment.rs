use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use treatment_calculator::{AllocationResult, BenefitsSnapshot, Procedure};

use crate::error::ApiError;
use crate::server::CalculatorServer;

/// Treatment plan plus the patient's current benefits.
///
/// Benefit fields sit beside `procedures` at the top level of the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentCalculationRequest {
    pub procedures: Vec<Procedure>,
    #[serde(flatten)]
    pub benefits: BenefitsSnapshot,
}

/// Calculate patient and insurer costs for a treatment plan
pub async fn calculate_treatment(
    State(server): State<CalculatorServer>,
    payload: Result<Json<TreatmentCalculationRequest>, JsonRejection>,
) -> Result<Json<AllocationResult>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(
        procedures = request.procedures.len(),
        "Calculating treatment plan"
    );

    let result = server
        .allocator
        .allocate(&request.benefits, &request.procedures)?;

    Ok(Json(result))
}
