use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, CalculatorResult};
use crate::models::ProcedureCategory;

/// Largest supported rounding scale for insurer shares
pub const MAX_ROUNDING_SCALE: u32 = 10;

/// Plan-level allocation rules.
///
/// The default applies the deductible to every category and rounds the
/// insurer's share of each procedure to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Preventive procedures skip the deductible entirely
    pub waive_deductible_for_preventive: bool,
    /// Decimal places kept on the insurer's share of a procedure
    pub rounding_scale: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            waive_deductible_for_preventive: false,
            rounding_scale: 2,
        }
    }
}

impl AllocationPolicy {
    pub fn with_preventive_deductible_waived(mut self, waived: bool) -> Self {
        self.waive_deductible_for_preventive = waived;
        self
    }

    pub fn with_rounding_scale(mut self, scale: u32) -> Self {
        self.rounding_scale = scale;
        self
    }

    /// Check the policy is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidInput`] if the rounding scale exceeds
    /// [`MAX_ROUNDING_SCALE`].
    pub fn validate(&self) -> CalculatorResult<()> {
        if self.rounding_scale > MAX_ROUNDING_SCALE {
            return Err(CalculatorError::invalid_input(format!(
                "rounding_scale {} exceeds the maximum of {}",
                self.rounding_scale, MAX_ROUNDING_SCALE
            )));
        }
        Ok(())
    }

    /// Whether a procedure in this category draws down the deductible
    pub fn deductible_applies(&self, category: ProcedureCategory) -> bool {
        !(self.waive_deductible_for_preventive && category == ProcedureCategory::Preventive)
    }

    pub(crate) fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.rounding_scale, RoundingStrategy::MidpointAwayFromZero)
    }
}
