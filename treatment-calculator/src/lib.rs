//! Dental Treatment Cost Calculator
//!
//! Estimates what a patient owes for a proposed treatment plan given the
//! current state of their dental benefits:
//! - Deductible consumption, first procedure first
//! - Per-category coinsurance (preventive, basic, major)
//! - Annual maximum capping across the whole plan
//! - Per-procedure notes and a plan-level summary
//!
//! The calculator is a pure function of a [`BenefitsSnapshot`] and an ordered
//! list of [`Procedure`]s. Extracting benefits from documents, persistence and
//! presentation belong to the caller.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use treatment_calculator::{allocate, BenefitsSnapshot, Procedure};
//!
//! let snapshot = BenefitsSnapshot {
//!     deductible_remaining: dec!(50),
//!     annual_max_remaining: dec!(1000),
//!     preventive_coverage: dec!(100),
//!     basic_coverage: dec!(80),
//!     major_coverage: dec!(50),
//! };
//! let plan = vec![Procedure::new("D2391", "Resin composite, one surface", "basic", dec!(200))];
//!
//! let result = allocate(&snapshot, &plan)?;
//! assert_eq!(result.total_insurance_pays, dec!(120));
//! assert_eq!(result.total_patient_pays, dec!(80));
//! # Ok::<(), treatment_calculator::CalculatorError>(())
//! ```

pub mod allocator;
pub mod error;
pub mod models;
pub mod policy;
pub mod summary;
mod validation;

pub use allocator::*;
pub use error::*;
pub use models::*;
pub use policy::*;
pub use summary::{format_currency, format_percent};
pub use validation::MAX_PLAN_AMOUNT;
