//! Property tests for allocation invariants
//!
//! Generated snapshots and plans must always satisfy:
//! - Conservation: insurer share plus patient share equals the fee
//! - Deductible and annual maximum never over-consumed
//! - Plan order never changes total fees or breaks the annual maximum
//! - The insurer never pays more than the amount left after the deductible,
//!   whatever the fee precision or rounding scale

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use treatment_calculator::{
    allocate, AllocationPolicy, BenefitsSnapshot, Procedure, TreatmentCostAllocator,
    MAX_ROUNDING_SCALE,
};

const CATEGORIES: [&str; 6] = ["preventive", "basic", "major", "Preventive", "BASIC", "Major"];

fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

fn snapshot_strategy() -> impl Strategy<Value = BenefitsSnapshot> {
    (0i64..=200_000, 0i64..=500_000, 0i64..=1000, 0i64..=1000, 0i64..=1000).prop_map(
        |(deductible, annual_max, preventive, basic, major)| BenefitsSnapshot {
            deductible_remaining: cents(deductible),
            annual_max_remaining: cents(annual_max),
            preventive_coverage: Decimal::new(preventive, 1),
            basic_coverage: Decimal::new(basic, 1),
            major_coverage: Decimal::new(major, 1),
        },
    )
}

fn plan_strategy() -> impl Strategy<Value = Vec<Procedure>> {
    prop::collection::vec((1i64..=500_000, 0usize..CATEGORIES.len()), 1..12).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, (fee, category))| {
                Procedure::new(
                    format!("D{:04}", index),
                    "generated",
                    CATEGORIES.get(category).copied().unwrap_or("basic"),
                    cents(fee),
                )
            })
            .collect()
    })
}

/// Fees with up to four decimal places, including sub-cent amounts
fn precise_plan_strategy() -> impl Strategy<Value = Vec<Procedure>> {
    prop::collection::vec((1i64..=5_000_000, 0u32..=4, 0usize..CATEGORIES.len()), 1..12).prop_map(
        |items| {
            items
                .into_iter()
                .enumerate()
                .map(|(index, (fee, scale, category))| {
                    Procedure::new(
                        format!("D{:04}", index),
                        "generated",
                        CATEGORIES.get(category).copied().unwrap_or("basic"),
                        Decimal::new(fee, scale),
                    )
                })
                .collect()
        },
    )
}

fn policy_strategy() -> impl Strategy<Value = AllocationPolicy> {
    (any::<bool>(), 0u32..=MAX_ROUNDING_SCALE).prop_map(|(waived, scale)| {
        AllocationPolicy::default()
            .with_preventive_deductible_waived(waived)
            .with_rounding_scale(scale)
    })
}

proptest! {
    #[test]
    fn prop_each_procedure_conserves_fee(snapshot in snapshot_strategy(), plan in plan_strategy()) {
        let result = allocate(&snapshot, &plan).unwrap();

        prop_assert_eq!(result.procedures.len(), plan.len());
        for breakdown in &result.procedures {
            prop_assert_eq!(breakdown.insurance_pays + breakdown.patient_pays, breakdown.dentist_fee);
            prop_assert_eq!(breakdown.patient_pays, breakdown.deductible_applied + breakdown.patient_coinsurance);
            prop_assert!(breakdown.insurance_pays >= Decimal::ZERO);
            prop_assert!(breakdown.patient_coinsurance >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_balances_never_overdrawn(snapshot in snapshot_strategy(), plan in plan_strategy()) {
        let result = allocate(&snapshot, &plan).unwrap();

        let mut deductible_used = Decimal::ZERO;
        let mut insurance_paid = Decimal::ZERO;
        for breakdown in &result.procedures {
            deductible_used += breakdown.deductible_applied;
            insurance_paid += breakdown.insurance_pays;
            prop_assert!(deductible_used <= snapshot.deductible_remaining);
            prop_assert!(insurance_paid <= snapshot.annual_max_remaining);
        }
        prop_assert_eq!(result.total_deductible_used, deductible_used);
        prop_assert_eq!(result.remaining_annual_max, snapshot.annual_max_remaining - insurance_paid);
    }

    #[test]
    fn prop_totals_match_breakdowns(snapshot in snapshot_strategy(), plan in plan_strategy()) {
        let result = allocate(&snapshot, &plan).unwrap();

        let fees: Decimal = plan.iter().map(|p| p.dentist_fee).sum();
        prop_assert_eq!(result.total_dentist_fees, fees);
        prop_assert_eq!(result.total_insurance_pays + result.total_patient_pays, fees);
    }

    #[test]
    fn prop_reordering_keeps_fees_and_maximum(snapshot in snapshot_strategy(), plan in plan_strategy()) {
        let forward = allocate(&snapshot, &plan).unwrap();
        let reversed_plan: Vec<Procedure> = plan.iter().rev().cloned().collect();
        let reversed = allocate(&snapshot, &reversed_plan).unwrap();

        prop_assert_eq!(forward.total_dentist_fees, reversed.total_dentist_fees);
        prop_assert!(reversed.total_insurance_pays <= snapshot.annual_max_remaining);
        prop_assert!(forward.total_insurance_pays <= snapshot.annual_max_remaining);
    }

    #[test]
    fn prop_zero_coverage_patient_pays_everything(mut snapshot in snapshot_strategy(), plan in plan_strategy()) {
        snapshot.preventive_coverage = Decimal::ZERO;
        snapshot.basic_coverage = Decimal::ZERO;
        snapshot.major_coverage = Decimal::ZERO;

        let result = allocate(&snapshot, &plan).unwrap();
        for breakdown in &result.procedures {
            prop_assert_eq!(breakdown.patient_pays, breakdown.dentist_fee);
        }
        let fees: Decimal = plan.iter().map(|p| p.dentist_fee).sum();
        prop_assert_eq!(result.total_deductible_used, fees.min(snapshot.deductible_remaining));
    }

    #[test]
    fn prop_insurer_share_within_payable_base(
        snapshot in snapshot_strategy(),
        plan in precise_plan_strategy(),
        policy in policy_strategy(),
    ) {
        let allocator = TreatmentCostAllocator::with_policy(policy).unwrap();
        let result = allocator.allocate(&snapshot, &plan).unwrap();

        for breakdown in &result.procedures {
            let payable_base = breakdown.insurance_allowed - breakdown.deductible_applied;
            prop_assert!(breakdown.insurance_pays >= Decimal::ZERO);
            prop_assert!(breakdown.insurance_pays <= payable_base);
            prop_assert!(breakdown.patient_coinsurance >= Decimal::ZERO);
            prop_assert!(breakdown.patient_pays >= breakdown.deductible_applied);
            prop_assert_eq!(breakdown.insurance_pays + breakdown.patient_pays, breakdown.dentist_fee);
        }
        prop_assert!(result.total_insurance_pays <= snapshot.annual_max_remaining);
    }

    #[test]
    fn prop_preventive_waiver_keeps_invariants(snapshot in snapshot_strategy(), plan in plan_strategy()) {
        let allocator = TreatmentCostAllocator::with_policy(
            AllocationPolicy::default().with_preventive_deductible_waived(true),
        )
        .unwrap();
        let result = allocator.allocate(&snapshot, &plan).unwrap();

        prop_assert!(result.total_deductible_used <= snapshot.deductible_remaining);
        prop_assert!(result.total_insurance_pays <= snapshot.annual_max_remaining);
        for breakdown in &result.procedures {
            prop_assert_eq!(breakdown.insurance_pays + breakdown.patient_pays, breakdown.dentist_fee);
        }
    }
}
