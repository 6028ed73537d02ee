use restock_inventory::StockSnapshot;

use crate::job::PlannerJob;
use crate::plan::{OrderPlan, PlannerError};

/// Default search ceiling for the target horizon, in days. Ten years of
/// daily consumption; large enough that realistic inputs never saturate it.
pub const DEFAULT_MAX_HORIZON_DAYS: f64 = 3650.0;

/// Default bisection iteration budget. `3650 / 2^40` is far below one unit
/// of any realistic consumption rate.
pub const DEFAULT_ITERATIONS: u32 = 40;

/// The capacity allocator.
///
/// Model:
/// - Filter the snapshot down to eligible items (strictly positive daily
///   consumption), preserving snapshot order.
/// - Bisect over a target days-of-stock horizon `T`: a candidate is feasible
///   when topping every eligible item up to `ceil(sold × T)` units fits the
///   free-capacity budget. A fixed iteration count keeps the search
///   deterministic and bounded-time; there is no epsilon stopping rule.
/// - Materialize orders at the found horizon, walking items in snapshot
///   order with a running remainder.
/// - Spend any remainder in **one** pass over the eligible items sorted by
///   consumption descending, one unit per item. Ties keep snapshot order
///   (stable sort). If the remainder exceeds the eligible count, the
///   surplus stays unspent.
///
/// Total over its input domain: zero budget and an empty eligible set are
/// valid terminal outcomes (empty plan), not errors. `run` fails only on
/// out-of-range configuration.
#[derive(Debug, Clone)]
pub struct AllocationJob {
    snapshot: StockSnapshot,
    free_capacity: u64,
    /// Upper bound of the horizon search domain, in days.
    max_horizon_days: f64,
    /// Fixed bisection iteration count (must be >= 1).
    iterations: u32,
}

impl AllocationJob {
    pub fn new(snapshot: StockSnapshot, free_capacity: u64) -> Self {
        Self {
            snapshot,
            free_capacity,
            max_horizon_days: DEFAULT_MAX_HORIZON_DAYS,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_max_horizon_days(mut self, days: f64) -> Self {
        self.max_horizon_days = days;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// The free-capacity budget this job allocates.
    pub fn free_capacity(&self) -> u64 {
        self.free_capacity
    }
}

impl PlannerJob for AllocationJob {
    type Input = StockSnapshot;
    type Output = OrderPlan;

    fn input(&self) -> &StockSnapshot {
        &self.snapshot
    }

    fn run(&self) -> Result<OrderPlan, PlannerError> {
        if !(self.max_horizon_days.is_finite() && self.max_horizon_days > 0.0) {
            return Err(PlannerError::InvalidConfig(
                "max_horizon_days must be a finite positive number".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(PlannerError::InvalidConfig(
                "iterations must be >= 1".to_string(),
            ));
        }

        let entries = eligible_entries(&self.snapshot);
        if entries.is_empty() || self.free_capacity == 0 {
            return Ok(OrderPlan::new());
        }

        let horizon = search_horizon(
            &entries,
            self.free_capacity,
            self.max_horizon_days,
            self.iterations,
        );

        Ok(materialize(entries, horizon, self.free_capacity))
    }
}

/// One eligible item, in snapshot order.
#[derive(Debug, Clone)]
struct Entry<'a> {
    name: &'a str,
    stock: u64,
    sold: f64,
}

fn eligible_entries(snapshot: &StockSnapshot) -> Vec<Entry<'_>> {
    snapshot
        .items()
        .iter()
        .filter(|item| item.state().is_eligible())
        .map(|item| Entry {
            name: item.name(),
            stock: item.state().effective_stock(),
            sold: item.state().daily_consumption(),
        })
        .collect()
}

/// Units needed to bring an entry up to `horizon` days of stock. Existing
/// stock is never reduced.
fn units_needed(entry: &Entry<'_>, horizon: f64) -> u64 {
    let target = (entry.sold * horizon).ceil() as u64;
    target.saturating_sub(entry.stock)
}

/// Feasibility oracle: does topping every entry up to `horizon` fit the
/// budget? Short-circuits as soon as the running total overshoots.
fn fits_budget(entries: &[Entry<'_>], horizon: f64, budget: u64) -> bool {
    let mut needed: u64 = 0;
    for entry in entries {
        let add = units_needed(entry, horizon);
        if add > 0 {
            needed = needed.saturating_add(add);
            if needed > budget {
                return false;
            }
        }
    }
    true
}

/// Bisect for the largest feasible horizon within the search precision.
///
/// The iteration count is a fixed budget, not a convergence check: the
/// interval collapses by half each round regardless.
fn search_horizon(entries: &[Entry<'_>], budget: u64, max_horizon_days: f64, iterations: u32) -> f64 {
    let mut low = 0.0_f64;
    let mut high = max_horizon_days;
    for _ in 0..iterations {
        let mid = (low + high) / 2.0;
        if fits_budget(entries, mid, budget) {
            low = mid;
        } else {
            high = mid;
        }
    }
    // `low` only ever takes feasible values (and 0 is trivially feasible).
    low
}

/// Materialize orders at the found horizon, then spend any leftover.
fn materialize(entries: Vec<Entry<'_>>, horizon: f64, budget: u64) -> OrderPlan {
    let mut plan = OrderPlan::new();
    let mut remaining = budget;

    // Snapshot order: a final clamp, if the horizon rounding overshoots,
    // lands on the later entries.
    for entry in &entries {
        let add = units_needed(entry, horizon).min(remaining);
        plan.set(entry.name, add);
        remaining -= add;
    }

    if remaining > 0 {
        let mut by_velocity = entries;
        // Stable: ties keep snapshot order.
        by_velocity.sort_by(|a, b| b.sold.total_cmp(&a.sold));
        for entry in &by_velocity {
            if remaining == 0 {
                break;
            }
            plan.grant_one(entry.name);
            remaining -= 1;
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use restock_inventory::{ItemState, StockItem};

    fn snapshot(entries: &[(&str, u64, f64)]) -> StockSnapshot {
        let items = entries
            .iter()
            .map(|(name, stock, sold)| {
                StockItem::new(*name, ItemState::new(*stock, 0, *sold).unwrap()).unwrap()
            })
            .collect();
        StockSnapshot::new(items).unwrap()
    }

    #[test]
    fn zero_capacity_yields_empty_plan() {
        let plan = AllocationJob::new(snapshot(&[("A", 0, 10.0)]), 0).run().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn no_eligible_items_yields_empty_plan() {
        let plan = AllocationJob::new(snapshot(&[("A", 50, 0.0)]), 1000).run().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn empty_snapshot_yields_empty_plan() {
        let plan = AllocationJob::new(snapshot(&[]), 1000).run().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn exact_fit_equalizes_both_items() {
        // Both items reach one day of stock and the budget is spent exactly.
        let plan = AllocationJob::new(snapshot(&[("A", 0, 10.0), ("B", 0, 10.0)]), 20)
            .run()
            .unwrap();
        assert_eq!(plan.quantity("A"), Some(10));
        assert_eq!(plan.quantity("B"), Some(10));
        assert_eq!(plan.total_units(), 20);
    }

    #[test]
    fn constrained_capacity_favors_equal_days_not_equal_units() {
        // Largest T with ceil(10T) + ceil(T) <= 5 is 0.4 days.
        let plan = AllocationJob::new(snapshot(&[("A", 0, 10.0), ("B", 0, 1.0)]), 5)
            .run()
            .unwrap();
        assert_eq!(plan.quantity("A"), Some(4));
        assert_eq!(plan.quantity("B"), Some(1));
        assert_eq!(plan.total_units(), 5);
    }

    #[test]
    fn overstocked_item_still_absorbs_the_whole_budget() {
        // Horizon search runs up to T = 1500 for the sole eligible item, so
        // the top-up itself consumes the budget; no leftover pass needed.
        let plan = AllocationJob::new(snapshot(&[("A", 1000, 1.0)]), 500).run().unwrap();
        assert_eq!(plan.quantity("A"), Some(500));
        assert_eq!(plan.total_units(), 500);
    }

    #[test]
    fn leftover_goes_to_highest_velocity_first_one_unit_each() {
        // Clamp the horizon so the search saturates and leaves a remainder.
        let plan = AllocationJob::new(snapshot(&[("Slow", 0, 1.0), ("Fast", 0, 2.0)]), 100)
            .with_max_horizon_days(1.0)
            .run()
            .unwrap();
        // Horizon pass: Slow 1, Fast 2. Leftover pass: +1 each, Fast first.
        assert_eq!(plan.quantity("Fast"), Some(3));
        assert_eq!(plan.quantity("Slow"), Some(2));
        // Single pass: the remaining 95 units stay unspent.
        assert_eq!(plan.total_units(), 5);
    }

    #[test]
    fn leftover_ties_keep_snapshot_order() {
        let plan = AllocationJob::new(snapshot(&[("First", 0, 1.0), ("Second", 0, 1.0)]), 3)
            .with_max_horizon_days(1.0)
            .run()
            .unwrap();
        // Horizon pass gives each 1 unit; the single leftover unit goes to
        // the earlier snapshot entry.
        assert_eq!(plan.quantity("First"), Some(2));
        assert_eq!(plan.quantity("Second"), Some(1));
    }

    #[test]
    fn eligible_items_get_an_entry_even_at_zero_quantity() {
        // B is fully stocked for any feasible horizon but still appears.
        let plan = AllocationJob::new(snapshot(&[("A", 0, 10.0), ("B", 1_000_000, 0.001)]), 10)
            .run()
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.quantity("B"), Some(0));
    }

    #[test]
    fn invalid_horizon_config_is_rejected() {
        let job = AllocationJob::new(snapshot(&[("A", 0, 1.0)]), 10).with_max_horizon_days(f64::NAN);
        assert!(matches!(job.run(), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn zero_iterations_config_is_rejected() {
        let job = AllocationJob::new(snapshot(&[("A", 0, 1.0)]), 10).with_iterations(0);
        assert!(matches!(job.run(), Err(PlannerError::InvalidConfig(_))));
    }

    fn arb_items() -> impl Strategy<Value = Vec<(u64, u64, f64)>> {
        prop::collection::vec(
            (0u64..5_000, 0u64..1_000, prop_oneof![Just(0.0), 0.01f64..200.0]),
            0..12,
        )
    }

    fn build_snapshot(raw: &[(u64, u64, f64)]) -> StockSnapshot {
        let items = raw
            .iter()
            .enumerate()
            .map(|(i, (on_hand, inbound, sold))| {
                StockItem::new(
                    format!("item-{i}"),
                    ItemState::new(*on_hand, *inbound, *sold).unwrap(),
                )
                .unwrap()
            })
            .collect();
        StockSnapshot::new(items).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the plan never exceeds the budget.
        #[test]
        fn capacity_is_conserved(raw in arb_items(), cap in 0u64..50_000) {
            let plan = AllocationJob::new(build_snapshot(&raw), cap).run().unwrap();
            prop_assert!(plan.total_units() <= cap);
        }

        /// Property: items with zero consumption never receive an entry.
        #[test]
        fn only_eligible_items_are_ordered(raw in arb_items(), cap in 0u64..50_000) {
            let snapshot = build_snapshot(&raw);
            let plan = AllocationJob::new(snapshot.clone(), cap).run().unwrap();
            for item in snapshot.items() {
                if !item.state().is_eligible() {
                    prop_assert_eq!(plan.quantity(item.name()), None);
                }
            }
        }

        /// Property: growing the budget never shrinks the total ordered.
        #[test]
        fn total_is_monotone_in_budget(raw in arb_items(), cap in 0u64..50_000, extra in 0u64..10_000) {
            let snapshot = build_snapshot(&raw);
            let small = AllocationJob::new(snapshot.clone(), cap).run().unwrap();
            let large = AllocationJob::new(snapshot, cap + extra).run().unwrap();
            prop_assert!(large.total_units() >= small.total_units());
        }

        /// Property: the allocator is deterministic.
        #[test]
        fn repeated_runs_agree(raw in arb_items(), cap in 0u64..50_000) {
            let snapshot = build_snapshot(&raw);
            let first = AllocationJob::new(snapshot.clone(), cap).run().unwrap();
            let second = AllocationJob::new(snapshot, cap).run().unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
