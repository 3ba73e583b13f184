use rand::rngs::StdRng;
use rand::Rng;

use crate::multi::MultiLootPlan;
use crate::single::SingleLootPlan;

/// Selects the draw semantics of a [LootPlan].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanKind {
    /// Items partition one probability space; a draw returns at most
    /// one of them.
    #[default]
    Single,
    /// Items roll independently; draws repeat until the requested
    /// count of hits is reached.
    Multi,
}

/// A loot plan of either kind, chosen by tag at construction.
///
/// ```
/// use lootplan::plan::{LootPlan, PlanKind};
///
/// let mut plan = LootPlan::new(PlanKind::Multi, 42);
/// let multi = plan.as_multi_mut().unwrap();
/// multi.add_loot("arrow", 100.0).unwrap();
/// assert_eq!(2, multi.draw(2).len());
/// ```
pub enum LootPlan<R: Rng = StdRng> {
    /// An exclusive weighted plan.
    Single(SingleLootPlan<R>),
    /// An independent percentage plan.
    Multi(MultiLootPlan<R>),
}

impl LootPlan<StdRng> {
    /// Create an empty plan of the given kind, seeded with `seed`.
    pub fn new(kind: PlanKind, seed: u64) -> LootPlan<StdRng> {
        match kind {
            PlanKind::Single => LootPlan::Single(SingleLootPlan::new(seed)),
            PlanKind::Multi => LootPlan::Multi(MultiLootPlan::new(seed)),
        }
    }
}

impl<R: Rng> LootPlan<R> {
    /// The underlying exclusive plan, if this is one.
    pub fn as_single_mut(&mut self) -> Option<&mut SingleLootPlan<R>> {
        match self {
            LootPlan::Single(plan) => Some(plan),
            LootPlan::Multi(_) => None,
        }
    }

    /// The underlying independent plan, if this is one.
    pub fn as_multi_mut(&mut self) -> Option<&mut MultiLootPlan<R>> {
        match self {
            LootPlan::Single(_) => None,
            LootPlan::Multi(plan) => Some(plan),
        }
    }
}
