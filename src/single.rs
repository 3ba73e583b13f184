use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::loot::{LootError, LootItem};

/// A loot plan in which all items share a single probability space.
///
/// Each draw walks a cumulative curve over the items and returns at
/// most one of them. Chances are relative weights: an item's real
/// probability is its chance divided by the plan's total chance.
///
/// # Examples
///
/// ```
/// use lootplan::single::SingleLootPlan;
///
/// let mut plan = SingleLootPlan::new(42);
/// plan.add_loot("common", 70.0).unwrap();
/// plan.add_loot("rare", 25.0).unwrap();
/// plan.add_loot("legendary", 5.0).unwrap();
///
/// let item = plan.draw().unwrap().clone();
/// assert!(plan.loot_chance(item.name()).is_some());
/// ```
pub struct SingleLootPlan<R: Rng = StdRng> {
    rng: R,
    loot: HashMap<String, LootItem>,
    loot_list: Vec<LootItem>,
    loot_count: usize,
    total_chance: f64,
}

impl SingleLootPlan<StdRng> {
    /// Create an empty plan seeded with the given value.
    ///
    /// Draws are deterministic given the seed and the call sequence.
    pub fn new(seed: u64) -> SingleLootPlan<StdRng> {
        SingleLootPlan::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SingleLootPlan<R> {
    /// Create an empty plan drawing from the given generator.
    pub fn from_rng(rng: R) -> SingleLootPlan<R> {
        SingleLootPlan {
            rng,
            loot: HashMap::new(),
            loot_list: Vec::new(),
            loot_count: 0,
            total_chance: 0.0,
        }
    }

    /// Rebuild the sorted item list from the backing map.
    /// Called after every mutation so draws never see stale items.
    fn update_loot_list(&mut self) {
        let mut loot_list: Vec<LootItem> = self.loot.values().cloned().collect();
        loot_list.sort_by(|a, b| a.chance().total_cmp(&b.chance()));
        self.loot_list = loot_list;
    }

    /// Add a new item with the given relative weight.
    /// Returns Err if an item with this name already exists, leaving
    /// the plan untouched.
    ///
    /// ```
    /// use lootplan::single::SingleLootPlan;
    ///
    /// let mut plan = SingleLootPlan::new(0);
    /// assert!(plan.add_loot("gem", 5.0).is_ok());
    /// assert!(plan.add_loot("gem", 9.0).is_err());
    /// assert_eq!(Some(5.0), plan.loot_chance("gem"));
    /// ```
    pub fn add_loot(&mut self, name: &str, chance: f64) -> Result<LootItem, LootError> {
        if self.loot.contains_key(name) {
            return Err(LootError::Duplicate);
        }

        let item = LootItem::new(name, chance);
        self.loot.insert(name.to_string(), item.clone());
        self.loot_count += 1;
        self.total_chance += chance;
        self.update_loot_list();

        Ok(item)
    }

    /// Add every entry of the given map, one [SingleLootPlan::add_loot]
    /// per entry. Entries are independent: a duplicate name fails that
    /// entry alone, and the result maps each name to its outcome.
    pub fn add_loot_from_map(
        &mut self,
        entries: HashMap<String, f64>,
    ) -> HashMap<String, Result<LootItem, LootError>> {
        let mut result = HashMap::new();
        for (name, chance) in entries {
            let added = self.add_loot(&name, chance);
            result.insert(name, added);
        }
        result
    }

    /// The raw stored weight of the named item.
    pub fn loot_chance(&self, name: &str) -> Option<f64> {
        self.loot.get(name).map(LootItem::chance)
    }

    /// The named item's weight adjusted by a luck multiplier.
    ///
    /// Multipliers of 1 or more scale the weight directly. Below 1 the
    /// reciprocal is applied instead, so a multiplier of 0.5 doubles the
    /// weight rather than halving it.
    pub fn calculated_chance(&self, name: &str, luck: f64) -> Option<f64> {
        let chance = self.loot_chance(name)?;

        if luck >= 1.0 {
            Some(chance * luck)
        } else {
            Some(chance * (1.0 / luck))
        }
    }

    /// The named item's share of the total weight, as a percentage.
    pub fn true_chance(&self, name: &str) -> Option<f64> {
        let chance = self.loot_chance(name)?;
        Some((chance / self.total_chance) * 100.0)
    }

    /// Remove the named item. Returns false if it does not exist.
    pub fn remove_loot(&mut self, name: &str) -> bool {
        match self.loot.remove(name) {
            Some(item) => {
                self.total_chance -= item.chance();
                self.loot_count -= 1;
                self.update_loot_list();
                true
            }
            None => false,
        }
    }

    /// Remove every item and reset the plan's bookkeeping.
    /// Always returns true.
    pub fn clear_loot(&mut self) -> bool {
        self.loot.clear();
        self.loot_count = 0;
        self.total_chance = 0.0;
        self.update_loot_list();
        true
    }

    /// Overwrite the named item's weight. Returns false if it does
    /// not exist.
    pub fn change_loot_chance(&mut self, name: &str, new_chance: f64) -> bool {
        match self.loot.get_mut(name) {
            Some(item) => {
                self.total_chance += new_chance - item.chance();
                item.set_chance(new_chance);
                self.update_loot_list();
                true
            }
            None => false,
        }
    }

    /// The number of items currently in the plan.
    pub fn loot_count(&self) -> usize {
        self.loot_count
    }

    /// The sum of all stored weights.
    pub fn total_chance(&self) -> f64 {
        self.total_chance
    }

    /// Draw one item with no luck adjustment.
    pub fn draw(&mut self) -> Option<&LootItem> {
        self.draw_with_luck(1.0)
    }

    /// Draw one item, adjusting each weight by the luck multiplier.
    ///
    /// One uniform sample decides the draw. For multipliers of 1 or
    /// more the items are walked in ascending weight order, accepting
    /// the first item whose cumulative scaled weight exceeds the
    /// sample. Below 1 the walk runs descending with the reciprocal
    /// multiplier and the acceptance test inverted, which shifts
    /// which items are reachable at all.
    ///
    /// Returns None when no item satisfies its test — an empty plan,
    /// or a multiplier that distorts the scaled curve away from the
    /// total weight. Callers treat this as "no hit".
    pub fn draw_with_luck(&mut self, luck: f64) -> Option<&LootItem> {
        let result: f64 = self.rng.random();
        let mut aggregate = 0.0;

        if luck >= 1.0 {
            for item in self.loot_list.iter() {
                let real_chance = item.chance() * luck;

                if result < (real_chance + aggregate) / self.total_chance {
                    return Some(item);
                }

                aggregate += real_chance;
            }
        } else {
            let real_luck = 1.0 / luck;

            for item in self.loot_list.iter().rev() {
                let real_chance = item.chance() * real_luck;

                if result > (real_chance + aggregate) / self.total_chance {
                    return Some(item);
                }

                aggregate += real_chance;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_plan() -> SingleLootPlan {
        let mut plan = SingleLootPlan::new(7);
        plan.add_loot("a", 10.0).unwrap();
        plan.add_loot("b", 20.0).unwrap();
        plan.add_loot("c", 70.0).unwrap();
        plan
    }

    /// Tests that adding items updates the count and total weight.
    #[test]
    fn test_add_loot() {
        let mut plan = SingleLootPlan::new(0);

        let item = plan.add_loot("coin", 30.0).unwrap();
        assert_eq!("coin", item.name());
        assert_eq!(30.0, item.chance());

        plan.add_loot("gem", 10.0).unwrap();
        assert_eq!(2, plan.loot_count());
        assert_eq!(40.0, plan.total_chance());
    }

    /// Tests that a duplicate add fails and leaves the plan untouched.
    #[test]
    fn test_add_duplicate() {
        let mut plan = SingleLootPlan::new(0);
        plan.add_loot("coin", 30.0).unwrap();

        assert_eq!(Err(LootError::Duplicate), plan.add_loot("coin", 99.0));
        assert_eq!(Some(30.0), plan.loot_chance("coin"));
        assert_eq!(1, plan.loot_count());
        assert_eq!(30.0, plan.total_chance());
    }

    /// Tests that map entries are added independently of each other.
    #[test]
    fn test_add_loot_from_map() {
        let mut plan = SingleLootPlan::new(0);
        plan.add_loot("a", 10.0).unwrap();

        let result = plan.add_loot_from_map(HashMap::from([
            ("a".to_string(), 50.0),
            ("b".to_string(), 20.0),
        ]));

        assert_eq!(Err(LootError::Duplicate), result["a"]);
        assert!(result["b"].is_ok());
        assert_eq!(Some(10.0), plan.loot_chance("a"));
        assert_eq!(Some(20.0), plan.loot_chance("b"));
        assert_eq!(30.0, plan.total_chance());
    }

    /// Tests removal bookkeeping and lookups on removed names.
    #[test]
    fn test_remove_loot() {
        let mut plan = abc_plan();

        assert!(plan.remove_loot("b"));
        assert_eq!(None, plan.loot_chance("b"));
        assert_eq!(2, plan.loot_count());
        assert_eq!(80.0, plan.total_chance());

        assert!(!plan.remove_loot("b"));
        assert!(!plan.remove_loot("never-added"));
    }

    /// Tests that clearing resets all bookkeeping and draws nothing.
    #[test]
    fn test_clear_loot() {
        let mut plan = abc_plan();

        assert!(plan.clear_loot());
        assert_eq!(0, plan.loot_count());
        assert_eq!(0.0, plan.total_chance());
        assert_eq!(None, plan.loot_chance("a"));
        assert!(plan.draw().is_none());
    }

    /// Tests that changing a weight adjusts the total by the delta.
    #[test]
    fn test_change_loot_chance() {
        let mut plan = abc_plan();

        assert!(plan.change_loot_chance("a", 40.0));
        assert_eq!(Some(40.0), plan.loot_chance("a"));
        assert_eq!(130.0, plan.total_chance());

        assert!(!plan.change_loot_chance("never-added", 5.0));
        assert_eq!(130.0, plan.total_chance());
    }

    /// Tests true chance against the worked 10/20/70 scenario.
    #[test]
    fn test_true_chance() {
        let mut plan = abc_plan();

        assert_eq!(Some(70.0), plan.true_chance("c"));

        plan.remove_loot("b");
        assert_eq!(80.0, plan.total_chance());
        assert_eq!(Some(87.5), plan.true_chance("c"));
    }

    /// Tests that true chances across all items sum to 100.
    #[test]
    fn test_true_chance_sums_to_100() {
        let mut plan = SingleLootPlan::new(0);
        plan.add_loot("a", 3.0).unwrap();
        plan.add_loot("b", 7.5).unwrap();
        plan.add_loot("c", 19.25).unwrap();

        let sum = ["a", "b", "c"]
            .iter()
            .map(|name| plan.true_chance(name).unwrap())
            .sum::<f64>();

        assert!((sum - 100.0).abs() < 1e-9);
    }

    /// Tests direct scaling above 1 and the reciprocal rule below 1.
    #[test]
    fn test_calculated_chance() {
        let mut plan = SingleLootPlan::new(0);
        plan.add_loot("x", 10.0).unwrap();

        assert_eq!(Some(10.0), plan.calculated_chance("x", 1.0));
        assert_eq!(Some(20.0), plan.calculated_chance("x", 2.0));
        assert_eq!(Some(20.0), plan.calculated_chance("x", 0.5));
        assert_eq!(None, plan.calculated_chance("missing", 2.0));
    }

    /// Tests that a lone item is always drawn at neutral luck.
    #[test]
    fn test_draw_single_item() {
        let mut plan = SingleLootPlan::new(99);
        plan.add_loot("only", 5.0).unwrap();

        for _ in 0..100 {
            assert_eq!("only", plan.draw().unwrap().name());
        }
    }

    /// Tests that draws on an empty plan return nothing.
    #[test]
    fn test_draw_empty() {
        let mut plan = SingleLootPlan::new(0);
        assert!(plan.draw().is_none());
        assert!(plan.draw_with_luck(0.5).is_none());
    }

    /// Tests that two plans with the same seed draw identically.
    #[test]
    fn test_draw_deterministic() {
        let mut first = abc_plan();
        let mut second = abc_plan();

        for _ in 0..50 {
            let a = first.draw().map(|item| item.name().to_string());
            let b = second.draw().map(|item| item.name().to_string());
            assert_eq!(a, b);
        }
    }

    /// Tests that a zero-weight item is never drawn.
    #[test]
    fn test_draw_skips_zero_chance() {
        let mut plan = SingleLootPlan::new(3);
        plan.add_loot("dud", 0.0).unwrap();
        plan.add_loot("coin", 10.0).unwrap();

        for _ in 0..200 {
            assert_eq!("coin", plan.draw().unwrap().name());
        }
    }

    /// Tests that the common item dominates draws at neutral luck.
    #[test]
    fn test_draw_follows_weights() {
        let mut plan = SingleLootPlan::new(11);
        plan.add_loot("rare", 1.0).unwrap();
        plan.add_loot("common", 99.0).unwrap();

        let mut commons = 0;
        for _ in 0..200 {
            if plan.draw().unwrap().name() == "common" {
                commons += 1;
            }
        }

        assert!(commons > 150);
    }

    /// Tests the no-hit edge of the inverted walk: an unlucky
    /// multiplier that scales every item past the total weight makes
    /// the acceptance test unsatisfiable.
    #[test]
    fn test_draw_unlucky_no_hit() {
        let mut plan = SingleLootPlan::new(5);
        plan.add_loot("only", 10.0).unwrap();

        // 10 * (1 / 0.5) = 20 against a total of 10; the sample can
        // never exceed 20 / 10.
        for _ in 0..100 {
            assert!(plan.draw_with_luck(0.5).is_none());
        }
    }

    /// Tests that an injected generator is accepted in place of the
    /// seeded default.
    #[test]
    fn test_from_rng() {
        let rng = StdRng::seed_from_u64(7);
        let mut plan = SingleLootPlan::from_rng(rng);
        plan.add_loot("a", 10.0).unwrap();
        plan.add_loot("b", 20.0).unwrap();
        plan.add_loot("c", 70.0).unwrap();

        let mut seeded = abc_plan();
        for _ in 0..20 {
            assert_eq!(
                seeded.draw().map(|item| item.name().to_string()),
                plan.draw().map(|item| item.name().to_string())
            );
        }
    }
}
