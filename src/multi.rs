use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::loot::{LootError, LootItem};

/// A loot plan in which every item rolls independently.
///
/// Chances are percentages in [0, 100]. A draw sweeps the stored
/// items, rolling each one on its own, and keeps sweeping until the
/// requested number of hits has accumulated, so the same item can be
/// selected many times.
///
/// # Examples
///
/// ```
/// use lootplan::multi::MultiLootPlan;
///
/// let mut plan = MultiLootPlan::new(42);
/// plan.add_loot("arrow", 100.0).unwrap();
///
/// let drawn = plan.draw(3);
/// assert_eq!(3, drawn.len());
/// ```
pub struct MultiLootPlan<R: Rng = StdRng> {
    rng: R,
    loot: HashMap<String, LootItem>,
}

impl MultiLootPlan<StdRng> {
    /// Create an empty plan seeded with the given value.
    ///
    /// Draws are deterministic given the seed and the call sequence.
    pub fn new(seed: u64) -> MultiLootPlan<StdRng> {
        MultiLootPlan::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MultiLootPlan<R> {
    /// Create an empty plan drawing from the given generator.
    pub fn from_rng(rng: R) -> MultiLootPlan<R> {
        MultiLootPlan {
            rng,
            loot: HashMap::new(),
        }
    }

    /// Add a new item with the given percentage chance.
    /// Returns Err if an item with this name already exists, leaving
    /// the plan untouched.
    pub fn add_loot(&mut self, name: &str, chance: f64) -> Result<LootItem, LootError> {
        if self.loot.contains_key(name) {
            return Err(LootError::Duplicate);
        }

        let item = LootItem::new(name, chance);
        self.loot.insert(name.to_string(), item.clone());

        Ok(item)
    }

    /// Add every entry of the given map, one [MultiLootPlan::add_loot]
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

    /// The raw stored percentage of the named item.
    pub fn loot_chance(&self, name: &str) -> Option<f64> {
        self.loot.get(name).map(LootItem::chance)
    }

    /// The named item's per-roll acceptance probability under the
    /// given luck multiplier: `(chance / 100) * luck`. Scaling is
    /// always linear, with no reciprocal case.
    pub fn calculated_chance(&self, name: &str, luck: f64) -> Option<f64> {
        let chance = self.loot_chance(name)?;
        Some((chance / 100.0) * luck)
    }

    /// Remove the named item. Returns false if it does not exist.
    pub fn remove_loot(&mut self, name: &str) -> bool {
        self.loot.remove(name).is_some()
    }

    /// Remove every item. Always returns true.
    pub fn clear_loot(&mut self) -> bool {
        self.loot.clear();
        true
    }

    /// Overwrite the named item's percentage. Returns false if it
    /// does not exist.
    pub fn change_loot_chance(&mut self, name: &str, new_chance: f64) -> bool {
        match self.loot.get_mut(name) {
            Some(item) => {
                item.set_chance(new_chance);
                true
            }
            None => false,
        }
    }

    /// Draw the given number of items with no luck adjustment.
    pub fn draw(&mut self, amount: usize) -> Vec<LootItem> {
        self.draw_with_luck(amount, 1.0)
    }

    /// Draw the given number of items, scaling each percentage by the
    /// luck multiplier.
    ///
    /// Every stored item is rolled once per sweep, with a fresh
    /// uniform sample each time, and sweeps repeat until `amount`
    /// items have been accepted. Items are not removed on selection,
    /// so duplicates are expected. There is no cap on the number of
    /// sweeps: low percentages relative to `amount` mean many passes.
    ///
    /// If no stored item has a positive effective chance the sweep
    /// can never accept anything, and the partial (empty) result is
    /// returned instead of looping forever.
    pub fn draw_with_luck(&mut self, amount: usize, luck: f64) -> Vec<LootItem> {
        let mut drawn = Vec::with_capacity(amount);

        let satisfiable = self
            .loot
            .values()
            .any(|item| (item.chance() / 100.0) * luck > 0.0);
        if !satisfiable {
            return drawn;
        }

        while drawn.len() < amount {
            // Every item is rolled on every sweep, even once the
            // requested amount has been reached.
            for item in self.loot.values() {
                let result: f64 = self.rng.random();
                let real_chance = (item.chance() / 100.0) * luck;

                if result < real_chance && drawn.len() < amount {
                    drawn.push(item.clone());
                }
            }
        }

        drawn
    }
}
