/// Errors that may occur when adding or referencing loot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootError {
    /// The loot name being added already exists in the plan.
    Duplicate,
    /// The loot name being referenced does not exist in the plan.
    NonExistent,
}

/// A named entry in a loot plan with an associated drop chance.
///
/// For an exclusive plan the chance is a relative weight; for an
/// independent plan it is a percentage in [0, 100]. Items are owned
/// by their plan, and the stored chance changes only through the
/// plan's own operations.
#[derive(Clone, Debug, PartialEq)]
pub struct LootItem {
    name: String,
    chance: f64,
}

impl LootItem {
    pub(crate) fn new(name: &str, chance: f64) -> LootItem {
        LootItem {
            name: name.to_string(),
            chance,
        }
    }

    /// The name identifying this item within its plan.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw stored chance, unadjusted by luck.
    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub(crate) fn set_chance(&mut self, chance: f64) {
        self.chance = chance;
    }
}
