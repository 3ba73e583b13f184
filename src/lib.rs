#![deny(missing_docs)]

//! Lootplan provides weighted-random selection over named loot tables.
//! This includes:
//!
//! * Exclusive selection, where items partition a single probability space
//! * Independent selection, where each item rolls its own percentage chance
//! * Luck multipliers that reshape either distribution at draw time

/// Provides the loot item record and error types shared by both plan kinds.
pub mod loot;

/// Provides exclusive weighted selection over a shared probability space.
pub mod single;

/// Provides independent per-item percentage selection.
pub mod multi;

/// Provides construction of either plan kind from a mode tag.
pub mod plan;
