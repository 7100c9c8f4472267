//! Inventory reconciliation rules.
//!
//! A target (help request or camp) declares needed quantities per ration
//! item; donations add pending quantities, and confirmations move pending
//! into donated. The math is additive and clamped, never reservation-based:
//! several donors may pledge against the same remaining need at once, and
//! overcommitment is tolerated rather than rejected.

use std::collections::BTreeMap;

use crate::ration::RationItemType;

/// Per-(target, item) quantity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryLevels {
    pub needed: i64,
    pub donated: i64,
    pub pending: i64,
}

impl InventoryLevels {
    pub fn new(needed: i64, donated: i64, pending: i64) -> Self {
        Self {
            needed,
            donated,
            pending,
        }
    }

    /// What this target still needs: `max(0, needed - donated - pending)`.
    ///
    /// The clamp is mandatory -- remaining never goes negative, even when
    /// donations overshoot the declared need.
    pub fn remaining(&self) -> i64 {
        remaining_quantity(self.needed, self.donated, self.pending)
    }

    /// A new donation pledged `quantity` of this item. No cap: pending grows
    /// past the declared need when donors overcommit.
    pub fn record_pending(&mut self, quantity: i64) {
        self.pending += quantity;
    }

    /// A pledge of `quantity` was confirmed: pending shrinks (clamped at
    /// zero), donated grows.
    pub fn confirm(&mut self, quantity: i64) {
        self.pending = (self.pending - quantity).max(0);
        self.donated += quantity;
    }

    /// An auto-approved donation of `quantity`: donated grows without a
    /// pending phase, so other donors' pledges are untouched.
    pub fn record_donated(&mut self, quantity: i64) {
        self.donated += quantity;
    }
}

/// `max(0, needed - donated - pending)` for any non-negative inputs.
pub fn remaining_quantity(needed: i64, donated: i64, pending: i64) -> i64 {
    (needed - donated - pending).max(0)
}

/// Drop zero and negative quantities from a client-supplied quantity map.
///
/// The frontend already filters these before submission; the backend
/// filters again so a bypassing client cannot store non-positive rows.
pub fn sanitize_quantities(
    items: &BTreeMap<RationItemType, i64>,
) -> BTreeMap<RationItemType, i64> {
    items
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(item, qty)| (*item, *qty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_needed_minus_donated_minus_pending() {
        assert_eq!(remaining_quantity(10, 3, 2), 5);
        assert_eq!(remaining_quantity(10, 0, 0), 10);
        assert_eq!(remaining_quantity(0, 0, 0), 0);
    }

    #[test]
    fn remaining_never_goes_negative() {
        // Exhaustive over a small grid of non-negative inputs.
        for needed in 0..6 {
            for donated in 0..6 {
                for pending in 0..6 {
                    let remaining = remaining_quantity(needed, donated, pending);
                    assert!(remaining >= 0);
                    assert!(remaining <= needed);
                }
            }
        }
    }

    #[test]
    fn pending_is_not_capped_by_remaining() {
        // Two donors pledge 2 water each against a need of 3. Both are
        // accepted; remaining clamps to zero.
        let mut levels = InventoryLevels::new(3, 0, 0);
        levels.record_pending(2);
        levels.record_pending(2);

        assert_eq!(levels.pending, 4);
        assert_eq!(levels.remaining(), 0);
    }

    #[test]
    fn confirm_moves_pending_to_donated() {
        let mut levels = InventoryLevels::new(5, 0, 3);
        levels.confirm(3);

        assert_eq!(levels.pending, 0);
        assert_eq!(levels.donated, 3);
        assert_eq!(levels.remaining(), 2);
    }

    #[test]
    fn confirm_clamps_pending_at_zero() {
        // Confirming more than is pending (auto-approve racing a manual
        // confirm) must not drive pending negative.
        let mut levels = InventoryLevels::new(5, 0, 1);
        levels.confirm(4);

        assert_eq!(levels.pending, 0);
        assert_eq!(levels.donated, 4);
    }

    #[test]
    fn record_donated_leaves_pending_untouched() {
        let mut levels = InventoryLevels::new(5, 0, 2);
        levels.record_donated(3);

        assert_eq!(levels.pending, 2);
        assert_eq!(levels.donated, 3);
        assert_eq!(levels.remaining(), 0);
    }

    #[test]
    fn sanitize_drops_zero_and_negative_quantities() {
        let mut input = BTreeMap::new();
        input.insert(RationItemType::DryRations, 5);
        input.insert(RationItemType::BottledWater, 0);
        input.insert(RationItemType::Blankets, -2);

        let clean = sanitize_quantities(&input);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean.get(&RationItemType::DryRations), Some(&5));
    }

    #[test]
    fn sanitize_of_empty_map_is_empty() {
        assert!(sanitize_quantities(&BTreeMap::new()).is_empty());
    }
}
