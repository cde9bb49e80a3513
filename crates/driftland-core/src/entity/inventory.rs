use crate::error::{Result, WorldError};
use crate::world::block::Block;

/// Fixed list of selectable building blocks (the hotbar).
///
/// There is no item economy: every slot places an unlimited supply of its
/// block. The selected index is always a valid slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    slots: Vec<Block>,
    selected_index: usize,
}

impl Inventory {
    /// Create an inventory with the first slot selected
    pub fn new(slots: Vec<Block>) -> Result<Self> {
        if slots.is_empty() {
            return Err(WorldError::EmptyInventory);
        }
        Ok(Self {
            slots,
            selected_index: 0,
        })
    }

    pub fn slots(&self) -> &[Block] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Block placed by the next build action
    pub fn selected(&self) -> &Block {
        &self.slots[self.selected_index]
    }

    /// Select a specific slot; invalid indices are rejected unchanged
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(WorldError::InventorySlot {
                index,
                len: self.slots.len(),
            });
        }
        self.selected_index = index;
        Ok(())
    }

    /// Select the next slot, wrapping around
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.slots.len();
    }

    /// Select the previous slot, wrapping around
    pub fn select_prev(&mut self) {
        self.selected_index = if self.selected_index == 0 {
            self.slots.len() - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Swap in a new set of slots (after a theme change).
    ///
    /// The selection keeps its index, clamped to the last slot when the new
    /// list is shorter.
    pub fn replace_slots(&mut self, slots: Vec<Block>) -> Result<()> {
        if slots.is_empty() {
            return Err(WorldError::EmptyInventory);
        }
        self.selected_index = self.selected_index.min(slots.len() - 1);
        self.slots = slots;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::{build_palette, BlockType, DEFAULT_HUE};

    fn inventory() -> Inventory {
        Inventory::new(build_palette(DEFAULT_HUE).blocks()).unwrap()
    }

    #[test]
    fn test_inventory_selection() {
        let palette = build_palette(DEFAULT_HUE);
        let mut inventory = inventory();
        assert_eq!(inventory.selected_index(), 0);

        inventory.select(2).unwrap();
        assert_eq!(inventory.selected(), palette.nth(2).unwrap());
    }

    #[test]
    fn test_inventory_out_of_range() {
        let mut inventory = inventory();
        inventory.select(3).unwrap();
        assert_eq!(
            inventory.select(10),
            Err(WorldError::InventorySlot { index: 10, len: 5 })
        );
        // Rejected selection leaves the state alone
        assert_eq!(inventory.selected_index(), 3);
    }

    #[test]
    fn test_empty_inventory_rejected() {
        assert_eq!(Inventory::new(Vec::new()), Err(WorldError::EmptyInventory));
        let mut inventory = inventory();
        assert!(inventory.replace_slots(Vec::new()).is_err());
        assert_eq!(inventory.len(), 5);
    }

    #[test]
    fn test_slot_cycling_wraps() {
        let mut inventory = inventory();
        inventory.select_prev();
        assert_eq!(inventory.selected_index(), 4);
        inventory.select_next();
        assert_eq!(inventory.selected_index(), 0);
        inventory.select_next();
        assert_eq!(inventory.selected_index(), 1);
    }

    #[test]
    fn test_replace_slots_clamps_selection() {
        let mut inventory = inventory();
        inventory.select(4).unwrap();

        let smaller = vec![
            BlockType::new("A", [1, 1, 1]).into_block(),
            BlockType::new("B", [2, 2, 2]).into_block(),
        ];
        inventory.replace_slots(smaller).unwrap();
        assert_eq!(inventory.selected_index(), 1);
        assert_eq!(inventory.selected().name, "B");

        // Same size keeps the index
        inventory.select(0).unwrap();
        inventory.replace_slots(build_palette(0.2).blocks()).unwrap();
        assert_eq!(inventory.selected_index(), 0);
        assert_eq!(inventory.selected().name, "Cloudstone");
    }
}
