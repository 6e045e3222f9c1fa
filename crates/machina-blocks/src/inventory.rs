use std::fmt;

use crate::types::ItemStack;

/// Slot-ordered stack list; `None` is an empty slot.
pub type Contents = Vec<Option<ItemStack>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    SlotOutOfRange { slot: usize, capacity: usize },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::SlotOutOfRange { slot, capacity } => {
                write!(f, "slot {} out of range for {} slots", slot, capacity)
            }
        }
    }
}

impl std::error::Error for InventoryError {}

/// Fixed-capacity container hosted by a world block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: Contents,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<ItemStack> {
        self.slots.get(slot).copied().flatten()
    }

    /// Puts `stack` into `slot`, returning what was there.
    pub fn set(
        &mut self,
        slot: usize,
        stack: Option<ItemStack>,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let capacity = self.capacity();
        let s = self
            .slots
            .get_mut(slot)
            .ok_or(InventoryError::SlotOutOfRange { slot, capacity })?;
        Ok(std::mem::replace(s, stack))
    }

    pub fn contents(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Moves every stack out, leaving the same number of empty slots behind.
    pub fn take_contents(&mut self) -> Contents {
        let capacity = self.slots.len();
        std::mem::replace(&mut self.slots, vec![None; capacity])
    }

    /// Writes previously taken contents back slot-for-slot.
    ///
    /// Panics if `contents` was not taken from an inventory of the same capacity.
    pub fn restore(&mut self, contents: Contents) {
        assert_eq!(
            contents.len(),
            self.slots.len(),
            "restored contents have {} slots, inventory has {}",
            contents.len(),
            self.slots.len()
        );
        self.slots = contents;
    }
}
