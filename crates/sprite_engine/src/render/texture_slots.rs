//! Per-batch texture slot table
//!
//! Maps bound textures to small integer slot indices for the duration of
//! one batch. Slot 0 is pinned to the default white texture so untextured
//! quads never consume a slot. Within one batch a texture handle occupies
//! at most one slot; reusing a slot for a different texture requires a
//! flush, which resets the table.

use std::sync::Arc;

use crate::render::api::Texture2D;

/// Bounded, ordered mapping from texture handles to slot indices.
///
/// Identity comparison only (`Arc::ptr_eq`); the table takes no interest
/// in texture contents and merely extends handle lifetimes until reset.
pub struct TextureSlotTable {
    slots: Vec<Option<Arc<dyn Texture2D>>>,
    white: Arc<dyn Texture2D>,
    count: u32,
}

impl TextureSlotTable {
    /// Create a table of `capacity` slots with slot 0 bound to `white`
    pub fn new(capacity: u32, white: Arc<dyn Texture2D>) -> Self {
        let mut slots: Vec<Option<Arc<dyn Texture2D>>> = vec![None; capacity as usize];
        slots[0] = Some(Arc::clone(&white));
        Self {
            slots,
            white,
            count: 1,
        }
    }

    /// Total slot capacity, including the reserved white slot
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Number of occupied slots (always >= 1)
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Slot currently holding `texture`, if any
    pub fn slot_of(&self, texture: &Arc<dyn Texture2D>) -> Option<u32> {
        self.occupied()
            .position(|slot| Arc::ptr_eq(slot, texture))
            .map(|i| i as u32)
    }

    /// Resolve a texture to a slot index, allocating the next free slot on
    /// a miss. Returns `None` when the table is full; the caller is
    /// expected to flush (which resets the table) and resolve again.
    ///
    /// The white texture always resolves to slot 0 without touching the
    /// table.
    pub fn resolve(&mut self, texture: &Arc<dyn Texture2D>) -> Option<u32> {
        if Arc::ptr_eq(texture, &self.white) {
            return Some(0);
        }
        if let Some(slot) = self.slot_of(texture) {
            return Some(slot);
        }
        if self.count < self.capacity() {
            let slot = self.count;
            self.slots[slot as usize] = Some(Arc::clone(texture));
            self.count += 1;
            Some(slot)
        } else {
            None
        }
    }

    /// Iterate over the occupied slots in slot order
    pub fn occupied(&self) -> impl Iterator<Item = &Arc<dyn Texture2D>> {
        self.slots[..self.count as usize].iter().flatten()
    }

    /// Drop every slot above 0, returning to the `{0: white}` state
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut().skip(1) {
            *slot = None;
        }
        self.count = 1;
    }
}
