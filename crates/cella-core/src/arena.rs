//! Slot arena for heap-managed values
//!
//! The arena exclusively owns every live value. Slots are reused through a
//! free list; each reclamation bumps the slot's generation so that stale
//! handles miss instead of aliasing whatever occupies the slot next. The
//! mark flag lives in the slot and is false outside an active collection.

use crate::value::{Value, ValueRef};
use crate::{HeapError, HeapResult};

/// One arena slot
#[derive(Debug)]
struct Slot {
    /// Bumped every time the slot is reclaimed
    generation: u32,

    /// Mark flag for the current collection cycle
    marked: bool,

    /// The stored value; `None` while the slot is on the free list
    value: Option<Value>,
}

/// Growable slot array owning all allocated values
#[derive(Debug)]
pub(crate) struct Arena {
    /// All slots, occupied and free
    slots: Vec<Slot>,

    /// Indices of reusable slots
    free: Vec<u32>,

    /// Number of occupied slots
    live: usize,

    /// Maximum occupied slots (0 = unlimited)
    max_values: usize,
}

impl Arena {
    /// Create an empty arena
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            max_values: 0,
        }
    }

    /// Set the occupancy limit (0 = unlimited)
    pub(crate) fn set_max_values(&mut self, max: usize) {
        self.max_values = max;
    }

    /// Store a value, reusing a free slot when one is available
    pub(crate) fn insert(&mut self, value: Value) -> HeapResult<ValueRef> {
        if self.max_values > 0 && self.live >= self.max_values {
            return Err(HeapError::AllocationFailure);
        }

        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.value.is_none());
                slot.value = Some(value);
                index
            }
            None => {
                if self.slots.len() >= u32::MAX as usize {
                    return Err(HeapError::AllocationFailure);
                }
                self.slots.push(Slot {
                    generation: 0,
                    marked: false,
                    value: Some(value),
                });
                (self.slots.len() - 1) as u32
            }
        };

        self.live += 1;
        Ok(ValueRef {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    /// Resolve a handle; `None` if the slot was reclaimed since the handle
    /// was created
    pub(crate) fn get(&self, handle: ValueRef) -> Option<&Value> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Mark the slot behind `handle` and return its value for traversal.
    ///
    /// Returns `None` when the handle is stale or the slot is already
    /// marked, so callers can use this directly as the visited check of a
    /// work-list walk.
    pub(crate) fn try_mark(&mut self, handle: ValueRef) -> Option<&Value> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.marked {
            return None;
        }
        slot.marked = true;
        slot.value.as_ref()
    }

    /// Reclaim every unmarked occupied slot and clear marks on survivors.
    ///
    /// Returns `(surviving, reclaimed)` counts for the cycle.
    pub(crate) fn sweep(&mut self) -> (usize, usize) {
        let mut surviving = 0;
        let mut reclaimed = 0;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_none() {
                continue;
            }
            if slot.marked {
                slot.marked = false;
                surviving += 1;
            } else {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                reclaimed += 1;
            }
        }

        self.live -= reclaimed;
        (surviving, reclaimed)
    }

    /// Number of occupied slots
    pub(crate) fn live(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::new();
        let handle = arena.insert(Value::Number(7)).unwrap();

        assert_eq!(arena.live(), 1);
        assert_eq!(arena.get(handle), Some(&Value::Number(7)));
    }

    #[test]
    fn test_sweep_reclaims_unmarked() {
        let mut arena = Arena::new();
        let kept = arena.insert(Value::Number(1)).unwrap();
        let dropped = arena.insert(Value::Number(2)).unwrap();

        arena.try_mark(kept);
        let (surviving, reclaimed) = arena.sweep();

        assert_eq!((surviving, reclaimed), (1, 1));
        assert_eq!(arena.get(kept), Some(&Value::Number(1)));
        assert_eq!(arena.get(dropped), None);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut arena = Arena::new();
        let old = arena.insert(Value::Number(1)).unwrap();
        arena.sweep(); // nothing marked, slot reclaimed

        let new = arena.insert(Value::Number(2)).unwrap();
        assert_eq!(new.index, old.index); // slot reused
        assert_ne!(new.generation, old.generation);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&Value::Number(2)));
    }

    #[test]
    fn test_try_mark_is_idempotent() {
        let mut arena = Arena::new();
        let handle = arena.insert(Value::Number(3)).unwrap();

        assert!(arena.try_mark(handle).is_some());
        assert!(arena.try_mark(handle).is_none()); // already marked
    }

    #[test]
    fn test_max_values_limit() {
        let mut arena = Arena::new();
        arena.set_max_values(2);

        arena.insert(Value::Number(1)).unwrap();
        arena.insert(Value::Number(2)).unwrap();
        assert_eq!(
            arena.insert(Value::Number(3)),
            Err(HeapError::AllocationFailure)
        );
    }
}
