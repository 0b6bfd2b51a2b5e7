//! Slot+generation handle table for engine lifetimes across the C boundary.
//!
//! Destroyed handles carry a stale generation and resolve to `None`
//! instead of dangling. Destroying twice is a safe no-op. Generations
//! start at 1, so the zero a C caller gets from `uint64_t h = 0;` never
//! names a live engine.

/// Never issued by [`HandleTable::insert`].
pub(crate) const NULL_HANDLE: u64 = 0;

const FIRST_GENERATION: u32 = 1;

/// Upper 32 bits = slot index, lower 32 bits = generation.
fn encode(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn decode(handle: u64) -> (u32, u32) {
    ((handle >> 32) as u32, handle as u32)
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Maps `u64` handles to owned values, reusing freed slots.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> u64 {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.data = Some(value);
            encode(idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: FIRST_GENERATION,
                data: Some(value),
            });
            encode(idx, FIRST_GENERATION)
        }
    }

    /// `None` for stale or never-issued handles.
    pub fn get(&self, handle: u64) -> Option<&T> {
        let (idx, generation) = decode(handle);
        let slot = self.slots.get(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_ref()
    }

    /// Take the value out and retire the handle.
    ///
    /// A slot whose generation wraps to 0 is never recycled, which keeps
    /// both [`NULL_HANDLE`] and the slot's earlier handles dead.
    pub fn remove(&mut self, handle: u64) -> Option<T> {
        let (idx, generation) = decode(handle);
        let slot = self.slots.get_mut(idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(idx);
        }
        Some(value)
    }

    /// Number of live handles.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.data.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kising_engine::Engine;
    use std::sync::{Arc, Mutex};

    #[test]
    fn insert_get_remove() {
        let mut table = HandleTable::new();
        let h = table.insert("engine");
        assert_ne!(h, NULL_HANDLE);
        assert_eq!(table.get(h), Some(&"engine"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.remove(h), Some("engine"));
        assert_eq!(table.get(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn double_remove_is_none() {
        let mut table = HandleTable::new();
        let h = table.insert(1u8);
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1u8);
        table.remove(h1);
        let h2 = table.insert(2u8);
        let (s1, g1) = decode(h1);
        let (s2, g2) = decode(h2);
        assert_eq!(s1, s2);
        assert_eq!(g2, g1 + 1);
        assert_eq!(table.get(h1), None);
        assert_eq!(table.get(h2), Some(&2));
    }

    #[test]
    fn never_issued_handle_is_none() {
        let table: HandleTable<u8> = HandleTable::new();
        assert_eq!(table.get(encode(7, FIRST_GENERATION)), None);
        assert_eq!(table.get(u64::MAX), None);
    }

    #[test]
    fn null_handle_never_resolves() {
        let mut table = HandleTable::new();
        let first = table.insert(Arc::new(Mutex::new(Engine::new())));
        assert_eq!(decode(first), (0, FIRST_GENERATION));
        assert!(table.get(NULL_HANDLE).is_none());
        assert!(table.remove(NULL_HANDLE).is_none());
        assert!(table.get(first).is_some());
    }

    #[test]
    fn removed_engine_outlives_its_handle_while_borrowed() {
        let mut table = HandleTable::new();
        let h = table.insert(Arc::new(Mutex::new(Engine::new())));
        let borrowed = table.get(h).cloned().unwrap();
        let removed = table.remove(h).unwrap();
        assert!(table.get(h).is_none());
        assert_eq!(Arc::strong_count(&removed), 2);
        borrowed.lock().unwrap().init_system(2, 2).unwrap();
        assert!(removed.lock().unwrap().dims().is_some());
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(1u8);
        table.remove(h);
        table.slots[0].generation = u32::MAX;
        let h = table.insert(2u8);
        assert_eq!(decode(h).1, u32::MAX);
        table.remove(h);
        assert_eq!(table.slots[0].generation, 0);
        assert!(!table.free_list.contains(&0));
        assert_eq!(table.get(encode(0, 0)), None);
        assert_eq!(table.get(encode(0, FIRST_GENERATION)), None);
        assert_ne!(decode(table.insert(3u8)).0, 0);
    }
}
