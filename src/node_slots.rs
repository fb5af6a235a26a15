//! NodeSlots: entry storage behind stable generational handles.
//!
//! This is the storage side of an ordered container: one `Entry` per
//! occupied slot. It knows nothing about ordering. Relocation
//! operations (`extract`, `splice`, `relocate`, `copy_into`,
//! `assign_pair`) go through the entry's own assignment so keys are
//! reassigned in place and never exposed mutably.

use crate::entry::{Entry, PairSource};
use slotmap::{DefaultKey, SlotMap};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a, K, V>(&self, slots: &'a NodeSlots<K, V>) -> Option<&'a K> {
        slots.entry(*self).map(Entry::key)
    }

    pub fn value<'a, K, V>(&self, slots: &'a NodeSlots<K, V>) -> Option<&'a V> {
        slots.entry(*self).map(Entry::value)
    }

    pub fn value_mut<'a, K, V>(&self, slots: &'a mut NodeSlots<K, V>) -> Option<&'a mut V> {
        slots.value_mut(*self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotError {
    /// The handle names a slot that has been vacated.
    StaleHandle,
}

impl core::fmt::Display for SlotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlotError::StaleHandle => f.write_str("handle does not refer to an occupied slot"),
        }
    }
}

impl std::error::Error for SlotError {}

pub struct NodeSlots<K, V> {
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

impl<K, V> Default for NodeSlots<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over occupied slots with an immutable-key view.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Handle, &'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, e)| {
            let (key, value) = e.get_value();
            (Handle::new(k), key, value)
        })
    }
}

/// Iterator over occupied slots; values are writable, keys are not.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (Handle, &'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, e)| {
            let (key, value) = e.get_value_mut();
            (Handle::new(k), key, value)
        })
    }
}

impl<K, V> NodeSlots<K, V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn insert(&mut self, key: K, value: V) -> Handle {
        self.insert_entry(Entry::from_parts(key, value))
    }

    pub fn insert_entry(&mut self, entry: Entry<K, V>) -> Handle {
        Handle::new(self.slots.insert(entry))
    }

    /// Immutable-key view of the entry in slot `h`.
    pub fn get(&self, h: Handle) -> Option<(&K, &V)> {
        self.entry(h).map(Entry::get_value)
    }

    pub fn entry(&self, h: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(h.raw_handle())
    }

    pub fn value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.slots.get_mut(h.raw_handle()).map(Entry::value_mut)
    }

    /// Take the entry out of its slot. The handle is stale afterwards.
    pub fn extract(&mut self, h: Handle) -> Option<Entry<K, V>> {
        self.slots.remove(h.raw_handle())
    }

    /// Move-assign `entry` into the occupied slot `h`. The slot keeps its
    /// handle; only its contents change.
    pub fn splice(&mut self, h: Handle, entry: Entry<K, V>) -> Result<(), SlotError> {
        let slot = self
            .slots
            .get_mut(h.raw_handle())
            .ok_or(SlotError::StaleHandle)?;
        slot.assign(entry);
        Ok(())
    }

    /// Move the entry at `src` onto `dst` and vacate `src`. Relocating a
    /// slot onto itself does nothing.
    pub fn relocate(&mut self, src: Handle, dst: Handle) -> Result<(), SlotError> {
        if !self.slots.contains_key(src.raw_handle()) || !self.slots.contains_key(dst.raw_handle())
        {
            return Err(SlotError::StaleHandle);
        }
        if src == dst {
            return Ok(());
        }
        let moved = self
            .slots
            .remove(src.raw_handle())
            .ok_or(SlotError::StaleHandle)?;
        let slot = self
            .slots
            .get_mut(dst.raw_handle())
            .ok_or(SlotError::StaleHandle)?;
        slot.assign(moved);
        debug_assert!(!self.slots.contains_key(src.raw_handle()));
        Ok(())
    }

    /// Copy-assign the entry at `src` onto `dst`; `src` is left as is.
    pub fn copy_into(&mut self, src: Handle, dst: Handle) -> Result<(), SlotError>
    where
        K: Clone,
        V: Clone,
    {
        if src == dst {
            return if self.slots.contains_key(src.raw_handle()) {
                Ok(())
            } else {
                Err(SlotError::StaleHandle)
            };
        }
        let [from, to] = self
            .slots
            .get_disjoint_mut([src.raw_handle(), dst.raw_handle()])
            .ok_or(SlotError::StaleHandle)?;
        to.assign_from(from);
        Ok(())
    }

    /// Assign a standalone pair onto the entry in slot `h`.
    pub fn assign_pair<P>(&mut self, h: Handle, pair: P) -> Result<(), SlotError>
    where
        P: PairSource<K, V>,
    {
        let slot = self
            .slots
            .get_mut(h.raw_handle())
            .ok_or(SlotError::StaleHandle)?;
        slot.assign_pair(pair);
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Invariant: Handle-based access yields references while the slot is
    /// occupied and becomes `None` after extraction. Mutating via
    /// `value_mut` updates the stored value.
    #[test]
    fn handle_access_and_mutation() {
        let mut s: NodeSlots<String, i32> = NodeSlots::new();
        let h = s.insert("k1".to_string(), 10);
        assert_eq!(h.key(&s), Some(&"k1".to_string()));
        assert_eq!(h.value(&s), Some(&10));
        *h.value_mut(&mut s).unwrap() += 5;
        assert_eq!(s.get(h), Some((&"k1".to_string(), &15)));

        let e = s.extract(h).unwrap();
        assert_eq!(e, ("k1".to_string(), 15));
        assert!(h.value(&s).is_none());
        assert!(s.is_empty());
    }

    /// Invariant: Extracting an entry invalidates its handle and does not
    /// alias a new entry inserted afterward, even if the physical slot is
    /// reused (generational keys).
    #[test]
    fn stale_handle_does_not_alias_new_entry() {
        let mut s: NodeSlots<String, i32> = NodeSlots::new();
        let h1 = s.insert("old".to_string(), 1);
        let _ = s.extract(h1).unwrap();
        let h2 = s.insert("new".to_string(), 2);
        assert_ne!(h1, h2, "handles must differ across generations");
        assert!(h1.value(&s).is_none(), "stale handle must not resolve");
        assert_eq!(s.splice(h1, Entry::from_parts("x".into(), 0)), Err(SlotError::StaleHandle));
        assert_eq!(s.get(h2), Some((&"new".to_string(), &2)));
    }

    /// Invariant: `splice` replaces the contents of a slot while keeping its
    /// handle and the key's storage address.
    #[test]
    fn splice_keeps_slot_identity() {
        let mut s: NodeSlots<String, u8> = NodeSlots::new();
        let h = s.insert("a".to_string(), 1);
        let key_addr = s.entry(h).unwrap().key() as *const String;

        s.splice(h, Entry::from_parts("b".to_string(), 2)).unwrap();
        assert_eq!(s.get(h), Some((&"b".to_string(), &2)));
        assert!(core::ptr::eq(key_addr, s.entry(h).unwrap().key()));
        assert_eq!(s.len(), 1);
    }

    /// Invariant: `relocate` moves the source entry onto the destination
    /// and vacates the source; relocating a slot onto itself is a no-op.
    #[test]
    fn relocate_moves_and_vacates() {
        let mut s: NodeSlots<String, i32> = NodeSlots::new();
        let a = s.insert("a".to_string(), 1);
        let b = s.insert("b".to_string(), 2);

        s.relocate(a, a).unwrap();
        assert_eq!(s.len(), 2);

        s.relocate(a, b).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.get(a).is_none());
        assert_eq!(s.get(b), Some((&"a".to_string(), &1)));

        assert_eq!(s.relocate(a, b), Err(SlotError::StaleHandle));
        assert_eq!(s.relocate(b, a), Err(SlotError::StaleHandle));
        assert_eq!(s.get(b), Some((&"a".to_string(), &1)), "failed relocate must not modify");
    }

    /// Invariant: `copy_into` leaves the source untouched and reuses the
    /// destination key's buffer.
    #[test]
    fn copy_into_reuses_destination() {
        let mut s: NodeSlots<String, Vec<u8>> = NodeSlots::new();
        let mut long = String::with_capacity(32);
        long.push_str("destination-key");
        let dst = s.insert(long, vec![0]);
        let src = s.insert("src".to_string(), vec![1, 2]);
        let buf = s.entry(dst).unwrap().key().as_ptr();

        s.copy_into(src, dst).unwrap();
        assert_eq!(s.get(dst), Some((&"src".to_string(), &vec![1, 2])));
        assert_eq!(s.get(src), Some((&"src".to_string(), &vec![1, 2])));
        assert_eq!(s.entry(dst).unwrap().key().as_ptr(), buf);

        s.copy_into(src, src).unwrap();
        let gone = s.insert("gone".to_string(), vec![]);
        let _ = s.extract(gone);
        assert_eq!(s.copy_into(gone, dst), Err(SlotError::StaleHandle));
        assert_eq!(s.copy_into(gone, gone), Err(SlotError::StaleHandle));
    }

    /// Invariant: `assign_pair` on a slot accepts owned and borrowed pairs.
    #[test]
    fn assign_pair_on_slot() {
        let mut s: NodeSlots<String, i32> = NodeSlots::new();
        let h = s.insert("a".to_string(), 1);
        let p = ("b".to_string(), 2);
        s.assign_pair(h, &p).unwrap();
        assert_eq!(s.get(h), Some((&p.0, &p.1)));
        s.assign_pair(h, ("c".to_string(), 3)).unwrap();
        assert_eq!(s.get(h), Some((&"c".to_string(), &3)));
    }

    /// Invariant: Iteration yields each occupied slot exactly once;
    /// `iter_mut` updates values as seen by subsequent lookups.
    #[test]
    fn iteration_and_mutation() {
        let mut s: NodeSlots<String, i32> = NodeSlots::with_capacity(4);
        let keys = ["k1", "k2", "k3"];
        let handles: Vec<Handle> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| s.insert((*k).to_string(), i as i32))
            .collect();

        let seen: BTreeSet<String> = s.iter().map(|(_h, k, _v)| k.clone()).collect();
        let expected: BTreeSet<String> = keys.iter().map(|k| (*k).to_string()).collect();
        assert_eq!(seen, expected);

        for (_h, _k, v) in s.iter_mut() {
            *v += 10;
        }
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.value(&s), Some(&(i as i32 + 10)));
        }
    }
}
