use std::collections::BTreeMap;

use arena::BlockAllocator;
use slotmap::{new_key_type, SlotMap};

use crate::entry::PatternMapEntry;
use crate::error::PatternMapError;

new_key_type! {
    /// Stable handle to an arena-owned [`PatternMapEntry`], returned by
    /// [`OrderedPatternMap::insert`]/[`OrderedPatternMap::search`].
    pub struct PatternHandle;
}

/// Associative structure keyed by byte-identical genotype vectors,
/// preserving a deterministic, lexicographic order over the raw bytes.
///
/// The sorted index (`BTreeMap`) is keyed directly on the arena-owned slice,
/// so a pattern's bytes are allocated exactly once and never copied again on
/// a repeat insert; entries themselves live in a [`slotmap::SlotMap`] so that
/// a `PatternHandle` is a stable, `Copy` reference to an arena-backed record.
#[derive(Debug, Default)]
pub struct OrderedPatternMap<'arena> {
    index: BTreeMap<&'arena [u8], PatternHandle>,
    entries: SlotMap<PatternHandle, PatternMapEntry<'arena>>,
}

impl<'arena> OrderedPatternMap<'arena> {
    #[must_use]
    pub fn new() -> Self {
        Self { index: BTreeMap::new(), entries: SlotMap::with_key() }
    }

    /// O(log n) lookup. Returns the existing entry's handle, if any.
    #[must_use]
    pub fn search(&self, key: &[u8]) -> Option<PatternHandle> {
        self.index.get(key).copied()
    }

    /// O(log n) insert. When `key` already has an entry, the existing node
    /// is kept and returned unchanged — `key` is discarded without being
    /// copied again.
    pub fn insert(
        &mut self,
        key: &[u8],
        arena: &'arena BlockAllocator,
    ) -> Result<PatternHandle, PatternMapError> {
        if let Some(handle) = self.index.get(key) {
            return Ok(*handle);
        }
        let canonical = arena.alloc_slice_copy(key)?;
        let handle = self.entries.insert(PatternMapEntry::new(canonical));
        self.index.insert(canonical, handle);
        Ok(handle)
    }

    #[must_use]
    pub fn entry(&self, handle: PatternHandle) -> &PatternMapEntry<'arena> {
        &self.entries[handle]
    }

    pub fn entry_mut(&mut self, handle: PatternHandle) -> &mut PatternMapEntry<'arena> {
        &mut self.entries[handle]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ordered traversal from the smallest key to the largest.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&'arena [u8], &PatternMapEntry<'arena>)> {
        self.index.iter().map(move |(&key, handle)| (key, &self.entries[*handle]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_search_round_trips() {
        let arena = BlockAllocator::new(1024);
        let mut map = OrderedPatternMap::new();

        let handle = map.insert(&[1, 1, 0, 0], &arena).unwrap();
        assert_eq!(map.search(&[1, 1, 0, 0]), Some(handle));
        assert_eq!(map.search(&[0, 0, 1, 1]), None);
    }

    #[test]
    fn repeated_insert_reuses_the_existing_node() {
        let arena = BlockAllocator::new(1024);
        let mut map = OrderedPatternMap::new();

        let first = map.insert(&[1, 1, 0, 0], &arena).unwrap();
        let second = map.insert(&[1, 1, 0, 0], &arena).unwrap();
        assert_eq!(first, second);
        assert_eq!(map.len(), 1);

        // The canonical buffer is the one allocated on the *first* insert.
        let ptr_first = map.entry(first).genotypes().as_ptr();
        map.insert(&[1, 1, 0, 0], &arena).unwrap();
        assert_eq!(map.entry(first).genotypes().as_ptr(), ptr_first);
    }

    #[test]
    fn iteration_order_is_lexicographic_on_raw_bytes() {
        let arena = BlockAllocator::new(1024);
        let mut map = OrderedPatternMap::new();

        map.insert(&[1, 0, 0], &arena).unwrap();
        map.insert(&[0, 1, 1], &arena).unwrap();
        map.insert(&[0, 0, 1], &arena).unwrap();

        let keys: Vec<Vec<u8>> = map.iter_ordered().map(|(k, _)| k.to_vec()).collect();
        assert_eq!(keys, vec![vec![0, 0, 1], vec![0, 1, 1], vec![1, 0, 0]]);
    }

    #[test]
    fn entries_accumulate_sites_by_front_insertion() {
        use ids::SiteId;

        let arena = BlockAllocator::new(1024);
        let mut map = OrderedPatternMap::new();
        let handle = map.insert(&[1, 1, 0, 0], &arena).unwrap();

        map.entry_mut(handle).push_site(SiteId::new(0));
        map.entry_mut(handle).push_site(SiteId::new(5));

        let ascending: Vec<_> = map.entry(handle).sites_ascending().collect();
        assert_eq!(ascending, vec![SiteId::new(0), SiteId::new(5)]);
        assert_eq!(map.entry(handle).site_count(), 2);
    }
}
