//! Locally held, key-ordered list of polled items.

use archive_explorer_domain::Keyed;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Result of merging a batch of fetched items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// Items newly added to the list.
    pub added: usize,
    /// Keys skipped between the previous watermark and the oldest new item.
    pub gap: Option<RangeInclusive<u64>>,
}

/// Items sorted strictly descending by key, plus the highest key merged.
///
/// Invariants: no two items share a key, items are sorted newest first, and
/// the watermark equals the key of the first item once anything is held.
/// Items are never evicted.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    watermark: Option<u64>,
}

impl<T: Keyed> ListState<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            watermark: None,
        }
    }

    /// Replaces the contents with a freshly fetched page.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = sorted_unique_desc(items);
        self.watermark = self.items.first().map(Keyed::key);
    }

    /// Prepends every item newer than the watermark.
    ///
    /// Items at or below the watermark are already known and dropped, so
    /// stale or overlapping batches leave the list untouched.
    pub fn merge_newer(&mut self, items: Vec<T>) -> MergeReport {
        let fresh: Vec<T> = items
            .into_iter()
            .filter(|item| self.watermark.is_none_or(|w| item.key() > w))
            .collect();
        let fresh = sorted_unique_desc(fresh);

        let Some(newest) = fresh.first().map(Keyed::key) else {
            return MergeReport::default();
        };
        let oldest_fresh = fresh.last().map(Keyed::key).unwrap_or(newest);

        let gap = self
            .watermark
            .filter(|&w| oldest_fresh > w + 1)
            .map(|w| (w + 1)..=(oldest_fresh - 1));

        let added = fresh.len();
        let previous = std::mem::replace(&mut self.items, fresh);
        self.items.extend(previous);
        self.watermark = Some(newest);

        MergeReport { added, gap }
    }

    /// Key the next backward page should request: one below the oldest held
    /// item. `None` when the list is empty or already reaches genesis.
    pub fn next_older_key(&self) -> Option<u64> {
        self.oldest_key().and_then(|k| k.checked_sub(1))
    }

    /// Appends an item older than everything held. Returns `false` (and
    /// leaves the list unchanged) if the item is not strictly older.
    pub fn append_older(&mut self, item: T) -> bool {
        match self.oldest_key() {
            Some(oldest) if item.key() >= oldest => false,
            Some(_) => {
                self.items.push(item);
                true
            }
            None => {
                self.watermark = Some(item.key());
                self.items.push(item);
                true
            }
        }
    }

    /// Items matching `predicate`, in list order. Does not touch the watermark.
    pub fn filter<'a>(&'a self, predicate: impl Fn(&T) -> bool + 'a) -> impl Iterator<Item = &'a T> {
        self.items.iter().filter(move |item| predicate(item))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest key merged so far.
    pub fn watermark(&self) -> Option<u64> {
        self.watermark
    }

    pub fn oldest_key(&self) -> Option<u64> {
        self.items.last().map(Keyed::key)
    }
}

impl<T: Keyed> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_unique_desc<T: Keyed>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(item.key()));
    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.key()));
    items
}
