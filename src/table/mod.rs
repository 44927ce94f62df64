pub mod layout;
pub mod projection;

use std::marker::PhantomData;
use std::mem;

use log::{debug, trace};

use crate::types::{Entry, OrderedKey, Payload};
use layout::{BucketLayout, HashOrdered, Unordered};
use projection::ProjectionComparator;

/// Table with no iteration-order guarantee (hashtable discipline).
pub type UnorderedTable = KeyedTable<Unordered>;

/// Table whose iteration follows the key hash distribution (hash-map discipline).
pub type OrderedHashTable = KeyedTable<HashOrdered>;

/// Separate-chaining hash table keyed by [`OrderedKey`].
///
/// Every operation is shared between layouts; `L` only decides where an
/// entry lands and the order buckets are visited in. Lookup goes through
/// `hash_code()` and `==`, never through the key order.
///
/// ```text
/// buckets ─┬─ [0] ─► Entry ─► Entry
///          ├─ [1]
///          ├─ [2] ─► Entry
///          └─ ...
/// ```
///
/// Keys are unique: inserting an existing key overwrites its payload.
/// Payloads may repeat across keys.
#[derive(Debug, Clone)]
pub struct KeyedTable<L: BucketLayout> {
    buckets: Vec<Vec<Entry>>,
    len: usize,
    _layout: PhantomData<L>,
}

impl<L: BucketLayout> KeyedTable<L> {
    /// Create an empty table with the layout's initial bucket count.
    pub fn new() -> Self {
        Self::with_buckets(L::INITIAL_BUCKETS)
    }

    /// Create an empty table with at least `buckets` buckets.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = L::normalize(buckets);
        KeyedTable {
            buckets: empty_buckets(buckets),
            len: 0,
            _layout: PhantomData,
        }
    }

    /// Layout name, for reports.
    pub fn layout_name(&self) -> &'static str {
        L::NAME
    }

    /// Look up the payload stored for `key`. Expected O(1).
    ///
    /// The outer `Option` is "key present"; a stored `None` payload comes
    /// back as `Some(&None)`.
    pub fn lookup_by_key(&self, key: &OrderedKey) -> Option<&Payload> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.payload)
    }

    pub fn contains_key(&self, key: &OrderedKey) -> bool {
        self.lookup_by_key(key).is_some()
    }

    /// Find an entry whose payload equals `payload`.
    ///
    /// Copies every entry into a view, sorts it with
    /// [`ProjectionComparator`] and binary-searches it. O(n log n).
    /// When several entries share the payload, which one is returned is
    /// unspecified.
    pub fn lookup_by_payload(&self, payload: Option<&str>) -> Option<&Entry> {
        ProjectionComparator.search(self.iter().collect(), payload)
    }

    /// Insert or overwrite.
    pub fn insert(&mut self, key: OrderedKey, payload: Payload) {
        let index = self.bucket_of(&key);
        if let Some(existing) = self.buckets[index].iter_mut().find(|e| e.key == key) {
            trace!("{}: overwriting payload of {key}", L::NAME);
            existing.payload = payload;
            return;
        }

        place::<L>(&mut self.buckets[index], Entry::new(key, payload));
        self.len += 1;

        if self.len > self.threshold() {
            self.resize(L::grow(self.buckets.len()));
        }
    }

    /// Remove `key`. Returns the removed payload, or `None` if the key was
    /// absent (not an error).
    pub fn remove_by_key(&mut self, key: &OrderedKey) -> Option<Payload> {
        let index = self.bucket_of(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|entry| entry.key == *key)?;
        self.len -= 1;
        Some(chain.remove(position).payload)
    }

    /// Remove every entry whose payload equals `payload` exactly.
    /// `None` only matches stored `None` payloads. Returns the count removed.
    pub fn remove_by_payload(&mut self, payload: Option<&str>) -> usize {
        let doomed: Vec<OrderedKey> = self
            .iter()
            .filter(|entry| entry.payload() == payload)
            .map(|entry| entry.key.clone())
            .collect();

        for key in &doomed {
            self.remove_by_key(key);
        }
        doomed.len()
    }

    /// Rebuild the table by re-inserting its entries in key order.
    ///
    /// Consumes the table and returns a fresh one; callers rebind. The new
    /// table still iterates in layout order, not in key order: re-insertion
    /// order does not control bucket placement.
    pub fn sort_by_key(self) -> Self {
        self.sort_by_key_with_order().0
    }

    /// [`sort_by_key`](Self::sort_by_key), also returning the keys in the
    /// order they were re-inserted.
    pub fn sort_by_key_with_order(self) -> (Self, Vec<OrderedKey>) {
        let mut entries = self.into_entries();
        // stable: equal keys keep their relative order
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let mut sorted = Self::new();
        let mut order = Vec::with_capacity(entries.len());
        for entry in entries {
            order.push(entry.key.clone());
            sorted.insert(entry.key, entry.payload);
        }
        debug!("{}: rebuilt {} entries in key order", L::NAME, sorted.len);
        (sorted, order)
    }

    /// All keys, sorted under the [`OrderedKey`] order.
    pub fn sorted_keys(&self) -> Vec<&OrderedKey> {
        let mut keys: Vec<&OrderedKey> = self.keys().collect();
        keys.sort();
        keys
    }

    /// Iterate entries in layout order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: &self.buckets,
            visited: 0..self.buckets.len(),
            descending: L::VISIT_DESCENDING,
            chain: [].iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &OrderedKey> {
        self.iter().map(|entry| &entry.key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, key: &OrderedKey) -> usize {
        L::bucket_index(key.hash_code(), self.buckets.len())
    }

    /// Load factor 0.75.
    fn threshold(&self) -> usize {
        self.buckets.len() * 3 / 4
    }

    fn resize(&mut self, new_buckets: usize) {
        debug!(
            "{}: resizing {} -> {} buckets at {} entries",
            L::NAME,
            self.buckets.len(),
            new_buckets,
            self.len
        );
        let old = mem::replace(&mut self.buckets, empty_buckets(new_buckets));
        for entry in visit_owned::<L>(old) {
            let index = self.bucket_of(&entry.key);
            place::<L>(&mut self.buckets[index], entry);
        }
    }

    fn into_entries(self) -> Vec<Entry> {
        visit_owned::<L>(self.buckets).collect()
    }
}

fn empty_buckets(count: usize) -> Vec<Vec<Entry>> {
    (0..count).map(|_| Vec::new()).collect()
}

fn place<L: BucketLayout>(chain: &mut Vec<Entry>, entry: Entry) {
    if L::PREPEND {
        chain.insert(0, entry);
    } else {
        chain.push(entry);
    }
}

/// Drain buckets in the layout's visit order.
fn visit_owned<L: BucketLayout>(mut buckets: Vec<Vec<Entry>>) -> impl Iterator<Item = Entry> {
    if L::VISIT_DESCENDING {
        buckets.reverse();
    }
    buckets.into_iter().flatten()
}

impl<L: BucketLayout> Default for KeyedTable<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: BucketLayout> Extend<(OrderedKey, Payload)> for KeyedTable<L> {
    fn extend<I: IntoIterator<Item = (OrderedKey, Payload)>>(&mut self, iter: I) {
        for (key, payload) in iter {
            self.insert(key, payload);
        }
    }
}

impl<L: BucketLayout> FromIterator<(OrderedKey, Payload)> for KeyedTable<L> {
    fn from_iter<I: IntoIterator<Item = (OrderedKey, Payload)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, L: BucketLayout> IntoIterator for &'a KeyedTable<L> {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over table entries in layout order.
///
/// Walks buckets in the layout's visit direction and each chain head first.
pub struct Iter<'a> {
    buckets: &'a [Vec<Entry>],
    visited: std::ops::Range<usize>,
    descending: bool,
    chain: std::slice::Iter<'a, Entry>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some(entry);
            }
            let step = self.visited.next()?;
            let index = if self.descending {
                self.buckets.len() - 1 - step
            } else {
                step
            };
            self.chain = self.buckets[index].iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(i: u32) -> OrderedKey {
        OrderedKey::new(format!("k{i}"), f64::from(i))
    }

    #[test]
    fn resize_keeps_every_entry_reachable() {
        let mut table = UnorderedTable::new();
        for i in 0..100 {
            table.insert(key(i), Some(format!("v{i}")));
        }
        assert!(table.bucket_count() > Unordered::INITIAL_BUCKETS);
        for i in 0..100 {
            assert_eq!(table.lookup_by_key(&key(i)), Some(&Some(format!("v{i}"))));
        }
        assert_eq!(table.iter().len(), 100);
    }

    #[test]
    fn hash_ordered_growth_stays_power_of_two() {
        let mut table = OrderedHashTable::new();
        for i in 0..40 {
            table.insert(key(i), None);
        }
        assert!(table.bucket_count().is_power_of_two());
        assert_eq!(table.bucket_count(), 64);
    }

    #[test]
    fn unordered_iteration_walks_buckets_top_down() {
        let mut table = UnorderedTable::with_buckets(4);
        // an empty key hashes to 0 and lands in bucket 0
        let low = OrderedKey::anonymous(None);
        let high = (0..)
            .map(key)
            .find(|k| Unordered::bucket_index(k.hash_code(), 4) == 3)
            .expect("some key lands in bucket 3");
        table.insert(low.clone(), None);
        table.insert(high.clone(), None);

        let order: Vec<&OrderedKey> = table.keys().collect();
        assert_eq!(order, vec![&high, &low]);
    }

    #[test]
    fn chain_placement_follows_layout() {
        // both keys hash to 0 and share bucket 0
        let first = OrderedKey::anonymous(None);
        let second = OrderedKey::anonymous(Some(0.0));
        assert_eq!(first.hash_code(), second.hash_code());

        let mut unordered = UnorderedTable::new();
        let mut hashed = OrderedHashTable::new();
        for table_key in [&first, &second] {
            unordered.insert(table_key.clone(), None);
            hashed.insert(table_key.clone(), None);
        }

        assert_eq!(unordered.keys().collect::<Vec<_>>(), vec![&second, &first]);
        assert_eq!(hashed.keys().collect::<Vec<_>>(), vec![&first, &second]);
    }

    #[test]
    fn fresh_table_iterates_nothing() {
        let unordered = UnorderedTable::new();
        let hashed = OrderedHashTable::new();
        assert_eq!(unordered.iter().len(), 0);
        assert_eq!(unordered.iter().next(), None);
        assert_eq!(hashed.iter().next(), None);
        assert_eq!(hashed.keys().count(), 0);
    }

    // Both keys hash to 0 and share one chain, so the chain order after a
    // rebuild shows the order the entries were re-inserted in.
    fn colliding_pair() -> (OrderedKey, OrderedKey) {
        let smaller = OrderedKey::anonymous(Some(0.0));
        let larger = OrderedKey::anonymous(None);
        assert_eq!(smaller.hash_code(), larger.hash_code());
        assert!(smaller < larger);
        (smaller, larger)
    }

    #[test]
    fn unordered_sort_reinserts_in_key_order() {
        let (smaller, larger) = colliding_pair();
        let mut table = UnorderedTable::new();
        table.insert(smaller.clone(), None);
        table.insert(larger.clone(), None);
        // head insertion: newest first
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![&larger, &smaller]);

        let (table, order) = table.sort_by_key_with_order();
        assert_eq!(order, vec![smaller.clone(), larger.clone()]);
        // smaller went in first, so larger now heads the chain
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![&larger, &smaller]);
    }

    #[test]
    fn hash_ordered_sort_reinserts_in_key_order() {
        let (smaller, larger) = colliding_pair();
        let mut table = OrderedHashTable::new();
        table.insert(larger.clone(), None);
        table.insert(smaller.clone(), None);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![&larger, &smaller]);

        let table = table.sort_by_key();
        // tail insertion: chain follows re-insertion order
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![&smaller, &larger]);
    }
}
