/// Strategy that fixes how a [`KeyedTable`](super::KeyedTable) places and
/// visits entries.
///
/// Lookup semantics never depend on the layout: every layout finds a key by
/// `hash_code()` + `==`. What differs is where an entry lands and the order
/// in which buckets are walked, which is only observable through iteration.
pub trait BucketLayout {
    /// Human-readable name used in reports and logs.
    const NAME: &'static str;

    /// Bucket count of a freshly created table.
    const INITIAL_BUCKETS: usize;

    /// New entries go to the head of their chain instead of the tail.
    const PREPEND: bool;

    /// Iteration walks buckets from the last index down to 0.
    const VISIT_DESCENDING: bool;

    /// Map a key hash to a bucket index in `0..buckets`.
    fn bucket_index(hash: u64, buckets: usize) -> usize;

    /// Bucket count after one growth step.
    fn grow(buckets: usize) -> usize;

    /// Smallest valid bucket count that is at least `requested`.
    fn normalize(requested: usize) -> usize;
}

/// Hashtable discipline: prime-ish bucket counts, modulo indexing,
/// head insertion and top-down iteration.
///
/// ```text
/// buckets: 11 → 23 → 47 → 95 → ...   (2n + 1)
/// index:   (hash & 0x7FFF_FFFF) % buckets
/// visit:   bucket[n-1], bucket[n-2], ..., bucket[0]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Unordered;

impl BucketLayout for Unordered {
    const NAME: &'static str = "UnorderedTable";
    const INITIAL_BUCKETS: usize = 11;
    const PREPEND: bool = true;
    const VISIT_DESCENDING: bool = true;

    fn bucket_index(hash: u64, buckets: usize) -> usize {
        ((hash & 0x7FFF_FFFF) % buckets as u64) as usize
    }

    fn grow(buckets: usize) -> usize {
        buckets * 2 + 1
    }

    fn normalize(requested: usize) -> usize {
        requested.max(1)
    }
}

/// Hash-map discipline: power-of-two bucket counts, spread-and-mask
/// indexing, tail insertion and bottom-up iteration. Iteration order follows
/// the hash distribution of the keys, not insertion or key order.
///
/// ```text
/// buckets: 16 → 32 → 64 → ...        (2n)
/// index:   (h ^ (h >> 16)) & (buckets - 1)
/// visit:   bucket[0], bucket[1], ..., bucket[n-1]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HashOrdered;

impl BucketLayout for HashOrdered {
    const NAME: &'static str = "OrderedHashTable";
    const INITIAL_BUCKETS: usize = 16;
    const PREPEND: bool = false;
    const VISIT_DESCENDING: bool = false;

    fn bucket_index(hash: u64, buckets: usize) -> usize {
        let spread = hash ^ (hash >> 16);
        (spread & (buckets as u64 - 1)) as usize
    }

    fn grow(buckets: usize) -> usize {
        buckets * 2
    }

    fn normalize(requested: usize) -> usize {
        requested.max(1).next_power_of_two()
    }
}
