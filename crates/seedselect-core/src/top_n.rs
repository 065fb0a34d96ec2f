use std::cmp::Ordering;
use std::collections::BinaryHeap;

const PREALLOCATE_LIMIT: usize = 1024;

/// A candidate paired with its ranking key.
///
/// Entries order by key first and by the candidate's bytes second, so two
/// candidates at the same distance always rank the same way regardless of
/// the order in which they were offered.
#[derive(Clone, Debug)]
struct Ranked<K, T> {
    key: K,
    item: T,
}

impl<K: Ord, T: AsRef<[u8]>> Ord for Ranked<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key).then_with(|| self.item.as_ref().cmp(other.item.as_ref()))
    }
}

impl<K: Ord, T: AsRef<[u8]>> PartialOrd for Ranked<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T: AsRef<[u8]>> PartialEq for Ranked<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, T: AsRef<[u8]>> Eq for Ranked<K, T> {}

/// Keeps the `capacity` smallest-keyed items out of a stream.
///
/// Backed by a binary max-heap so the worst retained item is always at the
/// root: offering costs `O(log capacity)` and a full pass over `P` items costs
/// `O(P log capacity)`, rather than the `O(P log P)` of sorting everything.
///
/// ```
/// # use seedselect_core::BoundedTopN;
/// let mut top = BoundedTopN::new(2);
/// for (key, item) in [(7u64, "g"), (1, "a"), (5, "e"), (3, "c")] {
///     top.offer(key, item);
/// }
/// assert_eq!(top.into_sorted(), vec!["a", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct BoundedTopN<K, T> {
    capacity: usize,
    heap: BinaryHeap<Ranked<K, T>>,
}

impl<K: Ord, T: AsRef<[u8]>> BoundedTopN<K, T> {
    /// Creates an empty selector retaining at most `capacity` items.
    ///
    /// Only a bounded prefix of `capacity` is reserved up front; the heap
    /// grows on demand past that, so `usize::MAX` means "keep everything".
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity, heap: BinaryHeap::with_capacity(capacity.min(PREALLOCATE_LIMIT)) }
    }

    /// Maximum number of retained items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offers an item; returns `true` if it was retained.
    ///
    /// While below capacity every item is kept. Once full, the item replaces
    /// the current worst only when it ranks strictly better.
    pub fn offer(&mut self, key: K, item: T) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let entry = Ranked { key, item };
        if self.heap.len() < self.capacity {
            self.heap.push(entry);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if entry < *worst => {
                *worst = entry;
                true
            }
            _ => false,
        }
    }

    /// Key and item currently ranked worst, i.e. the next eviction victim.
    #[must_use]
    pub fn peek_worst(&self) -> Option<(&K, &T)> {
        self.heap.peek().map(|entry| (&entry.key, &entry.item))
    }

    /// Consumes the selector, returning items ordered best first.
    #[must_use]
    pub fn into_sorted(self) -> Vec<T> {
        self.into_sorted_entries().into_iter().map(|(_, item)| item).collect()
    }

    /// Consumes the selector, returning `(key, item)` pairs ordered best first.
    #[must_use]
    pub fn into_sorted_entries(self) -> Vec<(K, T)> {
        self.heap.into_sorted_vec().into_iter().map(|entry| (entry.key, entry.item)).collect()
    }
}
