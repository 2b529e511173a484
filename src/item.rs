use std::fmt;

/// First element of a termination item.
///
/// Produced runs are contiguous non-negative sequences, so `-1` can never
/// appear at the head of a real item regardless of the counter mode.
pub const SENTINEL_MARK: i64 = -1;

/// Unit of work: an ordered, fixed-length sequence of integers.
///
/// Items are created by a [`Generator`], travel through one of the two
/// transports, and are consumed exactly once by a worker that sorts them and
/// computes their checksum.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkItem {
    values: Vec<i64>,
}

impl WorkItem {
    pub(crate) fn from_values(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// The distinguished "no more work" item used by the dispatch transport.
    ///
    /// Every element is [`SENTINEL_MARK`]; detection only inspects the first
    /// one, but a fully marked item keeps the payload unambiguous for any
    /// observer in between.
    pub fn sentinel(len: usize) -> Self {
        Self {
            values: vec![SENTINEL_MARK; len],
        }
    }

    /// Returns true if this item is a termination signal.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.values.first() == Some(&SENTINEL_MARK)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorts the item's elements ascending, in place.
    pub fn sort(&mut self) {
        self.values.sort_unstable();
    }

    /// Sum of all elements, the item's deterministic fingerprint.
    pub fn checksum(&self) -> i64 {
        self.values.iter().sum()
    }

    /// The full worker-side transform: sort ascending, then checksum.
    ///
    /// Pure in the item contents: transforming an identical item always
    /// yields the same checksum.
    pub fn transform(&mut self) -> i64 {
        self.sort();
        self.checksum()
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> &[i64] {
        &self.values
    }
}

impl fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            write!(f, "WorkItem::sentinel(len={})", self.values.len())
        } else {
            write!(
                f,
                "WorkItem(len={}, first={:?})",
                self.values.len(),
                self.values.first()
            )
        }
    }
}

/// How the generation counter behaves across items.
///
/// The two counter disciplines produce different item contents but identical
/// distribution behavior; which one a run uses is an explicit configuration
/// choice, applied uniformly to both transports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterMode {
    /// One running counter for the whole run: item `i` holds the values
    /// `[i * len, (i + 1) * len)`.
    #[default]
    Continuous,
    /// The counter restarts at zero for every item: each item holds
    /// `[0, len)`.
    PerItem,
}

/// Produces the Nth work item deterministically from a running counter.
///
/// Pure function of its own state; the producer owns exactly one generator
/// per run and nothing else ever touches it.
#[derive(Debug)]
pub struct Generator {
    mode: CounterMode,
    len: usize,
    next: i64,
}

impl Generator {
    pub fn new(mode: CounterMode, len: usize) -> Self {
        Self { mode, len, next: 0 }
    }

    /// Generates the next item: a contiguous increasing run of `len` values.
    pub fn generate(&mut self) -> WorkItem {
        let start = match self.mode {
            CounterMode::Continuous => self.next,
            CounterMode::PerItem => 0,
        };
        let values: Vec<i64> = (start..start + self.len as i64).collect();
        self.next = start + self.len as i64;
        WorkItem::from_values(values)
    }
}
