use crate::list::arena::NodeRef;
use crate::list::List;
use std::hash::{Hash, Hasher};

/// Bucket count used by [`List::is_looping_open_hash`] and substituted by
/// [`List::is_looping_open_hash_with`] when a zero table size is passed.
pub const DEFAULT_HASH_TABLE_SIZE: usize = 10;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    /// Clones the values in iteration order into a fresh list.
    ///
    /// The clone is rebuilt through [`List::push_back`], so cloning a chain
    /// that was forced into a cycle produces a well-formed acyclic list of
    /// the first [`List::len`] reachable values.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for value in self {
            value.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Detects a cycle by counting transitions against the node count.
    ///
    /// Starting from the second node, the walk makes at most [`len`]
    /// transitions; an acyclic chain must reach an absent link within that
    /// budget, so exceeding it means some node was visited twice. Returns
    /// `false` immediately for lists of zero or one node with no self-link.
    ///
    /// This detector trusts `len`, which only tracks API-mediated inserts
    /// and deletes. It is the cheapest of the three but, unlike
    /// [`is_looping_floyds_cycle_find`], it has nothing to say about chains
    /// whose bookkeeping was bypassed.
    ///
    /// # Complexity
    ///
    /// *O*(*n*) time, *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert!(!list.is_looping_transition_count());
    ///
    /// list.force_link(&3, &2);
    /// assert!(list.is_looping_transition_count());
    /// ```
    ///
    /// [`len`]: List::len
    /// [`is_looping_floyds_cycle_find`]: List::is_looping_floyds_cycle_find
    pub fn is_looping_transition_count(&self) -> bool {
        let second = match self.head_node().and_then(|head| self.successor(head)) {
            Some(second) => second,
            None => return false,
        };
        let mut current = Some(second);
        let mut transitions = 1;
        while let Some(node) = current {
            if transitions > self.len() {
                return true;
            }
            transitions += 1;
            current = self.successor(node);
        }
        false
    }

    /// Detects a cycle with Floyd's two-pointer race.
    ///
    /// A slow reference advances one node per round while a fast reference
    /// advances two. The verdict is `true` the moment they meet on the same
    /// node, and `false` the moment the fast reference (or its next hop)
    /// falls off the end of the chain.
    ///
    /// The only detector that is both *O*(1) in memory and independent of
    /// the list's own bookkeeping.
    ///
    /// # Complexity
    ///
    /// *O*(*n*) time, *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert!(!list.is_looping_floyds_cycle_find());
    ///
    /// list.force_link(&3, &1);
    /// assert!(list.is_looping_floyds_cycle_find());
    /// ```
    pub fn is_looping_floyds_cycle_find(&self) -> bool {
        let mut slow = self.head_node();
        let mut fast = self.head_node();
        while let (Some(slow_node), Some(fast_node)) = (slow, fast) {
            let hop = match self.successor(fast_node) {
                Some(hop) => hop,
                None => return false,
            };
            slow = self.successor(slow_node);
            fast = self.successor(hop);
            if slow.is_some() && slow == fast {
                return true;
            }
        }
        false
    }

    /// Detects a cycle by hashing visited node identities into an open-hash
    /// table with [`DEFAULT_HASH_TABLE_SIZE`] buckets.
    ///
    /// See [`is_looping_open_hash_with`] for the mechanism.
    ///
    /// [`is_looping_open_hash_with`]: List::is_looping_open_hash_with
    pub fn is_looping_open_hash(&self) -> bool {
        self.is_looping_open_hash_with(DEFAULT_HASH_TABLE_SIZE)
    }

    /// Detects a cycle by recording visited node identities in an open-hash
    /// table with `table_size` buckets, falling back to
    /// [`DEFAULT_HASH_TABLE_SIZE`] when `table_size` is zero.
    ///
    /// The walk starts at the second node. Each visited node's identity
    /// token (its arena slot index, not its value and not a memory address)
    /// is reduced modulo `table_size` to pick a bucket; colliding tokens
    /// chain within the bucket, which is itself a `List` of tokens. Seeing
    /// a token twice before an absent link means the walk came back around.
    ///
    /// This is the textbook visited-set approach, kept as a contrast to the
    /// constant-memory detectors.
    ///
    /// # Complexity
    ///
    /// *O*(*n*) time, *O*(*n*) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert!(!list.is_looping_open_hash_with(4));
    ///
    /// list.force_link(&3, &3); // self-loop on the tail
    /// assert!(list.is_looping_open_hash_with(4));
    /// ```
    pub fn is_looping_open_hash_with(&self, table_size: usize) -> bool {
        let table_size = if table_size == 0 {
            DEFAULT_HASH_TABLE_SIZE
        } else {
            table_size
        };
        let mut visited = VisitedTable::new(table_size);
        let mut current = self.head_node().and_then(|head| self.successor(head));
        while let Some(node) = current {
            if !visited.insert(node) {
                return true;
            }
            current = self.successor(node);
        }
        false
    }
}

/// Open-hash set of node identity tokens.
///
/// Collisions chain inside the bucket, and each bucket is itself a `List`,
/// the same trick the detector is written to demonstrate.
struct VisitedTable {
    buckets: Vec<List<usize>>,
}

impl VisitedTable {
    fn new(table_size: usize) -> Self {
        Self {
            buckets: (0..table_size).map(|_| List::new()).collect(),
        }
    }

    /// Records `node`, returning `false` if it had been recorded before.
    fn insert(&mut self, node: NodeRef) -> bool {
        let token = node.index();
        let slot = token % self.buckets.len();
        let bucket = &mut self.buckets[slot];
        if bucket.contains(&token) {
            return false;
        }
        bucket.push_back(token);
        true
    }
}
