use std::fmt::{Debug, Formatter};

use crate::list::arena::{Arena, NodeRef};
use crate::{IntoIter, Iter};

pub mod iterator;

mod algorithms;
mod arena;

pub use self::algorithms::DEFAULT_HASH_TABLE_SIZE;

/// The `List` is a singly-linked list with owned nodes, stored in an arena
/// of index-addressed slots. It offers constant-time insertion at the end,
/// bounded search and deletion by value, a stream-style reading cursor, and
/// three cycle detectors.
///
/// All searches are bounded by a transition budget equal to [`len`], so they
/// terminate even after [`force_link`] has bent the chain into a cycle.
///
/// # Naming Conventions
///
/// - `head`/`tail`: the first and last node reachable through normal
///   insertions and deletions;
/// - `cursor`: the node whose value the next [`read_next`] call yields;
/// - a "transition" is one step from a node to its successor.
///
/// [`len`]: List::len
/// [`force_link`]: List::force_link
/// [`read_next`]: List::read_next
pub struct List<T> {
    arena: Arena<Node<T>>,
    head: Option<NodeRef>,
    tail: Option<NodeRef>,
    cursor: Option<NodeRef>,
    /// Insertions minus deletions made through the list API. Not necessarily
    /// the number of reachable nodes once a link has been forced.
    len: usize,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<NodeRef>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn node(&self, node: NodeRef) -> Option<&Node<T>> {
        self.arena.get(node)
    }

    fn node_mut(&mut self, node: NodeRef) -> Option<&mut Node<T>> {
        self.arena.get_mut(node)
    }

    pub(crate) fn head_node(&self) -> Option<NodeRef> {
        self.head
    }

    /// Successor of `node`, treating a link to a freed slot as the end of
    /// the chain.
    pub(crate) fn successor(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node)?
            .next
            .filter(|&next| self.node(next).is_some())
    }

    /// Bounded forward search for the first node whose value satisfies
    /// `matches`, returning it together with its predecessor.
    ///
    /// The walk gives up after `len` transitions. The budget exists so that
    /// searching a chain that has been forced into a cycle and does not
    /// contain a match terminates instead of looping forever.
    fn locate_by<F>(&self, mut matches: F) -> Option<(NodeRef, Option<NodeRef>)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut previous = None;
        let mut current = self.head;
        let mut transitions = 0;
        while let Some(node_ref) = current {
            let node = self.node(node_ref)?;
            if matches(&node.value) {
                return Some((node_ref, previous));
            }
            if transitions >= self.len {
                return None;
            }
            transitions += 1;
            previous = current;
            current = node.next.filter(|&next| self.node(next).is_some());
        }
        None
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    ///
    /// # Examples
    /// ```
    /// use looplist::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            tail: None,
            cursor: None,
            len: 0,
        }
    }

    /// Returns the number of values inserted and not yet deleted.
    ///
    /// This is bookkeeping, not a re-walk of the chain: after a
    /// [`force_link`] it can disagree with the number of reachable nodes.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(2);
    /// assert_eq!(list.len(), 1);
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    ///
    /// [`force_link`]: List::force_link
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_back("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Provides a reference to the first value, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|head| self.node(head)).map(|node| &node.value)
    }

    /// Appends a value at the end of the list.
    ///
    /// The first insertion also parks the reading cursor on the new node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, thanks to the cached
    /// `tail`.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.front(), Some(&1));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn push_back(&mut self, value: T) {
        let node = self.arena.allocate(Node { value, next: None });
        if self.head.is_none() {
            self.head = Some(node);
            self.cursor = Some(node);
        } else if let Some(tail) = self.tail {
            if let Some(tail_node) = self.node_mut(tail) {
                tail_node.next = Some(node);
            }
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes the first value and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        let node = self.arena.free(head)?;
        let next = node.next.filter(|&next| self.node(next).is_some());
        self.head = next;
        if self.tail == Some(head) {
            self.tail = None;
        }
        if self.cursor == Some(head) {
            self.cursor = self.head;
        }
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    /// Deletes the first node whose value equals `value` and returns the
    /// removed value, or `None` if no node matched.
    ///
    /// The search is bounded by a budget of [`len`] transitions, so calling
    /// this on a chain that was forced into a cycle and does not contain
    /// `value` returns `None` instead of spinning forever. When nothing is
    /// found, no state changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.delete_first(&2), Some(2));
    /// assert_eq!(list.delete_first(&9), None);
    /// assert_eq!(list.len(), 2);
    /// ```
    ///
    /// [`len`]: List::len
    pub fn delete_first(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.delete_first_by(|other| other == value)
    }

    /// Like [`delete_first`], but matching with a predicate instead of
    /// requiring `T: PartialEq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["red", "GREEN", "blue"]);
    /// let removed = list.delete_first_by(|c| c.eq_ignore_ascii_case("green"));
    /// assert_eq!(removed, Some("GREEN"));
    /// ```
    ///
    /// [`delete_first`]: List::delete_first
    pub fn delete_first_by<F>(&mut self, matches: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (found, previous) = self.locate_by(matches)?;
        let node = self.arena.free(found)?;
        let next = node.next.filter(|&next| self.node(next).is_some());
        match previous {
            Some(previous) => {
                if let Some(previous_node) = self.node_mut(previous) {
                    previous_node.next = next;
                }
            }
            None => self.head = next,
        }
        // Retreat the tail to the predecessor, which is `None` when the sole
        // node goes away.
        if self.tail == Some(found) {
            self.tail = previous;
        }
        if self.cursor == Some(found) {
            self.cursor = next.or(self.head);
        }
        self.len = self.len.saturating_sub(1);
        Some(node.value)
    }

    /// Returns the value under the reading cursor and whether more values
    /// follow, advancing the cursor by one node.
    ///
    /// The cursor clamps on the last node: once its successor is absent,
    /// every further call repeats the last value with `has_more = false`
    /// until [`reset_reading`] sends the cursor back to the head. On an
    /// empty list this returns `None`.
    ///
    /// On a cyclic chain the cursor never runs out of successors, so a
    /// caller suspecting a cycle should cap its reads.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2]);
    /// assert_eq!(list.read_next(), Some((&1, true)));
    /// assert_eq!(list.read_next(), Some((&2, false)));
    /// assert_eq!(list.read_next(), Some((&2, false))); // clamped
    ///
    /// list.reset_reading();
    /// assert_eq!(list.read_next(), Some((&1, true)));
    /// ```
    ///
    /// [`reset_reading`]: List::reset_reading
    pub fn read_next(&mut self) -> Option<(&T, bool)> {
        let current = self.cursor?;
        let next = self.successor(current);
        if next.is_some() {
            self.cursor = next;
        }
        let node = self.node(current)?;
        Some((&node.value, next.is_some()))
    }

    /// Moves the reading cursor back to the head of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn reset_reading(&mut self) {
        self.cursor = self.head;
    }

    /// Returns `true` if the list contains a value equal to `value`.
    ///
    /// Bounded like [`delete_first`]: on a cyclic chain without a match this
    /// returns `false` once the transition budget is spent.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(0);
    /// list.push_back(1);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    ///
    /// [`delete_first`]: List::delete_first
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_by(|other| other == value)
    }

    /// Like [`contains`], but matching with a predicate instead of requiring
    /// `T: PartialEq`.
    ///
    /// [`contains`]: List::contains
    pub fn contains_by<F>(&self, matches: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.locate_by(matches).is_some()
    }

    /// Forces the node holding `from` to link directly to the node holding
    /// `to`, discarding whatever `from` previously pointed at. Returns
    /// `true` if the link was made, `false` (and no state change) if either
    /// value is missing.
    ///
    /// This is the sole way to produce a cyclic or otherwise malformed
    /// chain, intended for exercising the cycle detectors. The discarded
    /// sub-chain becomes unreachable from the list but stays in the arena,
    /// so it is still reclaimed on drop. `tail` is left untouched and loses
    /// its meaning once a cycle exists; the effect of [`push_back`] after a
    /// forced link is unspecified beyond "appends after whatever `tail`
    /// still names".
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
    /// assert!(list.force_link(&3, &1));
    /// assert!(list.is_looping_floyds_cycle_find());
    ///
    /// // Unknown values leave the list unchanged.
    /// assert!(!list.force_link(&3, &9));
    /// ```
    ///
    /// [`push_back`]: List::push_back
    pub fn force_link(&mut self, from: &T, to: &T) -> bool
    where
        T: PartialEq,
    {
        self.force_link_by(|other| other == from, |other| other == to)
    }

    /// Like [`force_link`], but locating both endpoints with predicates.
    ///
    /// [`force_link`]: List::force_link
    pub fn force_link_by<F, G>(&mut self, from: F, to: G) -> bool
    where
        F: FnMut(&T) -> bool,
        G: FnMut(&T) -> bool,
    {
        let (from_node, _) = match self.locate_by(from) {
            Some(found) => found,
            None => return false,
        };
        let (to_node, _) = match self.locate_by(to) {
            Some(found) => found,
            None => return false,
        };
        match self.node_mut(from_node) {
            Some(node) => {
                node.next = Some(to_node);
                true
            }
            None => false,
        }
    }

    /// Removes all values from the `List`.
    ///
    /// The whole arena is released at once, so this is safe and bounded even
    /// when the chain is cyclic.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2]);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.len(), 0);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Provides a forward iterator.
    ///
    /// The iterator visits at most [`len`] nodes, so it terminates even if
    /// the chain has been forced into a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplist::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(0);
    /// list.push_back(1);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// [`len`]: List::len
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Ensure that `List` and its read-only iterator are covariant in their type
// parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cell::RefCell;
    use std::iter::FromIterator;

    fn read_all<T: Clone>(list: &mut List<T>, cap: usize) -> Vec<T> {
        let mut out = Vec::new();
        list.reset_reading();
        if list.is_empty() {
            return out;
        }
        while out.len() < cap {
            match list.read_next() {
                Some((value, has_more)) => {
                    out.push(value.clone());
                    if !has_more {
                        break;
                    }
                }
                None => break,
            }
        }
        out
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_front(), Some(1));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn len_tracks_inserts_minus_deletes() {
        let mut list = List::new();
        for i in 0..10 {
            list.push_back(i);
        }
        assert_eq!(list.len(), 10);
        assert_eq!(list.delete_first(&3), Some(3));
        assert_eq!(list.delete_first(&3), None);
        assert_eq!(list.delete_first(&99), None);
        assert_eq!(list.len(), 9);
    }

    #[test]
    fn read_in_insertion_order() {
        let mut list = List::new();
        for i in 0..5 {
            list.push_back(i);
        }
        assert_eq!(read_all(&mut list, 100), vec![0, 1, 2, 3, 4]);
        // A second pass needs a reset and produces the same values.
        assert_eq!(read_all(&mut list, 100), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn read_clamps_at_last_node() {
        let mut list = List::from_iter([7, 8]);
        assert_eq!(list.read_next(), Some((&7, true)));
        assert_eq!(list.read_next(), Some((&8, false)));
        assert_eq!(list.read_next(), Some((&8, false)));
        list.reset_reading();
        assert_eq!(list.read_next(), Some((&7, true)));
    }

    #[test]
    fn read_empty_list() {
        let mut list = List::<i32>::new();
        assert_eq!(list.read_next(), None);
        list.reset_reading();
        assert_eq!(list.read_next(), None);
    }

    #[test]
    fn read_continues_after_clamp_and_push() {
        let mut list = List::from_iter([1]);
        assert_eq!(list.read_next(), Some((&1, false)));
        list.push_back(2);
        assert_eq!(list.read_next(), Some((&1, true)));
        assert_eq!(list.read_next(), Some((&2, false)));
    }

    #[test]
    fn delete_head_middle_tail() {
        // The scenario from the original demo: insert 0..9, delete 0, 3, 7
        // and 9, then read back the remainder.
        let mut list = List::new();
        for i in 0..10 {
            list.push_back(i);
        }
        for target in [0, 3, 7, 9].iter() {
            assert_eq!(list.delete_first(target), Some(*target));
        }
        assert_eq!(list.len(), 6);
        assert_eq!(read_all(&mut list, 100), vec![1, 2, 4, 5, 6, 8]);

        // Tail retreated to 8, so appending keeps the order.
        list.push_back(9);
        assert_eq!(read_all(&mut list, 100), vec![1, 2, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn delete_missing_value_changes_nothing() {
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.delete_first(&4), None);
        assert_eq!(list.len(), 3);
        assert_eq!(read_all(&mut list, 100), vec![1, 2, 3]);
    }

    #[test]
    fn delete_sole_node_clears_tail() {
        let mut list = List::from_iter([5]);
        assert_eq!(list.delete_first(&5), Some(5));
        assert!(list.is_empty());
        // Tail must not dangle: appending again works from scratch.
        list.push_back(6);
        list.push_back(7);
        assert_eq!(read_all(&mut list, 100), vec![6, 7]);
    }

    #[test]
    fn delete_repositions_cursor() {
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.read_next(), Some((&1, true)));
        // Cursor sits on 2; deleting 2 moves it to 3.
        assert_eq!(list.delete_first(&2), Some(2));
        assert_eq!(list.read_next(), Some((&3, false)));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut list = List::new();
        assert!(!list.contains(&1));
        list.push_back(1);
        list.push_back(2);
        assert!(list.contains(&1));
        assert!(list.contains(&2));
        list.delete_first(&1);
        assert!(!list.contains(&1));
        assert!(list.contains(&2));
    }

    #[test]
    fn predicate_variants() {
        let mut list = List::from_iter(["red", "green", "blue"]);
        assert!(list.contains_by(|c| c.starts_with("gr")));
        assert!(!list.contains_by(|c| c.starts_with("ye")));
        assert_eq!(list.delete_first_by(|c| c.len() == 4), Some("blue"));
        assert!(list.force_link_by(|c| *c == "green", |c| *c == "red"));
        assert!(list.is_looping_floyds_cycle_find());
    }

    #[test]
    fn force_link_missing_values_is_a_noop() {
        let mut list = List::from_iter([1, 2, 3]);
        assert!(!list.force_link(&1, &9));
        assert!(!list.force_link(&9, &1));
        assert!(!list.is_looping_floyds_cycle_find());
        assert_eq!(read_all(&mut list, 100), vec![1, 2, 3]);
    }

    #[test]
    fn bounded_search_on_cyclic_chain() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        assert!(list.force_link(&4, &2));
        // The chain no longer terminates, and 9 is nowhere on it. Both the
        // membership test and the delete must give up instead of spinning.
        assert!(!list.contains(&9));
        assert_eq!(list.delete_first(&9), None);
        assert_eq!(list.len(), 4);
        // Values on the cycle are still found.
        assert!(list.contains(&3));
    }

    #[test]
    fn delete_on_cyclic_chain() {
        let mut list = List::from_iter([1, 2, 3]);
        assert!(list.force_link(&3, &2));
        // 2 is reachable; deleting it splices 3's forced target away and
        // leaves a chain ending in a stale link, which reads as an end.
        assert_eq!(list.delete_first(&2), Some(2));
        assert_eq!(list.len(), 2);
        assert!(!list.contains(&2));
    }

    #[test]
    fn forced_cycle_read_sequence() {
        // The demo scenario: [1, 2, 4, 5, 6, 8, 11, 12, 13], then 12 links
        // back to 4 and 13 is orphaned.
        let mut list = List::from_iter([1, 2, 4, 5, 6, 8, 11, 12, 13]);
        assert!(list.force_link(&12, &4));
        let read = read_all(&mut list, 12);
        assert_eq!(&read[..8], &[1, 2, 4, 5, 6, 8, 11, 12]);
        // The walk wraps into the cycle instead of reaching 13.
        assert_eq!(&read[8..], &[4, 5, 6, 8]);
    }

    #[test]
    fn list_drop_releases_every_node_once() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        impl<'a, T: Copy + PartialEq> PartialEq for DropChecker<'a, T> {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        for i in 1..=5 {
            list.push_back(DropChecker::new(i, &dropped));
        }
        // Deleting releases immediately.
        let three = DropChecker::new(3, &dropped);
        drop(list.delete_first(&three));
        drop(three);
        assert_eq!(dropped.borrow().as_slice(), &[3, 3]);

        // Force a cycle, orphaning node 5, then drop the list: every node
        // is released exactly once, the orphan included.
        let four = DropChecker::new(4, &dropped);
        let one = DropChecker::new(1, &dropped);
        assert!(list.force_link(&four, &one));
        drop(four);
        drop(one);
        dropped.borrow_mut().clear();
        drop(list);
        let mut released = dropped.borrow().clone();
        released.sort_unstable();
        assert_eq!(released, vec![1, 2, 4, 5]);
    }

    #[test]
    fn clear_is_safe_on_cyclic_chain() {
        let mut list = List::from_iter([1, 2, 3]);
        assert!(list.force_link(&3, &1));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.read_next(), None);
        list.push_back(9);
        assert_eq!(read_all(&mut list, 100), vec![9]);
    }

    #[test]
    fn debug_format_is_bounded() {
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
        assert!(list.force_link(&3, &1));
        // Bounded by len, so formatting a cyclic list terminates.
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    }
}
