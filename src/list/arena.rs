use std::fmt;
use std::mem;

/// A stable handle to a slot in an [`Arena`].
///
/// Handles are plain indices, so they survive arena growth and never dangle
/// in the pointer sense: looking up a handle whose slot has been freed is a
/// lookup miss, not undefined behaviour. The index also serves as the node
/// identity token hashed by the open-hash cycle detector.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef(usize);

impl NodeRef {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.0)
    }
}

/// Slab-style owner of all list nodes.
///
/// Freed slots are threaded onto an internal free list and reused by later
/// allocations. Dropping the arena drops every live slot regardless of how
/// the nodes are linked, so even a deliberately cyclic list tears down
/// without walking its chain.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    first_free: Option<usize>,
}

#[derive(Debug)]
enum Slot<T> {
    Used(T),
    /// Free slot, pointing to the next free slot.
    Free(Option<usize>),
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            first_free: None,
        }
    }

    /// Store `value` in a free slot (reusing one if available) and return
    /// its handle.
    pub(crate) fn allocate(&mut self, value: T) -> NodeRef {
        match self.first_free {
            Some(index) => {
                self.first_free = match self.slots[index] {
                    Slot::Free(next_free) => next_free,
                    Slot::Used(_) => unreachable!("free list points at a used slot"),
                };
                self.slots[index] = Slot::Used(value);
                NodeRef(index)
            }
            None => {
                self.slots.push(Slot::Used(value));
                NodeRef(self.slots.len() - 1)
            }
        }
    }

    /// Free the slot behind `handle` and return its value, or `None` if the
    /// slot is already free. Freeing twice is a no-op, which is what makes
    /// chain teardown double-release-proof.
    pub(crate) fn free(&mut self, handle: NodeRef) -> Option<T> {
        let slot = self.slots.get_mut(handle.0)?;
        if let Slot::Free(_) = slot {
            return None;
        }
        match mem::replace(slot, Slot::Free(self.first_free)) {
            Slot::Used(value) => {
                self.first_free = Some(handle.0);
                Some(value)
            }
            Slot::Free(_) => unreachable!(),
        }
    }

    pub(crate) fn get(&self, handle: NodeRef) -> Option<&T> {
        match self.slots.get(handle.0)? {
            Slot::Used(value) => Some(value),
            Slot::Free(_) => None,
        }
    }

    pub(crate) fn get_mut(&mut self, handle: NodeRef) -> Option<&mut T> {
        match self.slots.get_mut(handle.0)? {
            Slot::Used(value) => Some(value),
            Slot::Free(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn allocate_and_get() {
        let mut arena = Arena::new();
        let a = arena.allocate("a");
        let b = arena.allocate("b");
        assert_ne!(a, b);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        *arena.get_mut(a).unwrap() = "c";
        assert_eq!(arena.get(a), Some(&"c"));
    }

    #[test]
    fn free_is_idempotent() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        assert_eq!(arena.free(a), Some(1));
        assert_eq!(arena.free(a), None);
        assert_eq!(arena.get(a), None);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        let _b = arena.allocate(2);
        arena.free(a);
        let c = arena.allocate(3);
        // The newest allocation lands in the slot `a` vacated.
        assert_eq!(c, a);
        assert_eq!(arena.get(c), Some(&3));
    }

    #[test]
    fn stale_handle_is_a_miss_after_reuse() {
        let mut arena = Arena::new();
        let a = arena.allocate(1);
        arena.free(a);
        let b = arena.allocate(2);
        // `a` and `b` alias the same slot; the old handle now sees the new
        // occupant. Callers treat handles as opaque and short-lived.
        assert_eq!(a, b);
        assert_eq!(arena.get(a), Some(&2));
    }
}
