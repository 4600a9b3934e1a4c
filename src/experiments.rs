//! A safe-code rendition of the forced-cycle list, using `Rc` for shared
//! links and `GhostCell` for aliased mutability. Forcing a cycle here is
//! just cloning an `Rc`, and teardown severs links through a node registry
//! instead of walking a chain that may not end.

use ghost_cell::{GhostCell, GhostToken};
use std::rc::Rc;

type NodePtr<'id, T> = Rc<GhostCell<'id, Node<'id, T>>>;

struct Node<'id, T> {
    value: T,
    next: Option<NodePtr<'id, T>>,
}

pub struct List<'id, T> {
    head: Option<NodePtr<'id, T>>,
    tail: Option<NodePtr<'id, T>>,
    /// Every node ever allocated, in insertion order. Lets `clear` break
    /// cycles (and their `Rc` leaks) without walking the chain.
    nodes: Vec<NodePtr<'id, T>>,
}

impl<'id, T> Default for List<'id, T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            nodes: Vec::new(),
        }
    }
}

impl<'id, T> List<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_back(&mut self, value: T, token: &mut GhostToken<'id>) {
        let node = Rc::new(GhostCell::new(Node { value, next: None }));
        match &self.tail {
            Some(tail) => tail.borrow_mut(token).next = Some(node.clone()),
            None => self.head = Some(node.clone()),
        }
        self.tail = Some(node.clone());
        self.nodes.push(node);
    }

    /// Links the node at registry position `from` to the one at `to`,
    /// by insertion order. No-op if either position does not exist.
    pub fn force_link(&mut self, from: usize, to: usize, token: &mut GhostToken<'id>) {
        let (from, to) = match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(from), Some(to)) => (from, to.clone()),
            _ => return,
        };
        from.borrow_mut(token).next = Some(to);
    }

    /// Floyd's race over `Rc` identities.
    pub fn is_looping(&self, token: &GhostToken<'id>) -> bool {
        let mut slow = self.head.clone();
        let mut fast = self.head.clone();
        loop {
            let fast_node = match fast {
                Some(node) => node,
                None => return false,
            };
            let hop = match fast_node.borrow(token).next.clone() {
                Some(hop) => hop,
                None => return false,
            };
            let slow_node = match slow {
                Some(node) => node,
                None => return false,
            };
            slow = slow_node.borrow(token).next.clone();
            fast = hop.borrow(token).next.clone();
            if let (Some(s), Some(f)) = (&slow, &fast) {
                if Rc::ptr_eq(s, f) {
                    return true;
                }
            }
        }
    }

    /// Values in chain order, capped at the registry size so a forced cycle
    /// cannot make this spin.
    pub fn values(&self, token: &GhostToken<'id>) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        let mut remaining = self.nodes.len();
        let mut current = self.head.clone();
        while let Some(node) = current {
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            let node = node.borrow(token);
            out.push(node.value.clone());
            current = node.next.clone();
        }
        out
    }

    pub fn clear(&mut self, token: &mut GhostToken<'id>) {
        self.head = None;
        self.tail = None;
        for node in self.nodes.drain(..) {
            node.borrow_mut(token).next = None;
        }
    }
}
