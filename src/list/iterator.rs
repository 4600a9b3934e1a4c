use crate::list::arena::NodeRef;
use crate::list::List;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the values of a `List`.
///
/// The iterator carries a transition budget equal to the list's [`len`], so
/// it yields at most that many values. On a well-formed list the budget is
/// exactly the number of nodes; on a chain forced into a cycle it is what
/// makes the iterator terminate.
///
/// # Examples
///
/// ```compile_fail
/// use looplist::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
///
/// [`len`]: List::len
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    current: Option<NodeRef>,
    remaining: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            list,
            current: list.head_node(),
            remaining: list.len(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.list).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current?;
        let node = self.list.node(current)?;
        self.remaining -= 1;
        self.current = self.list.successor(current);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the values of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("list", &self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.list.len()))
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    #[test]
    fn iter_in_order() {
        let list = List::from_iter(0..5);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![0, 1, 2, 3, 4]);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next(), Some(&1));
        for _ in 2..5 {
            assert!(iter.next().is_some());
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None); // fused
    }

    #[test]
    fn iter_terminates_on_cyclic_chain() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        assert!(list.force_link(&4, &2));
        // The budget caps the walk at len() values.
        let seen = Vec::from_iter(list.iter().copied());
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn into_iter_drains() {
        let list = List::from_iter(0..5);
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn into_iter_terminates_on_cyclic_chain() {
        let mut list = List::from_iter([1, 2, 3]);
        assert!(list.force_link(&3, &1));
        // Draining frees each node once; the revisited head reads as freed,
        // which ends the chain.
        let drained = Vec::from_iter(list);
        assert_eq!(drained, vec![1, 2, 3]);
    }

    #[test]
    fn extend_appends() {
        let mut list = List::from_iter(0..3);
        list.extend(3..5);
        list.extend([5, 6].iter());
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4, 5, 6]);
    }
}
