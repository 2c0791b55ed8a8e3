use std::{iter::FusedIterator, marker::PhantomData};

use crate::{Comparator, Destructor, Node, NodePtr, RBTree};

/// An iterator over shared references to payloads, in ascending order.
///
/// Walks successor links from the leftmost node and yields exactly as many
/// payloads as the tree held when the iterator was created.
pub struct Iter<'a, T> {
    front: NodePtr<T>,
    back: NodePtr<T>,
    remaining: usize,
    phantom: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(front: NodePtr<T>, back: NodePtr<T>, len: usize) -> Self {
        Iter {
            front,
            back,
            remaining: len,
            phantom: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: the borrow on the tree keeps every node alive.
        let current = unsafe { self.front?.as_ref() };
        self.front = current.next();
        self.remaining -= 1;
        Some(&current.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: the borrow on the tree keeps every node alive.
        let current = unsafe { self.back?.as_ref() };
        self.back = current.prev();
        self.remaining -= 1;
        Some(&current.payload)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> RBTree<T> {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>, D: Destructor<T>> Extend<T> for RBTree<T, C, D> {
    /// Inserts every item; duplicates of stored payloads are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for payload in iter {
            self.insert(payload);
        }
    }
}
