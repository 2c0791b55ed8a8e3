use std::{cmp::Ordering::*, fmt, marker::PhantomData};

use log::{debug, trace, warn};

use crate::{
    Comparator, Destructor, DropPayload, InsertError, Iter, Natural, NodePtr, NodePtrExt, RBTree,
    Root, Visitor, alloc,
};

// SAFETY: the tree exclusively owns its nodes; no node is ever shared
// between trees, so the tree is as thread-safe as its parts.
unsafe impl<T: Send, C: Comparator<T> + Send, D: Destructor<T> + Send> Send for RBTree<T, C, D> {}
unsafe impl<T: Sync, C: Comparator<T> + Sync, D: Destructor<T> + Sync> Sync for RBTree<T, C, D> {}

impl<T: Ord> RBTree<T, Natural, DropPayload> {
    pub fn new() -> Self {
        Self::with_callbacks(Natural, DropPayload)
    }
}

impl<T: Ord> Default for RBTree<T, Natural, DropPayload> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>, D: Destructor<T>> Drop for RBTree<T, C, D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, C: Comparator<T>, D: Destructor<T>> RBTree<T, C, D> {
    /// An empty tree ordering payloads with `comparator` and releasing them
    /// through `destructor` at teardown.
    pub fn with_callbacks(comparator: C, destructor: D) -> Self {
        RBTree {
            root: Root::new(),
            len: 0,
            comparator,
            destructor,
            _marker: PhantomData,
        }
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.find(candidate).is_some()
    }

    pub fn first(&self) -> Option<&T> {
        self.root
            .first()
            .map(|node| &unsafe { node.as_ref() }.payload)
    }

    pub fn last(&self) -> Option<&T> {
        self.root
            .last()
            .map(|node| &unsafe { node.as_ref() }.payload)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts `payload`, returning `false` if it was rejected.
    ///
    /// A rejected payload (a duplicate, or one that could not get a node) is
    /// dropped; use [`Self::try_insert`] to get it back.
    pub fn insert(&mut self, payload: T) -> bool {
        self.try_insert(payload).is_ok()
    }

    /// Inserts `payload`, or hands it back untouched alongside the reason.
    ///
    /// Duplicates are decided by the comparator alone. On failure the tree
    /// is left exactly as it was.
    pub fn try_insert(&mut self, payload: T) -> Result<(), InsertError<T>> {
        let mut parent: NodePtr<T> = None;
        let mut go_left = false;
        let mut link = self.root.root();
        while let Some(candidate) = link {
            let candidate_ref = unsafe { candidate.as_ref() };
            parent = link;
            match self.comparator.compare(&payload, &candidate_ref.payload) {
                Equal => {
                    debug!("rejecting duplicate payload");
                    return Err(InsertError::duplicate(payload));
                }
                Less => {
                    go_left = true;
                    link = candidate_ref.left;
                }
                Greater => {
                    go_left = false;
                    link = candidate_ref.right;
                }
            }
        }

        let node = match alloc::try_alloc_node(payload) {
            Ok(node) => node,
            Err(payload) => {
                warn!("node allocation failed with {} payloads stored", self.len);
                return Err(InsertError::allocation(payload));
            }
        };

        let new: NodePtr<T> = Some(node);
        new.set_parent(parent);
        match parent {
            None => self.root.set_root(new),
            Some(_) if go_left => parent.set_left(new),
            Some(_) => parent.set_right(new),
        }
        self.root.insert_fixup(node);
        self.len += 1;
        trace!("inserted payload, {} stored", self.len);
        Ok(())
    }

    /// Presents every payload to `visitor` once, in ascending order.
    ///
    /// Returns `false` for an empty tree, without calling the visitor.
    /// A visitor reporting failure does not stop the traversal: exactly
    /// [`Self::len`] payloads are visited.
    pub fn for_each<V>(&self, visitor: &mut V) -> bool
    where
        V: Visitor<T> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        let failures = self.iter().filter(|payload| !visitor.visit(payload)).count();
        if failures > 0 {
            debug!("visitor reported {failures} failures over {} payloads", self.len);
        }
        true
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.first(), self.root.last(), self.len)
    }

    /// Tears the tree down, handing every payload to the destructor.
    ///
    /// Returns how many payloads were released.
    pub fn destroy(mut self) -> usize {
        self.teardown()
    }

    pub(crate) fn root(&self) -> NodePtr<T> {
        self.root.root()
    }

    fn find(&self, candidate: &T) -> NodePtr<T> {
        let mut node = self.root.root();
        while let Some(current) = node {
            let current = unsafe { current.as_ref() };
            match self.comparator.compare(candidate, &current.payload) {
                Equal => break,
                Greater => node = current.right,
                Less => node = current.left,
            }
        }
        node
    }

    /// Post-order release of every node, children before parents.
    fn teardown(&mut self) -> usize {
        // Both are cleared up front: a destructor that panics leaves the
        // tree empty, and the remaining nodes leak.
        let stored = std::mem::take(&mut self.len);
        let mut released = 0;
        let mut current = self.root.take();
        while let Some(node) = current {
            let node_ref = unsafe { node.as_ref() };
            if node_ref.left.is_some() {
                current = node_ref.left;
                continue;
            }
            if node_ref.right.is_some() {
                current = node_ref.right;
                continue;
            }
            let parent = node_ref.parent();
            if parent.left() == current {
                parent.set_left(None);
            } else {
                parent.set_right(None);
            }
            // SAFETY: node is a leaf, now unreachable from the tree.
            let node = unsafe { alloc::own_back(node) };
            self.destructor.destroy(node.payload);
            released += 1;
            current = parent;
        }
        debug_assert_eq!(stored, released, "teardown missed nodes");
        if released > 0 {
            debug!("released {released} payloads");
        }
        released
    }
}

impl<'a, T, C: Comparator<T>, D: Destructor<T>> IntoIterator for &'a RBTree<T, C, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>, D: Destructor<T>> fmt::Debug for RBTree<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
