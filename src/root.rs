use std::ptr::NonNull;

use log::trace;

use super::{Color, Node, NodePtr, NodePtrExt, Root};

impl<T> Default for Root<T> {
    fn default() -> Self {
        Root::new()
    }
}

// Public
impl<T> Root<T> {
    pub fn new() -> Self {
        Root { root: None }
    }

    #[inline(always)]
    pub fn root(&self) -> NodePtr<T> {
        self.root
    }

    #[inline(always)]
    pub fn set_root(&mut self, root: NodePtr<T>) {
        self.root = root;
    }

    /// Detaches the whole tree, leaving the root empty.
    pub fn take(&mut self) -> NodePtr<T> {
        self.root.take()
    }

    pub fn first(&self) -> NodePtr<T> {
        let n = self.root?;
        Some(unsafe { n.as_ref() }.leftmost())
    }

    pub fn last(&self) -> NodePtr<T> {
        let n = self.root?;
        Some(unsafe { n.as_ref() }.rightmost())
    }

    /// Restores the red-black properties after `node` was linked in as a
    /// red leaf, then re-reads the root from the top of `node`'s ancestry.
    pub fn insert_fixup(&mut self, node: NonNull<Node<T>>) {
        let inserted: NodePtr<T> = Some(node);
        let mut node = inserted;

        loop {
            /*
             * Loop invariant: node is red.
             */
            let mut parent = node.parent();
            if parent.is_none() {
                /*
                 * The inserted node is root. Either this is the
                 * first node, or we climbed here from the recolor
                 * case and only a red root is left to repair.
                 */
                trace!("fixup: painting root black");
                node.set_color(Color::Black);
                break;
            }

            /*
             * If there is a black parent, we are done.
             */
            if parent.is_black() {
                break;
            }

            let gparent = parent.parent();
            if gparent.is_none() {
                // A red parent is never the root once an insertion has
                // completed, so this cannot be reached.
                debug_assert!(false, "red parent without a grandparent");
                break;
            }

            let parent_is_left = gparent.left() == parent;
            let uncle = if parent_is_left {
                gparent.right()
            } else {
                gparent.left()
            };

            if uncle.is_red() {
                /*
                 * Recolor and climb - node's uncle is red.
                 *
                 *       G            g
                 *      / \          / \
                 *     p   u  -->   P   U
                 *    /            /
                 *   n            n
                 *
                 * g's parent might be red, so continue at g.
                 */
                trace!("fixup: recolor and climb");
                parent.set_color(Color::Black);
                uncle.set_color(Color::Black);
                gparent.set_color(Color::Red);
                node = gparent;
                continue;
            }

            /*
             * Rotate - node's uncle is black or absent.
             *
             * An inner child is first turned into an outer one by
             * rotating at the parent:
             *
             *      G             G
             *     / \           / \
             *    p   U  -->    n   U
             *     \           /
             *      n         p
             *
             * then the grandparent rotates away from the red pair:
             *
             *        G           P
             *       / \         / \
             *      p   U  -->  n   g
             *     /                 \
             *    n                   U
             */
            if parent_is_left && parent.right() == node {
                trace!("fixup: inner left-right child, rotating parent left");
                self.rotate_left(parent);
                parent = node;
            } else if !parent_is_left && parent.left() == node {
                trace!("fixup: inner right-left child, rotating parent right");
                self.rotate_right(parent);
                parent = node;
            }

            if parent_is_left {
                trace!("fixup: rotating grandparent right");
                self.rotate_right(gparent);
            } else {
                trace!("fixup: rotating grandparent left");
                self.rotate_left(gparent);
            }
            parent.set_color(Color::Black);
            gparent.set_color(Color::Red);
            break;
        }

        let top = Self::topmost(inserted);
        debug_assert_eq!(self.root, top, "rotations lost track of the root");
        self.root = top;
    }
}

// Private
impl<T> Root<T> {
    fn topmost(mut node: NodePtr<T>) -> NodePtr<T> {
        while let Some(parent) = node.parent() {
            node = Some(parent);
        }
        node
    }

    fn change_child(&mut self, old: NodePtr<T>, new: NodePtr<T>, parent: NodePtr<T>) {
        if parent.is_some() {
            if parent.left() == old {
                parent.set_left(new);
            } else {
                parent.set_right(new);
            }
        } else {
            self.root = new;
        }
    }

    /// Left rotation at `x`:
    ///
    /// ```text
    ///       x              y
    ///      / \            / \
    ///     a   y    -->   x   c
    ///        / \        / \
    ///       b   c      a   b
    /// ```
    fn rotate_left(&mut self, x: NodePtr<T>) {
        let y = x.right();
        debug_assert!(y.is_some(), "left rotation without a right child");
        if y.is_none() {
            return;
        }
        let parent = x.parent();
        let inner = y.left();

        x.set_right(inner);
        inner.set_parent(x);
        y.set_left(x);
        x.set_parent(y);
        y.set_parent(parent);
        self.change_child(x, y, parent);
    }

    /// Mirror image of [`Self::rotate_left`].
    fn rotate_right(&mut self, x: NodePtr<T>) {
        let y = x.left();
        debug_assert!(y.is_some(), "right rotation without a left child");
        if y.is_none() {
            return;
        }
        let parent = x.parent();
        let inner = y.right();

        x.set_left(inner);
        inner.set_parent(x);
        y.set_right(x);
        x.set_parent(y);
        y.set_parent(parent);
        self.change_child(x, y, parent);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alloc;

    use pretty_assertions::assert_eq;

    fn leaf(payload: u32) -> NonNull<Node<u32>> {
        NonNull::from(Box::leak(Box::new(Node::new(payload))))
    }

    fn payload(node: NodePtr<u32>) -> Option<u32> {
        node.map(|n| unsafe { n.as_ref() }.payload)
    }

    fn free(root: &mut Root<u32>) {
        let mut pending: Vec<_> = root.take().into_iter().collect();
        while let Some(node) = pending.pop() {
            let node = unsafe { alloc::own_back(node) };
            pending.extend(node.left);
            pending.extend(node.right);
        }
    }

    #[test]
    fn rotations_preserve_order_and_track_root() {
        //   1                3
        //    \              / \
        //     3     -->    1   4
        //    / \            \
        //   2   4            2
        let mut root = Root::new();
        let (n1, n2, n3, n4) = (leaf(1), leaf(2), leaf(3), leaf(4));
        root.set_root(Some(n1));
        Some(n1).set_right(Some(n3));
        Some(n3).set_parent(Some(n1));
        Some(n3).set_left(Some(n2));
        Some(n2).set_parent(Some(n3));
        Some(n3).set_right(Some(n4));
        Some(n4).set_parent(Some(n3));

        root.rotate_left(Some(n1));
        assert_eq!(Some(3), payload(root.root()));
        assert_eq!(None, Some(n3).parent());
        assert_eq!(Some(1), payload(Some(n3).left()));
        assert_eq!(Some(4), payload(Some(n3).right()));
        assert_eq!(Some(2), payload(Some(n1).right()));
        assert_eq!(Some(1), payload(Some(n2).parent()));
        assert_eq!(Some(1), payload(root.first()));
        assert_eq!(Some(4), payload(root.last()));

        root.rotate_right(Some(n3));
        assert_eq!(Some(1), payload(root.root()));
        assert_eq!(Some(3), payload(Some(n1).right()));
        assert_eq!(Some(2), payload(Some(n3).left()));
        assert_eq!(Some(3), payload(Some(n2).parent()));
        assert_eq!(None, Some(n1).left());

        free(&mut root);
    }

    #[test]
    fn fixup_on_lone_node_paints_it_black() {
        let mut root = Root::new();
        let n = leaf(10);
        root.set_root(Some(n));
        root.insert_fixup(n);
        assert!(Some(n).is_black());
        assert_eq!(Some(10), payload(root.root()));
        free(&mut root);
    }

    #[test]
    fn fixup_straightens_zig_zag() {
        // 30 <- 10 -> 20: the inner child ends up on top.
        let mut root = Root::new();
        let (n30, n10, n20) = (leaf(30), leaf(10), leaf(20));
        root.set_root(Some(n30));
        root.insert_fixup(n30);

        Some(n30).set_left(Some(n10));
        Some(n10).set_parent(Some(n30));
        root.insert_fixup(n10);

        Some(n10).set_right(Some(n20));
        Some(n20).set_parent(Some(n10));
        root.insert_fixup(n20);

        assert_eq!(Some(20), payload(root.root()));
        assert!(root.root().is_black());
        assert_eq!(Some(10), payload(root.root().left()));
        assert_eq!(Some(30), payload(root.root().right()));
        assert!(root.root().left().is_red());
        assert!(root.root().right().is_red());
        free(&mut root);
    }
}
