//! Invariant checking for red-black trees.

use std::cmp::Ordering;

use crate::{Comparator, Destructor, NodePtr, RBTree, RBTreeError, RBTreeResult};

impl<T, C: Comparator<T>, D: Destructor<T>> RBTree<T, C, D> {
    /// Checks every red-black and ordering invariant.
    ///
    /// On success returns the black-height of the root: the number of black
    /// nodes on any path from the root down to an absent child, the root
    /// included. An empty tree has black-height zero.
    pub fn validate(&self) -> RBTreeResult<usize> {
        let root = self.root();
        if let Some(node) = root {
            let node = unsafe { node.as_ref() };
            if node.parent().is_some() {
                return Err(RBTreeError::invariant("root", "root has a parent"));
            }
            if node.is_red() {
                return Err(RBTreeError::invariant("root", "root is red"));
            }
        }

        let mut count = 0;
        let black_height = self.check_subtree(root, None, None, &mut count)?;
        if count != self.len() {
            return Err(RBTreeError::invariant(
                "size",
                &format!("{} nodes reachable, {} recorded", count, self.len()),
            ));
        }
        Ok(black_height)
    }

    fn check_subtree(
        &self,
        node: NodePtr<T>,
        lower: Option<&T>,
        upper: Option<&T>,
        count: &mut usize,
    ) -> RBTreeResult<usize> {
        let Some(ptr) = node else {
            return Ok(0);
        };
        let current = unsafe { ptr.as_ref() };
        *count += 1;

        if let Some(lower) = lower {
            if self.comparator().compare(&current.payload, lower) != Ordering::Greater {
                return Err(RBTreeError::invariant(
                    "order",
                    &format!("node {} is not above its left ancestor", *count),
                ));
            }
        }
        if let Some(upper) = upper {
            if self.comparator().compare(&current.payload, upper) != Ordering::Less {
                return Err(RBTreeError::invariant(
                    "order",
                    &format!("node {} is not below its right ancestor", *count),
                ));
            }
        }

        for child in [current.left, current.right].into_iter().flatten() {
            let child = unsafe { child.as_ref() };
            if child.parent() != node {
                return Err(RBTreeError::invariant(
                    "parent link",
                    &format!("a child of node {} points elsewhere", *count),
                ));
            }
            if current.is_red() && child.is_red() {
                return Err(RBTreeError::invariant(
                    "red rule",
                    &format!("red node {} has a red child", *count),
                ));
            }
        }

        let left = self.check_subtree(current.left, lower, Some(&current.payload), count)?;
        let right = self.check_subtree(current.right, Some(&current.payload), upper, count)?;
        if left != right {
            return Err(RBTreeError::invariant(
                "black height",
                &format!("left subtree has {left}, right subtree has {right}"),
            ));
        }
        Ok(left + usize::from(current.is_black()))
    }
}

#[cfg(test)]
mod test {
    use crate::{Color, NodePtrExt, RBTree};

    use pretty_assertions::assert_eq;

    #[test]
    fn empty_tree_is_valid() {
        assert_eq!(Ok(0), RBTree::<u8>::new().validate());
    }

    #[test]
    fn detects_red_root() {
        let tree: RBTree<u8> = [1].into_iter().collect();
        tree.root().set_color(Color::Red);
        let err = tree.validate().expect_err("red root accepted");
        assert!(err.to_string().contains("root is red"));
        tree.root().set_color(Color::Black);
        assert_eq!(Ok(1), tree.validate());
    }

    #[test]
    fn detects_red_red() {
        //     2
        //    / \
        //   1   3
        //        \
        //         4 (red)
        let tree: RBTree<u8> = [2, 1, 3, 4].into_iter().collect();
        let three = tree.root().right();
        assert!(three.is_black());
        three.set_color(Color::Red);
        let err = tree.validate().expect_err("red pair accepted");
        assert!(err.to_string().contains("red rule"));
        three.set_color(Color::Black);
        assert_eq!(Ok(2), tree.validate());
    }

    #[test]
    fn detects_unequal_black_height() {
        let tree: RBTree<u8> = [2, 1, 3].into_iter().collect();
        let left = tree.root().left();
        left.set_color(Color::Black);
        let err = tree.validate().expect_err("unequal black height accepted");
        assert!(err.to_string().contains("black height"));
        left.set_color(Color::Red);
        assert_eq!(Ok(1), tree.validate());
    }

    #[test]
    fn detects_broken_order() {
        let tree: RBTree<u8> = [2, 1, 3].into_iter().collect();
        let (left, right) = (tree.root().left(), tree.root().right());
        tree.root().set_left(right);
        tree.root().set_right(left);
        let err = tree.validate().expect_err("swapped children accepted");
        assert!(err.to_string().contains("order"));
        tree.root().set_left(left);
        tree.root().set_right(right);
        assert!(tree.validate().is_ok());
    }
}
