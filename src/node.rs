use std::{
    fmt::Debug,
    ptr::{self, NonNull},
};

use super::{Color, Node, NodePtr, NodePtrExt};

impl<T> Node<T> {
    /// A detached red node.
    pub(crate) fn new(payload: T) -> Self {
        Node {
            parent_color: ptr::null_mut(),
            right: None,
            left: None,
            payload,
        }
    }

    #[inline(always)]
    pub(crate) fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    pub(crate) fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    pub(crate) fn color(&self) -> Color {
        Color::from(self.parent_color.addr())
    }

    #[inline(always)]
    pub(crate) fn parent(&self) -> NodePtr<T> {
        NonNull::new(self.parent_color.map_addr(|p| p & !1))
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, parent: NodePtr<T>) {
        self.set_parent_and_color(parent, self.color());
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.set_parent_and_color(self.parent(), color);
    }

    #[inline(always)]
    pub(crate) fn set_parent_and_color(&mut self, parent: NodePtr<T>, color: Color) {
        let parent = parent.map_or(ptr::null_mut(), NonNull::as_ptr);
        self.parent_color = parent.map_addr(|p| p | usize::from(color));
    }

    /// Leftmost node of the subtree rooted here.
    #[inline(always)]
    pub(crate) fn leftmost(&self) -> NonNull<Node<T>> {
        let mut current = NonNull::from(self);
        // SAFETY: every link reachable from a live node is a live node.
        while let Some(left) = unsafe { current.as_ref() }.left {
            current = left;
        }
        current
    }

    /// Rightmost node of the subtree rooted here.
    #[inline(always)]
    pub(crate) fn rightmost(&self) -> NonNull<Node<T>> {
        let mut current = NonNull::from(self);
        // SAFETY: every link reachable from a live node is a live node.
        while let Some(right) = unsafe { current.as_ref() }.right {
            current = right;
        }
        current
    }

    /// In-order successor, or `None` when this is the last node.
    #[inline(always)]
    pub(crate) fn next(&self) -> NodePtr<T> {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.right {
            // SAFETY: by if guard, right is a live child.
            return Some(unsafe { right.as_ref() }.leftmost());
        }
        // No right-hand children. Everything down and left is smaller than us,
        // so any 'next' node must be in the general direction of our parent.
        // Climb while we are a right-hand child; the first ancestor reached
        // from its left-hand side is the successor.
        let mut node = NonNull::from(self);
        let mut parent = self.parent();
        while let Some(up) = parent {
            if Some(up).right() != Some(node) {
                break;
            }
            node = up;
            parent = Some(up).parent();
        }
        parent
    }

    /// In-order predecessor, or `None` when this is the first node.
    #[inline(always)]
    pub(crate) fn prev(&self) -> NodePtr<T> {
        if let Some(left) = self.left {
            // SAFETY: by if guard, left is a live child.
            return Some(unsafe { left.as_ref() }.rightmost());
        }
        let mut node = NonNull::from(self);
        let mut parent = self.parent();
        while let Some(up) = parent {
            if Some(up).left() != Some(node) {
                break;
            }
            node = up;
            parent = Some(up).parent();
        }
        parent
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color(), self.payload))
    }
}
