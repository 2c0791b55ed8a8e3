//! A red-black tree ordered set.
//!
//! Payloads are ordered by a [`Comparator`] fixed at construction and
//! released through a [`Destructor`] when the tree is torn down. Nodes own
//! their children through raw links; the parent link is a non-owning back
//! pointer that shares its word with the node color.
mod aggregate;
mod alloc;
mod callbacks;
mod error;
mod iter;
mod node;
mod root;
mod tree;
mod validate;
mod vector;

use std::{marker::PhantomData, ptr::NonNull};

pub use aggregate::{Concatenate, MaxNorm, max_norm_vector};
pub use callbacks::{Comparator, Destructor, DropPayload, Natural, Visitor};
pub use error::{InsertError, RBTreeError, RBTreeResult};
pub use iter::Iter;
pub use vector::{ComponentOrder, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl From<Color> for usize {
    fn from(color: Color) -> usize {
        color as usize
    }
}

impl From<usize> for Color {
    fn from(color: usize) -> Color {
        match color & 1 {
            0 => Color::Red,
            _ => Color::Black,
        }
    }
}

pub(crate) type NodePtr<T> = Option<NonNull<Node<T>>>;

/// Link manipulation on possibly-absent nodes. An absent node reads as
/// black with no parent or children, and writes to it are ignored.
pub(crate) trait NodePtrExt: Copy {
    type Payload;

    fn is_black(self) -> bool;
    fn is_red(self) -> bool;
    fn left(self) -> NodePtr<Self::Payload>;
    fn parent(self) -> NodePtr<Self::Payload>;
    fn right(self) -> NodePtr<Self::Payload>;
    fn set_color(self, color: Color);
    fn set_left(self, left: NodePtr<Self::Payload>);
    fn set_parent(self, parent: NodePtr<Self::Payload>);
    fn set_right(self, right: NodePtr<Self::Payload>);
}

impl<T> NodePtrExt for NodePtr<T> {
    type Payload = T;

    #[inline(always)]
    fn is_black(self) -> bool {
        self.is_none_or(|v| unsafe { v.as_ref() }.is_black())
    }

    #[inline(always)]
    fn is_red(self) -> bool {
        self.is_some_and(|v| unsafe { v.as_ref() }.is_red())
    }

    #[inline(always)]
    fn left(self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn parent(self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.parent())
    }

    #[inline(always)]
    fn right(self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn set_color(self, color: Color) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.set_color(color);
        }
    }

    #[inline(always)]
    fn set_left(self, left: NodePtr<T>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.left = left;
        }
    }

    #[inline(always)]
    fn set_parent(self, parent: NodePtr<T>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.set_parent(parent);
        }
    }

    #[inline(always)]
    fn set_right(self, right: NodePtr<T>) {
        if let Some(mut node) = self {
            unsafe { node.as_mut() }.right = right;
        }
    }
}

pub(crate) struct Node<T> {
    // The parent pointer with color information in the lowest bit
    pub(crate) parent_color: *mut Node<T>,
    // Child pointers
    pub(crate) right: NodePtr<T>,
    pub(crate) left: NodePtr<T>,
    pub(crate) payload: T,
}

/// The topmost link of a tree; rotations that displace the root go through it.
pub(crate) struct Root<T> {
    root: NodePtr<T>,
}

/// An ordered set of unique payloads backed by a red-black tree.
///
/// `C` decides ordering and uniqueness, `D` receives every stored payload
/// exactly once when the tree is torn down, either by [`RBTree::destroy`]
/// or by going out of scope.
pub struct RBTree<T, C = Natural, D = DropPayload>
where
    C: Comparator<T>,
    D: Destructor<T>,
{
    root: Root<T>,
    len: usize,
    comparator: C,
    destructor: D,
    _marker: PhantomData<Box<Node<T>>>,
}

#[cfg(test)]
pub(crate) fn test_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
