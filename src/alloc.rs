use std::{
    alloc::{Layout, alloc},
    ptr::NonNull,
};

use crate::Node;

/// Allocates a detached red node holding `payload`.
///
/// Allocation failure hands the payload back instead of aborting.
pub(crate) fn try_alloc_node<T>(payload: T) -> Result<NonNull<Node<T>>, T> {
    #[cfg(test)]
    if FAIL_NEXT.with(|fail| fail.replace(false)) {
        return Err(payload);
    }
    // Node always holds pointers, so the layout is never zero-sized.
    let layout = Layout::new::<Node<T>>();
    // SAFETY: layout has non-zero size.
    let ptr = unsafe { alloc(layout) }.cast::<Node<T>>();
    match NonNull::new(ptr) {
        Some(node) => {
            // SAFETY: freshly allocated, properly aligned for Node<T>.
            unsafe { node.as_ptr().write(Node::new(payload)) };
            Ok(node)
        }
        None => Err(payload),
    }
}

/// # Safety
///
/// `node` must come from [`try_alloc_node`] and be unreachable from any tree.
pub(crate) unsafe fn own_back<T>(node: NonNull<Node<T>>) -> Box<Node<T>> {
    // SAFETY: allocated by the global allocator with Node<T>'s layout.
    unsafe { Box::from_raw(node.as_ptr()) }
}

#[cfg(test)]
thread_local! {
    static FAIL_NEXT: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Makes the next allocation on this thread report out-of-memory.
#[cfg(test)]
pub(crate) fn fail_next_alloc() {
    FAIL_NEXT.with(|fail| fail.set(true));
}
