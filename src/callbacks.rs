use std::cmp::Ordering;

/// A total order over payloads, fixed for the lifetime of a tree.
///
/// `Ordering::Equal` means "same key": inserting a payload equal to a stored
/// one is rejected as a duplicate.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders payloads by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Receives every stored payload exactly once, when the tree is torn down.
///
/// The tree does not observe the outcome; a destructor that can fail must
/// deal with the failure itself. Panicking leaks the nodes not yet released.
pub trait Destructor<T> {
    fn destroy(&mut self, payload: T);
}

impl<T, F> Destructor<T> for F
where
    F: FnMut(T),
{
    #[inline(always)]
    fn destroy(&mut self, payload: T) {
        self(payload)
    }
}

/// Releases payloads through their own `Drop`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropPayload;

impl<T> Destructor<T> for DropPayload {
    #[inline(always)]
    fn destroy(&mut self, payload: T) {
        drop(payload);
    }
}

/// Called once per payload, in ascending order, by [`crate::RBTree::for_each`].
///
/// The visitor's own state is the traversal context. Returning `false`
/// reports a failure for that payload; traversal carries on regardless.
pub trait Visitor<T> {
    fn visit(&mut self, payload: &T) -> bool;
}

impl<T, F> Visitor<T> for F
where
    F: FnMut(&T) -> bool,
{
    #[inline(always)]
    fn visit(&mut self, payload: &T) -> bool {
        self(payload)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn closures_are_callbacks() {
        let reverse = |a: &u8, b: &u8| b.cmp(a);
        assert_eq!(Ordering::Greater, reverse.compare(&1, &2));
        assert_eq!(Ordering::Less, Natural.compare(&1, &2));
        assert_eq!(Ordering::Equal, Natural.compare(&"a", &"a"));

        let mut released = Vec::new();
        let mut collect = |s: String| released.push(s);
        collect.destroy("x".to_string());
        DropPayload.destroy("y".to_string());
        assert_eq!(vec!["x".to_string()], released);

        let mut seen = 0;
        let mut count = |_: &u8| {
            seen += 1;
            true
        };
        assert!(count.visit(&3));
        assert_eq!(1, seen);
    }
}
