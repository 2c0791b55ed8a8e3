//! Visitors that fold a whole tree into one value.

use crate::{ComponentOrder, Destructor, RBTree, Vector, Visitor};

/// Keeps a copy of the vector with the largest norm seen so far.
///
/// The first vector visited is always copied; after that a vector replaces
/// the copy only when its norm is strictly larger. `visit` reports whether
/// it copied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaxNorm {
    max: Option<Vector>,
}

impl MaxNorm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max(&self) -> Option<&Vector> {
        self.max.as_ref()
    }

    pub fn into_inner(self) -> Option<Vector> {
        self.max
    }
}

impl Visitor<Vector> for MaxNorm {
    fn visit(&mut self, vector: &Vector) -> bool {
        let copy = self
            .max
            .as_ref()
            .is_none_or(|max| vector.norm() > max.norm());
        if copy {
            self.max = Some(vector.clone());
        }
        copy
    }
}

/// A copy of the vector with the largest norm in `tree`.
///
/// Among vectors of equal norm the smallest under [`ComponentOrder`] wins.
pub fn max_norm_vector<D: Destructor<Vector>>(
    tree: &RBTree<Vector, ComponentOrder, D>,
) -> Option<Vector> {
    let mut max = MaxNorm::new();
    tree.for_each(&mut max);
    max.into_inner()
}

/// Appends every visited word, each followed by a newline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Concatenate {
    buffer: String,
}

impl Concatenate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl<S: AsRef<str>> Visitor<S> for Concatenate {
    fn visit(&mut self, word: &S) -> bool {
        self.buffer.push_str(word.as_ref());
        self.buffer.push('\n');
        true
    }
}
