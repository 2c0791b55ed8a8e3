use std::cmp::Ordering;

use crate::Comparator;

/// A finite sequence of `f64` components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    components: Vec<f64>,
}

impl Vector {
    pub fn new(components: Vec<f64>) -> Self {
        Vector { components }
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Sum of squared components. No square root is taken: only the
    /// relative size of two norms is ever needed.
    pub fn norm(&self) -> f64 {
        self.components.iter().map(|c| c * c).sum()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Vector::new(components)
    }
}

/// Orders vectors component by component.
///
/// The first differing component decides. A vector that is a strict prefix
/// of another is the smaller one. Components compare with
/// [`f64::total_cmp`], so NaN and signed zeros have a fixed place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentOrder;

impl Comparator<Vector> for ComponentOrder {
    fn compare(&self, a: &Vector, b: &Vector) -> Ordering {
        a.components
            .iter()
            .zip(&b.components)
            .map(|(x, y)| x.total_cmp(y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    }
}
