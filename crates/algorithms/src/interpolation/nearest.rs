//! Nearest-sample interpolation on the plane
//!
//! Each target takes the value of the closest known point. Defined
//! everywhere, including outside the convex hull of the samples.

use settlefield_core::{Error, KnownPoint, Result};

use super::kdtree::KdTree;
use super::Interpolant;

#[derive(Debug, Clone)]
pub struct NearestInterpolant {
    tree: KdTree,
}

impl NearestInterpolant {
    /// # Errors
    /// [`Error::InsufficientPoints`] on an empty point slice.
    pub fn new(points: &[KnownPoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientPoints {
                required: 1,
                actual: 0,
                context: "2D nearest interpolation".into(),
            });
        }
        Ok(Self {
            tree: KdTree::build(points),
        })
    }

    pub fn n_points(&self) -> usize {
        self.tree.len()
    }
}

impl Interpolant for NearestInterpolant {
    fn evaluate(&self, x: f64, y: f64) -> Option<f64> {
        self.tree.nearest(x, y).map(|hit| hit.point.value)
    }
}
