//! TIN (Triangulated Irregular Network) interpolation
//!
//! Linear interpolation inside the Delaunay triangle containing the target,
//! using barycentric weights. Targets outside the convex hull are undefined.

use settlefield_core::{KnownPoint, Result};

use super::delaunay::Triangulation;
use super::Interpolant;

/// Piecewise-linear surface over the Delaunay triangulation
#[derive(Debug, Clone)]
pub struct TinInterpolant {
    tri: Triangulation,
}

impl TinInterpolant {
    /// # Errors
    /// [`settlefield_core::Error::InsufficientPoints`] unless at least 3
    /// non-collinear distinct positions are given.
    pub fn new(points: &[KnownPoint]) -> Result<Self> {
        Ok(Self {
            tri: Triangulation::new(points, "2D linear interpolation")?,
        })
    }

    pub fn n_triangles(&self) -> usize {
        self.tri.triangles().len()
    }
}

impl Interpolant for TinInterpolant {
    fn evaluate(&self, x: f64, y: f64) -> Option<f64> {
        let loc = self.tri.locate(x, y)?;
        let t = self.tri.triangles()[loc.triangle];
        let v = self.tri.vertices();
        let (u, vv, w) = loc.weights;

        // Exact at the vertices themselves
        for (weight, idx) in [(u, t.v0), (vv, t.v1), (w, t.v2)] {
            if weight == 1.0 {
                return Some(v[idx].value);
            }
        }

        Some(u * v[t.v0].value + vv * v[t.v1].value + w * v[t.v2].value)
    }
}
