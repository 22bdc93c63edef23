//! Convex hull of the known positions
//!
//! The hull defines the region where 2D linear and cubic interpolation is
//! defined. Andrew's monotone chain, O(n log n).

use settlefield_core::KnownPoint;

/// Counter-clockwise convex polygon without collinear vertices
#[derive(Debug, Clone)]
pub struct ConvexHull {
    vertices: Vec<(f64, f64)>,
    /// Distance tolerance for boundary points
    tol: f64,
}

#[inline]
fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

impl ConvexHull {
    pub fn new(points: &[KnownPoint]) -> Self {
        let mut pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        pts.dedup();

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for &(x, y) in &pts {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let extent = (max_x - min_x).max(max_y - min_y).max(1.0);
        let tol = 1e-9 * extent;

        if pts.len() < 3 {
            return Self { vertices: pts, tol };
        }

        let mut lower: Vec<(f64, f64)> = Vec::with_capacity(pts.len());
        for &p in &pts {
            while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
                lower.pop();
            }
            lower.push(p);
        }

        let mut upper: Vec<(f64, f64)> = Vec::with_capacity(pts.len());
        for &p in pts.iter().rev() {
            while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
                upper.pop();
            }
            upper.push(p);
        }

        lower.pop();
        upper.pop();
        lower.extend(upper);

        Self { vertices: lower, tol }
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Distance a point may lie outside an edge and still count as inside
    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    /// Enclosed area (shoelace)
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.0 * b.1 - b.0 * a.1
            })
            .sum();
        0.5 * twice.abs()
    }

    /// Whether the hull encloses a non-zero area
    pub fn is_proper(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Point-in-hull test, boundary included
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.is_proper() || !x.is_finite() || !y.is_finite() {
            return false;
        }
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
            // Signed distance of (x, y) to the left of edge a→b
            cross(a, b, (x, y)) / len >= -self.tol
        })
    }
}
