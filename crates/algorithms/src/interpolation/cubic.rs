//! Smooth 2D interpolation on the Delaunay triangulation
//!
//! Clough-Tocher macro elements: every Delaunay triangle is split at its
//! centroid into three cubic Bernstein-Bézier pieces, and the pieces join
//! with continuous first derivatives, inside a triangle and across shared
//! edges. Gradients are estimated per vertex by least squares over its
//! triangulation neighbours.
//!
//! The surface passes through every sample and reproduces linear fields
//! exactly. Targets outside the convex hull are undefined.

use settlefield_core::{KnownPoint, Result};

use super::delaunay::Triangulation;
use super::Interpolant;

/// C1 piecewise-cubic surface over the Delaunay triangulation
#[derive(Debug, Clone)]
pub struct CubicInterpolant {
    tri: Triangulation,
    /// (df/dx, df/dy) per vertex
    gradients: Vec<(f64, f64)>,
}

impl CubicInterpolant {
    /// # Errors
    /// [`settlefield_core::Error::InsufficientPoints`] unless at least 3
    /// non-collinear distinct positions are given.
    pub fn new(points: &[KnownPoint]) -> Result<Self> {
        let tri = Triangulation::new(points, "2D cubic interpolation")?;
        let gradients = estimate_gradients(&tri);
        Ok(Self { tri, gradients })
    }

    pub fn gradient(&self, vertex: usize) -> (f64, f64) {
        self.gradients[vertex]
    }
}

/// Solve the 2x2 normal equations `AᵀA g = Aᵀb` over each vertex's neighbours,
/// where rows of A are edge vectors and b the value differences.
fn estimate_gradients(tri: &Triangulation) -> Vec<(f64, f64)> {
    let v = tri.vertices();
    let neighbors = tri.vertex_neighbors();

    neighbors
        .iter()
        .enumerate()
        .map(|(i, adj)| {
            let (mut a00, mut a01, mut a11, mut b0, mut b1) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for &j in adj {
                let dx = v[j].x - v[i].x;
                let dy = v[j].y - v[i].y;
                let df = v[j].value - v[i].value;
                a00 += dx * dx;
                a01 += dx * dy;
                a11 += dy * dy;
                b0 += dx * df;
                b1 += dy * df;
            }

            let trace = a00 + a11;
            if trace <= 0.0 {
                return (0.0, 0.0);
            }
            let det = a00 * a11 - a01 * a01;
            if det.abs() <= 1e-12 * trace * trace {
                // All neighbours on one line through the vertex: minimum-norm
                // solution along that line
                return (b0 / trace, b1 / trace);
            }
            ((a11 * b0 - a01 * b1) / det, (a00 * b1 - a01 * b0) / det)
        })
        .collect()
}

#[inline]
fn dot(g: (f64, f64), e: (f64, f64)) -> f64 {
    g.0 * e.0 + g.1 * e.1
}

/// Evaluate the Clough-Tocher macro element of one triangle.
///
/// The triangle is split at its centroid into three cubic micro-triangles
/// (V_i, V_i+1, C). Control points on the outer edges are the cubic Hermite
/// data of the edge ends. The interior point of each micro-triangle makes the
/// normal derivative along its outer edge linear, so neighbouring triangles
/// join with C1 continuity. The points on the interior edges and the centroid
/// value follow from the C1 conditions between the micro-triangles.
fn clough_tocher(p: [&KnownPoint; 3], g: [(f64, f64); 3], b: [f64; 3]) -> f64 {
    let f = [p[0].value, p[1].value, p[2].value];
    let centroid = (
        (p[0].x + p[1].x + p[2].x) / 3.0,
        (p[0].y + p[1].y + p[2].y) / 3.0,
    );
    let toward = |i: usize, q: (f64, f64)| (q.0 - p[i].x, q.1 - p[i].y);

    // First ring around each vertex, on the spoke towards the centroid
    let a: [f64; 3] = std::array::from_fn(|i| f[i] + dot(g[i], toward(i, centroid)) / 3.0);

    // Outer edge i runs from vertex i to vertex i + 1
    let mut near = [0.0; 3];
    let mut far = [0.0; 3];
    let mut inner = [0.0; 3];
    for i in 0..3 {
        let j = (i + 1) % 3;
        let e = toward(i, (p[j].x, p[j].y));
        near[i] = f[i] + dot(g[i], e) / 3.0;
        far[i] = f[j] - dot(g[j], e) / 3.0;

        // Spoke direction split into edge-parallel and normal parts
        let u = toward(i, centroid);
        let lambda = dot(u, e) / dot(e, e);
        let spoke = [a[i] - f[i], a[j] - far[i]];
        let along = [near[i] - f[i], far[i] - near[i], f[j] - far[i]];
        inner[i] = near[i]
            + 0.5 * (spoke[0] + spoke[1])
            + lambda * (along[1] - 0.5 * (along[0] + along[2]));
    }

    // Second ring: each spoke is shared by micro-triangles i - 1 and i
    let q: [f64; 3] = std::array::from_fn(|i| (a[i] + inner[i] + inner[(i + 2) % 3]) / 3.0);
    let center = (q[0] + q[1] + q[2]) / 3.0;

    // The micro-triangle opposite the smallest weight holds the point
    let k = (0..3)
        .min_by(|&x, &y| b[x].total_cmp(&b[y]))
        .unwrap_or(0);
    let i = (k + 1) % 3;
    let j = (k + 2) % 3;
    let (s, t, r) = (b[i] - b[k], b[j] - b[k], 3.0 * b[k]);

    f[i] * s * s * s
        + f[j] * t * t * t
        + center * r * r * r
        + 3.0
            * (near[i] * s * s * t
                + far[i] * s * t * t
                + a[i] * s * s * r
                + q[i] * s * r * r
                + a[j] * t * t * r
                + q[j] * t * r * r)
        + 6.0 * inner[i] * s * t * r
}

impl Interpolant for CubicInterpolant {
    fn evaluate(&self, x: f64, y: f64) -> Option<f64> {
        let loc = self.tri.locate(x, y)?;
        let t = self.tri.triangles()[loc.triangle];
        let v = self.tri.vertices();
        let (b0, b1, b2) = loc.weights;

        for (weight, idx) in [(b0, t.v0), (b1, t.v1), (b2, t.v2)] {
            if weight == 1.0 {
                return Some(v[idx].value);
            }
        }

        Some(clough_tocher(
            [&v[t.v0], &v[t.v1], &v[t.v2]],
            [self.gradients[t.v0], self.gradients[t.v1], self.gradients[t.v2]],
            [b0, b1, b2],
        ))
    }
}
