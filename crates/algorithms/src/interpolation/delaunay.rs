//! Delaunay triangulation of the known positions
//!
//! Points are swept in lexicographic order, so every new point lies outside
//! the hull built so far and is connected to the hull edges it sees. The
//! union of triangles is therefore exactly the convex hull. Lawson edge
//! flips then restore the empty-circumcircle property.
//!
//! Coordinates are shifted to the bounding-box center first, which keeps the
//! predicates well conditioned for chainage values in the thousands.

use std::collections::HashMap;

use settlefield_core::{Error, KnownPoint, Result};
use tracing::debug;

use super::hull::ConvexHull;

/// Vertex indices of one triangle, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Triangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Triangle {
    pub fn vertices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Directed edges in counter-clockwise order
    fn edges(&self) -> [(usize, usize); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// The vertex not on edge (a, b)
    fn opposite(&self, a: usize, b: usize) -> usize {
        self.vertices()
            .into_iter()
            .find(|&v| v != a && v != b)
            .unwrap_or(self.v0)
    }
}

/// Weights of p0, p1 and p2 at (px, py). They sum to 1 and are all
/// non-negative exactly when the point is on or inside the triangle.
fn barycentric(
    px: f64,
    py: f64,
    p0: &KnownPoint,
    p1: &KnownPoint,
    p2: &KnownPoint,
) -> (f64, f64, f64) {
    let (ex, ey) = (p1.x - p0.x, p1.y - p0.y);
    let (fx, fy) = (p2.x - p0.x, p2.y - p0.y);
    let (qx, qy) = (px - p0.x, py - p0.y);

    let det = ex * fy - fx * ey;
    let v = (qx * fy - fx * qy) / det;
    let w = (ex * qy - qx * ey) / det;

    (1.0 - v - w, v, w)
}

/// Twice the signed area of (a, b, c), positive when counter-clockwise
#[inline]
fn orient(a: &KnownPoint, b: &KnownPoint, c: &KnownPoint) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `d` lies inside the circumcircle of the counter-clockwise
/// triangle (a, b, c), by more than round-off
fn in_circle(a: &KnownPoint, b: &KnownPoint, c: &KnownPoint, d: &KnownPoint) -> bool {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    let det = ad * (bdx * cdy - cdx * bdy) - bd * (adx * cdy - cdx * ady)
        + cd * (adx * bdy - bdx * ady);
    let scale = ad.max(bd).max(cd);

    // Cocircular sets (regular section grids) must not flip back and forth
    det > 1e-12 * scale * scale
}

/// Triangulate by lexicographic sweep. Returns an empty list when all
/// points are collinear.
fn sweep(points: &[KnownPoint]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
    });

    // The leading run of collinear points is fanned to the first point off
    // their line
    let (first, second) = (&points[order[0]], &points[order[1]]);
    let Some(k) = (2..n).find(|&k| orient(first, second, &points[order[k]]) != 0.0) else {
        return Vec::new();
    };
    let apex = order[k];
    let left = orient(first, second, &points[apex]) > 0.0;

    let mut triangles: Vec<Triangle> = Vec::with_capacity(2 * n);
    for pair in order[..k].windows(2) {
        let (a, b) = if left { (pair[0], pair[1]) } else { (pair[1], pair[0]) };
        triangles.push(Triangle { v0: a, v1: b, v2: apex });
    }

    // Counter-clockwise hull of everything inserted so far
    let mut hull: Vec<usize> = if left {
        order[..k].iter().copied().chain([apex]).collect()
    } else {
        order[..k].iter().rev().copied().chain([apex]).collect()
    };

    for &p in &order[k + 1..] {
        let m = hull.len();
        let visible: Vec<bool> = (0..m)
            .map(|j| orient(&points[hull[j]], &points[hull[(j + 1) % m]], &points[p]) < 0.0)
            .collect();

        let Some(start) = (0..m)
            .find(|&j| !visible[j] && visible[(j + 1) % m])
            .map(|j| (j + 1) % m)
        else {
            debug!("vertex {p} sees no hull edge and is left out of the triangulation");
            continue;
        };
        let count = (0..m).take_while(|&c| visible[(start + c) % m]).count();

        for c in 0..count {
            let j = (start + c) % m;
            triangles.push(Triangle {
                v0: hull[(j + 1) % m],
                v1: hull[j],
                v2: p,
            });
        }

        // Keep the chain the point cannot see, then close it through p
        let mut next: Vec<usize> = (0..=m - count).map(|c| hull[(start + count + c) % m]).collect();
        next.push(p);
        hull = next;
    }

    triangles
}

/// Flip edges until no vertex lies inside the circumcircle of a neighbour
fn legalize(points: &[KnownPoint], triangles: &mut [Triangle]) {
    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(3 * triangles.len());
    for (ti, t) in triangles.iter().enumerate() {
        for e in t.edges() {
            owner.insert(e, ti);
        }
    }

    // Seeded in triangle order so cocircular ties resolve the same way every run
    let mut pending: Vec<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| t.edges())
        .filter(|&(a, b)| a < b)
        .collect();

    while let Some((a, b)) = pending.pop() {
        let (Some(&t1), Some(&t2)) = (owner.get(&(a, b)), owner.get(&(b, a))) else {
            continue;
        };
        let c = triangles[t1].opposite(a, b);
        let d = triangles[t2].opposite(b, a);
        let (pa, pb, pc, pd) = (&points[a], &points[b], &points[c], &points[d]);

        if !in_circle(pa, pb, pc, pd) || orient(pa, pd, pc) <= 0.0 || orient(pd, pb, pc) <= 0.0 {
            continue;
        }

        for e in triangles[t1].edges().into_iter().chain(triangles[t2].edges()) {
            owner.remove(&e);
        }
        triangles[t1] = Triangle { v0: a, v1: d, v2: c };
        triangles[t2] = Triangle { v0: d, v1: b, v2: c };
        for (ti, t) in [(t1, triangles[t1]), (t2, triangles[t2])] {
            for e in t.edges() {
                owner.insert(e, ti);
            }
        }

        pending.extend([(a, d), (d, b), (b, c), (c, a)]);
    }
}

/// Closest point to (px, py) on segment a-b
fn closest_on_segment(px: f64, py: f64, a: &KnownPoint, b: &KnownPoint) -> (f64, f64) {
    let (ex, ey) = (b.x - a.x, b.y - a.y);
    let len_sq = ex * ex + ey * ey;
    let t = if len_sq > 0.0 {
        (((px - a.x) * ex + (py - a.y) * ey) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a.x + t * ex, a.y + t * ey)
}

/// Delaunay triangulation plus the convex hull of its vertices
#[derive(Debug, Clone)]
pub(crate) struct Triangulation {
    /// Vertices shifted by `-origin`
    vertices: Vec<KnownPoint>,
    triangles: Vec<Triangle>,
    hull: ConvexHull,
    origin: (f64, f64),
}

/// Containing triangle and barycentric weights of a query
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location {
    pub triangle: usize,
    pub weights: (f64, f64, f64),
}

impl Triangulation {
    /// Triangulate distinct positions.
    ///
    /// # Errors
    /// [`Error::InsufficientPoints`] unless at least 3 non-collinear points exist.
    pub fn new(points: &[KnownPoint], context: &str) -> Result<Self> {
        let insufficient = |actual: usize| Error::InsufficientPoints {
            required: 3,
            actual,
            context: format!("{context} (non-collinear positions)"),
        };

        if points.len() < 3 {
            return Err(insufficient(points.len()));
        }

        let hull = ConvexHull::new(points);
        if !hull.is_proper() {
            return Err(insufficient(hull.vertices().len()));
        }

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let origin = (0.5 * (min_x + max_x), 0.5 * (min_y + max_y));

        let vertices: Vec<KnownPoint> = points
            .iter()
            .map(|p| KnownPoint::plan(p.x - origin.0, p.y - origin.1, p.value))
            .collect();

        let mut triangles = sweep(&vertices);
        if triangles.is_empty() {
            return Err(insufficient(hull.vertices().len()));
        }
        legalize(&vertices, &mut triangles);

        Ok(Self {
            vertices,
            triangles,
            hull,
            origin,
        })
    }

    pub fn vertices(&self) -> &[KnownPoint] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Query in shifted coordinates
    pub fn shift(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.origin.0, y - self.origin.1)
    }

    fn corners(&self, t: Triangle) -> (&KnownPoint, &KnownPoint, &KnownPoint) {
        (&self.vertices[t.v0], &self.vertices[t.v1], &self.vertices[t.v2])
    }

    /// Triangle whose closed interior holds the shifted point
    fn containing_triangle(&self, px: f64, py: f64) -> Option<Location> {
        const EPS: f64 = -1e-10;

        // Brute force; fine for a few thousand triangles
        self.triangles.iter().enumerate().find_map(|(ti, &t)| {
            let (p0, p1, p2) = self.corners(t);
            let (u, v, w) = barycentric(px, py, p0, p1, p2);
            (u >= EPS && v >= EPS && w >= EPS).then_some(Location {
                triangle: ti,
                weights: (u, v, w),
            })
        })
    }

    /// Find the triangle containing (x, y), given in original coordinates.
    ///
    /// Returns `None` outside the convex hull. A point inside the hull
    /// tolerance but just off the outer edges is moved onto the nearest edge.
    pub fn locate(&self, x: f64, y: f64) -> Option<Location> {
        if !self.hull.contains(x, y) {
            return None;
        }
        let (px, py) = self.shift(x, y);
        if let Some(loc) = self.containing_triangle(px, py) {
            return Some(loc);
        }

        let mut best: Option<(usize, (f64, f64), f64)> = None;
        for (ti, &t) in self.triangles.iter().enumerate() {
            let (p0, p1, p2) = self.corners(t);
            for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
                let (sx, sy) = closest_on_segment(px, py, a, b);
                let dist = (sx - px).hypot(sy - py);
                if best.map_or(true, |(_, _, d)| dist < d) {
                    best = Some((ti, (sx, sy), dist));
                }
            }
        }

        let (triangle, (sx, sy), dist) = best?;
        debug_assert!(
            dist <= 2.0 * self.hull.tolerance(),
            "({x}, {y}) is {dist} away from every triangle but inside the hull"
        );
        let (p0, p1, p2) = self.corners(self.triangles[triangle]);
        Some(Location {
            triangle,
            weights: barycentric(sx, sy, p0, p1, p2),
        })
    }

    /// Neighbouring vertex indices of every vertex, sorted and deduplicated
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.vertices();
            adj[a].extend([b, c]);
            adj[b].extend([a, c]);
            adj[c].extend([a, b]);
        }
        for list in &mut adj {
            list.sort_unstable();
            list.dedup();
        }
        adj
    }
}
