//! 2D k-d tree over known positions
//!
//! O(log n) average nearest-sample lookup for the nearest-value scheme.
//! Equidistant samples resolve to the lowest input index, so results do not
//! depend on tree shape.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use settlefield_core::KnownPoint;

#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<KnownPoint>,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into `points`
    point_idx: usize,
    /// 0 = x, 1 = y
    split_dim: u8,
    left: Option<usize>,
    right: Option<usize>,
}

/// Closest sample to a query
#[derive(Debug, Clone, Copy)]
pub struct Nearest {
    pub point: KnownPoint,
    pub distance_sq: f64,
    /// Position in the slice the tree was built from
    pub index: usize,
}

impl KdTree {
    pub fn build(points: &[KnownPoint]) -> Self {
        let mut nodes = Vec::with_capacity(points.len());
        if !points.is_empty() {
            let mut indices: Vec<usize> = (0..points.len()).collect();
            build_recursive(points, &mut indices, 0, &mut nodes);
        }
        Self {
            nodes,
            points: points.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest sample to (qx, qy); `None` on an empty tree or a non-finite query.
    pub fn nearest(&self, qx: f64, qy: f64) -> Option<Nearest> {
        if self.nodes.is_empty() || !qx.is_finite() || !qy.is_finite() {
            return None;
        }

        let mut best = (f64::INFINITY, usize::MAX);
        self.search(0, qx, qy, &mut best);

        let (distance_sq, index) = best;
        Some(Nearest {
            point: self.points[index],
            distance_sq,
            index,
        })
    }

    fn search(&self, node_idx: usize, qx: f64, qy: f64, best: &mut (f64, usize)) {
        let node = &self.nodes[node_idx];
        let p = &self.points[node.point_idx];

        let d = p.dist_sq(qx, qy);
        if d < best.0 || (d == best.0 && node.point_idx < best.1) {
            *best = (d, node.point_idx);
        }

        let diff = if node.split_dim == 0 { qx - p.x } else { qy - p.y };
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.search(child, qx, qy, best);
        }
        // `<=` so equidistant samples on the far side still compete on index
        if diff * diff <= best.0 {
            if let Some(child) = far {
                self.search(child, qx, qy, best);
            }
        }
    }
}

fn build_recursive(
    points: &[KnownPoint],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let split_dim = (depth % 2) as u8;
    let key = |i: usize| if split_dim == 0 { points[i].x } else { points[i].y };
    indices.sort_by(|&a, &b| key(a).total_cmp(&key(b)));

    let median = indices.len() / 2;
    let node_idx = nodes.len();
    nodes.push(KdNode {
        point_idx: indices[median],
        split_dim,
        left: None,
        right: None,
    });

    let (lower, rest) = indices.split_at_mut(median);
    let upper = &mut rest[1..];

    if !lower.is_empty() {
        let child = build_recursive(points, lower, depth + 1, nodes);
        nodes[node_idx].left = Some(child);
    }
    if !upper.is_empty() {
        let child = build_recursive(points, upper, depth + 1, nodes);
        nodes[node_idx].right = Some(child);
    }

    node_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<KnownPoint> {
        vec![
            KnownPoint::plan(2.0, 3.0, 10.0),
            KnownPoint::plan(5.0, 4.0, 20.0),
            KnownPoint::plan(9.0, 6.0, 30.0),
            KnownPoint::plan(4.0, 7.0, 40.0),
            KnownPoint::plan(8.0, 1.0, 50.0),
            KnownPoint::plan(7.0, 2.0, 60.0),
            KnownPoint::plan(1.0, 8.0, 70.0),
            KnownPoint::plan(6.0, 5.0, 80.0),
        ]
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.nearest(0.0, 0.0).is_none());
    }

    #[test]
    fn test_nearest_exact() {
        let tree = KdTree::build(&sample_points());
        assert_eq!(tree.len(), 8);

        let hit = tree.nearest(5.0, 4.0).unwrap();
        assert_eq!(hit.distance_sq, 0.0);
        assert_eq!(hit.point.value, 20.0);
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let pts = sample_points();
        let tree = KdTree::build(&pts);

        for qx in 0..10 {
            for qy in 0..10 {
                let (qx, qy) = (qx as f64 + 0.5, qy as f64 + 0.5);
                let hit = tree.nearest(qx, qy).unwrap();

                let (bf_idx, bf_d) = pts
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i, p.dist_sq(qx, qy)))
                    .fold((usize::MAX, f64::INFINITY), |acc, (i, d)| if d < acc.1 { (i, d) } else { acc });

                assert_eq!(hit.index, bf_idx, "mismatch at ({qx}, {qy})");
                assert!((hit.distance_sq - bf_d).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Four corners equidistant from the centre, inserted in scrambled order
        let pts = vec![
            KnownPoint::plan(1.0, 1.0, 3.0),
            KnownPoint::plan(-1.0, 1.0, 1.0),
            KnownPoint::plan(1.0, -1.0, 2.0),
            KnownPoint::plan(-1.0, -1.0, 0.0),
        ];
        let tree = KdTree::build(&pts);
        let hit = tree.nearest(0.0, 0.0).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.point.value, 3.0);

        // Midway between two samples on a line
        let line: Vec<KnownPoint> = (0..10).map(|i| KnownPoint::plan(i as f64, 0.0, i as f64)).collect();
        let tree = KdTree::build(&line);
        assert_eq!(tree.nearest(4.5, 0.0).unwrap().index, 4);
    }

    #[test]
    fn test_non_finite_query() {
        let tree = KdTree::build(&sample_points());
        assert!(tree.nearest(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_large_dataset() {
        let pts: Vec<KnownPoint> = (0..1000)
            .map(|i| {
                let x = ((i * 7 + 13) % 100) as f64;
                let y = ((i * 11 + 37) % 97) as f64;
                KnownPoint::plan(x, y, i as f64)
            })
            .collect();
        let tree = KdTree::build(&pts);

        let hit = tree.nearest(50.3, 49.8).unwrap();
        let bf = pts.iter().map(|p| p.dist_sq(50.3, 49.8)).fold(f64::MAX, f64::min);
        assert!((hit.distance_sq - bf).abs() < 1e-10);
    }
}
