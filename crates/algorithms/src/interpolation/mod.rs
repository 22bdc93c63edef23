//! Settlement interpolation engine
//!
//! Maps a [`KnownPointSet`] onto arbitrary target coordinates:
//! - 1D: linear, not-a-knot cubic spline or nearest knot along the chainage
//! - 2D linear: barycentric interpolation on the Delaunay triangulation
//! - 2D cubic: C1 Clough-Tocher patches over the Delaunay triangulation
//! - 2D nearest: closest known point (k-d tree)
//!
//! Targets outside the known region come back as `None`. Extrapolation is
//! never attempted.

mod cubic;
mod curve;
mod delaunay;
mod hull;
pub mod kdtree;
mod nearest;
mod spline;
mod tin;

use std::collections::HashMap;

use settlefield_core::{Dimension, KnownPoint, KnownPointSet, NodeId, Result, Scheme, TargetNode};

pub use cubic::CubicInterpolant;
pub use curve::CurveInterpolant;
pub use hull::ConvexHull;
pub use kdtree::{KdTree, Nearest};
pub use nearest::NearestInterpolant;
pub use tin::TinInterpolant;

/// A surface (or curve) that can be sampled at target coordinates.
///
/// `None` means the coordinate lies outside the region the known points
/// span. 1D interpolants ignore `y`.
pub trait Interpolant: Send + Sync {
    fn evaluate(&self, x: f64, y: f64) -> Option<f64>;
}

/// Build the interpolant matching the set's dimension and the given scheme.
///
/// 2D sets have coincident positions merged first (see [`merge_coincident`]).
///
/// # Errors
/// [`settlefield_core::Error::InsufficientPoints`] when the set cannot
/// support the scheme.
pub fn build_interpolant(set: &KnownPointSet, scheme: Scheme) -> Result<Box<dyn Interpolant>> {
    match set.dimension() {
        Dimension::OneD => Ok(Box::new(CurveInterpolant::new(set.points(), scheme)?)),
        Dimension::TwoD => {
            let vertices = merge_coincident(set.points());
            match scheme {
                Scheme::Linear => Ok(Box::new(TinInterpolant::new(&vertices)?)),
                Scheme::Cubic => Ok(Box::new(CubicInterpolant::new(&vertices)?)),
                Scheme::Nearest => Ok(Box::new(NearestInterpolant::new(&vertices)?)),
            }
        }
    }
}

/// Evaluate every target, keeping target order
pub fn interpolate_targets(
    interpolant: &dyn Interpolant,
    targets: &[TargetNode],
) -> Vec<(NodeId, Option<f64>)> {
    targets
        .iter()
        .map(|t| (t.id.clone(), interpolant.evaluate(t.x, t.y)))
        .collect()
}

/// Collapse points sharing an exact `(x, y)` into one point with the mean
/// value. Output follows first occurrence; non-finite points are dropped.
pub fn merge_coincident(points: &[KnownPoint]) -> Vec<KnownPoint> {
    // -0.0 and 0.0 are the same position
    let key = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };

    let mut slot: HashMap<(u64, u64), usize> = HashMap::with_capacity(points.len());
    let mut merged: Vec<KnownPoint> = Vec::with_capacity(points.len());
    let mut counts: Vec<usize> = Vec::with_capacity(points.len());

    for p in points {
        if !(p.x.is_finite() && p.y.is_finite() && p.value.is_finite()) {
            continue;
        }
        match slot.get(&(key(p.x), key(p.y))) {
            Some(&i) => {
                counts[i] += 1;
                merged[i].value += (p.value - merged[i].value) / counts[i] as f64;
            }
            None => {
                slot.insert((key(p.x), key(p.y)), merged.len());
                merged.push(KnownPoint::plan(p.x + 0.0, p.y + 0.0, p.value));
                counts.push(1);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use settlefield_core::Error;

    #[test]
    fn test_merge_coincident_means() {
        let pts = vec![
            KnownPoint::plan(1.0, 0.0, 2.0),
            KnownPoint::plan(3.0, 4.0, 1.0),
            KnownPoint::plan(1.0, -0.0, 4.0),
            KnownPoint::plan(1.0, 0.0, 6.0),
            KnownPoint::plan(f64::NAN, 0.0, 6.0),
        ];
        let merged = merge_coincident(&pts);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], KnownPoint::plan(1.0, 0.0, 4.0));
        assert_eq!(merged[1], KnownPoint::plan(3.0, 4.0, 1.0));
    }

    #[test]
    fn test_dispatch_by_dimension() {
        let line = KnownPointSet::new(
            1u32,
            Dimension::OneD,
            vec![KnownPoint::chainage(0.0, 0.0), KnownPoint::chainage(10.0, 5.0)],
        );
        let f = build_interpolant(&line, Scheme::Linear).unwrap();
        assert_eq!(f.evaluate(5.0, 123.0), Some(2.5));

        let plane = KnownPointSet::new(
            2u32,
            Dimension::TwoD,
            vec![
                KnownPoint::plan(0.0, 0.0, 0.0),
                KnownPoint::plan(10.0, 0.0, 10.0),
                KnownPoint::plan(0.0, 10.0, 0.0),
            ],
        );
        for scheme in [Scheme::Linear, Scheme::Cubic, Scheme::Nearest] {
            let f = build_interpolant(&plane, scheme).unwrap();
            let z = f.evaluate(10.0, 0.0).unwrap();
            assert!((z - 10.0).abs() < 1e-9, "{scheme}: {z}");
        }
    }

    #[test]
    fn test_two_points_in_2d_insufficient() {
        let set = KnownPointSet::new(
            3u32,
            Dimension::TwoD,
            vec![KnownPoint::plan(0.0, 0.0, 1.0), KnownPoint::plan(5.0, 5.0, 2.0)],
        );
        assert!(matches!(
            build_interpolant(&set, Scheme::Linear),
            Err(Error::InsufficientPoints { required: 3, .. })
        ));
        assert!(build_interpolant(&set, Scheme::Nearest).is_ok());
    }

    #[test]
    fn test_coincident_points_do_not_break_triangulation() {
        // Mirrored centerline samples land twice on y = 0
        let set = KnownPointSet::new(
            4u32,
            Dimension::TwoD,
            vec![
                KnownPoint::plan(0.0, 0.0, 1.0),
                KnownPoint::plan(10.0, 0.0, 1.0),
                KnownPoint::plan(5.0, 5.0, 3.0),
            ],
        )
        .mirrored();
        assert_eq!(set.len(), 6);

        let f = build_interpolant(&set, Scheme::Linear).unwrap();
        assert!((f.evaluate(0.0, 0.0).unwrap() - 1.0).abs() < 1e-12);
        let up = f.evaluate(5.0, 2.0).unwrap();
        let down = f.evaluate(5.0, -2.0).unwrap();
        assert!((up - down).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_targets_keeps_order() {
        let set = KnownPointSet::new(
            5u32,
            Dimension::OneD,
            vec![KnownPoint::chainage(0.0, 0.0), KnownPoint::chainage(20.0, 20.0)],
        );
        let f = build_interpolant(&set, Scheme::Linear).unwrap();
        let targets = vec![
            TargetNode::chainage(30u64, 15.0),
            TargetNode::chainage(10u64, 25.0),
            TargetNode::chainage(20u64, 5.0),
        ];
        let out = interpolate_targets(f.as_ref(), &targets);
        assert_eq!(
            out,
            vec![
                (NodeId::from(30u64), Some(15.0)),
                (NodeId::from(10u64), None),
                (NodeId::from(20u64), Some(5.0)),
            ]
        );
    }
}
