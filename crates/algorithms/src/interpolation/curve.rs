//! 1D interpolation along the chainage axis
//!
//! Knots are sorted by x; samples sharing an x collapse into one knot with the
//! mean value. Targets outside `[x_min, x_max]` are undefined for every
//! scheme.

use settlefield_core::{Error, KnownPoint, Result, Scheme};

use super::spline::not_a_knot_second_derivatives;
use super::Interpolant;

/// Piecewise interpolant through sorted, distinct knots
#[derive(Debug, Clone)]
pub struct CurveInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
    scheme: Scheme,
    /// Spline second derivatives, only for [`Scheme::Cubic`]
    m: Vec<f64>,
}

impl CurveInterpolant {
    /// Build from chainage samples.
    ///
    /// # Errors
    /// [`Error::InsufficientPoints`] with fewer than 2 distinct x values.
    pub fn new(points: &[KnownPoint], scheme: Scheme) -> Result<Self> {
        let (xs, ys) = sorted_knots(points);

        if xs.len() < 2 {
            return Err(Error::InsufficientPoints {
                required: 2,
                actual: xs.len(),
                context: format!("1D {} interpolation (distinct x values)", scheme),
            });
        }

        let m = match scheme {
            Scheme::Cubic => not_a_knot_second_derivatives(&xs, &ys),
            Scheme::Linear | Scheme::Nearest => Vec::new(),
        };

        Ok(Self { xs, ys, scheme, m })
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn n_knots(&self) -> usize {
        self.xs.len()
    }

    /// Interpolate at chainage `x`; `None` outside the knot range
    pub fn eval(&self, x: f64) -> Option<f64> {
        let (x_min, x_max) = self.x_range();
        if !(x >= x_min && x <= x_max) {
            return None;
        }

        let hi = self.xs.partition_point(|&v| v < x);
        if self.xs[hi] == x {
            return Some(self.ys[hi]);
        }
        let lo = hi - 1;

        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);
        let h = x1 - x0;

        let value = match self.scheme {
            Scheme::Linear => y0 + (y1 - y0) * (x - x0) / h,
            Scheme::Nearest => {
                if x - x0 <= x1 - x {
                    y0
                } else {
                    y1
                }
            }
            Scheme::Cubic => {
                let a = (x1 - x) / h;
                let b = (x - x0) / h;
                a * y0
                    + b * y1
                    + (h * h / 6.0) * ((a * a - 1.0) * a * self.m[lo] + (b * b - 1.0) * b * self.m[hi])
            }
        };
        Some(value)
    }
}

impl Interpolant for CurveInterpolant {
    fn evaluate(&self, x: f64, _y: f64) -> Option<f64> {
        self.eval(x)
    }
}

/// Sort by x (stable) and average the values of equal x
fn sorted_knots(points: &[KnownPoint]) -> (Vec<f64>, Vec<f64>) {
    let mut sorted: Vec<&KnownPoint> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.value.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut xs: Vec<f64> = Vec::with_capacity(sorted.len());
    let mut ys: Vec<f64> = Vec::with_capacity(sorted.len());
    let mut count = 0usize;

    for p in sorted {
        match xs.last() {
            Some(&last) if last == p.x => {
                // Running mean over the duplicate run
                count += 1;
                if let Some(y) = ys.last_mut() {
                    *y += (p.value - *y) / count as f64;
                }
            }
            _ => {
                xs.push(p.x);
                ys.push(p.value);
                count = 1;
            }
        }
    }

    (xs, ys)
}
