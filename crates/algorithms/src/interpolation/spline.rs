//! Not-a-knot cubic spline coefficients

/// Second derivatives of the not-a-knot cubic spline through `(xs, ys)`.
///
/// `xs` must be strictly increasing. The third derivative is continuous at
/// `xs[1]` and `xs[n-2]`, so the first two and the last two pieces are the
/// same cubic. With 3 knots this is the parabola through them, with 2 the
/// straight line.
///
/// The end conditions are eliminated into the first and last interior rows,
/// which leaves a tridiagonal system for `M[1..n-1]` (Thomas algorithm).
pub(crate) fn not_a_knot_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len(), "knot x and y lengths differ");
    let n = xs.len().min(ys.len());
    if n < 3 {
        return vec![0.0; n];
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    debug_assert!(h.iter().all(|&d| d > 0.0), "xs must be strictly increasing");
    let slope: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    if n == 3 {
        let curvature = 2.0 * (slope[1] - slope[0]) / (h[0] + h[1]);
        return vec![curvature; 3];
    }

    // Rows for the interior unknowns M[1..n-1]
    let k = n - 2;
    let mut lower = vec![0.0; k];
    let mut diag = vec![0.0; k];
    let mut upper = vec![0.0; k];
    let mut rhs = vec![0.0; k];

    for i in 0..k {
        let j = i + 1;
        lower[i] = h[j - 1];
        diag[i] = 2.0 * (h[j - 1] + h[j]);
        upper[i] = h[j];
        rhs[i] = 6.0 * (slope[j] - slope[j - 1]);
    }

    // h1*M0 - (h0+h1)*M1 + h0*M2 = 0, folded into the row of M1
    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    upper[0] = (h1 - h0) * (h1 + h0) / h1;

    // Same at the far end, folded into the row of M[n-2]
    let (ha, hb) = (h[n - 3], h[n - 2]);
    lower[k - 1] = (ha - hb) * (ha + hb) / ha;
    diag[k - 1] = (ha + hb) * (2.0 * ha + hb) / ha;

    // Forward sweep
    for i in 1..k {
        let w = lower[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }

    let mut m = vec![0.0; n];
    m[k] = rhs[k - 1] / diag[k - 1];
    for i in (0..k - 1).rev() {
        m[i + 1] = (rhs[i] - upper[i] * m[i + 2]) / diag[i];
    }

    m[0] = ((h0 + h1) * m[1] - h0 * m[2]) / h1;
    m[n - 1] = ((ha + hb) * m[n - 2] - hb * m[n - 3]) / ha;

    m
}
