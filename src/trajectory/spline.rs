//! Natural cubic spline interpolation y(x)
//!
//! Fits one smooth curve through a small set of anchor points whose x
//! coordinates are strictly increasing, the precondition the local-frame
//! transform in the trajectory generator establishes.

/// Piecewise cubic y(x) through anchor points
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline through `(x[i], y[i])`.
    ///
    /// `x` must be strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(x.len() >= 2);
        debug_assert!(
            x.windows(2).all(|w| w[0] < w[1]),
            "anchor x coordinates must be strictly increasing"
        );

        let n = x.len();
        let a = y.to_vec();
        let mut b = vec![0.0; n];
        let mut c = vec![0.0; n];
        let mut d = vec![0.0; n];

        let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();

        // Solve the tridiagonal system for the second-derivative terms
        let mut alpha = vec![0.0; n];
        for i in 1..n - 1 {
            alpha[i] = 3.0 / h[i] * (a[i + 1] - a[i]) - 3.0 / h[i - 1] * (a[i] - a[i - 1]);
        }

        let mut l = vec![1.0; n];
        let mut mu = vec![0.0; n];
        let mut z = vec![0.0; n];

        for i in 1..n - 1 {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        for j in (0..n - 1).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (a[j + 1] - a[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }

        CubicSpline {
            x: x.to_vec(),
            a,
            b,
            c,
            d,
        }
    }

    /// Evaluate the spline at `t`.
    ///
    /// Outside the anchor range the boundary segment polynomial is
    /// extended.
    pub fn calc(&self, t: f64) -> f64 {
        let i = self.segment_index(t);
        let dx = t - self.x[i];
        self.a[i] + self.b[i] * dx + self.c[i] * dx.powi(2) + self.d[i] * dx.powi(3)
    }

    /// Index of the segment containing `t`, clamped to the boundary
    /// segments.
    fn segment_index(&self, t: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.x.len() - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if t >= self.x[mid] {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}
