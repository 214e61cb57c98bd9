//! Piecewise-linear interpolation over tabulated sequences.

/// Linearly interpolate `ys` at `x` over strictly increasing `xs`.
///
/// Returns `None` outside `[xs[0], xs[n-1]]` or when the inputs are empty or
/// mismatched. No extrapolation is performed.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() || !x.is_finite() {
        return None;
    }
    let first = xs[0];
    let last = xs[xs.len() - 1];
    if x < first || x > last {
        return None;
    }

    // First index whose abscissa is >= x.
    let hi = xs.partition_point(|&v| v < x);
    if hi == 0 {
        return Some(ys[0]);
    }
    let lo = hi - 1;
    let (x0, x1) = (xs[lo], xs[hi]);
    let (y0, y1) = (ys[lo], ys[hi]);
    let t = (x - x0) / (x1 - x0);
    Some(y0 + t * (y1 - y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_nodes() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [10.0, 20.0, 0.0];
        assert_eq!(interp_linear(&xs, &ys, 1.0), Some(10.0));
        assert_eq!(interp_linear(&xs, &ys, 4.0), Some(0.0));
        assert!((interp_linear(&xs, &ys, 1.5).unwrap() - 15.0).abs() < 1e-12);
        assert!((interp_linear(&xs, &ys, 3.0).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn refuses_to_extrapolate() {
        let xs = [1.0, 2.0];
        let ys = [0.0, 1.0];
        assert_eq!(interp_linear(&xs, &ys, 0.99), None);
        assert_eq!(interp_linear(&xs, &ys, 2.01), None);
        assert_eq!(interp_linear(&[], &[], 1.0), None);
    }
}
