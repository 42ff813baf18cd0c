use super::jet::Jet;

// The "scaled" families are the homogenized polynomials `t^n p(x / t)` used on simplices, prisms and pyramids.
// They reduce to the unscaled family when `t = 1`.

/// Legendre polynomials `[P_0(x), ..., P_n(x)]`
pub fn legendre(n: usize, x: Jet) -> Vec<Jet> {
    scaled_legendre(n, x, Jet::constant(1.0))
}

/// Scaled Legendre polynomials `[t^0 P_0(x/t), ..., t^n P_n(x/t)]`
///
/// ```text
/// P_0 = 1
/// P_1 = x
/// P_n = ((2n - 1) x P_(n-1) - (n - 1) t^2 P_(n-2)) / n
/// ```
pub fn scaled_legendre(n: usize, x: Jet, t: Jet) -> Vec<Jet> {
    let mut polys = Vec::with_capacity(n + 1);
    polys.push(Jet::constant(1.0));
    if n == 0 {
        return polys;
    }
    polys.push(x);

    let t_sq = t * t;
    for i in 2..=n {
        let i_ = i as f64;
        let next = (x * polys[i - 1] * (2.0 * i_ - 1.0) - t_sq * polys[i - 2] * (i_ - 1.0)) / i_;
        polys.push(next);
    }

    polys
}

/// The `k`th Lobatto shape function on `[-1, 1]`
///
/// * `l_0 = (1 - x) / 2`
/// * `l_1 = (1 + x) / 2`
/// * `l_k = (P_k - P_(k-2)) / sqrt(2 (2k - 1))`, which vanishes at both end points
pub fn lobatto(k: usize, x: Jet) -> Jet {
    match k {
        0 => (1.0 - x) * 0.5,
        1 => (1.0 + x) * 0.5,
        _ => scaled_lobatto(k, x, Jet::constant(1.0)),
    }
}

/// The scaled Lobatto bubble `t^k l_k(x / t)` for `k >= 2`
///
/// With `x = λb - λa` and `t = λa + λb` this contains the factor `λa λb`, so it vanishes wherever either
/// barycentric coordinate does.
pub fn scaled_lobatto(k: usize, x: Jet, t: Jet) -> Jet {
    debug_assert!(k >= 2, "Lobatto bubbles start at k = 2");

    let polys = scaled_legendre(k, x, t);
    (polys[k] - t * t * polys[k - 2]) / (2.0 * (2.0 * k as f64 - 1.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::glq::gauss_quadrature_points;

    const TOL: f64 = 1e-12;

    #[test]
    fn legendre_closed_forms() {
        for x_val in [-0.9, -0.3, 0.0, 0.45, 1.0] {
            let p = legendre(4, Jet::variable(x_val, 0));
            let x: f64 = x_val;

            assert!((p[2].value - (3.0 * x * x - 1.0) / 2.0).abs() < TOL);
            assert!((p[3].value - (5.0 * x.powi(3) - 3.0 * x) / 2.0).abs() < TOL);
            assert!((p[4].value - (35.0 * x.powi(4) - 30.0 * x * x + 3.0) / 8.0).abs() < TOL);
            assert!((p[3].gradient[0] - (15.0 * x * x - 3.0) / 2.0).abs() < TOL);
            assert!((p[4].hessian[(0, 0)] - (105.0 * x * x - 15.0) / 2.0).abs() < TOL);
        }
    }

    #[test]
    fn lobatto_derivatives_are_scaled_legendre() {
        for k in 2..=8 {
            for x_val in [-0.77, -0.1, 0.5, 0.93] {
                let x = Jet::variable(x_val, 0);
                let l = lobatto(k, x);
                let p = legendre(k - 1, x);

                let expected = ((2.0 * k as f64 - 1.0) / 2.0).sqrt() * p[k - 1].value;
                assert!((l.gradient[0] - expected).abs() < TOL);
            }
        }
    }

    #[test]
    fn lobatto_bubbles_vanish_at_end_points() {
        for k in 2..=10 {
            assert!(lobatto(k, Jet::constant(-1.0)).value.abs() < TOL);
            assert!(lobatto(k, Jet::constant(1.0)).value.abs() < TOL);
        }
    }

    #[test]
    fn scaled_lobatto_is_homogeneous() {
        let (x_val, t_val, s) = (0.3, 0.8, 0.45);
        for k in 2..=7 {
            let base = scaled_lobatto(k, Jet::constant(x_val), Jet::constant(t_val));
            let scaled = scaled_lobatto(k, Jet::constant(x_val * s), Jet::constant(t_val * s));
            assert!((scaled.value - base.value * s.powi(k as i32)).abs() < TOL);

            let unscaled = lobatto(k, Jet::constant(x_val / t_val));
            assert!((base.value - unscaled.value * t_val.powi(k as i32)).abs() < TOL);
        }
    }

    #[test]
    fn lobatto_bubble_derivatives_are_orthogonal() {
        let (points, weights) = gauss_quadrature_points(12);

        for i in 2..=8 {
            for j in 2..=8 {
                let inner: f64 = points
                    .iter()
                    .zip(weights.iter())
                    .map(|(x, w)| {
                        let x = Jet::variable(*x, 0);
                        lobatto(i, x).gradient[0] * lobatto(j, x).gradient[0] * w
                    })
                    .sum();

                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((inner - expected).abs() < 1e-10);
            }
        }
    }
}
