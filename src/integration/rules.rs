use super::glq::gauss_quadrature_on;
use crate::element::ElementShape;

/// A quadrature rule over a reference element
///
/// Tensor-product shapes use tensor Gauss-Legendre rules. Simplices and pyramids use Gauss-Legendre rules collapsed
/// onto the shape (Duffy transform), with extra points in the collapsed directions to absorb the Jacobian.
///
/// ```
/// use fem_shapes::prelude::*;
///
/// // ∫ x y over the reference triangle
/// let rule = QuadratureRule::new(ElementShape::Triangle, 2);
/// let integral = rule.integrate(|p| p[0] * p[1]);
/// assert!((integral - 1.0 / 24.0).abs() < 1e-14);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule {
    shape: ElementShape,
    degree: usize,
    points: Vec<[f64; 3]>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    /// A rule that integrates polynomials of total degree `degree` exactly over the reference `shape`
    pub fn new(shape: ElementShape, degree: usize) -> Self {
        let n = degree / 2 + 1;
        let n_collapsed = (degree + 2) / 2 + 1;

        let mut points = Vec::new();
        let mut weights = Vec::new();

        match shape {
            ElementShape::Point => {
                points.push([0.0; 3]);
                weights.push(1.0);
            }
            ElementShape::Line => {
                let (x, w) = gauss_quadrature_on(n, -1.0, 1.0);
                for (xi, wi) in x.iter().zip(w.iter()) {
                    points.push([*xi, 0.0, 0.0]);
                    weights.push(*wi);
                }
            }
            ElementShape::Quadrangle => {
                let (x, w) = gauss_quadrature_on(n, -1.0, 1.0);
                for (yj, wj) in x.iter().zip(w.iter()) {
                    for (xi, wi) in x.iter().zip(w.iter()) {
                        points.push([*xi, *yj, 0.0]);
                        weights.push(wi * wj);
                    }
                }
            }
            ElementShape::Hexahedron => {
                let (x, w) = gauss_quadrature_on(n, -1.0, 1.0);
                for (zk, wk) in x.iter().zip(w.iter()) {
                    for (yj, wj) in x.iter().zip(w.iter()) {
                        for (xi, wi) in x.iter().zip(w.iter()) {
                            points.push([*xi, *yj, *zk]);
                            weights.push(wi * wj * wk);
                        }
                    }
                }
            }
            ElementShape::Triangle => {
                for ([x, y], w) in collapsed_triangle(n_collapsed) {
                    points.push([x, y, 0.0]);
                    weights.push(w);
                }
            }
            ElementShape::Prism => {
                let (z, wz) = gauss_quadrature_on(n, -1.0, 1.0);
                let triangle = collapsed_triangle(n_collapsed);
                for (zk, wk) in z.iter().zip(wz.iter()) {
                    for ([x, y], w) in triangle.iter() {
                        points.push([*x, *y, *zk]);
                        weights.push(w * wk);
                    }
                }
            }
            ElementShape::Tetrahedron => {
                // x = u (1 - v)(1 - w), y = v (1 - w), z = w
                let (u, wu) = gauss_quadrature_on(n_collapsed, 0.0, 1.0);
                for (wk, wwk) in u.iter().zip(wu.iter()) {
                    for (vj, wvj) in u.iter().zip(wu.iter()) {
                        for (ui, wui) in u.iter().zip(wu.iter()) {
                            points.push([ui * (1.0 - vj) * (1.0 - wk), vj * (1.0 - wk), *wk]);
                            weights.push(wui * wvj * wwk * (1.0 - vj) * (1.0 - wk).powi(2));
                        }
                    }
                }
            }
            ElementShape::Pyramid => {
                // x = u (1 - w), y = v (1 - w), z = w
                let (u, wu) = gauss_quadrature_on(n_collapsed, -1.0, 1.0);
                let (z, wz) = gauss_quadrature_on(n_collapsed, 0.0, 1.0);
                for (zk, wk) in z.iter().zip(wz.iter()) {
                    for (vj, wj) in u.iter().zip(wu.iter()) {
                        for (ui, wi) in u.iter().zip(wu.iter()) {
                            points.push([ui * (1.0 - zk), vj * (1.0 - zk), *zk]);
                            weights.push(wi * wj * wk * (1.0 - zk).powi(2));
                        }
                    }
                }
            }
        }

        log::trace!(
            "{}-point quadrature rule of degree {} on {} elements",
            points.len(),
            degree,
            shape
        );

        Self {
            shape,
            degree,
            points,
            weights,
        }
    }

    pub fn shape(&self) -> ElementShape {
        self.shape
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Apply the rule to a function of reference coordinates
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(&[f64; 3]) -> f64,
    {
        self.points
            .iter()
            .zip(self.weights.iter())
            .map(|(p, w)| integrand(p) * w)
            .sum()
    }
}

/// x = u (1 - v), y = v
fn collapsed_triangle(n: usize) -> Vec<([f64; 2], f64)> {
    let (u, wu) = gauss_quadrature_on(n, 0.0, 1.0);
    let mut rule = Vec::with_capacity(n * n);
    for (vj, wj) in u.iter().zip(wu.iter()) {
        for (ui, wi) in u.iter().zip(wu.iter()) {
            rule.push(([ui * (1.0 - vj), *vj], wi * wj * (1.0 - vj)));
        }
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ALL_SHAPES;

    const TOL: f64 = 1e-13;

    fn volume(shape: ElementShape) -> f64 {
        match shape {
            ElementShape::Point => 1.0,
            ElementShape::Line => 2.0,
            ElementShape::Triangle => 0.5,
            ElementShape::Quadrangle => 4.0,
            ElementShape::Tetrahedron => 1.0 / 6.0,
            ElementShape::Hexahedron => 8.0,
            ElementShape::Prism => 1.0,
            ElementShape::Pyramid => 4.0 / 3.0,
        }
    }

    #[test]
    fn reference_volumes() {
        for shape in ALL_SHAPES {
            for degree in 0..6 {
                let rule = QuadratureRule::new(shape, degree);
                assert!(!rule.is_empty());
                assert!((rule.integrate(|_| 1.0) - volume(shape)).abs() < TOL, "{}", shape);
            }
        }
    }

    #[test]
    fn points_lie_inside_the_element() {
        for shape in ALL_SHAPES {
            for p in QuadratureRule::new(shape, 4).points() {
                let inside = match shape {
                    ElementShape::Point => true,
                    ElementShape::Line | ElementShape::Quadrangle | ElementShape::Hexahedron => {
                        p.iter().all(|x| x.abs() < 1.0)
                    }
                    ElementShape::Triangle => p[0] > 0.0 && p[1] > 0.0 && p[0] + p[1] < 1.0,
                    ElementShape::Tetrahedron => {
                        p.iter().all(|x| *x > 0.0) && p[0] + p[1] + p[2] < 1.0
                    }
                    ElementShape::Prism => {
                        p[0] > 0.0 && p[1] > 0.0 && p[0] + p[1] < 1.0 && p[2].abs() < 1.0
                    }
                    ElementShape::Pyramid => {
                        p[2] > 0.0 && p[2] < 1.0 && p[0].abs() < 1.0 - p[2] && p[1].abs() < 1.0 - p[2]
                    }
                };
                assert!(inside, "{:?} is outside of the reference {}", p, shape);
            }
        }
    }

    #[test]
    fn polynomial_exactness() {
        let cases: [(ElementShape, usize, fn(&[f64; 3]) -> f64, f64); 7] = [
            (ElementShape::Line, 6, |p| p[0].powi(6), 2.0 / 7.0),
            (ElementShape::Triangle, 4, |p| p[0].powi(2) * p[1].powi(2), 1.0 / 180.0),
            (ElementShape::Quadrangle, 6, |p| p[0].powi(2) * p[1].powi(4), 4.0 / 15.0),
            (ElementShape::Tetrahedron, 3, |p| p[0].powi(2) * p[1], 1.0 / 360.0),
            (
                ElementShape::Hexahedron,
                12,
                |p| p[0].powi(2) * p[1].powi(4) * p[2].powi(6),
                8.0 / 105.0,
            ),
            (ElementShape::Prism, 3, |p| p[0] * p[2].powi(2), 1.0 / 9.0),
            (ElementShape::Pyramid, 2, |p| p[0].powi(2), 4.0 / 15.0),
        ];

        for (shape, degree, f, exact) in cases {
            let integral = QuadratureRule::new(shape, degree).integrate(f);
            assert!((integral - exact).abs() < TOL, "{}: {} != {}", shape, integral, exact);
        }

        let pyramid = QuadratureRule::new(ElementShape::Pyramid, 1);
        assert!((pyramid.integrate(|p| p[2]) - 1.0 / 3.0).abs() < TOL);
    }
}
