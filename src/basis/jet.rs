use nalgebra::{Matrix3, Vector3};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar value together with its exact gradient and Hessian with respect to the reference coordinates
///
/// Arithmetic on `Jet`s propagates derivatives with the product and quotient rules, so any closed-form
/// expression built from them carries exact first and second derivatives.
///
/// ```
/// use fem_shapes::basis::jet::Jet;
///
/// let x = Jet::variable(2.0, 0);
/// let y = Jet::variable(3.0, 1);
/// let f = x * x * y;
///
/// assert_eq!(f.value, 12.0);
/// assert_eq!(f.gradient[0], 12.0);
/// assert_eq!(f.gradient[1], 4.0);
/// assert_eq!(f.hessian[(0, 1)], 4.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jet {
    pub value: f64,
    pub gradient: Vector3<f64>,
    pub hessian: Matrix3<f64>,
}

impl Jet {
    pub fn constant(value: f64) -> Self {
        Self {
            value,
            gradient: Vector3::zeros(),
            hessian: Matrix3::zeros(),
        }
    }

    /// The reference coordinate along `axis`, evaluated at `value`
    pub fn variable(value: f64, axis: usize) -> Self {
        let mut gradient = Vector3::zeros();
        gradient[axis] = 1.0;

        Self {
            value,
            gradient,
            hessian: Matrix3::zeros(),
        }
    }

    pub fn recip(&self) -> Self {
        let inv = 1.0 / self.value;
        let inv_sq = inv * inv;

        Self {
            value: inv,
            gradient: self.gradient * -inv_sq,
            hessian: self.gradient * self.gradient.transpose() * (2.0 * inv_sq * inv)
                - self.hessian * inv_sq,
        }
    }
}

impl Add for Jet {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
            gradient: self.gradient + other.gradient,
            hessian: self.hessian + other.hessian,
        }
    }
}

impl Sub for Jet {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            value: self.value - other.value,
            gradient: self.gradient - other.gradient,
            hessian: self.hessian - other.hessian,
        }
    }
}

impl Mul for Jet {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self {
            value: self.value * other.value,
            gradient: self.gradient * other.value + other.gradient * self.value,
            hessian: self.hessian * other.value
                + other.hessian * self.value
                + self.gradient * other.gradient.transpose()
                + other.gradient * self.gradient.transpose(),
        }
    }
}

impl Div for Jet {
    type Output = Self;
    fn div(self, divisor: Self) -> Self {
        self * divisor.recip()
    }
}

impl Neg for Jet {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            gradient: -self.gradient,
            hessian: -self.hessian,
        }
    }
}

impl Add<f64> for Jet {
    type Output = Self;
    fn add(mut self, offset: f64) -> Self {
        self.value += offset;
        self
    }
}

impl Sub<f64> for Jet {
    type Output = Self;
    fn sub(mut self, offset: f64) -> Self {
        self.value -= offset;
        self
    }
}

impl Mul<f64> for Jet {
    type Output = Self;
    fn mul(self, coefficient: f64) -> Self {
        Self {
            value: self.value * coefficient,
            gradient: self.gradient * coefficient,
            hessian: self.hessian * coefficient,
        }
    }
}

impl Div<f64> for Jet {
    type Output = Self;
    fn div(self, divisor: f64) -> Self {
        self * (1.0 / divisor)
    }
}

impl Add<Jet> for f64 {
    type Output = Jet;
    fn add(self, jet: Jet) -> Jet {
        jet + self
    }
}

impl Sub<Jet> for f64 {
    type Output = Jet;
    fn sub(self, jet: Jet) -> Jet {
        -jet + self
    }
}

impl Mul<Jet> for f64 {
    type Output = Jet;
    fn mul(self, jet: Jet) -> Jet {
        jet * self
    }
}

/// A vector value together with its exact Jacobian
///
/// `jacobian[(c, k)]` is the derivative of component `c` with respect to reference coordinate `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VecJet {
    pub value: Vector3<f64>,
    pub jacobian: Matrix3<f64>,
}

impl VecJet {
    /// The gradient of a scalar (its Jacobian is the scalar's Hessian)
    pub fn gradient_of(f: &Jet) -> Self {
        Self {
            value: f.gradient,
            jacobian: f.hessian,
        }
    }

    /// A scalar placed in a single vector component
    pub fn along(f: &Jet, component: usize) -> Self {
        let mut value = Vector3::zeros();
        value[component] = f.value;

        let mut jacobian = Matrix3::zeros();
        jacobian.set_row(component, &f.gradient.transpose());

        Self { value, jacobian }
    }

    /// Multiply by a scalar field
    pub fn scaled(&self, s: &Jet) -> Self {
        Self {
            value: self.value * s.value,
            jacobian: self.jacobian * s.value + self.value * s.gradient.transpose(),
        }
    }

    pub fn cross(&self, other: &Self) -> Self {
        let mut jacobian = Matrix3::zeros();
        for k in 0..3 {
            let d_self = self.jacobian.column(k).into_owned();
            let d_other = other.jacobian.column(k).into_owned();
            jacobian.set_column(
                k,
                &(d_self.cross(&other.value) + self.value.cross(&d_other)),
            );
        }

        Self {
            value: self.value.cross(&other.value),
            jacobian,
        }
    }

    /// Rotate the in-plane components by -90°: `(a, b) -> (b, -a)`
    pub fn rotated(&self) -> Self {
        let mut rotated = *self;

        rotated.value[0] = self.value[1];
        rotated.value[1] = -self.value[0];
        rotated.jacobian.set_row(0, &self.jacobian.row(1));
        rotated.jacobian.set_row(1, &(-self.jacobian.row(0)));

        rotated
    }

    pub fn curl(&self) -> Vector3<f64> {
        let j = &self.jacobian;
        Vector3::new(
            j[(2, 1)] - j[(1, 2)],
            j[(0, 2)] - j[(2, 0)],
            j[(1, 0)] - j[(0, 1)],
        )
    }

    pub fn divergence(&self) -> f64 {
        self.jacobian.trace()
    }
}

impl Add for VecJet {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
            jacobian: self.jacobian + other.jacobian,
        }
    }
}

impl Sub for VecJet {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            value: self.value - other.value,
            jacobian: self.jacobian - other.jacobian,
        }
    }
}

impl Mul<f64> for VecJet {
    type Output = Self;
    fn mul(self, coefficient: f64) -> Self {
        Self {
            value: self.value * coefficient,
            jacobian: self.jacobian * coefficient,
        }
    }
}
