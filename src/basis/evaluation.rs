use super::coords::Coords;
use super::function::{BasisFunction, BasisFunctionSet};
use super::jet::VecJet;
use super::{h1, hcurl, hdiv};
use crate::element::{FieldCategory, Orientation};
use crate::error::EvaluationError;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

/// The values and exact reference-coordinate derivatives of every function in a [BasisFunctionSet] at one point
///
/// Scalar functions store their value in the first vector component, and their gradient in the first Jacobian row.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedBasis {
    components: usize,
    fields: Vec<VecJet>,
}

impl EvaluatedBasis {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of meaningful vector components
    pub fn components(&self) -> usize {
        self.components
    }

    /// Value of a scalar function (or the first component of a vector function)
    ///
    /// # Panics
    /// This and the other per-function accessors panic if `function` is not smaller than [EvaluatedBasis::len]
    pub fn value(&self, function: usize) -> f64 {
        self.fields[function].value[0]
    }

    /// Gradient of a scalar function (or of the first component of a vector function)
    ///
    /// # Panics
    /// If `function` is not smaller than [EvaluatedBasis::len]
    pub fn gradient(&self, function: usize) -> Vector3<f64> {
        self.fields[function].jacobian.row(0).transpose()
    }

    pub fn vector_value(&self, function: usize) -> Vector3<f64> {
        self.fields[function].value
    }

    /// `jacobian[(c, k)]` is the derivative of component `c` with respect to reference coordinate `k`
    ///
    /// # Panics
    /// If `function` is not smaller than [EvaluatedBasis::len]
    pub fn jacobian(&self, function: usize) -> Matrix3<f64> {
        self.fields[function].jacobian
    }

    /// Curl of a vector function (only the third component is meaningful in 2D)
    pub fn curl(&self, function: usize) -> Vector3<f64> {
        self.fields[function].curl()
    }

    pub fn divergence(&self, function: usize) -> f64 {
        self.fields[function].divergence()
    }
}

impl BasisFunctionSet {
    /// Evaluate every function in the set at a reference point
    ///
    /// The `orientation` describes the element the functions are evaluated on (use [Orientation::identity] for a
    /// standalone reference element). Discontinuous functions ignore it.
    ///
    /// ```
    /// use fem_shapes::prelude::*;
    ///
    /// let set = generate(ElementShape::Quadrangle, FieldCategory::H1, 1).unwrap();
    /// let eval = set.evaluate(&[0.5, -0.5], &Orientation::identity(ElementShape::Quadrangle)).unwrap();
    ///
    /// let total: f64 = (0..eval.len()).map(|f| eval.value(f)).sum();
    /// assert!((total - 1.0).abs() < 1e-12);
    ///
    /// // vertex 1 sits at (1, -1)
    /// assert!((eval.value(1) - 0.5625).abs() < 1e-12);
    /// assert!((eval.gradient(1)[0] - 0.375).abs() < 1e-12);
    /// ```
    pub fn evaluate(
        &self,
        point: &[f64],
        orientation: &Orientation,
    ) -> Result<EvaluatedBasis, EvaluationError> {
        let shape = self.shape();

        if orientation.shape() != shape {
            return Err(EvaluationError::ShapeMismatch {
                expected: shape,
                found: orientation.shape(),
            });
        }
        if point.len() < shape.dimension() {
            return Err(EvaluationError::PointDimension {
                shape,
                expected: shape.dimension(),
                found: point.len(),
            });
        }

        let mut padded = [0.0; 3];
        for (p, x) in padded.iter_mut().zip(point.iter()) {
            *p = *x;
        }
        let coords = Coords::new(shape, padded);

        let identity;
        let orientation = if self.category() == FieldCategory::H1Discontinuous {
            identity = Orientation::identity(shape);
            &identity
        } else {
            orientation
        };

        Ok(EvaluatedBasis {
            components: self.components(),
            fields: self
                .functions
                .iter()
                .map(|bf| self.evaluate_function(bf, &coords, orientation))
                .collect(),
        })
    }

    /// Evaluate the set at many reference points (in parallel)
    pub fn tabulate(
        &self,
        points: &[[f64; 3]],
        orientation: &Orientation,
    ) -> Result<Vec<EvaluatedBasis>, EvaluationError> {
        points
            .par_iter()
            .map(|point| self.evaluate(point, orientation))
            .collect()
    }

    fn evaluate_function(&self, bf: &BasisFunction, c: &Coords, o: &Orientation) -> VecJet {
        let shape = self.shape();
        match self.category() {
            FieldCategory::H1
            | FieldCategory::H1Xy
            | FieldCategory::H1Xyz
            | FieldCategory::H1Discontinuous => VecJet::along(
                &h1::shape_function(shape, bf.kind, bf.anchor, c, o),
                bf.component as usize,
            ),
            FieldCategory::HCurl => hcurl::shape_function(shape, bf.kind, bf.anchor, c, o),
            FieldCategory::HDiv => hdiv::shape_function(shape, bf.kind, bf.anchor, c, o),
        }
    }
}
