use crate::element::{ElementShape, FieldCategory};
use crate::error::UnsupportedConfigurationError;
use std::ops::RangeInclusive;

/// Forward-mode derivative carriers used to evaluate shape functions with exact derivatives
pub mod jet;
/// Legendre and Lobatto polynomial families evaluated on [jet::Jet]s
pub mod polynomials;
/// Basis function descriptors and ordered sets of them
pub mod function;
/// Construction of hierarchical basis function sets
pub mod generator;
/// Evaluation of basis function sets at reference coordinates
pub mod evaluation;

mod coords;
mod h1;
mod hcurl;
mod hdiv;

pub use evaluation::EvaluatedBasis;
pub use function::{BasisFunction, BasisFunctionSet, BasisKey, FunctionKind};
pub use generator::generate;

/// Highest polynomial order supported by any (shape, category) pair
pub const MAX_POLYNOMIAL_ORDER: usize = 10;

/// Pyramid functions are rational in `1 - z`; points closer than this to the apex are evaluated this far below it
pub const APEX_GUARD: f64 = 1e-10;

/// The range of orders for which a (shape, category) pair has a basis
///
/// ```
/// use fem_shapes::prelude::*;
///
/// assert_eq!(order_range(ElementShape::Triangle, FieldCategory::H1), Ok(1..=MAX_POLYNOMIAL_ORDER));
/// assert_eq!(order_range(ElementShape::Tetrahedron, FieldCategory::HDiv), Ok(0..=0));
/// assert!(order_range(ElementShape::Pyramid, FieldCategory::HCurl).is_err());
/// ```
pub fn order_range(
    shape: ElementShape,
    category: FieldCategory,
) -> Result<RangeInclusive<usize>, UnsupportedConfigurationError> {
    use ElementShape::*;
    use FieldCategory::*;

    let unsupported = Err(UnsupportedConfigurationError::UnsupportedPairing { shape, category });

    match (category, shape) {
        (H1 | H1Xy | H1Xyz, _) => Ok(1..=MAX_POLYNOMIAL_ORDER),
        (H1Discontinuous, _) => Ok(0..=MAX_POLYNOMIAL_ORDER),
        (HCurl, Line | Triangle | Quadrangle | Tetrahedron | Hexahedron) => {
            Ok(0..=MAX_POLYNOMIAL_ORDER)
        }
        (HCurl, Prism) => Ok(0..=0),
        (HCurl, Point | Pyramid) => unsupported,
        (HDiv, Triangle | Quadrangle) => Ok(0..=MAX_POLYNOMIAL_ORDER),
        (HDiv, Tetrahedron | Hexahedron) => Ok(0..=0),
        (HDiv, Point | Line | Prism | Pyramid) => unsupported,
    }
}

/// Check that a (shape, category, order) request has a basis
pub fn check_order(
    shape: ElementShape,
    category: FieldCategory,
    order: usize,
) -> Result<(), UnsupportedConfigurationError> {
    let range = order_range(shape, category)?;

    if range.contains(&order) {
        Ok(())
    } else {
        Err(UnsupportedConfigurationError::OrderOutOfRange {
            shape,
            category,
            order,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
