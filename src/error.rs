use crate::element::{ElementShape, FieldCategory};
use thiserror::Error;

/// A symbolic name or numeric index that the [TypeRegistry](crate::element::TypeRegistry) does not know
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnknownTypeError {
    #[error("unknown {kind} type name '{name}'")]
    Name { kind: &'static str, name: String },
    #[error("unknown {kind} type number {number}")]
    Number { kind: &'static str, number: usize },
}

impl UnknownTypeError {
    /// Report the error and terminate the process
    ///
    /// For call sites where an unknown type indicates a programming error that must not be recovered from.
    pub fn abort(self) -> ! {
        log::error!("Error in basis function registry: {}", self);
        std::process::abort()
    }
}

/// A (shape, category, order) request that has no basis function set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnsupportedConfigurationError {
    #[error("order {order} is outside of the supported range [{min}, {max}] for '{category}' functions on '{shape}' elements")]
    OrderOutOfRange {
        shape: ElementShape,
        category: FieldCategory,
        order: usize,
        min: usize,
        max: usize,
    },
    #[error("'{category}' functions are not available on '{shape}' elements")]
    UnsupportedPairing {
        shape: ElementShape,
        category: FieldCategory,
    },
}

/// Malformed input to [Orientation::from_global_vertices](crate::element::Orientation::from_global_vertices)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrientationError {
    #[error("'{shape}' elements have {expected} vertices; got {found}")]
    VertexCount {
        shape: ElementShape,
        expected: usize,
        found: usize,
    },
    #[error("global vertex {0} appears more than once")]
    DuplicateVertex(usize),
}

/// Problems with the arguments of a basis evaluation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("orientation describes a '{found}' element; basis is defined on '{expected}'")]
    ShapeMismatch {
        expected: ElementShape,
        found: ElementShape,
    },
    #[error("reference point has {found} coordinates; '{shape}' elements need at least {expected}")]
    PointDimension {
        shape: ElementShape,
        expected: usize,
        found: usize,
    },
}

/// Any error produced by this crate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),
    #[error(transparent)]
    UnsupportedConfiguration(#[from] UnsupportedConfigurationError),
    #[error(transparent)]
    Orientation(#[from] OrientationError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
