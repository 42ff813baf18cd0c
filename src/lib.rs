//! Hierarchical finite element shape functions
//!
//! Generates ordered sets of hierarchical basis functions for point, line, triangle, quadrangle, tetrahedron,
//! hexahedron, prism and pyramid reference elements in the H1 (scalar and vector), H(curl), H(div) and
//! discontinuous H1 spaces, lays their degrees of freedom out by sub-entity, and caches both per
//! (shape, category, order).
//!
//! ```
//! use fem_shapes::prelude::*;
//!
//! let shapes = ShapeRegistry::new();
//! let tet = shapes.lookup("tetrahedron").unwrap();
//!
//! let cache = BasisCache::new();
//! let entry = cache.get_or_create(tet, FieldCategory::H1, 3).unwrap();
//!
//! assert_eq!(entry.set.len(), 20);
//! assert_eq!(entry.numbering.count(SubEntity::Interior), 0);
//! assert_eq!(entry.numbering.count(SubEntity::Face(2)), 1);
//!
//! let orientation = Orientation::from_global_vertices(tet, &[12, 40, 7, 3]).unwrap();
//! let values = entry.set.evaluate(&[0.1, 0.2, 0.3], &orientation).unwrap();
//! assert_eq!(values.len(), 20);
//! ```

/// Hierarchical basis function generation and evaluation
pub mod basis;
/// Memoization of generated basis sets and their DOF layouts
pub mod cache;
/// Local degree of freedom layout by sub-entity
pub mod dof;
/// Element shapes, field categories, their registries, and element orientation
pub mod element;
/// Error types
pub mod error;
/// Quadrature over the reference elements
pub mod integration;

pub use basis::{generate, BasisFunctionSet, BasisKey};
pub use cache::{BasisCache, CachedBasis};
pub use dof::{layout, DofNumbering};
pub use element::{ElementShape, FieldCategory, Orientation};
pub use error::Error;

/// Commonly used items
pub mod prelude {
    pub use crate::basis::{
        check_order, generate, order_range, BasisFunction, BasisFunctionSet, BasisKey,
        EvaluatedBasis, FunctionKind, MAX_POLYNOMIAL_ORDER,
    };
    pub use crate::cache::{BasisCache, CachedBasis};
    pub use crate::dof::{layout, DofNumbering, EntityDofs};
    pub use crate::element::{
        CategoryRegistry, ElementShape, FieldCategory, Orientation, ShapeRegistry, SubEntity,
        TypeRegistry, ALL_CATEGORIES, ALL_SHAPES,
    };
    pub use crate::error::{
        Error, EvaluationError, OrientationError, UnknownTypeError, UnsupportedConfigurationError,
    };
    pub use crate::integration::QuadratureRule;
}
