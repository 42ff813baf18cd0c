/// Reference element shapes, their vertex coordinates and canonical sub-entity lists
pub mod shape;
/// The function spaces a field can be discretized in
pub mod category;
/// Bidirectional lookup between symbolic names and numeric type indices
pub mod registry;
/// Local vertex orderings used to make shared edge and face functions agree across elements
pub mod orientation;

pub use category::{FieldCategory, ALL_CATEGORIES};
pub use orientation::Orientation;
pub use registry::{CategoryRegistry, RegisteredType, ShapeRegistry, TypeRegistry};
pub use shape::{ElementShape, SubEntity, ALL_SHAPES};
