use super::registry::{parse_registered, RegisteredType};
use super::ElementShape;
use crate::error::UnknownTypeError;
use std::{fmt, str::FromStr};

/// The function space (and associated continuity condition) a field is discretized in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldCategory {
    /// Scalar nodal functions; fully continuous
    H1,
    /// Two-component vector field built from H1 functions
    H1Xy,
    /// Three-component vector field built from H1 functions
    H1Xyz,
    /// Edge-based vector functions; tangential continuity
    HCurl,
    /// Face-normal vector functions; normal continuity
    HDiv,
    /// Scalar functions without inter-element continuity
    H1Discontinuous,
}

/// Every [FieldCategory] in registry order
pub const ALL_CATEGORIES: [FieldCategory; 6] = [
    FieldCategory::H1,
    FieldCategory::H1Xy,
    FieldCategory::H1Xyz,
    FieldCategory::HCurl,
    FieldCategory::HDiv,
    FieldCategory::H1Discontinuous,
];

impl FieldCategory {
    /// The registry name of the category
    pub fn name(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H1Xy => "h1xy",
            Self::H1Xyz => "h1xyz",
            Self::HCurl => "hcurl",
            Self::HDiv => "hdiv",
            Self::H1Discontinuous => "h1d",
        }
    }

    /// Number of vector components of a field of this category on the given shape
    pub fn components(&self, shape: ElementShape) -> usize {
        match self {
            Self::H1 | Self::H1Discontinuous => 1,
            Self::H1Xy => 2,
            Self::H1Xyz => 3,
            Self::HCurl | Self::HDiv => shape.dimension().max(1),
        }
    }

    /// Whether the functions of this category are built from scalar H1 functions
    pub fn is_nodal(&self) -> bool {
        matches!(
            self,
            Self::H1 | Self::H1Xy | Self::H1Xyz | Self::H1Discontinuous
        )
    }
}

impl RegisteredType for FieldCategory {
    const KIND: &'static str = "field category";

    fn all() -> &'static [Self] {
        &ALL_CATEGORIES
    }

    fn name(&self) -> &'static str {
        FieldCategory::name(self)
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FieldCategory {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_registered(s)
    }
}
