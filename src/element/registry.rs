use super::{ElementShape, FieldCategory};
use crate::error::UnknownTypeError;

/// A closed set of types that can be looked up by name or number
pub trait RegisteredType: Copy + 'static {
    /// Human readable description of the type family (used in diagnostics)
    const KIND: &'static str;

    /// Every member of the family, in type-number order
    fn all() -> &'static [Self];

    fn name(&self) -> &'static str;
}

/// Immutable bidirectional mapping between symbolic type names and their numbers
///
/// The table is filled once at construction and never changes, so a registry can be shared freely between threads.
///
/// ```
/// use fem_shapes::prelude::*;
///
/// let shapes = ShapeRegistry::new();
/// assert_eq!(shapes.type_number("tetrahedron"), Ok(4));
/// assert_eq!(shapes.type_name(2), Ok("triangle"));
/// assert_eq!(shapes.get(5), Ok(ElementShape::Hexahedron));
///
/// assert!(shapes.type_number("not-a-real-shape").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct TypeRegistry<T: RegisteredType> {
    entries: Vec<(&'static str, T)>,
}

/// Registry of [ElementShape]s
pub type ShapeRegistry = TypeRegistry<ElementShape>;
/// Registry of [FieldCategory]s
pub type CategoryRegistry = TypeRegistry<FieldCategory>;

impl<T: RegisteredType> TypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: T::all().iter().map(|t| (t.name(), *t)).collect(),
        }
    }

    /// Get the number associated with a type name
    pub fn type_number(&self, name: &str) -> Result<usize, UnknownTypeError> {
        self.entries
            .iter()
            .position(|(entry_name, _)| *entry_name == name)
            .ok_or_else(|| UnknownTypeError::Name {
                kind: T::KIND,
                name: name.to_string(),
            })
    }

    /// Get the name associated with a type number
    pub fn type_name(&self, number: usize) -> Result<&'static str, UnknownTypeError> {
        self.entries
            .get(number)
            .map(|(name, _)| *name)
            .ok_or(UnknownTypeError::Number {
                kind: T::KIND,
                number,
            })
    }

    /// Get the type associated with a name
    pub fn lookup(&self, name: &str) -> Result<T, UnknownTypeError> {
        self.type_number(name).map(|number| self.entries[number].1)
    }

    /// Get the type associated with a number
    pub fn get(&self, number: usize) -> Result<T, UnknownTypeError> {
        self.entries
            .get(number)
            .map(|(_, t)| *t)
            .ok_or(UnknownTypeError::Number {
                kind: T::KIND,
                number,
            })
    }

    /// Iterate over `(number, name)` pairs in number order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(number, (name, _))| (number, *name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: RegisteredType> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn parse_registered<T: RegisteredType>(name: &str) -> Result<T, UnknownTypeError> {
    T::all()
        .iter()
        .find(|t| t.name() == name)
        .copied()
        .ok_or_else(|| UnknownTypeError::Name {
            kind: T::KIND,
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_numbers_and_names() {
        let shapes = ShapeRegistry::new();
        let expected = [
            "point",
            "line",
            "triangle",
            "quadrangle",
            "tetrahedron",
            "hexahedron",
            "prism",
            "pyramid",
        ];

        assert_eq!(shapes.len(), expected.len());
        for (number, name) in expected.iter().enumerate() {
            assert_eq!(shapes.type_number(name), Ok(number));
            assert_eq!(shapes.type_name(number), Ok(*name));
        }
        assert!(shapes.iter().map(|(_, name)| name).eq(expected.iter().copied()));
    }

    #[test]
    fn category_numbers_and_names() {
        let categories = CategoryRegistry::new();
        assert_eq!(categories.type_number("h1"), Ok(0));
        assert_eq!(categories.lookup("hcurl"), Ok(FieldCategory::HCurl));
        assert_eq!(categories.type_name(5), Ok("h1d"));
    }

    #[test]
    fn unknown_name() {
        let shapes = ShapeRegistry::new();
        assert_eq!(
            shapes.type_number("not-a-real-shape"),
            Err(UnknownTypeError::Name {
                kind: "element shape",
                name: String::from("not-a-real-shape"),
            })
        );
        assert!(shapes.lookup("Triangle").is_err());
    }

    #[test]
    fn unknown_number() {
        let categories = CategoryRegistry::new();
        assert_eq!(
            categories.type_name(6),
            Err(UnknownTypeError::Number {
                kind: "field category",
                number: 6
            })
        );
        assert!(categories.get(usize::MAX).is_err());
    }
}
