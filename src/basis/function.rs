use crate::element::{ElementShape, FieldCategory, SubEntity};
use std::fmt;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// The closed-form family a basis function belongs to, together with its polynomial indices
///
/// The indices are interpreted in the frame of the function's anchor entity (see [BasisFunction::anchor]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// The constant function
    Constant,
    /// Nodal (linear, bilinear, trilinear, prismatic or pyramidal) vertex function
    Vertex,
    /// Edge function whose trace along the oriented edge is the Lobatto bubble `l_k`
    Edge { k: u8 },
    /// Triangular face bubble of degree `i + j + 3`
    TriangleFace { i: u8, j: u8 },
    /// Quadrilateral face bubble `l_i(ξ) l_j(η)`
    QuadFace { i: u8, j: u8 },
    /// Interior (cell) bubble; indices are shape specific
    Cell { i: u8, j: u8, k: u8 },
    /// Lowest order (Whitney) edge function
    WhitneyEdge,
    /// Gradient of the H1 edge function of degree `k`
    EdgeGradient { k: u8 },
    /// Gradient of an H1 face bubble
    FaceGradient { i: u8, j: u8 },
    /// Rotational combination of the two factors of a face bubble
    FaceRotational { i: u8, j: u8 },
    /// A Whitney edge function of the face extended by the polynomial `λc P_j(2λc - 1)`
    FaceWhitney { j: u8 },
    /// Directional quadrilateral face function `l_k(η) ∇ξ` (`dir = 0`) or `l_k(ξ) ∇η` (`dir = 1`)
    FaceDirectional { dir: u8, k: u8 },
    /// Gradient of an H1 interior bubble
    CellGradient { i: u8, j: u8, k: u8 },
    /// One of the two rotational combinations of the three factors of an interior bubble
    CellRotational { variant: u8, i: u8, j: u8, k: u8 },
    /// A Whitney edge function of the cell extended by face and interior polynomials
    CellWhitney { j: u8, k: u8 },
    /// Directional hexahedral interior function along reference axis `dir`
    CellDirectional { dir: u8, a: u8, b: u8 },
    /// Lowest order face flux function
    FaceFlux,
}

/// Description of a single basis function in a [BasisFunctionSet]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BasisFunction {
    /// The sub-entity the function's degree of freedom is attached to
    pub tag: SubEntity,
    /// The sub-entity whose geometry the function is built on
    ///
    /// This only differs from `tag` for discontinuous functions, which are all tagged with the element itself
    pub anchor: SubEntity,
    pub kind: FunctionKind,
    /// The order at which the function first appears in the hierarchy
    pub shell: u8,
    /// Vector component for functions of the `h1xy` and `h1xyz` categories
    pub component: u8,
}

impl fmt::Display for BasisFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} on {} (shell {}, component {})",
            self.kind, self.anchor, self.shell, self.component
        )
    }
}

/// Key used to identify a [BasisFunctionSet]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisKey {
    pub shape: ElementShape,
    pub category: FieldCategory,
    pub order: usize,
}

impl BasisKey {
    pub fn new(shape: ElementShape, category: FieldCategory, order: usize) -> Self {
        Self {
            shape,
            category,
            order,
        }
    }
}

impl fmt::Display for BasisKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} order {}", self.shape, self.category, self.order)
    }
}

/// The ordered collection of basis functions for one (shape, category, order)
///
/// Functions are ordered by the shell (order) at which they appear, so the set of order `k - 1` is a
/// prefix of the set of order `k`. Within a shell, vertex functions come first, followed by edge, face,
/// and interior functions, each group in the shape's canonical entity order.
///
/// Sets are produced by [generate](super::generate) and are independent of any particular element's
/// orientation; the [Orientation](crate::element::Orientation) is supplied at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasisFunctionSet {
    pub(crate) key: BasisKey,
    pub(crate) functions: Vec<BasisFunction>,
}

impl BasisFunctionSet {
    pub fn key(&self) -> BasisKey {
        self.key
    }

    pub fn shape(&self) -> ElementShape {
        self.key.shape
    }

    pub fn category(&self) -> FieldCategory {
        self.key.category
    }

    pub fn order(&self) -> usize {
        self.key.order
    }

    /// Number of vector components of every function in the set
    pub fn components(&self) -> usize {
        self.key.category.components(self.key.shape)
    }

    pub fn functions(&self) -> &[BasisFunction] {
        &self.functions
    }

    pub fn iter(&self) -> impl Iterator<Item = &BasisFunction> + '_ {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Number of functions whose degree of freedom is attached to the given sub-entity
    pub fn count_on(&self, entity: SubEntity) -> usize {
        self.functions.iter().filter(|bf| bf.tag == entity).count()
    }

    /// Check if `lower` is a hierarchical prefix of this set
    ///
    /// When this holds, coefficients of a `lower` field can be reused directly as the leading coefficients in this set.
    pub fn extends(&self, lower: &Self) -> bool {
        self.key.shape == lower.key.shape
            && self.key.category == lower.key.category
            && lower.functions.len() <= self.functions.len()
            && self.functions[..lower.functions.len()] == lower.functions[..]
    }
}

impl fmt::Display for BasisFunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} ({} functions)", self.key, self.functions.len())?;
        for (idx, bf) in self.functions.iter().enumerate() {
            writeln!(f, "\t{}: {}", idx, bf)?;
        }
        Ok(())
    }
}

#[cfg(feature = "json_export")]
impl From<&BasisFunctionSet> for JsonValue {
    fn from(set: &BasisFunctionSet) -> Self {
        object! {
            "shape": set.shape().name(),
            "category": set.category().name(),
            "order": set.order(),
            "functions": set.functions.iter().map(|bf| object! {
                "tag": bf.tag.to_string(),
                "anchor": bf.anchor.to_string(),
                "kind": format!("{:?}", bf.kind),
                "shell": bf.shell,
                "component": bf.component,
            }).collect::<Vec<JsonValue>>(),
        }
    }
}
