use crate::basis::{BasisFunctionSet, BasisKey};
use crate::element::SubEntity;
use smallvec::SmallVec;
use std::{fmt, ops::Range};

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// The local degrees of freedom attached to a single sub-entity of an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDofs {
    pub entity: SubEntity,
    functions: SmallVec<[usize; 8]>,
    first_dof: usize,
}

impl EntityDofs {
    /// Indices (into the [BasisFunctionSet]) of the functions attached to this entity, in set order
    pub fn functions(&self) -> &[usize] {
        &self.functions
    }

    /// The contiguous range of local DOF indices owned by this entity
    pub fn dofs(&self) -> Range<usize> {
        self.first_dof..(self.first_dof + self.functions.len())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Local numbering of the degrees of freedom of a [BasisFunctionSet], grouped by sub-entity
///
/// Vertex DOFs come first, followed by edge, face and interior DOFs, each in the shape's canonical entity order.
/// Within a group, DOFs follow the order of the functions in the set. Every sub-entity of the shape has a group,
/// even when no functions are attached to it.
///
/// ```
/// use fem_shapes::prelude::*;
///
/// let set = generate(ElementShape::Triangle, FieldCategory::H1, 3).unwrap();
/// let dofs = layout(&set);
///
/// assert_eq!(dofs.len(), 10);
/// assert_eq!(dofs.count(SubEntity::Vertex(2)), 1);
/// assert_eq!(dofs.count(SubEntity::Edge(0)), 2);
/// assert_eq!(dofs.count(SubEntity::Face(0)), 1);
///
/// // edge DOFs follow the vertex DOFs
/// assert_eq!(dofs.dofs_on(SubEntity::Edge(0)), 3..5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DofNumbering {
    key: BasisKey,
    groups: Vec<EntityDofs>,
    dof_of_function: Vec<usize>,
    function_of_dof: Vec<usize>,
}

/// Lay out the degrees of freedom of a basis function set
pub fn layout(set: &BasisFunctionSet) -> DofNumbering {
    let mut groups: Vec<EntityDofs> = set
        .shape()
        .sub_entities()
        .into_iter()
        .map(|entity| EntityDofs {
            entity,
            functions: SmallVec::new(),
            first_dof: 0,
        })
        .collect();

    for (f, bf) in set.iter().enumerate() {
        match groups.binary_search_by_key(&bf.tag, |group| group.entity) {
            Ok(g) => groups[g].functions.push(f),
            Err(_) => unreachable!("{} is not a sub-entity of a {}", bf.tag, set.shape()),
        }
    }

    let mut dof_of_function = vec![0; set.len()];
    let mut function_of_dof = Vec::with_capacity(set.len());
    for group in groups.iter_mut() {
        group.first_dof = function_of_dof.len();
        for f in group.functions.iter() {
            dof_of_function[*f] = function_of_dof.len();
            function_of_dof.push(*f);
        }
    }

    DofNumbering {
        key: set.key(),
        groups,
        dof_of_function,
        function_of_dof,
    }
}

impl DofNumbering {
    pub fn key(&self) -> BasisKey {
        self.key
    }

    /// Total number of local DOFs
    pub fn len(&self) -> usize {
        self.function_of_dof.len()
    }

    pub fn is_empty(&self) -> bool {
        self.function_of_dof.is_empty()
    }

    /// All sub-entity groups in layout order
    pub fn groups(&self) -> &[EntityDofs] {
        &self.groups
    }

    pub fn group(&self, entity: SubEntity) -> Option<&EntityDofs> {
        self.groups
            .binary_search_by_key(&entity, |group| group.entity)
            .ok()
            .map(|g| &self.groups[g])
    }

    /// Number of functions attached to a sub-entity (zero for entities the shape does not have)
    pub fn count(&self, entity: SubEntity) -> usize {
        self.group(entity).map_or(0, |group| group.len())
    }

    /// The functions attached to a sub-entity
    pub fn functions_on(&self, entity: SubEntity) -> &[usize] {
        self.group(entity).map_or(&[], |group| group.functions())
    }

    /// The local DOF indices owned by a sub-entity
    pub fn dofs_on(&self, entity: SubEntity) -> Range<usize> {
        self.group(entity).map_or(0..0, |group| group.dofs())
    }

    /// The local DOF index of a function in the set
    ///
    /// # Panics
    /// If `function` is not an index into the set
    pub fn dof_of(&self, function: usize) -> usize {
        self.dof_of_function[function]
    }

    /// The function in the set that a local DOF index refers to
    ///
    /// # Panics
    /// If `dof` is not smaller than [DofNumbering::len]
    pub fn function_of(&self, dof: usize) -> usize {
        self.function_of_dof[dof]
    }

    /// Number of DOFs on vertices, edges, faces and the interior (in that order)
    pub fn count_by_dimension(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for group in self.groups.iter() {
            let slot = match group.entity {
                SubEntity::Vertex(_) => 0,
                SubEntity::Edge(_) => 1,
                SubEntity::Face(_) => 2,
                SubEntity::Interior => 3,
            };
            counts[slot] += group.len();
        }
        counts
    }
}

impl fmt::Display for DofNumbering {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "DoFs for {} ({} total)", self.key, self.len())?;
        for group in self.groups.iter().filter(|group| !group.is_empty()) {
            write!(f, "\t{}: [", group.entity)?;
            for (dof, function) in group.dofs().zip(group.functions()) {
                write!(f, " {}<-{}", dof, function)?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "json_export")]
impl From<&DofNumbering> for JsonValue {
    fn from(numbering: &DofNumbering) -> Self {
        object! {
            "shape": numbering.key.shape.name(),
            "category": numbering.key.category.name(),
            "order": numbering.key.order,
            "dofs": numbering.len(),
            "entities": numbering.groups.iter().map(|group| object! {
                "entity": group.entity.to_string(),
                "first_dof": group.first_dof,
                "functions": group.functions.to_vec(),
            }).collect::<Vec<JsonValue>>(),
        }
    }
}
