use super::function::{BasisFunction, BasisFunctionSet, BasisKey, FunctionKind};
use super::{check_order, order_range};
use crate::element::{ElementShape, FieldCategory, SubEntity};
use crate::error::UnsupportedConfigurationError;

/// Generate the hierarchical basis function set for a (shape, category, order)
///
/// Functions are appended shell by shell, so the set of order `k - 1` is always a prefix of the set of order `k`.
///
/// ```
/// use fem_shapes::prelude::*;
///
/// let p1 = generate(ElementShape::Triangle, FieldCategory::H1, 1).unwrap();
/// let p3 = generate(ElementShape::Triangle, FieldCategory::H1, 3).unwrap();
///
/// assert_eq!(p1.len(), 3);
/// assert_eq!(p3.len(), 10);
/// assert!(p3.extends(&p1));
///
/// assert!(generate(ElementShape::Triangle, FieldCategory::H1, 999).is_err());
/// ```
pub fn generate(
    shape: ElementShape,
    category: FieldCategory,
    order: usize,
) -> Result<BasisFunctionSet, UnsupportedConfigurationError> {
    check_order(shape, category, order)?;
    let min_order = *order_range(shape, category)?.start();

    let mut functions = Vec::new();
    for shell in min_order..=order {
        push_shell(shape, category, shell, &mut functions);
    }

    let key = BasisKey::new(shape, category, order);
    log::trace!("generated {} basis functions for {}", functions.len(), key);

    Ok(BasisFunctionSet { key, functions })
}

fn push_shell(
    shape: ElementShape,
    category: FieldCategory,
    shell: usize,
    functions: &mut Vec<BasisFunction>,
) {
    let entry = |tag: SubEntity, anchor: SubEntity, kind: FunctionKind, component: usize| {
        BasisFunction {
            tag,
            anchor,
            kind,
            shell: shell as u8,
            component: component as u8,
        }
    };

    match category {
        FieldCategory::H1 | FieldCategory::H1Xy | FieldCategory::H1Xyz => {
            let components = category.components(shape);
            for (anchor, kind) in h1_shell(shape, shell) {
                functions.extend((0..components).map(|c| entry(anchor, anchor, kind, c)));
            }
        }
        FieldCategory::H1Discontinuous => {
            let cell = shape.cell_entity();
            match shell {
                0 => functions.push(entry(cell, cell, FunctionKind::Constant, 0)),
                1 => functions.extend((1..shape.vertex_count()).map(|v| {
                    entry(cell, SubEntity::Vertex(v as u8), FunctionKind::Vertex, 0)
                })),
                _ => functions.extend(
                    h1_shell(shape, shell)
                        .into_iter()
                        .map(|(anchor, kind)| entry(cell, anchor, kind, 0)),
                ),
            }
        }
        FieldCategory::HCurl => functions.extend(
            hcurl_shell(shape, shell)
                .into_iter()
                .map(|(anchor, kind)| entry(anchor, anchor, kind, 0)),
        ),
        FieldCategory::HDiv => {
            let shell_fns = if shape.dimension() == 2 {
                hcurl_shell(shape, shell)
            } else {
                face_flux_shell(shape)
            };
            functions.extend(
                shell_fns
                    .into_iter()
                    .map(|(anchor, kind)| entry(anchor, anchor, kind, 0)),
            )
        }
    }
}

/// The scalar functions that first appear at order `p`
fn h1_shell(shape: ElementShape, p: usize) -> Vec<(SubEntity, FunctionKind)> {
    let mut shell = Vec::new();

    if p == 1 {
        for v in 0..shape.vertex_count() {
            shell.push((SubEntity::Vertex(v as u8), FunctionKind::Vertex));
        }
        return shell;
    }

    for e in 0..shape.edges().len() {
        shell.push((SubEntity::Edge(e as u8), FunctionKind::Edge { k: p as u8 }));
    }

    for (f, face) in shape.faces().iter().enumerate() {
        let anchor = SubEntity::Face(f as u8);
        if face.len() == 3 {
            if p >= 3 {
                for [i, j] in triangle_shell(p - 3) {
                    shell.push((anchor, FunctionKind::TriangleFace { i, j }));
                }
            }
        } else {
            for [i, j] in square_shell(p) {
                shell.push((anchor, FunctionKind::QuadFace { i, j }));
            }
        }
    }

    let cells = match shape {
        ElementShape::Tetrahedron if p >= 4 => tetrahedron_shell(p - 4),
        ElementShape::Hexahedron => cube_shell(p),
        ElementShape::Prism => prism_cell_shell(p),
        ElementShape::Pyramid => pyramid_cell_shell(p),
        _ => Vec::new(),
    };
    for [i, j, k] in cells {
        shell.push((SubEntity::Interior, FunctionKind::Cell { i, j, k }));
    }

    shell
}

/// The curl-conforming functions that first appear at order `p`
fn hcurl_shell(shape: ElementShape, p: usize) -> Vec<(SubEntity, FunctionKind)> {
    let mut shell = Vec::new();

    if p == 0 {
        for e in 0..shape.edges().len() {
            shell.push((SubEntity::Edge(e as u8), FunctionKind::WhitneyEdge));
        }
        return shell;
    }

    let top = (p + 1) as u8;
    for e in 0..shape.edges().len() {
        shell.push((SubEntity::Edge(e as u8), FunctionKind::EdgeGradient { k: top }));
    }

    for (f, face) in shape.faces().iter().enumerate() {
        let anchor = SubEntity::Face(f as u8);
        if face.len() == 3 {
            if p >= 2 {
                let pairs = triangle_shell(p - 2);
                for [i, j] in pairs.iter().copied() {
                    shell.push((anchor, FunctionKind::FaceGradient { i, j }));
                }
                for [i, j] in pairs.iter().copied() {
                    shell.push((anchor, FunctionKind::FaceRotational { i, j }));
                }
                shell.push((anchor, FunctionKind::FaceWhitney { j: (p - 2) as u8 }));
            }
        } else {
            let pairs = square_shell(p + 1);
            for [i, j] in pairs.iter().copied() {
                shell.push((anchor, FunctionKind::FaceGradient { i, j }));
            }
            for [i, j] in pairs.iter().copied() {
                shell.push((anchor, FunctionKind::FaceRotational { i, j }));
            }
            for dir in 0..2 {
                shell.push((anchor, FunctionKind::FaceDirectional { dir, k: top }));
            }
        }
    }

    let triples = match shape {
        ElementShape::Tetrahedron if p >= 3 => tetrahedron_shell(p - 3),
        ElementShape::Hexahedron => cube_shell(p + 1),
        _ => Vec::new(),
    };
    for [i, j, k] in triples.iter().copied() {
        shell.push((SubEntity::Interior, FunctionKind::CellGradient { i, j, k }));
    }
    for variant in 0..2 {
        for [i, j, k] in triples.iter().copied() {
            shell.push((
                SubEntity::Interior,
                FunctionKind::CellRotational { variant, i, j, k },
            ));
        }
    }

    match shape {
        ElementShape::Tetrahedron if p >= 3 => {
            for [j, k] in triangle_shell(p - 3) {
                shell.push((SubEntity::Interior, FunctionKind::CellWhitney { j, k }));
            }
        }
        ElementShape::Hexahedron => {
            for dir in 0..3 {
                for [a, b] in square_shell(p + 1) {
                    shell.push((SubEntity::Interior, FunctionKind::CellDirectional { dir, a, b }));
                }
            }
        }
        _ => (),
    }

    shell
}

/// The lowest order divergence-conforming functions of a 3D shape
fn face_flux_shell(shape: ElementShape) -> Vec<(SubEntity, FunctionKind)> {
    (0..shape.faces().len())
        .map(|f| (SubEntity::Face(f as u8), FunctionKind::FaceFlux))
        .collect()
}

/// `[i, j]` with `i + j = n`
fn triangle_shell(n: usize) -> Vec<[u8; 2]> {
    (0..=n).map(|i| [i as u8, (n - i) as u8]).collect()
}

/// `[i, j, k]` with `i + j + k = n`
fn tetrahedron_shell(n: usize) -> Vec<[u8; 3]> {
    (0..=n)
        .flat_map(move |i| (0..=(n - i)).map(move |j| [i as u8, j as u8, (n - i - j) as u8]))
        .collect()
}

/// `[i, j]` with `i, j ∈ [2, top]` and `max(i, j) = top`
fn square_shell(top: usize) -> Vec<[u8; 2]> {
    (2..=top)
        .flat_map(move |i| (2..=top).map(move |j| [i, j]))
        .filter(|[i, j]| std::cmp::max(*i, *j) == top)
        .map(|[i, j]| [i as u8, j as u8])
        .collect()
}

/// `[i, j, k]` with `i, j, k ∈ [2, top]` and `max(i, j, k) = top`
fn cube_shell(top: usize) -> Vec<[u8; 3]> {
    (2..=top)
        .flat_map(move |i| (2..=top).flat_map(move |j| (2..=top).map(move |k| [i, j, k])))
        .filter(|ijk| ijk.iter().max() == Some(&top))
        .map(|[i, j, k]| [i as u8, j as u8, k as u8])
        .collect()
}

/// Prism interior bubbles of degree `p`: a triangle bubble of degree `i + j + 3` times the Lobatto bubble `l_k(z)`
fn prism_cell_shell(p: usize) -> Vec<[u8; 3]> {
    if p < 3 {
        return Vec::new();
    }

    let mut cells = Vec::new();
    for i in 0..=(p - 3) {
        for j in 0..=(p - 3 - i) {
            for k in 2..=p {
                if std::cmp::max(i + j + 3, k) == p {
                    cells.push([i as u8, j as u8, k as u8]);
                }
            }
        }
    }
    cells
}

/// Pyramid interior bubbles of degree `p`: `l^s_i(x, 1 - z) l^s_j(y, 1 - z) z P_k(2z - 1)` with `max(i, j) + k + 1 = p`
fn pyramid_cell_shell(p: usize) -> Vec<[u8; 3]> {
    let mut cells = Vec::new();
    for i in 2..p {
        for j in 2..p {
            let m = std::cmp::max(i, j);
            if m + 1 <= p {
                cells.push([i as u8, j as u8, (p - 1 - m) as u8]);
            }
        }
    }
    cells
}
