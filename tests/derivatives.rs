//! Property-based checks of the evaluated derivatives and of partition of unity.

use fem_shapes::prelude::*;
use once_cell::sync::Lazy;
use proptest::prelude::*;

const FD_STEP: f64 = 1e-6;
const FD_TOLERANCE: f64 = 1e-5;
const MAX_CHECKED_ORDER: usize = 4;

/// Map a point of `[0.05, 0.95]^3` into the interior of a reference element
fn interior_point(shape: ElementShape, [u, v, w]: [f64; 3]) -> [f64; 3] {
    match shape {
        ElementShape::Point => [0.0; 3],
        ElementShape::Line => [2.0 * u - 1.0, 0.0, 0.0],
        ElementShape::Triangle => [u * (1.0 - v), v, 0.0],
        ElementShape::Quadrangle => [2.0 * u - 1.0, 2.0 * v - 1.0, 0.0],
        ElementShape::Tetrahedron => [u * (1.0 - v) * (1.0 - w), v * (1.0 - w), w],
        ElementShape::Hexahedron => [2.0 * u - 1.0, 2.0 * v - 1.0, 2.0 * w - 1.0],
        ElementShape::Prism => [u * (1.0 - v), v, 2.0 * w - 1.0],
        ElementShape::Pyramid => {
            let z = 0.95 * w;
            [(2.0 * u - 1.0) * (1.0 - z), (2.0 * v - 1.0) * (1.0 - z), z]
        }
    }
}

fn arb_unit_point() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(0.05..0.95f64)
}

fn arb_shape() -> impl Strategy<Value = ElementShape> {
    prop::sample::select(ALL_SHAPES.to_vec())
}

/// Distinct global vertex numbers in random order; a shape with `n` vertices takes the first `n`
fn arb_global_numbering() -> impl Strategy<Value = Vec<usize>> {
    Just((0..8).map(|v| 10 * v + 3).collect::<Vec<usize>>()).prop_shuffle()
}

/// Every supported (shape, category) pair at every order up to [MAX_CHECKED_ORDER]
static CHECKED_SETS: Lazy<Vec<BasisFunctionSet>> = Lazy::new(|| {
    let mut sets = Vec::new();
    for shape in ALL_SHAPES {
        for category in ALL_CATEGORIES {
            if let Ok(range) = order_range(shape, category) {
                for order in *range.start()..=(*range.end()).min(MAX_CHECKED_ORDER) {
                    sets.push(generate(shape, category, order).unwrap());
                }
            }
        }
    }
    sets
});

fn check_against_finite_differences(
    set: &BasisFunctionSet,
    orientation: &Orientation,
    point: [f64; 3],
) -> Result<(), TestCaseError> {
    let dim = set.shape().dimension();
    let center = set.evaluate(&point, orientation).unwrap();

    for k in 0..dim {
        let mut plus = point;
        let mut minus = point;
        plus[k] += FD_STEP;
        minus[k] -= FD_STEP;

        let forward = set.evaluate(&plus, orientation).unwrap();
        let backward = set.evaluate(&minus, orientation).unwrap();

        for f in 0..set.len() {
            for c in 0..set.components() {
                let fd = (forward.vector_value(f)[c] - backward.vector_value(f)[c]) / (2.0 * FD_STEP);
                let exact = center.jacobian(f)[(c, k)];
                prop_assert!(
                    (fd - exact).abs() < FD_TOLERANCE * (1.0 + exact.abs()),
                    "{}: function {} ({}), d{}/dx{} at {:?}: exact {} vs finite difference {}",
                    set.key(),
                    f,
                    set.functions()[f],
                    c,
                    k,
                    point,
                    exact,
                    fd
                );
            }
        }
    }
    Ok(())
}

proptest! {
    // every case checks the whole table of configurations
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn derivatives_match_finite_differences(unit_point in arb_unit_point()) {
        for set in CHECKED_SETS.iter() {
            let shape = set.shape();
            check_against_finite_differences(
                set,
                &Orientation::identity(shape),
                interior_point(shape, unit_point),
            )?;
        }
    }

    #[test]
    fn oriented_derivatives_match_finite_differences(
        unit_point in arb_unit_point(),
        numbering in arb_global_numbering(),
    ) {
        for set in CHECKED_SETS.iter() {
            let shape = set.shape();
            let orientation =
                Orientation::from_global_vertices(shape, &numbering[..shape.vertex_count()]).unwrap();

            check_against_finite_differences(set, &orientation, interior_point(shape, unit_point))?;
        }
    }

}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn lowest_order_functions_partition_unity(
        shape in arb_shape(),
        unit_point in arb_unit_point(),
    ) {
        let set = generate(shape, FieldCategory::H1, 1).unwrap();
        prop_assert_eq!(set.len(), shape.vertex_count());

        let eval = set
            .evaluate(&interior_point(shape, unit_point), &Orientation::identity(shape))
            .unwrap();

        let total: f64 = (0..eval.len()).map(|f| eval.value(f)).sum();
        prop_assert!((total - 1.0).abs() < 1e-12, "{}: sum = {}", shape, total);

        let gradient_total = (0..eval.len())
            .map(|f| eval.gradient(f))
            .fold(nalgebra::Vector3::zeros(), |acc, g| acc + g);
        prop_assert!(gradient_total.norm() < 1e-12);
    }

    #[test]
    fn evaluation_is_deterministic(
        shape in arb_shape(),
        unit_point in arb_unit_point(),
    ) {
        let point = interior_point(shape, unit_point);
        let a = generate(shape, FieldCategory::H1, 3).unwrap();
        let b = generate(shape, FieldCategory::H1, 3).unwrap();
        let o = Orientation::identity(shape);

        prop_assert_eq!(a.evaluate(&point, &o).unwrap(), b.evaluate(&point, &o).unwrap());
    }
}

#[test]
fn every_supported_pair_is_checked() {
    let mut pairs: Vec<(ElementShape, FieldCategory)> =
        CHECKED_SETS.iter().map(|set| (set.shape(), set.category())).collect();
    pairs.dedup();

    let supported = ALL_SHAPES
        .iter()
        .flat_map(|shape| ALL_CATEGORIES.iter().map(move |category| (*shape, *category)))
        .filter(|(shape, category)| order_range(*shape, *category).is_ok())
        .count();
    assert_eq!(pairs.len(), supported);
    assert!(pairs.contains(&(ElementShape::Prism, FieldCategory::HCurl)));
}

#[test]
fn cardinality_of_the_lowest_orders() {
    let count = |shape, order| generate(shape, FieldCategory::H1, order).unwrap().len();

    assert_eq!(count(ElementShape::Triangle, 1), 3);
    assert_eq!(count(ElementShape::Quadrangle, 1), 4);
    assert_eq!(count(ElementShape::Tetrahedron, 1), 4);
    assert_eq!(count(ElementShape::Hexahedron, 1), 8);
    assert_eq!(count(ElementShape::Prism, 1), 6);
    assert_eq!(count(ElementShape::Pyramid, 1), 5);
}
