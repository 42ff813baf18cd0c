use crate::basis::{check_order, generate, BasisFunctionSet, BasisKey};
use crate::dof::{layout, DofNumbering};
use crate::element::{ElementShape, FieldCategory};
use crate::error::UnsupportedConfigurationError;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A generated basis function set together with its DOF layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedBasis {
    pub set: BasisFunctionSet,
    pub numbering: DofNumbering,
}

impl CachedBasis {
    fn new(set: BasisFunctionSet) -> Self {
        let numbering = layout(&set);
        Self { set, numbering }
    }

    pub fn key(&self) -> BasisKey {
        self.set.key()
    }
}

type Slot = Arc<OnceCell<Arc<CachedBasis>>>;

/// Memoizes basis function sets and their layouts by (shape, category, order)
///
/// Each key is generated at most once over the lifetime of the cache, even when several threads request it for the
/// first time simultaneously. Entries are never evicted; the returned `Arc`s can be held independently of the cache.
///
/// ```
/// use fem_shapes::prelude::*;
/// use std::sync::Arc;
///
/// let cache = BasisCache::new();
///
/// let a = cache.get_or_create(ElementShape::Tetrahedron, FieldCategory::HCurl, 2).unwrap();
/// let b = cache.get_or_create(ElementShape::Tetrahedron, FieldCategory::HCurl, 2).unwrap();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.set.len(), a.numbering.len());
/// assert_eq!(cache.generation_count(), 1);
///
/// assert!(cache.get_or_create(ElementShape::Pyramid, FieldCategory::HCurl, 1).is_err());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct BasisCache {
    entries: RwLock<HashMap<BasisKey, Slot>>,
    generations: AtomicUsize,
}

impl BasisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached set and layout for a (shape, category, order), generating them on first use
    ///
    /// Unsupported requests are rejected before the cache is touched.
    pub fn get_or_create(
        &self,
        shape: ElementShape,
        category: FieldCategory,
        order: usize,
    ) -> Result<Arc<CachedBasis>, UnsupportedConfigurationError> {
        check_order(shape, category, order)?;
        let key = BasisKey::new(shape, category, order);

        let slot = self.slot(key);
        let mut generated = false;
        let entry = slot.get_or_try_init(|| {
            generated = true;
            log::debug!("Cache miss for {}; generating", key);

            let entry = CachedBasis::new(generate(shape, category, order)?);
            self.generations.fetch_add(1, Ordering::SeqCst);
            log::debug!("Cached {} functions for {}", entry.set.len(), key);

            Ok::<_, UnsupportedConfigurationError>(Arc::new(entry))
        })?;

        if !generated {
            log::trace!("Cache hit for {}", key);
        }

        Ok(entry.clone())
    }

    /// Get an entry only if it has already been generated
    pub fn get(&self, key: BasisKey) -> Option<Arc<CachedBasis>> {
        self.entries
            .read()
            .get(&key)
            .and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, key: BasisKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of generated entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of sets this cache has generated
    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    /// Populate the cache for a collection of keys in parallel
    ///
    /// Fails on the first unsupported key; entries generated before the failure are kept.
    pub fn prewarm(&self, keys: &[BasisKey]) -> Result<(), UnsupportedConfigurationError> {
        log::debug!("Pre-warming basis cache with {} keys", keys.len());
        keys.par_iter().try_for_each(|key| {
            self.get_or_create(key.shape, key.category, key.order)
                .map(|_| ())
        })
    }

    fn slot(&self, key: BasisKey) -> Slot {
        if let Some(slot) = self.entries.read().get(&key) {
            return slot.clone();
        }
        self.entries.write().entry(key).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ALL_SHAPES;

    #[test]
    fn one_generation_per_key() {
        let cache = BasisCache::new();

        for _ in 0..3 {
            cache
                .get_or_create(ElementShape::Hexahedron, FieldCategory::H1, 3)
                .unwrap();
            cache
                .get_or_create(ElementShape::Hexahedron, FieldCategory::H1, 4)
                .unwrap();
        }

        assert_eq!(cache.generation_count(), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(BasisKey::new(ElementShape::Hexahedron, FieldCategory::H1, 3)));
        assert!(!cache.contains(BasisKey::new(ElementShape::Hexahedron, FieldCategory::H1, 5)));
    }

    #[test]
    fn concurrent_first_requests_generate_once() {
        let cache = BasisCache::new();

        let entries: Vec<Arc<CachedBasis>> = (0..64)
            .into_par_iter()
            .map(|_| {
                cache
                    .get_or_create(ElementShape::Tetrahedron, FieldCategory::HCurl, 4)
                    .unwrap()
            })
            .collect();

        assert_eq!(cache.generation_count(), 1);
        assert!(entries.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn unsupported_requests_leave_the_cache_untouched() {
        let cache = BasisCache::new();
        let before = cache
            .get_or_create(ElementShape::Triangle, FieldCategory::H1, 2)
            .unwrap();

        assert_eq!(
            cache
                .get_or_create(ElementShape::Triangle, FieldCategory::H1, 999)
                .unwrap_err(),
            UnsupportedConfigurationError::OrderOutOfRange {
                shape: ElementShape::Triangle,
                category: FieldCategory::H1,
                order: 999,
                min: 1,
                max: 10,
            }
        );
        assert!(cache
            .get_or_create(ElementShape::Point, FieldCategory::HDiv, 0)
            .is_err());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.generation_count(), 1);
        assert!(cache
            .get(BasisKey::new(ElementShape::Triangle, FieldCategory::H1, 999))
            .is_none());

        let after = cache
            .get_or_create(ElementShape::Triangle, FieldCategory::H1, 2)
            .unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn entries_match_direct_generation() {
        let cache = BasisCache::new();
        let entry = cache
            .get_or_create(ElementShape::Prism, FieldCategory::H1, 3)
            .unwrap();
        let set = generate(ElementShape::Prism, FieldCategory::H1, 3).unwrap();

        assert_eq!(entry.set, set);
        assert_eq!(entry.numbering, layout(&set));
        assert_eq!(entry.key(), BasisKey::new(ElementShape::Prism, FieldCategory::H1, 3));
    }

    #[test]
    fn prewarm_populates_every_key() {
        let cache = BasisCache::new();
        let keys: Vec<BasisKey> = ALL_SHAPES
            .iter()
            .flat_map(|shape| (1..=3).map(move |p| BasisKey::new(*shape, FieldCategory::H1, p)))
            .collect();

        cache.prewarm(&keys).unwrap();
        assert_eq!(cache.len(), keys.len());
        assert_eq!(cache.generation_count(), keys.len());

        // a second pass hits the cache every time
        cache.prewarm(&keys).unwrap();
        assert_eq!(cache.generation_count(), keys.len());

        assert!(cache
            .prewarm(&[BasisKey::new(ElementShape::Pyramid, FieldCategory::HDiv, 0)])
            .is_err());
        assert_eq!(cache.len(), keys.len());
    }
}
