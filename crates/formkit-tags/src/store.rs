use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::TagDefinition;

/// Read-only lookup from tag name to its attribute rules.
pub trait AttributeStore {
    /// Returns `None` when the store does not know `tag`.
    fn lookup(&self, tag: &str) -> Option<TagDefinition>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for &S {
    fn lookup(&self, tag: &str) -> Option<TagDefinition> {
        (**self).lookup(tag)
    }
}

impl<S: AttributeStore + ?Sized> AttributeStore for Box<S> {
    fn lookup(&self, tag: &str) -> Option<TagDefinition> {
        (**self).lookup(tag)
    }
}

/// Memoizes another store's definitions.
///
/// Only known tags are cached; a miss is asked of the inner store again, so
/// arbitrary caller-chosen names do not grow the cache.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    cache: RefCell<FxHashMap<String, TagDefinition>>,
}

impl<S: AttributeStore> CachedStore<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Number of tag definitions cached so far.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: AttributeStore> AttributeStore for CachedStore<S> {
    fn lookup(&self, tag: &str) -> Option<TagDefinition> {
        if let Some(hit) = self.cache.borrow().get(tag) {
            return Some(hit.clone());
        }

        tracing::debug!("Attribute store cache miss for '{}'", tag);
        let definition = self.inner.lookup(tag)?;
        self.cache
            .borrow_mut()
            .insert(tag.to_string(), definition.clone());
        Some(definition)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingStore {
        calls: Cell<usize>,
    }

    impl AttributeStore for CountingStore {
        fn lookup(&self, tag: &str) -> Option<TagDefinition> {
            self.calls.set(self.calls.get() + 1);
            (tag == "p").then(|| TagDefinition::new("p", ["class"], ["class"]))
        }
    }

    fn counting() -> CachedStore<CountingStore> {
        CachedStore::new(CountingStore {
            calls: Cell::new(0),
        })
    }

    #[test]
    fn test_repeated_lookup_hits_inner_once() {
        let store = counting();
        let first = store.lookup("p");
        let second = store.lookup("p");

        assert_eq!(first, second);
        assert!(first.is_some());
        assert_eq!(store.inner().calls.get(), 1);
    }

    #[test]
    fn test_misses_are_not_cached() {
        let store = counting();
        assert!(store.lookup("blink").is_none());
        assert!(store.lookup("blink").is_none());
        assert_eq!(store.inner().calls.get(), 2);
        assert_eq!(store.cached_len(), 0);
    }

    #[test]
    fn test_unknown_names_do_not_grow_cache() {
        let store = counting();
        store.lookup("p");
        for i in 0..100 {
            assert!(store.lookup(&format!("x-{i}")).is_none());
        }
        assert_eq!(store.cached_len(), 1);
    }

    #[test]
    fn test_clear_forces_fresh_lookup() {
        let store = counting();
        store.lookup("p");
        store.clear();
        store.lookup("p");
        assert_eq!(store.inner().calls.get(), 2);
    }

    #[test]
    fn test_reference_and_box_delegate() {
        let store = counting();
        let by_ref: &dyn AttributeStore = &store;
        let boxed: Box<dyn AttributeStore + '_> = Box::new(&store);

        assert!(by_ref.lookup("p").is_some());
        assert!(boxed.lookup("p").is_some());
        assert_eq!(store.inner().calls.get(), 1);
    }
}
