// 📦 Typed Collection Store
// Single source of truth for one entity collection, backed by durable storage.
//
// Two halves:
// - `reduce`: pure (items, action) → items. Unchanged items keep their `Rc`.
// - `CollectionStore`: applies `reduce`, then writes the whole collection
//   through to the key-value store.
//
// Storage failures are logged and swallowed; the in-memory list stays
// authoritative for the session.

use crate::entities::{ClothingItem, Entity, WishlistItem};
use crate::storage::{KeyValueStore, StorageResult};
use log::{debug, error, info, warn};
use std::rc::Rc;

pub type ClothingStore = CollectionStore<ClothingItem>;
pub type WishlistStore = CollectionStore<WishlistItem>;

// ============================================================================
// ACTIONS + REDUCER
// ============================================================================

#[derive(Debug, Clone)]
pub enum Action<T: Entity> {
    /// Insert at the front of the list
    Add(T),
    Update { id: String, patch: T::Patch },
    Delete(String),
    ToggleStatus(String),
}

/// Apply `action` to `items`, returning the next collection.
///
/// Unknown ids leave the collection unchanged.
pub fn reduce<T: Entity>(items: &[Rc<T>], action: &Action<T>) -> Vec<Rc<T>> {
    match action {
        Action::Add(item) => {
            let mut next = Vec::with_capacity(items.len() + 1);
            next.push(Rc::new(item.clone()));
            next.extend(items.iter().cloned());
            next
        }
        Action::Update { id, patch } => map_matching(items, id, |item| item.apply_patch(patch)),
        Action::Delete(id) => items
            .iter()
            .filter(|item| item.id() != id.as_str())
            .cloned()
            .collect(),
        Action::ToggleStatus(id) => map_matching(items, id, T::toggled),
    }
}

fn map_matching<T, F>(items: &[Rc<T>], id: &str, f: F) -> Vec<Rc<T>>
where
    T: Entity,
    F: Fn(&T) -> T,
{
    items
        .iter()
        .map(|item| {
            if item.id() == id {
                Rc::new(f(item.as_ref()))
            } else {
                Rc::clone(item)
            }
        })
        .collect()
}

// ============================================================================
// LOAD FALLBACK
// ============================================================================

/// What `load` yields when storage holds nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFallback {
    #[default]
    Empty,
    Seed,
}

impl LoadFallback {
    fn items<T: Entity>(self) -> Vec<T> {
        match self {
            LoadFallback::Empty => Vec::new(),
            LoadFallback::Seed => T::seed(),
        }
    }
}

// ============================================================================
// COLLECTION STORE
// ============================================================================

pub struct CollectionStore<T: Entity> {
    backend: Rc<dyn KeyValueStore>,
    items: Vec<Rc<T>>,
}

impl<T: Entity> CollectionStore<T> {
    /// Construct the store and load its collection from `backend`
    pub fn open(backend: Rc<dyn KeyValueStore>, fallback: LoadFallback) -> Self {
        let items = load::<T>(backend.as_ref(), fallback)
            .into_iter()
            .map(Rc::new)
            .collect();

        CollectionStore { backend, items }
    }

    /// Current collection, in display order
    pub fn items(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Rc<T>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `item` at the front. The caller supplies a unique id.
    pub fn add(&mut self, item: T) {
        debug!("{}: add {}", T::KIND, item.id());
        self.dispatch(Action::Add(item));
    }

    /// Merge `patch` into the item with `id` (no-op if missing)
    pub fn update(&mut self, id: &str, patch: T::Patch) {
        debug!("{}: update {}", T::KIND, id);
        self.dispatch(Action::Update {
            id: id.to_string(),
            patch,
        });
    }

    /// Remove the item with `id` (no-op if missing)
    pub fn delete(&mut self, id: &str) {
        debug!("{}: delete {}", T::KIND, id);
        self.dispatch(Action::Delete(id.to_string()));
    }

    /// Flip the status of the item with `id` (no-op if missing)
    pub fn toggle_status(&mut self, id: &str) {
        debug!("{}: toggle status {}", T::KIND, id);
        self.dispatch(Action::ToggleStatus(id.to_string()));
    }

    pub fn dispatch(&mut self, action: Action<T>) {
        self.items = reduce(&self.items, &action);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save(self.backend.as_ref(), &self.items) {
            error!(
                "{}: failed to write \"{}\" ({} items kept in memory): {}",
                T::KIND,
                T::STORAGE_KEY,
                self.items.len(),
                e
            );
        }
    }
}

/// Read the collection stored under `T::STORAGE_KEY`.
///
/// Records that no longer deserialize are skipped. Absent, empty or
/// malformed data (or an array with no readable record) yields the
/// fallback list.
pub fn load<T: Entity>(backend: &dyn KeyValueStore, fallback: LoadFallback) -> Vec<T> {
    let raw = match backend.get(T::STORAGE_KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            info!("{}: nothing stored under \"{}\"", T::KIND, T::STORAGE_KEY);
            return fallback.items();
        }
        Err(e) => {
            warn!("{}: error reading \"{}\": {}", T::KIND, T::STORAGE_KEY, e);
            return fallback.items();
        }
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                "{}: malformed data under \"{}\", starting over: {}",
                T::KIND,
                T::STORAGE_KEY,
                e
            );
            return fallback.items();
        }
    };

    let total = records.len();
    let items: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("{}: skipping unreadable record #{}: {}", T::KIND, index, e);
                None
            }
        })
        .collect();

    if items.is_empty() && total > 0 {
        warn!("{}: no readable records under \"{}\"", T::KIND, T::STORAGE_KEY);
        return fallback.items();
    }

    info!("{}: loaded {} of {} items", T::KIND, items.len(), total);
    items
}

/// Serialize the full collection and write it under `T::STORAGE_KEY`
pub fn save<T: Entity>(backend: &dyn KeyValueStore, items: &[Rc<T>]) -> StorageResult<()> {
    let json = serde_json::to_string(items)?;
    backend.set(T::STORAGE_KEY, &json)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ClothingCategory, ClothingPatch, ClothingStatus, WishlistPatch, WishlistStatus, YearsOfUse,
    };
    use crate::storage::{MemoryStore, SqliteStore, StorageError};

    /// Backend whose reads and writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn seeded_clothing() -> Vec<Rc<ClothingItem>> {
        ClothingItem::seed().into_iter().map(Rc::new).collect()
    }

    fn shirt(id: &str) -> ClothingItem {
        ClothingItem::new(
            id,
            "Oxford Shirt",
            ClothingCategory::Shirt,
            ClothingStatus::Clean,
            YearsOfUse::LessThanAYear,
        )
    }

    #[test]
    fn test_reduce_add_prepends() {
        let items = seeded_clothing();
        let next = reduce(&items, &Action::Add(shirt("3")));

        assert_eq!(next.len(), 3);
        assert_eq!(next[0].id, "3");
        assert!(Rc::ptr_eq(&next[1], &items[0]));
        assert!(Rc::ptr_eq(&next[2], &items[1]));
    }

    #[test]
    fn test_reduce_update_is_local_and_reference_stable() {
        let items = seeded_clothing();
        let patch = ClothingPatch {
            status: Some(ClothingStatus::Dirty),
            ..Default::default()
        };

        let next = reduce(
            &items,
            &Action::Update {
                id: "1".to_string(),
                patch,
            },
        );

        assert_eq!(next[0].status, ClothingStatus::Dirty);
        assert_eq!(next[0].name, items[0].name);
        assert_eq!(next[0].tags, items[0].tags);
        assert!(!Rc::ptr_eq(&next[0], &items[0]));
        assert!(Rc::ptr_eq(&next[1], &items[1]), "untouched item keeps its Rc");
        assert_eq!(items[0].status, ClothingStatus::Clean, "source not mutated");
    }

    #[test]
    fn test_reduce_unknown_id_is_noop() {
        let items = seeded_clothing();

        let actions: Vec<Action<ClothingItem>> = vec![
            Action::Update {
                id: "missing".to_string(),
                patch: ClothingPatch {
                    name: Some("x".to_string()),
                    ..Default::default()
                },
            },
            Action::Delete("missing".to_string()),
            Action::ToggleStatus("missing".to_string()),
        ];

        for action in &actions {
            let next = reduce(&items, action);
            assert_eq!(next.len(), items.len());
            for (a, b) in next.iter().zip(items.iter()) {
                assert!(Rc::ptr_eq(a, b));
            }
        }
    }

    #[test]
    fn test_reduce_delete_removes_only_target() {
        let items = seeded_clothing();
        let next = reduce(&items, &Action::Delete("1".to_string()));

        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "2");
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut store = WishlistStore::open(backend, LoadFallback::Seed);

        let before = store.get("1").unwrap().status;
        store.toggle_status("1");
        assert_eq!(store.get("1").unwrap().status, WishlistStatus::Bought);
        store.toggle_status("1");
        assert_eq!(store.get("1").unwrap().status, before);
    }

    #[test]
    fn test_load_fallbacks() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());

        let empty = ClothingStore::open(Rc::clone(&backend), LoadFallback::Empty);
        assert!(empty.is_empty());

        let seeded = ClothingStore::open(Rc::clone(&backend), LoadFallback::Seed);
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded.items()[0].name, "Black T-Shirt");

        backend.set("wardrobe-items", "{not json").unwrap();
        let malformed = ClothingStore::open(Rc::clone(&backend), LoadFallback::Empty);
        assert!(malformed.is_empty());

        backend.set("wardrobe-items", "").unwrap();
        let blank = ClothingStore::open(backend, LoadFallback::Seed);
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn test_load_skips_unreadable_records() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        backend
            .set(
                "wardrobe-items",
                r##"[
                    {"id":"old","name":"Old Coat","category":"jacket","tags":[],"colors":[],
                     "status":"clean","yearsOfUse":"1-3 years"},
                    {"id":"ok","name":"Chinos","category":"pants","tags":["work"],
                     "colors":["#c3b091"],"status":"dirty","yearsOfUse":"one-to-three-years"}
                ]"##,
            )
            .unwrap();

        let store = ClothingStore::open(Rc::clone(&backend), LoadFallback::Seed);

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, "ok");
        assert_eq!(store.items()[0].years_of_use, YearsOfUse::OneToThreeYears);

        let all_bad = r#"[{"id":"x","name":"X","category":"hat"}]"#;
        backend.set("wardrobe-items", all_bad).unwrap();
        let fallback = ClothingStore::open(backend, LoadFallback::Seed);
        assert_eq!(fallback.len(), 2, "nothing readable falls back to seed");
    }

    #[test]
    fn test_write_through_then_fresh_load() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());

        let mut store = ClothingStore::open(Rc::clone(&backend), LoadFallback::Empty);
        store.add(shirt("abc"));

        let fresh = ClothingStore::open(backend, LoadFallback::Empty);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh.items()[0].as_ref(), &shirt("abc"));
    }

    #[test]
    fn test_write_through_survives_sqlite_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.db");

        {
            let backend: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
            let mut store = WishlistStore::open(backend, LoadFallback::Empty);
            store.add(
                WishlistItem::new(
                    "w1",
                    "Rain Jacket",
                    crate::entities::WishlistPriority::High,
                    WishlistStatus::Pending,
                )
                .with_price(95.5),
            );
            store.update(
                "w1",
                WishlistPatch {
                    tags: Some(vec!["outdoor".to_string()]),
                    ..Default::default()
                },
            );
        }

        let backend: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
        let store = WishlistStore::open(backend, LoadFallback::Seed);

        assert_eq!(store.len(), 1);
        let item = store.get("w1").unwrap();
        assert_eq!(item.estimated_price, Some(95.5));
        assert_eq!(item.tags, vec!["outdoor".to_string()]);
    }

    #[test]
    fn test_collections_are_independent() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());

        let mut clothing = ClothingStore::open(Rc::clone(&backend), LoadFallback::Empty);
        let wishlist = WishlistStore::open(Rc::clone(&backend), LoadFallback::Empty);

        clothing.add(shirt("c1"));

        assert!(wishlist.is_empty());
        assert!(backend.get("whishlist-items").unwrap().is_none());
        assert!(backend.get("wardrobe-items").unwrap().is_some());
    }

    #[test]
    fn test_storage_failure_keeps_memory_authoritative() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(BrokenStore);
        let mut store = ClothingStore::open(backend, LoadFallback::Seed);
        assert_eq!(store.len(), 2, "read failure falls back to seed");

        store.add(shirt("3"));
        store.toggle_status("2");
        store.delete("1");

        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].id, "3");
        assert_eq!(store.get("2").unwrap().status, ClothingStatus::Clean);
    }

    #[test]
    fn test_update_missing_id_still_persists_unchanged_list() {
        let backend: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut store = ClothingStore::open(Rc::clone(&backend), LoadFallback::Seed);

        store.update("nope", ClothingPatch::default());

        let stored: Vec<ClothingItem> =
            serde_json::from_str(&backend.get("wardrobe-items").unwrap().unwrap()).unwrap();
        assert_eq!(stored, ClothingItem::seed());
    }
}
