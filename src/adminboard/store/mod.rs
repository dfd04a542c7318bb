//! # Storage Layer
//!
//! Each entity type lives in its own [`EntityStore`]: an ordered collection of
//! [`Record`]s that is written back in full to a [`SnapshotBackend`] after
//! every mutation, under the entity's store name (`product-store`,
//! `event-store`, `blog-store`, `user-store`, `donation-store`).
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: production, one `<store-name>.json` per store
//! - [`mem_backend::MemBackend`]: testing, shared in-memory map
//!
//! ## Mutation semantics
//!
//! - `add` appends, so insertion order is the display order.
//! - `update` replaces the whole record; merging fields is the caller's job.
//! - `update` and `delete` on an unknown id return [`AdminError::NotFound`]
//!   and leave the collection untouched.
//! - The next collection is persisted *before* it replaces the in-memory one:
//!   a failed write leaves the store exactly as it was.
//!
//! ## Loading
//!
//! `open` reads the snapshot through [`Entity::Stored`], upgrades anything in
//! an old shape, and if something was upgraded writes the snapshot back once
//! so the migration does not repeat on the next start.

use crate::error::{AdminError, Result};
use crate::model::{Entity, Product, Record};
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod stores;

pub use backend::SnapshotBackend;
pub use stores::{Collection, Stores};

pub struct EntityStore<T: Entity, B: SnapshotBackend> {
    backend: B,
    items: Vec<Record<T>>,
}

impl<T: Entity, B: SnapshotBackend> EntityStore<T, B> {
    /// Load the store's snapshot, upgrading legacy records.
    pub fn open(backend: B) -> Result<Self> {
        let (items, migrated) = match backend.load(T::STORE_NAME)? {
            None => {
                debug!(store = T::STORE_NAME, "no snapshot, starting empty");
                (Vec::new(), 0)
            }
            Some(raw) => Self::decode(&raw)?,
        };

        let store = Self { backend, items };
        if migrated > 0 {
            info!(
                store = T::STORE_NAME,
                path = %store.location().display(),
                migrated,
                "upgraded legacy records, rewriting snapshot"
            );
            store.persist(&store.items)?;
        }
        debug!(store = T::STORE_NAME, count = store.items.len(), "store opened");
        Ok(store)
    }

    fn decode(raw: &str) -> Result<(Vec<Record<T>>, usize)> {
        let stored: Vec<Record<T::Stored>> =
            serde_json::from_str(raw).map_err(AdminError::Serialization)?;

        let mut migrated = 0;
        let items = stored
            .into_iter()
            .map(|record| {
                let upgraded = T::upgrade(record.data);
                if upgraded.is_migrated() {
                    migrated += 1;
                }
                Record::with_id(record.id, upgraded.into_inner())
            })
            .collect();
        Ok((items, migrated))
    }

    fn persist(&self, items: &[Record<T>]) -> Result<()> {
        let snapshot = serde_json::to_string_pretty(items).map_err(AdminError::Serialization)?;
        self.backend.save(T::STORE_NAME, &snapshot)
    }

    fn commit(&mut self, next: Vec<Record<T>>) -> Result<()> {
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    /// Append a new record with a freshly generated id.
    pub fn add(&mut self, data: T) -> Result<Record<T>> {
        let record = Record::new(data);
        let mut next = self.items.clone();
        next.push(record.clone());
        self.commit(next)?;

        debug!(store = T::STORE_NAME, id = %record.id, "record added");
        Ok(record)
    }

    /// Replace the record carrying `record.id`.
    pub fn update(&mut self, record: Record<T>) -> Result<Record<T>> {
        let index = self
            .position(&record.id)
            .ok_or_else(|| AdminError::not_found(T::KIND, record.id))?;

        let mut next = self.items.clone();
        next[index] = record.clone();
        self.commit(next)?;

        debug!(store = T::STORE_NAME, id = %record.id, "record updated");
        Ok(record)
    }

    /// Remove the record with `id`, returning it.
    pub fn delete(&mut self, id: &Uuid) -> Result<Record<T>> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(T::KIND, *id))?;

        let next = self.items.iter().filter(|r| r.id != *id).cloned().collect();
        self.commit(next)?;

        debug!(store = T::STORE_NAME, id = %id, "record deleted");
        Ok(removed)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Record<T>> {
        self.items.iter().find(|r| r.id == *id)
    }

    /// Like [`Self::get`], but a missing id is an error.
    pub fn require(&self, id: &Uuid) -> Result<&Record<T>> {
        self.get(id).ok_or_else(|| AdminError::not_found(T::KIND, *id))
    }

    pub fn all(&self) -> &[Record<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location(T::STORE_NAME)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.items.iter().position(|r| r.id == *id)
    }
}

impl<B: SnapshotBackend> EntityStore<Product, B> {
    /// Case-insensitive substring match on the product title.
    pub fn search(&self, query: &str) -> Vec<Record<Product>> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::{Blog, User};
    use crate::test_utils::{product, user};

    fn product_store() -> (MemBackend, EntityStore<Product, MemBackend>) {
        let backend = MemBackend::new();
        let store = EntityStore::open(backend.clone()).unwrap();
        (backend, store)
    }

    #[test]
    fn add_assigns_id_and_preserves_payload() {
        let (_, mut store) = product_store();
        let payload = product("Professional Widget");

        let record = store.add(payload.clone()).unwrap();
        let found = store.get(&record.id).unwrap();
        assert_eq!(found.data, payload);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_keeps_insertion_order() {
        let (_, mut store) = product_store();
        store.add(product("First")).unwrap();
        store.add(product("Second")).unwrap();
        store.add(product("Third")).unwrap();

        let titles: Vec<_> = store.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn update_replaces_whole_record() {
        let (_, mut store) = product_store();
        let mut record = store.add(product("Old")).unwrap();
        record.data.title = "New".into();
        record.data.description = None;

        store.update(record.clone()).unwrap();
        assert_eq!(store.get(&record.id).unwrap(), &record);
    }

    #[test]
    fn update_unknown_id_is_not_found_and_changes_nothing() {
        let (_, mut store) = product_store();
        store.add(product("Kept")).unwrap();
        let before = store.all().to_vec();

        let stranger = Record::new(product("Stranger"));
        let err = store.update(stranger).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn delete_removes_record() {
        let (_, mut store) = product_store();
        let a = store.add(product("A")).unwrap();
        store.add(product("B")).unwrap();

        let removed = store.delete(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert!(store.get(&a.id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (_, mut store) = product_store();
        store.add(product("A")).unwrap();

        let err = store.delete(&Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AdminError::NotFound { kind: "Product", .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (_, mut store) = product_store();
        store.add(product("Professional Widget")).unwrap();
        store.add(product("Garden Hose")).unwrap();

        let hits = store.search("PRO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Professional Widget");
        assert_eq!(store.search("").len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let (backend, mut store) = product_store();
        let kept = store.add(product("Kept")).unwrap();
        let gone = store.add(product("Gone")).unwrap();
        store.delete(&gone.id).unwrap();

        let reopened: EntityStore<Product, MemBackend> = EntityStore::open(backend).unwrap();
        assert_eq!(reopened.all(), &[kept]);
    }

    #[test]
    fn failed_write_leaves_store_untouched() {
        let backend = MemBackend::new();
        let mut store: EntityStore<User, MemBackend> = EntityStore::open(backend.clone()).unwrap();
        let existing = store.add(user("Ada", "ada@example.com")).unwrap();

        backend.set_simulate_write_error(true);
        assert!(store.add(user("Bob", "bob@example.com")).is_err());
        assert!(store.delete(&existing.id).is_err());
        assert_eq!(store.all(), &[existing]);
    }

    #[test]
    fn legacy_blog_snapshot_is_migrated_once() {
        let backend = MemBackend::new();
        let id = Uuid::new_v4();
        backend.put_raw(
            "blog-store",
            &format!(
                r#"[{{"id":"{}","title":"Old","date":"2024-12-01","image":"c.png","content":["One","Two"]}}]"#,
                id
            ),
        );

        let store: EntityStore<Blog, MemBackend> = EntityStore::open(backend.clone()).unwrap();
        let blog = store.get(&id).unwrap();
        assert_eq!(blog.content.len(), 2);
        assert_eq!(blog.content[0].text, "One");
        assert_eq!(blog.content[0].image, None);

        let rewritten = backend.raw("blog-store").unwrap();
        assert!(rewritten.contains(r#""text": "One""#));
    }
}
