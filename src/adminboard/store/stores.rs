use super::{EntityStore, SnapshotBackend};
use crate::error::Result;
use crate::model::{Blog, Donation, Entity, Event, Product, User};

/// Every store of the application, opened over one backend.
///
/// Owned by the application root and passed down explicitly; nothing in the
/// crate holds a store in a global.
pub struct Stores<B: SnapshotBackend + Clone> {
    pub products: EntityStore<Product, B>,
    pub events: EntityStore<Event, B>,
    pub blogs: EntityStore<Blog, B>,
    pub users: EntityStore<User, B>,
    pub donations: EntityStore<Donation, B>,
}

impl<B: SnapshotBackend + Clone> Stores<B> {
    pub fn open(backend: B) -> Result<Self> {
        Ok(Self {
            products: EntityStore::open(backend.clone())?,
            events: EntityStore::open(backend.clone())?,
            blogs: EntityStore::open(backend.clone())?,
            users: EntityStore::open(backend.clone())?,
            donations: EntityStore::open(backend)?,
        })
    }

    pub fn of<T: Collection>(&self) -> &EntityStore<T, B> {
        T::select(self)
    }

    pub fn of_mut<T: Collection>(&mut self) -> &mut EntityStore<T, B> {
        T::select_mut(self)
    }
}

/// Entities that have a store in [`Stores`]; lets commands be generic over
/// the entity type.
pub trait Collection: Entity {
    fn select<B: SnapshotBackend + Clone>(stores: &Stores<B>) -> &EntityStore<Self, B>;
    fn select_mut<B: SnapshotBackend + Clone>(stores: &mut Stores<B>) -> &mut EntityStore<Self, B>;
}

macro_rules! collection {
    ($entity:ty, $field:ident) => {
        impl Collection for $entity {
            fn select<B: SnapshotBackend + Clone>(stores: &Stores<B>) -> &EntityStore<Self, B> {
                &stores.$field
            }

            fn select_mut<B: SnapshotBackend + Clone>(
                stores: &mut Stores<B>,
            ) -> &mut EntityStore<Self, B> {
                &mut stores.$field
            }
        }
    };
}

collection!(Product, products);
collection!(Event, events);
collection!(Blog, blogs);
collection!(User, users);
collection!(Donation, donations);
