//! In-process document store.
//!
//! Backs both collections with concurrent maps. Used when no MongoDB URL is
//! configured, and as the store behind the integration tests.
//!
//! Mirrors the document-database behaviour the handlers rely on:
//! natural insertion order, first-match semantics for single-document
//! writes, and a zero modified count when an update changes nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use dashmap::DashMap;

use super::{CarFilter, DocumentStore, StoreResult, UserFilter};
use crate::models::{CarModel, CarUpdate, NewCar, NewUser, UserModel, UserUpdate};

/// A stored document tagged with its insertion sequence.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    doc: T,
}

/// Thread-safe in-memory store. Cloning shares the same collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<ObjectId, Slot<UserModel>>>,
    cars: Arc<DashMap<ObjectId, Slot<CarModel>>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create a store with two empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Matching documents in insertion order.
    fn collect_sorted<T, F>(map: &DashMap<ObjectId, Slot<T>>, pred: F) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> bool,
    {
        let mut hits: Vec<(u64, T)> = map
            .iter()
            .filter(|r| pred(&r.value().doc))
            .map(|r| (r.value().seq, r.value().doc.clone()))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, doc)| doc).collect()
    }

    /// Identifier of the first matching document in insertion order.
    fn first_id<T, F>(map: &DashMap<ObjectId, Slot<T>>, pred: F) -> Option<ObjectId>
    where
        F: Fn(&T) -> bool,
    {
        map.iter()
            .filter(|r| pred(&r.value().doc))
            .min_by_key(|r| r.value().seq)
            .map(|r| *r.key())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<UserModel>> {
        Ok(Self::collect_sorted(&self.users, |u| filter.matches(u)))
    }

    async fn find_user(&self, filter: &UserFilter) -> StoreResult<Option<UserModel>> {
        let id = Self::first_id(&self.users, |u| filter.matches(u));
        Ok(id.and_then(|id| self.users.get(&id).map(|r| r.doc.clone())))
    }

    async fn insert_user(&self, user: &NewUser) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        let slot = Slot {
            seq: self.next_seq(),
            doc: user.clone().with_id(id),
        };
        self.users.insert(id, slot);
        Ok(id)
    }

    async fn update_user(&self, filter: &UserFilter, update: &UserUpdate) -> StoreResult<u64> {
        let Some(id) = Self::first_id(&self.users, |u| filter.matches(u)) else {
            return Ok(0);
        };
        let Some(mut slot) = self.users.get_mut(&id) else {
            return Ok(0);
        };

        let doc = &mut slot.doc;
        if doc.name == update.name && doc.age == update.age && doc.cars == update.cars {
            return Ok(0);
        }
        doc.name = update.name.clone();
        doc.age = update.age.clone();
        doc.cars = update.cars.clone();
        Ok(1)
    }

    async fn delete_user(&self, filter: &UserFilter) -> StoreResult<u64> {
        let Some(id) = Self::first_id(&self.users, |u| filter.matches(u)) else {
            return Ok(0);
        };
        Ok(self.users.remove(&id).map_or(0, |_| 1))
    }

    async fn pull_car_reference(&self, car_id: ObjectId) -> StoreResult<u64> {
        let mut modified = 0;
        for mut slot in self.users.iter_mut() {
            let cars = &mut slot.value_mut().doc.cars;
            let before = cars.len();
            cars.retain(|id| *id != car_id);
            if cars.len() != before {
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn find_cars(&self, filter: &CarFilter) -> StoreResult<Vec<CarModel>> {
        Ok(Self::collect_sorted(&self.cars, |c| filter.matches(c)))
    }

    async fn find_car(&self, filter: &CarFilter) -> StoreResult<Option<CarModel>> {
        let id = Self::first_id(&self.cars, |c| filter.matches(c));
        Ok(id.and_then(|id| self.cars.get(&id).map(|r| r.doc.clone())))
    }

    async fn insert_car(&self, car: &NewCar) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        let slot = Slot {
            seq: self.next_seq(),
            doc: car.clone().with_id(id),
        };
        self.cars.insert(id, slot);
        Ok(id)
    }

    async fn update_car(&self, filter: &CarFilter, update: &CarUpdate) -> StoreResult<u64> {
        let Some(id) = Self::first_id(&self.cars, |c| filter.matches(c)) else {
            return Ok(0);
        };
        let Some(mut slot) = self.cars.get_mut(&id) else {
            return Ok(0);
        };

        let doc = &mut slot.doc;
        if doc.brand == update.brand && doc.carriage == update.carriage {
            return Ok(0);
        }
        doc.brand = update.brand.clone();
        doc.carriage = update.carriage.clone();
        Ok(1)
    }
}
