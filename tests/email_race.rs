//! The email uniqueness check and the insert are separate store calls.
//! Two concurrent creations held at the check both pass it.

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use car_registry::models::{CarModel, CarUpdate, NewCar, NewUser, UserModel, UserUpdate};
use car_registry::store::{CarFilter, StoreResult, UserFilter};
use car_registry::{DocumentStore, MemoryStore};
use serde_json::json;
use tokio::sync::Barrier;

mod common;

/// Holds every email lookup until `parties` lookups are waiting.
struct GatedStore {
    inner: MemoryStore,
    gate: Barrier,
}

#[async_trait]
impl DocumentStore for GatedStore {
    fn backend_name(&self) -> &'static str {
        "gated"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<UserModel>> {
        self.inner.find_users(filter).await
    }

    async fn find_user(&self, filter: &UserFilter) -> StoreResult<Option<UserModel>> {
        if matches!(filter, UserFilter::Email(_)) {
            self.gate.wait().await;
        }
        self.inner.find_user(filter).await
    }

    async fn insert_user(&self, user: &NewUser) -> StoreResult<ObjectId> {
        self.inner.insert_user(user).await
    }

    async fn update_user(&self, filter: &UserFilter, update: &UserUpdate) -> StoreResult<u64> {
        self.inner.update_user(filter, update).await
    }

    async fn delete_user(&self, filter: &UserFilter) -> StoreResult<u64> {
        self.inner.delete_user(filter).await
    }

    async fn pull_car_reference(&self, car_id: ObjectId) -> StoreResult<u64> {
        self.inner.pull_car_reference(car_id).await
    }

    async fn find_cars(&self, filter: &CarFilter) -> StoreResult<Vec<CarModel>> {
        self.inner.find_cars(filter).await
    }

    async fn find_car(&self, filter: &CarFilter) -> StoreResult<Option<CarModel>> {
        self.inner.find_car(filter).await
    }

    async fn insert_car(&self, car: &NewCar) -> StoreResult<ObjectId> {
        self.inner.insert_car(car).await
    }

    async fn update_car(&self, filter: &CarFilter, update: &CarUpdate) -> StoreResult<u64> {
        self.inner.update_car(filter, update).await
    }
}

#[tokio::test]
async fn test_concurrent_creates_with_same_email_both_insert() {
    let inner = MemoryStore::new();
    let store = Arc::new(GatedStore {
        inner: inner.clone(),
        gate: Barrier::new(2),
    });
    let server = common::spawn_server_with(store).await;

    let post = |name: &'static str| {
        let client = server.client.clone();
        let url = server.url("/user");
        async move {
            client
                .post(url)
                .json(&json!({ "name": name, "age": 30, "email": "same@x.com" }))
                .send()
                .await
                .unwrap()
                .status()
        }
    };

    let (a, b) = tokio::join!(post("First"), post("Second"));
    assert_eq!(a, 201);
    assert_eq!(b, 201);

    let stored = inner.find_users(&UserFilter::All).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|u| u.email == "same@x.com"));
}
