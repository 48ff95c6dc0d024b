//! Document store adapter.
//!
//! # Data Flow
//! ```text
//! handler
//!     → DocumentStore (trait object shared via Arc)
//!     → memory.rs (in-process collections)  |  mongo.rs (MongoDB driver)
//!     → "users" / "cars" collections
//! ```
//!
//! # Design Decisions
//! - One trait covers both collections; handlers never see the backend
//! - Write operations report modified/deleted counts, callers read them as found/not-found
//! - "Find many" returns documents in natural (insertion) order
//! - No cross-operation atomicity: each call is one store round-trip

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::models::{CarModel, CarUpdate, NewCar, NewUser, UserModel, UserUpdate};

pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

/// Collection name for user documents.
pub const USERS_COLLECTION: &str = "users";
/// Collection name for car documents.
pub const CARS_COLLECTION: &str = "cars";

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "mongo")]
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("store did not return an ObjectId for the inserted document")]
    MissingInsertedId,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter over the `users` collection. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UserFilter {
    #[default]
    All,
    Name(String),
    Email(String),
    Id(ObjectId),
}

/// Filter over the `cars` collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CarFilter {
    #[default]
    All,
    Id(ObjectId),
    /// Identifier is a member of the set. Unknown ids simply match nothing.
    Ids(Vec<ObjectId>),
}

impl UserFilter {
    pub fn matches(&self, user: &UserModel) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Name(name) => &user.name == name,
            UserFilter::Email(email) => &user.email == email,
            UserFilter::Id(id) => &user.id == id,
        }
    }
}

impl CarFilter {
    pub fn matches(&self, car: &CarModel) -> bool {
        match self {
            CarFilter::All => true,
            CarFilter::Id(id) => &car.id == id,
            CarFilter::Ids(ids) => ids.contains(&car.id),
        }
    }
}

/// Create/read/update/delete primitives over the two collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<UserModel>>;

    async fn find_user(&self, filter: &UserFilter) -> StoreResult<Option<UserModel>>;

    /// Insert a user and return the generated identifier.
    async fn insert_user(&self, user: &NewUser) -> StoreResult<ObjectId>;

    /// Update the first matching user. Returns the modified count.
    async fn update_user(&self, filter: &UserFilter, update: &UserUpdate) -> StoreResult<u64>;

    /// Delete the first matching user. Returns the deleted count.
    async fn delete_user(&self, filter: &UserFilter) -> StoreResult<u64>;

    /// Remove `car_id` from the `cars` list of every user holding it.
    /// Returns the number of user documents modified.
    async fn pull_car_reference(&self, car_id: ObjectId) -> StoreResult<u64>;

    async fn find_cars(&self, filter: &CarFilter) -> StoreResult<Vec<CarModel>>;

    async fn find_car(&self, filter: &CarFilter) -> StoreResult<Option<CarModel>>;

    /// Insert a car and return the generated identifier.
    async fn insert_car(&self, car: &NewCar) -> StoreResult<ObjectId>;

    /// Update the first matching car. Returns the modified count.
    async fn update_car(&self, filter: &CarFilter, update: &CarUpdate) -> StoreResult<u64>;
}
