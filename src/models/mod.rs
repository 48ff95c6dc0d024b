//! Document and response types for users and cars.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → api::payload (truthiness + type checks)
//!     → NewUser / NewCar / UserUpdate / CarUpdate
//!     → store (UserModel / CarModel documents)
//!     → projection.rs (expand car references)
//!     → User / Car response shapes
//! ```
//!
//! # Design Decisions
//! - Stored documents keep car references as `ObjectId`s, never embedded cars
//! - Response shapes carry identifiers as 24-char hex strings
//! - A user does not own the cars it references
//! - `age` and `carriage` keep the JSON number as sent, integral or fractional

pub mod projection;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A user document as held in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub age: Number,
    /// Natural lookup key. Uniqueness is checked by the service, not the store.
    pub email: String,
    /// Ordered references into the `cars` collection.
    #[serde(default)]
    pub cars: Vec<ObjectId>,
}

/// A car document as held in the `cars` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarModel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub brand: String,
    /// Load/capacity value.
    pub carriage: Number,
}

/// User document before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: Number,
    pub email: String,
    pub cars: Vec<ObjectId>,
}

/// Car document before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCar {
    pub brand: String,
    pub carriage: Number,
}

/// Field set written by `PUT /user`. The email is the lookup key and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub age: Number,
    pub cars: Vec<ObjectId>,
}

/// Field set written by `PUT /car`.
#[derive(Debug, Clone, PartialEq)]
pub struct CarUpdate {
    pub brand: String,
    pub carriage: Number,
}

impl NewUser {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: ObjectId) -> UserModel {
        UserModel {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            cars: self.cars,
        }
    }
}

impl NewCar {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: ObjectId) -> CarModel {
        CarModel {
            id,
            brand: self.brand,
            carriage: self.carriage,
        }
    }
}

/// User as returned to clients, with car references expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: Number,
    pub email: String,
    pub cars: Vec<Car>,
}

/// Car as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub brand: String,
    pub carriage: Number,
}

/// Body of a `201 Created` answer to `POST /user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub name: String,
    pub age: Number,
    pub email: String,
    pub cars: Vec<Car>,
    pub id: String,
}

/// Body of a `201 Created` answer to `POST /car`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedCar {
    pub brand: String,
    pub carriage: Number,
    pub id: String,
}
