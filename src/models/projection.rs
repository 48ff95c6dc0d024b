//! Stored documents → response shapes.

use futures_util::future::try_join_all;

use crate::models::{Car, CarModel, User, UserModel};
use crate::store::{CarFilter, DocumentStore, StoreResult};

/// Project a car document. Pure, no I/O.
pub fn project_car(model: CarModel) -> Car {
    Car {
        id: model.id.to_hex(),
        brand: model.brand,
        carriage: model.carriage,
    }
}

/// Project a user document, expanding its car references.
///
/// Cars come back in the order the store returns them, which need not be
/// the order of the stored id list. References to missing cars are dropped.
pub async fn project_user(store: &dyn DocumentStore, model: UserModel) -> StoreResult<User> {
    let cars = store.find_cars(&CarFilter::Ids(model.cars)).await?;

    Ok(User {
        id: model.id.to_hex(),
        name: model.name,
        age: model.age,
        email: model.email,
        cars: cars.into_iter().map(project_car).collect(),
    })
}

/// Project several users concurrently, keeping their order.
pub async fn project_users(
    store: &dyn DocumentStore,
    models: Vec<UserModel>,
) -> StoreResult<Vec<User>> {
    try_join_all(models.into_iter().map(|m| project_user(store, m))).await
}
