//! MongoDB-backed store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::Number;
use mongodb::{Client, Collection, Database};

use super::{
    CarFilter, DocumentStore, StoreError, StoreResult, UserFilter, CARS_COLLECTION,
    USERS_COLLECTION,
};
use crate::models::{CarModel, CarUpdate, NewCar, NewUser, UserModel, UserUpdate};

/// Store over the `users` and `cars` collections of one database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    users: Collection<UserModel>,
    cars: Collection<CarModel>,
}

impl MongoStore {
    /// Connect to `url` and bind the two collections of `database`.
    pub async fn connect(url: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self::from_database(client.database(database)))
    }

    pub fn from_database(database: Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
            cars: database.collection(CARS_COLLECTION),
            database,
        }
    }
}

fn user_filter(filter: &UserFilter) -> Document {
    match filter {
        UserFilter::All => doc! {},
        UserFilter::Name(name) => doc! { "name": name.as_str() },
        UserFilter::Email(email) => doc! { "email": email.as_str() },
        UserFilter::Id(id) => doc! { "_id": *id },
    }
}

fn car_filter(filter: &CarFilter) -> Document {
    match filter {
        CarFilter::All => doc! {},
        CarFilter::Id(id) => doc! { "_id": *id },
        CarFilter::Ids(ids) => doc! { "_id": { "$in": ids.clone() } },
    }
}

/// Integral numbers are stored as `Int64`, everything else as `Double`.
fn number(n: &Number) -> Bson {
    match n.as_i64() {
        Some(i) => Bson::Int64(i),
        None => n.as_f64().map_or(Bson::Null, Bson::Double),
    }
}

fn inserted_id(id: mongodb::bson::Bson) -> StoreResult<ObjectId> {
    id.as_object_id().ok_or(StoreError::MissingInsertedId)
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_users(&self, filter: &UserFilter) -> StoreResult<Vec<UserModel>> {
        let cursor = self.users.find(user_filter(filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_user(&self, filter: &UserFilter) -> StoreResult<Option<UserModel>> {
        Ok(self.users.find_one(user_filter(filter)).await?)
    }

    async fn insert_user(&self, user: &NewUser) -> StoreResult<ObjectId> {
        let result = self
            .users
            .clone_with_type::<NewUser>()
            .insert_one(user)
            .await?;
        inserted_id(result.inserted_id)
    }

    async fn update_user(&self, filter: &UserFilter, update: &UserUpdate) -> StoreResult<u64> {
        let set = doc! {
            "$set": {
                "name": update.name.as_str(),
                "age": number(&update.age),
                "cars": update.cars.clone(),
            }
        };
        let result = self.users.update_one(user_filter(filter), set).await?;
        Ok(result.modified_count)
    }

    async fn delete_user(&self, filter: &UserFilter) -> StoreResult<u64> {
        let result = self.users.delete_one(user_filter(filter)).await?;
        Ok(result.deleted_count)
    }

    async fn pull_car_reference(&self, car_id: ObjectId) -> StoreResult<u64> {
        let result = self
            .users
            .update_many(doc! { "cars": car_id }, doc! { "$pull": { "cars": car_id } })
            .await?;
        Ok(result.modified_count)
    }

    async fn find_cars(&self, filter: &CarFilter) -> StoreResult<Vec<CarModel>> {
        let cursor = self.cars.find(car_filter(filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_car(&self, filter: &CarFilter) -> StoreResult<Option<CarModel>> {
        Ok(self.cars.find_one(car_filter(filter)).await?)
    }

    async fn insert_car(&self, car: &NewCar) -> StoreResult<ObjectId> {
        let result = self
            .cars
            .clone_with_type::<NewCar>()
            .insert_one(car)
            .await?;
        inserted_id(result.inserted_id)
    }

    async fn update_car(&self, filter: &CarFilter, update: &CarUpdate) -> StoreResult<u64> {
        let set = doc! {
            "$set": {
                "brand": update.brand.as_str(),
                "carriage": number(&update.carriage),
            }
        };
        let result = self.cars.update_one(car_filter(filter), set).await?;
        Ok(result.modified_count)
    }
}
