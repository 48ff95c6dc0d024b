//! HTTP API: routing and handlers for users and cars.
//!
//! # Routes
//! ```text
//! GET    /users   ?name=      → list (optionally by exact name)
//! GET    /user    ?email=     → one user, cars expanded
//! POST   /user    {name,age,email}
//! PUT    /user    {name,age,email,cars}
//! DELETE /user    ?id=
//! GET    /cars                → list
//! GET    /car     ?id=
//! POST   /car     {brand,carriage}
//! PUT    /car     {brand,carriage,id}
//! DELETE /car     ?id=
//! anything else               → 404 "Endpoint not found"
//! ```
//!
//! # Design Decisions
//! - Literal paths only: no trailing-slash normalization, no path parameters
//! - The store handle is injected through router state, never global
//! - A known path with an unknown method is also "Endpoint not found"

pub mod cars;
pub mod error;
pub mod payload;
pub mod users;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::store::DocumentStore;

pub use error::ApiError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// Build the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(users::list_users).fallback(endpoint_not_found),
        )
        .route(
            "/user",
            get(users::get_user)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .fallback(endpoint_not_found),
        )
        .route("/cars", get(cars::list_cars).fallback(endpoint_not_found))
        .route(
            "/car",
            get(cars::get_car)
                .post(cars::create_car)
                .put(cars::update_car)
                .delete(cars::delete_car)
                .fallback(endpoint_not_found),
        )
        .fallback(endpoint_not_found)
        .with_state(state)
}

async fn endpoint_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Endpoint not found")
}
