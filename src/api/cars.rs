//! Car handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::error::ApiError;
use crate::api::payload::{
    first_param, parse_body, parse_id, required_number, required_param, required_str, QueryPairs,
};
use crate::api::AppState;
use crate::models::projection::project_car;
use crate::models::{Car, CarUpdate, CreatedCar, NewCar};
use crate::store::{CarFilter, UserFilter};

/// `GET /cars`
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state.store.find_cars(&CarFilter::All).await?;
    Ok(Json(cars.into_iter().map(project_car).collect()))
}

/// `GET /car`: Look a car up by identifier.
pub async fn get_car(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<Car>, ApiError> {
    let id = parse_id(&required_param(first_param(&query, "id"))?)?;

    let car = state
        .store
        .find_car(&CarFilter::Id(id))
        .await?
        .ok_or(ApiError::CarNotFound)?;

    Ok(Json(project_car(car)))
}

/// `POST /car`
pub async fn create_car(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(&body)?;
    let brand = required_str(&body, "brand")?;
    let carriage = required_number(&body, "carriage")?;

    let car = NewCar { brand, carriage };
    let id = state.store.insert_car(&car).await?;

    tracing::info!(car_id = %id, "Car created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedCar {
            brand: car.brand,
            carriage: car.carriage,
            id: id.to_hex(),
        }),
    ))
}

/// `PUT /car`: Replace brand and carriage of the car with this identifier.
pub async fn update_car(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(&body)?;
    let brand = required_str(&body, "brand")?;
    let carriage = required_number(&body, "carriage")?;
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or(ApiError::InvalidId)
        .and_then(parse_id)?;

    let modified = state
        .store
        .update_car(&CarFilter::Id(id), &CarUpdate { brand, carriage })
        .await?;

    if modified == 0 {
        return Err(ApiError::CarNotFound);
    }
    Ok((StatusCode::OK, "OK"))
}

/// `DELETE /car`
///
/// Known defect kept for compatibility: the delete runs against the users
/// collection, so it only succeeds when `id` names a user. Car documents are
/// never removed. After a successful delete, `id` is pulled from every
/// user's car list.
pub async fn delete_car(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&required_param(first_param(&query, "id"))?)?;

    let deleted = state.store.delete_user(&UserFilter::Id(id)).await?;
    if deleted == 0 {
        return Err(ApiError::UserNotFound);
    }

    let pulled = state.store.pull_car_reference(id).await?;
    tracing::info!(id = %id, references_removed = pulled, "Delete via /car completed");

    Ok((StatusCode::OK, "OK"))
}
