//! User handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::error::ApiError;
use crate::api::payload::{
    first_param, id_list, parse_body, parse_id, required_number, required_param, required_str,
    QueryPairs,
};
use crate::api::AppState;
use crate::models::projection::{project_user, project_users};
use crate::models::{CreatedUser, NewUser, User, UserUpdate};
use crate::store::UserFilter;

/// `GET /users`: Every user, or those whose name equals `name` exactly.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<Vec<User>>, ApiError> {
    let filter = match first_param(&query, "name").filter(|n| !n.is_empty()) {
        Some(name) => UserFilter::Name(name),
        None => UserFilter::All,
    };

    let models = state.store.find_users(&filter).await?;
    let users = project_users(state.store.as_ref(), models).await?;
    Ok(Json(users))
}

/// `GET /user`: Look a user up by email.
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<User>, ApiError> {
    let email = required_param(first_param(&query, "email"))?;

    let model = state
        .store
        .find_user(&UserFilter::Email(email))
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(project_user(state.store.as_ref(), model).await?))
}

/// `POST /user`: Create a user with no cars.
///
/// The email check and the insert are two separate store calls, so two
/// concurrent requests with the same email can both succeed.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(&body)?;
    let name = required_str(&body, "name")?;
    let age = required_number(&body, "age")?;
    let email = required_str(&body, "email")?;

    let existing = state
        .store
        .find_user(&UserFilter::Email(email.clone()))
        .await?;
    if existing.is_some() {
        return Err(ApiError::UserExists);
    }

    let user = NewUser {
        name,
        age,
        email,
        cars: Vec::new(),
    };
    let id = state.store.insert_user(&user).await?;

    tracing::info!(user_id = %id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            name: user.name,
            age: user.age,
            email: user.email,
            cars: Vec::new(),
            id: id.to_hex(),
        }),
    ))
}

/// `PUT /user`: Replace name, age and cars of the user with this email.
///
/// An update that changes nothing reports zero modified documents and is
/// answered like a missing user.
pub async fn update_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(&body)?;
    let name = required_str(&body, "name")?;
    let age = required_number(&body, "age")?;
    let email = required_str(&body, "email")?;
    let cars = id_list(&body, "cars")?;

    let update = UserUpdate { name, age, cars };
    let modified = state
        .store
        .update_user(&UserFilter::Email(email), &update)
        .await?;

    if modified == 0 {
        return Err(ApiError::UserNotFound);
    }
    Ok((StatusCode::OK, "OK"))
}

/// `DELETE /user`: Delete a user by identifier.
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&required_param(first_param(&query, "id"))?)?;

    let deleted = state.store.delete_user(&UserFilter::Id(id)).await?;
    if deleted == 0 {
        return Err(ApiError::UserNotFound);
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok((StatusCode::OK, "OK"))
}
