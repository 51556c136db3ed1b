use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::error::ApiError;
use crate::api::extract::JsonBody;
use crate::api::handlers::AppState;
use crate::model::{parse_id, Brewery, BreweryUpdate, NewBrewery};
use crate::store::traits::Store;

fn brewery_not_found() -> ApiError {
    ApiError::NotFound("brewery not found".to_string())
}

/// Malformed ids resolve to nothing rather than an error.
async fn find_brewery<S: Store>(store: &S, raw_id: &str) -> Result<Brewery, ApiError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(brewery_not_found());
    };
    store.get_brewery(&id).await?.ok_or_else(brewery_not_found)
}

/// POST /api/brewerys
pub async fn create_brewery<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<NewBrewery>, JsonRejection>,
) -> Result<Json<Brewery>, ApiError> {
    let Json(input) = payload?;
    let brewery = store.insert_brewery(input.into_brewery()?).await?;

    log::info!("POST - created brewery {}", brewery.id);
    Ok(Json(brewery))
}

/// GET /api/brewerys/{id}
pub async fn get_brewery<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
) -> Result<Json<Brewery>, ApiError> {
    let brewery = find_brewery(&*store, &id).await?;

    log::info!("GET - Returning a 200 status code");
    Ok(Json(brewery))
}

/// PUT /api/brewerys/{id}
/// Applies the supplied fields and re-validates the whole record; a name
/// already used by another brewery is a conflict.
pub async fn update_brewery<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
    payload: Result<JsonBody<BreweryUpdate>, ApiError>,
) -> Result<Json<Brewery>, ApiError> {
    let existing = find_brewery(&*store, &id).await?;
    let JsonBody(update) = payload?;

    let updated = update.apply_to(&existing)?;
    let brewery = store
        .update_brewery(updated)
        .await?
        .ok_or_else(brewery_not_found)?;

    log::info!("PUT - Returning a 200 status code");
    Ok(Json(brewery))
}

/// DELETE /api/brewerys/{id}
pub async fn delete_brewery<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
) -> Result<StatusCode, ApiError> {
    log::info!("DELETE - processing a request");

    let brewery = find_brewery(&*store, &id).await?;
    if !store.delete_brewery(&brewery.id).await? {
        return Err(brewery_not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
