use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::error::ApiError;
use crate::api::extract::JsonBody;
use crate::api::handlers::AppState;
use crate::model::{parse_id, Beer, BeerUpdate, NewBeer};
use crate::store::traits::Store;

fn beer_not_found() -> ApiError {
    ApiError::NotFound("beer not found".to_string())
}

async fn find_beer<S: Store>(store: &S, raw_id: &str) -> Result<Beer, ApiError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(beer_not_found());
    };
    store.get_beer(&id).await?.ok_or_else(beer_not_found)
}

/// POST /api/beers
/// The `brewery` reference is stored as given; it is not checked against
/// existing breweries.
pub async fn create_beer<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<NewBeer>, JsonRejection>,
) -> Result<Json<Beer>, ApiError> {
    let Json(input) = payload?;
    let beer = store.insert_beer(input.into_beer()?).await?;

    log::info!("POST - created beer {}", beer.id);
    Ok(Json(beer))
}

/// GET /api/beers/{id}
pub async fn get_beer<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
) -> Result<Json<Beer>, ApiError> {
    let beer = find_beer(&*store, &id).await?;

    log::info!("GET - Returning a 200 status code");
    Ok(Json(beer))
}

/// PUT /api/beers/{id}
pub async fn update_beer<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
    payload: Result<JsonBody<BeerUpdate>, ApiError>,
) -> Result<Json<Beer>, ApiError> {
    let existing = find_beer(&*store, &id).await?;
    let JsonBody(update) = payload?;

    let beer = store
        .update_beer(update.apply_to(&existing)?)
        .await?
        .ok_or_else(beer_not_found)?;

    log::info!("PUT - Returning a 200 status code");
    Ok(Json(beer))
}

/// DELETE /api/beers/{id}
pub async fn delete_beer<S: Store>(
    Path(id): Path<String>,
    State(store): State<AppState<S>>,
) -> Result<StatusCode, ApiError> {
    log::info!("DELETE - processing a request");

    let beer = find_beer(&*store, &id).await?;
    if !store.delete_beer(&beer.id).await? {
        return Err(beer_not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
