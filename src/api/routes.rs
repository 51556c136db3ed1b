use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{beer_handlers, brewery_handlers, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Breweries
        .route("/api/brewerys", post(brewery_handlers::create_brewery::<S>))
        .route(
            "/api/brewerys/:id",
            get(brewery_handlers::get_brewery::<S>)
                .put(brewery_handlers::update_brewery::<S>)
                .delete(brewery_handlers::delete_brewery::<S>),
        )
        // Beers
        .route("/api/beers", post(beer_handlers::create_beer::<S>))
        .route(
            "/api/beers/:id",
            get(beer_handlers::get_beer::<S>)
                .put(beer_handlers::update_beer::<S>)
                .delete(beer_handlers::delete_beer::<S>),
        )
        .fallback(handlers::route_not_found)
}
