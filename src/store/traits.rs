use thiserror::Error;

use crate::model::{Beer, Brewery, Id};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A write would violate a uniqueness constraint.
    #[error("duplicate value: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate(db_err.message().to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait::async_trait]
pub trait BreweryStore: Send + Sync {
    async fn get_brewery(&self, id: &Id) -> StoreResult<Option<Brewery>>;
    /// Fails with `StoreError::Duplicate` when another brewery has the same name.
    async fn insert_brewery(&self, brewery: Brewery) -> StoreResult<Brewery>;
    /// Replaces the stored fields. Returns `None` if the record no longer exists.
    async fn update_brewery(&self, brewery: Brewery) -> StoreResult<Option<Brewery>>;
    async fn delete_brewery(&self, id: &Id) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait BeerStore: Send + Sync {
    async fn get_beer(&self, id: &Id) -> StoreResult<Option<Beer>>;
    async fn insert_beer(&self, beer: Beer) -> StoreResult<Beer>;
    async fn update_beer(&self, beer: Beer) -> StoreResult<Option<Beer>>;
    async fn delete_beer(&self, id: &Id) -> StoreResult<bool>;
}

pub trait Store: BreweryStore + BeerStore + Send + Sync {}
impl<T: BreweryStore + BeerStore + Send + Sync> Store for T {}
