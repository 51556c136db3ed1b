use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::model::{Beer, Brewery, Id};
use crate::store::traits::{BeerStore, BreweryStore, StoreResult};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the `breweries` and `beers` tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn brewery_from_row(row: &PgRow) -> Result<Brewery, sqlx::Error> {
    Ok(Brewery {
        id: row.try_get("id")?,
        brewery: row.try_get("brewery")?,
        location: row.try_get("location")?,
        founded: row.try_get("founded")?,
        timestamp: row.try_get("created_at")?,
    })
}

fn beer_from_row(row: &PgRow) -> Result<Beer, sqlx::Error> {
    Ok(Beer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        style: row.try_get("style")?,
        abv: row.try_get("abv")?,
        brewery: row.try_get("brewery")?,
        timestamp: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl BreweryStore for PostgresStore {
    async fn get_brewery(&self, id: &Id) -> StoreResult<Option<Brewery>> {
        let row = sqlx::query(
            "SELECT id, brewery, location, founded, created_at FROM breweries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(brewery_from_row).transpose()?)
    }

    async fn insert_brewery(&self, brewery: Brewery) -> StoreResult<Brewery> {
        let row = sqlx::query(
            r#"
            INSERT INTO breweries (id, brewery, location, founded, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, brewery, location, founded, created_at
            "#,
        )
        .bind(brewery.id)
        .bind(&brewery.brewery)
        .bind(&brewery.location)
        .bind(&brewery.founded)
        .bind(brewery.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(brewery_from_row(&row)?)
    }

    async fn update_brewery(&self, brewery: Brewery) -> StoreResult<Option<Brewery>> {
        let row = sqlx::query(
            r#"
            UPDATE breweries SET brewery = $2, location = $3, founded = $4
            WHERE id = $1
            RETURNING id, brewery, location, founded, created_at
            "#,
        )
        .bind(brewery.id)
        .bind(&brewery.brewery)
        .bind(&brewery.location)
        .bind(&brewery.founded)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(brewery_from_row).transpose()?)
    }

    async fn delete_brewery(&self, id: &Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM breweries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl BeerStore for PostgresStore {
    async fn get_beer(&self, id: &Id) -> StoreResult<Option<Beer>> {
        let row = sqlx::query(
            "SELECT id, name, style, abv, brewery, created_at FROM beers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(beer_from_row).transpose()?)
    }

    async fn insert_beer(&self, beer: Beer) -> StoreResult<Beer> {
        let row = sqlx::query(
            r#"
            INSERT INTO beers (id, name, style, abv, brewery, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, style, abv, brewery, created_at
            "#,
        )
        .bind(beer.id)
        .bind(&beer.name)
        .bind(&beer.style)
        .bind(&beer.abv)
        .bind(beer.brewery)
        .bind(beer.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(beer_from_row(&row)?)
    }

    async fn update_beer(&self, beer: Beer) -> StoreResult<Option<Beer>> {
        let row = sqlx::query(
            r#"
            UPDATE beers SET name = $2, style = $3, abv = $4, brewery = $5
            WHERE id = $1
            RETURNING id, name, style, abv, brewery, created_at
            "#,
        )
        .bind(beer.id)
        .bind(&beer.name)
        .bind(&beer.style)
        .bind(&beer.abv)
        .bind(beer.brewery)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(beer_from_row).transpose()?)
    }

    async fn delete_beer(&self, id: &Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
