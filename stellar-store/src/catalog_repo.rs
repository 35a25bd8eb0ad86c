use async_trait::async_trait;
use sqlx::PgPool;
use stellar_core::CatalogLookup;
use stellar_domain::{Accommodation, Destination, Package};
use uuid::Uuid;

/// Read-only catalog lookups backed by Postgres. The catalog is owned by a
/// separate service; this adapter only ever selects by id.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DestinationRow {
    id: Uuid,
    name: String,
    description: String,
    distance_km: f64,
    travel_time_hours: i32,
    features: Vec<String>,
    price_factor: f64,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Destination {
            id: row.id,
            name: row.name,
            description: row.description,
            distance_km: row.distance_km,
            travel_time_hours: row.travel_time_hours,
            features: row.features,
            price_factor: row.price_factor,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccommodationRow {
    id: Uuid,
    destination_id: Uuid,
    name: String,
    kind: String,
    description: String,
    amenities: Vec<String>,
    price_per_night: i64,
    capacity: i32,
    rating: f64,
}

impl From<AccommodationRow> for Accommodation {
    fn from(row: AccommodationRow) -> Self {
        Accommodation {
            id: row.id,
            destination_id: row.destination_id,
            name: row.name,
            kind: row.kind,
            description: row.description,
            amenities: row.amenities,
            price_per_night: row.price_per_night,
            capacity: row.capacity,
            rating: row.rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    name: String,
    tier: String,
    base_price: i64,
    features: Vec<String>,
    capacity: i32,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            id: row.id,
            name: row.name,
            tier: row.tier,
            base_price: row.base_price,
            features: row.features,
            capacity: row.capacity,
        }
    }
}

#[async_trait]
impl CatalogLookup for PgCatalog {
    async fn destination(
        &self,
        id: Uuid,
    ) -> Result<Option<Destination>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, DestinationRow>(
            "SELECT id, name, description, distance_km, travel_time_hours, features, price_factor \
             FROM destinations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Destination::from))
    }

    async fn accommodation(
        &self,
        id: Uuid,
    ) -> Result<Option<Accommodation>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            "SELECT id, destination_id, name, kind, description, amenities, price_per_night, \
             capacity, rating FROM accommodations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Accommodation::from))
    }

    async fn package(
        &self,
        id: Uuid,
    ) -> Result<Option<Package>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, PackageRow>(
            "SELECT id, name, tier, base_price, features, capacity FROM packages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Package::from))
    }
}
