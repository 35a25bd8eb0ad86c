use async_trait::async_trait;
use stellar_domain::{Accommodation, Booking, Destination, Package};
use uuid::Uuid;

/// Read-only access to the destination/accommodation/package catalog.
/// Every lookup returns current truth; the engine never caches.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn destination(
        &self,
        id: Uuid,
    ) -> Result<Option<Destination>, Box<dyn std::error::Error + Send + Sync>>;

    async fn accommodation(
        &self,
        id: Uuid,
    ) -> Result<Option<Accommodation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn package(
        &self,
        id: Uuid,
    ) -> Result<Option<Package>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Durable per-record booking CRUD. No cross-record transactions are
/// assumed; the engine re-validates relationships on every mutation.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    /// Whole-record write, last-write-wins. Optimistic versioning is an
    /// extension point, not assumed here.
    async fn update(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
