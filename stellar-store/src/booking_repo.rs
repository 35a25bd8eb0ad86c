use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use stellar_core::BookingStore;
use stellar_domain::{Booking, BookingStatus};
use uuid::Uuid;

/// Booking persistence backed by Postgres. Single-record reads and writes
/// only; the engine owns validation and timestamps, this adapter just maps
/// rows. Updates rewrite the whole record (last-write-wins).
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    destination_id: Uuid,
    accommodation_id: Uuid,
    package_id: Uuid,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    travelers: i32,
    special_requests: Option<String>,
    total_price: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, Box<dyn std::error::Error + Send + Sync>> {
        let status = match self.status.as_str() {
            "CONFIRMED" => BookingStatus::Confirmed,
            "CANCELLED" => BookingStatus::Cancelled,
            other => return Err(format!("unknown booking status: {other}").into()),
        };

        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            destination_id: self.destination_id,
            accommodation_id: self.accommodation_id,
            package_id: self.package_id,
            departure_date: self.departure_date,
            return_date: self.return_date,
            travelers: self.travelers,
            special_requests: self.special_requests,
            total_price: self.total_price,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const BOOKING_COLUMNS: &str = "id, user_id, destination_id, accommodation_id, package_id, \
     departure_date, return_date, travelers, special_requests, total_price, status, \
     created_at, updated_at";

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            "INSERT INTO bookings (id, user_id, destination_id, accommodation_id, package_id, \
             departure_date, return_date, travelers, special_requests, total_price, status, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.destination_id)
        .bind(booking.accommodation_id)
        .bind(booking.package_id)
        .bind(booking.departure_date)
        .bind(booking.return_date)
        .bind(booking.travelers)
        .bind(&booking.special_requests)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn update(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            "UPDATE bookings SET destination_id = $2, accommodation_id = $3, package_id = $4, \
             departure_date = $5, return_date = $6, travelers = $7, special_requests = $8, \
             total_price = $9, status = $10, updated_at = $11 \
             WHERE id = $1",
        )
        .bind(booking.id)
        .bind(booking.destination_id)
        .bind(booking.accommodation_id)
        .bind(booking.package_id)
        .bind(booking.departure_date)
        .bind(booking.return_date)
        .bind(booking.travelers)
        .bind(&booking.special_requests)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
