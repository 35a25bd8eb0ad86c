use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status. Only the two states the lifecycle actually assigns;
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// The central reservation record. All cross-entity references are by id;
/// the referenced records live in the catalog, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub accommodation_id: Uuid,
    pub package_id: Uuid,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: i32,
    pub special_requests: Option<String>,
    /// Minor currency units, always derived by the pricing calculator.
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    /// Absent until the first successful mutation.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Trip length in whole nights. Validation guarantees this is positive
    /// for any stored booking.
    pub fn duration_days(&self) -> i64 {
        (self.return_date - self.departure_date).num_days()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub destination_id: Uuid,
    pub accommodation_id: Uuid,
    pub package_id: Uuid,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: i32,
    pub special_requests: Option<String>,
}

/// Partial update payload. Absent fields keep their stored values and are
/// not re-validated. The destination is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingRequest {
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub accommodation_id: Option<Uuid>,
    pub package_id: Option<Uuid>,
    pub travelers: Option<i32>,
    pub special_requests: Option<String>,
}

impl UpdateBookingRequest {
    /// True when the update touches a field the total price depends on.
    pub fn affects_price(&self) -> bool {
        self.departure_date.is_some()
            || self.return_date.is_some()
            || self.accommodation_id.is_some()
            || self.package_id.is_some()
            || self.travelers.is_some()
    }
}

/// Booking enriched with resolved catalog names, the departure countdown
/// and the derived invoice, for the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub destination_name: String,
    pub accommodation_name: String,
    pub package_name: String,
    pub countdown_days: i64,
    pub invoice: crate::invoice::Invoice,
}
