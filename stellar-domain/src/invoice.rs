use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Itemized cost lines for a booking. Every line is already multiplied out
/// across travelers (and nights, for the accommodation line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceCosts {
    pub base_package: i64,
    pub accommodation: i64,
    pub destination_fee: i64,
    pub travel_document_fee: i64,
    pub insurance_fee: i64,
}

impl InvoiceCosts {
    pub fn sum(&self) -> i64 {
        self.base_package
            + self.accommodation
            + self.destination_fee
            + self.travel_document_fee
            + self.insurance_fee
    }
}

/// Derived on demand from a booking and its resolved catalog records.
/// Never persisted; reproducible from the same inputs.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub issue_date: DateTime<Utc>,
    pub destination: String,
    pub accommodation: String,
    pub package: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub duration_days: i64,
    pub travelers: i32,
    pub costs: InvoiceCosts,
    pub total: i64,
}

/// Pre-booking price preview for a package at a destination. Independent of
/// the invoice path; not what gets stored on a booking.
#[derive(Debug, Clone, Serialize)]
pub struct PackageQuote {
    pub package_id: Uuid,
    pub destination_id: Uuid,
    pub duration_days: i64,
    pub base_price: i64,
    pub destination_factor: f64,
    pub duration_factor: f64,
    pub final_price: i64,
}
