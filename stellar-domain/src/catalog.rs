use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A travel destination as the catalog exposes it. Only the fields the
/// engine and its callers read; the catalog remains the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub distance_km: f64,
    pub travel_time_hours: i32,
    pub features: Vec<String>,
    /// Base price multiplier applied on package quotes.
    pub price_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: Uuid,
    pub destination_id: Uuid,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub amenities: Vec<String>,
    /// Minor currency units per night, per traveler.
    pub price_per_night: i64,
    pub capacity: i32,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    /// e.g. "Luxury", "Business", "Economy"
    pub tier: String,
    /// Minor currency units, per traveler.
    pub base_price: i64,
    pub features: Vec<String>,
    pub capacity: i32,
}
