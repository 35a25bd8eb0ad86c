use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stellar_domain::{Accommodation, Booking, Destination, Invoice, InvoiceCosts, Package, PackageQuote};

/// Flat per-traveler surcharges applied to every booking, in minor currency
/// units. Loaded from configuration; not derived from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub destination_fee: i64,
    pub travel_document_fee: i64,
    pub insurance_fee: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            destination_fee: 500,
            travel_document_fee: 300,
            insurance_fee: 200,
        }
    }
}

/// Derives booking totals, itemized invoices, and pre-booking package
/// quotes. Pure and deterministic: identical inputs always yield identical
/// outputs, which is what lets the engine re-check a stored total after a
/// recomputation.
pub struct PricingCalculator {
    config: PricingConfig,
}

impl PricingCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// total = travelers x (package base + nightly rate x nights + flat fees)
    pub fn total_price(
        &self,
        package: &Package,
        accommodation: &Accommodation,
        departure: NaiveDate,
        ret: NaiveDate,
        travelers: i32,
    ) -> i64 {
        let nights = (ret - departure).num_days();
        let per_traveler = package.base_price
            + accommodation.price_per_night * nights
            + self.config.destination_fee
            + self.config.travel_document_fee
            + self.config.insurance_fee;
        travelers as i64 * per_traveler
    }

    /// Itemized breakdown for a stored booking. Each line is multiplied out
    /// across travelers; the total is the booking's stored total.
    pub fn invoice(
        &self,
        booking: &Booking,
        destination: &Destination,
        accommodation: &Accommodation,
        package: &Package,
        issued_at: DateTime<Utc>,
    ) -> Invoice {
        let nights = booking.duration_days();
        let travelers = booking.travelers as i64;

        let costs = InvoiceCosts {
            base_package: package.base_price * travelers,
            accommodation: accommodation.price_per_night * nights * travelers,
            destination_fee: self.config.destination_fee * travelers,
            travel_document_fee: self.config.travel_document_fee * travelers,
            insurance_fee: self.config.insurance_fee * travelers,
        };

        Invoice {
            booking_id: booking.id,
            invoice_number: invoice_number(booking),
            issue_date: issued_at,
            destination: destination.name.clone(),
            accommodation: accommodation.name.clone(),
            package: package.name.clone(),
            departure_date: booking.departure_date,
            return_date: booking.return_date,
            duration_days: nights,
            travelers: booking.travelers,
            costs,
            total: booking.total_price,
        }
    }

    /// Pre-booking preview for a package at a destination. Applies the
    /// destination's price factor and a stay-length discount; independent of
    /// the invoice path and never stored on a booking.
    pub fn quote_package(
        &self,
        package: &Package,
        destination: &Destination,
        duration_days: i64,
    ) -> PackageQuote {
        let duration_factor = duration_discount_factor(duration_days);
        let final_price = (package.base_price as f64
            * destination.price_factor
            * duration_factor
            * duration_days as f64)
            .round() as i64;

        PackageQuote {
            package_id: package.id,
            destination_id: destination.id,
            duration_days,
            base_price: package.base_price,
            destination_factor: destination.price_factor,
            duration_factor,
            final_price,
        }
    }
}

/// Stay-length discount tiers: 15% off beyond two weeks, 10% off beyond one.
pub fn duration_discount_factor(duration_days: i64) -> f64 {
    if duration_days > 14 {
        0.85
    } else if duration_days > 7 {
        0.9
    } else {
        1.0
    }
}

fn invoice_number(booking: &Booking) -> String {
    // INV- plus the first 8 hex chars of the booking id.
    let id = booking.id.simple().to_string();
    format!("INV-{}", &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_domain::BookingStatus;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn package(base_price: i64) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: "Voyager".to_string(),
            tier: "Business".to_string(),
            base_price,
            features: vec![],
            capacity: 6,
        }
    }

    fn accommodation(price_per_night: i64, destination_id: Uuid) -> Accommodation {
        Accommodation {
            id: Uuid::new_v4(),
            destination_id,
            name: "Tranquility Suites".to_string(),
            kind: "Orbital Villa".to_string(),
            description: String::new(),
            amenities: vec![],
            price_per_night,
            capacity: 4,
            rating: 4.8,
        }
    }

    fn destination(price_factor: f64) -> Destination {
        Destination {
            id: Uuid::new_v4(),
            name: "Luna Resort Belt".to_string(),
            description: String::new(),
            distance_km: 384_400.0,
            travel_time_hours: 72,
            features: vec![],
            price_factor,
        }
    }

    #[test]
    fn worked_total_two_travelers_five_nights() {
        let calc = PricingCalculator::new(PricingConfig::default());
        let dest = destination(1.5);
        let pkg = package(1000);
        let acc = accommodation(200, dest.id);

        // 2 x (1000 + 200*5 + 500 + 300 + 200) = 2 x 3000
        let total = calc.total_price(&pkg, &acc, date(2025, 4, 10), date(2025, 4, 15), 2);
        assert_eq!(total, 6000);
    }

    #[test]
    fn total_is_deterministic() {
        let calc = PricingCalculator::new(PricingConfig::default());
        let dest = destination(1.5);
        let pkg = package(1234);
        let acc = accommodation(321, dest.id);

        let a = calc.total_price(&pkg, &acc, date(2025, 6, 1), date(2025, 6, 9), 3);
        let b = calc.total_price(&pkg, &acc, date(2025, 6, 1), date(2025, 6, 9), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn quote_discount_boundaries() {
        assert_eq!(duration_discount_factor(7), 1.0);
        assert_eq!(duration_discount_factor(8), 0.9);
        assert_eq!(duration_discount_factor(14), 0.9);
        assert_eq!(duration_discount_factor(15), 0.85);
    }

    #[test]
    fn quote_applies_destination_and_duration_factors() {
        let calc = PricingCalculator::new(PricingConfig::default());
        let dest = destination(1.5);
        let pkg = package(1000);

        let quote = calc.quote_package(&pkg, &dest, 10);
        // 1000 * 1.5 * 0.9 * 10
        assert_eq!(quote.final_price, 13500);
        assert_eq!(quote.destination_factor, 1.5);
        assert_eq!(quote.duration_factor, 0.9);
    }

    #[test]
    fn invoice_lines_sum_to_stored_total() {
        let calc = PricingCalculator::new(PricingConfig::default());
        let dest = destination(1.5);
        let pkg = package(1000);
        let acc = accommodation(200, dest.id);

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            destination_id: dest.id,
            accommodation_id: acc.id,
            package_id: pkg.id,
            departure_date: date(2025, 4, 10),
            return_date: date(2025, 4, 15),
            travelers: 2,
            special_requests: None,
            total_price: calc.total_price(&pkg, &acc, date(2025, 4, 10), date(2025, 4, 15), 2),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: None,
        };

        let invoice = calc.invoice(&booking, &dest, &acc, &pkg, Utc::now());
        assert_eq!(invoice.costs.sum(), booking.total_price);
        assert_eq!(invoice.total, booking.total_price);
        assert_eq!(invoice.duration_days, 5);
        assert!(invoice.invoice_number.starts_with("INV-"));
        assert_eq!(invoice.invoice_number.len(), 4 + 8);
    }

    #[test]
    fn invoice_costs_are_reproducible() {
        let calc = PricingCalculator::new(PricingConfig::default());
        let dest = destination(2.0);
        let pkg = package(500);
        let acc = accommodation(100, dest.id);

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            destination_id: dest.id,
            accommodation_id: acc.id,
            package_id: pkg.id,
            departure_date: date(2025, 8, 1),
            return_date: date(2025, 8, 4),
            travelers: 1,
            special_requests: None,
            total_price: calc.total_price(&pkg, &acc, date(2025, 8, 1), date(2025, 8, 4), 1),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: None,
        };

        let issued = Utc::now();
        let a = calc.invoice(&booking, &dest, &acc, &pkg, issued);
        let b = calc.invoice(&booking, &dest, &acc, &pkg, issued);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.invoice_number, b.invoice_number);
    }
}
