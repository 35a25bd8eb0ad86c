use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use stellar_core::{BookingError, BookingResult, BookingStore, CatalogLookup};
use stellar_domain::{
    Accommodation, Booking, BookingDetail, BookingStatus, CreateBookingRequest, Destination,
    Invoice, Package, PackageQuote, UpdateBookingRequest,
};
use tracing::info;
use uuid::Uuid;

use crate::pricing::{PricingCalculator, PricingConfig};
use crate::validator;

/// Owns booking status transitions and timestamps. Collaborators are
/// injected so tests can substitute in-memory fakes; each call is an
/// independent read-validate-write unit of work with no in-process shared
/// state.
pub struct BookingEngine {
    catalog: Arc<dyn CatalogLookup>,
    store: Arc<dyn BookingStore>,
    pricing: PricingCalculator,
}

impl BookingEngine {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        store: Arc<dyn BookingStore>,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            pricing: PricingCalculator::new(pricing),
        }
    }

    /// Create a booking: resolve all four references, validate, price, then
    /// persist with status `Confirmed`. Nothing is written on any failure.
    pub async fn create_booking(
        &self,
        req: CreateBookingRequest,
        requester: Uuid,
    ) -> BookingResult<Booking> {
        let destination = self.destination(req.destination_id).await?;
        let accommodation = self.accommodation(req.accommodation_id).await?;
        let package = self.package(req.package_id).await?;

        validator::validate_create(
            &req,
            destination.as_ref(),
            accommodation.as_ref(),
            package.as_ref(),
            requester,
        )?;
        let accommodation = accommodation.ok_or(BookingError::NotFound("Accommodation"))?;
        let package = package.ok_or(BookingError::NotFound("Package"))?;

        let total_price = self.pricing.total_price(
            &package,
            &accommodation,
            req.departure_date,
            req.return_date,
            req.travelers,
        );

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            destination_id: req.destination_id,
            accommodation_id: req.accommodation_id,
            package_id: req.package_id,
            departure_date: req.departure_date,
            return_date: req.return_date,
            travelers: req.travelers,
            special_requests: req.special_requests,
            total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.store
            .create(&booking)
            .await
            .map_err(BookingError::store)?;
        info!(booking_id = %booking.id, total_price, "booking confirmed");
        Ok(booking)
    }

    /// Partial update. Changed fields are re-validated against the merged
    /// record; the total is recomputed only when a price-affecting field
    /// changed, so an unrelated edit leaves the stored total untouched.
    pub async fn update_booking(
        &self,
        id: Uuid,
        update: UpdateBookingRequest,
        requester: Uuid,
    ) -> BookingResult<Booking> {
        let existing = self.load(id).await?;
        validator::check_ownership(existing.user_id, requester, "cannot update another user's booking")?;
        if existing.status == BookingStatus::Cancelled {
            return Err(BookingError::IllegalTransition);
        }

        let new_accommodation = match update.accommodation_id {
            Some(accommodation_id) => Some(self.require_accommodation(accommodation_id).await?),
            None => None,
        };
        if let Some(package_id) = update.package_id {
            self.require_package(package_id).await?;
        }

        validator::validate_update(&existing, &update, new_accommodation.as_ref())?;

        let recompute = update.affects_price();
        let mut merged = existing;
        if let Some(departure_date) = update.departure_date {
            merged.departure_date = departure_date;
        }
        if let Some(return_date) = update.return_date {
            merged.return_date = return_date;
        }
        if let Some(accommodation_id) = update.accommodation_id {
            merged.accommodation_id = accommodation_id;
        }
        if let Some(package_id) = update.package_id {
            merged.package_id = package_id;
        }
        if let Some(travelers) = update.travelers {
            merged.travelers = travelers;
        }
        if let Some(special_requests) = update.special_requests {
            merged.special_requests = Some(special_requests);
        }

        if recompute {
            let accommodation = match new_accommodation {
                Some(accommodation) => accommodation,
                None => self.require_accommodation(merged.accommodation_id).await?,
            };
            let package = self.require_package(merged.package_id).await?;
            merged.total_price = self.pricing.total_price(
                &package,
                &accommodation,
                merged.departure_date,
                merged.return_date,
                merged.travelers,
            );
        }

        merged.updated_at = Some(Utc::now());
        self.store
            .update(&merged)
            .await
            .map_err(BookingError::store)?;
        info!(booking_id = %merged.id, recomputed = recompute, "booking updated");
        Ok(merged)
    }

    /// Logical termination; the record is never deleted. Cancelling an
    /// already-cancelled booking succeeds without touching the record, so
    /// retries are safe.
    pub async fn cancel_booking(&self, id: Uuid, requester: Uuid) -> BookingResult<Booking> {
        let mut booking = self.load(id).await?;
        validator::check_ownership(booking.user_id, requester, "cannot cancel another user's booking")?;

        if booking.status == BookingStatus::Cancelled {
            return Ok(booking);
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Some(Utc::now());
        self.store
            .update(&booking)
            .await
            .map_err(BookingError::store)?;
        info!(booking_id = %booking.id, "booking cancelled");
        Ok(booking)
    }

    pub async fn booking(&self, id: Uuid, requester: Uuid) -> BookingResult<Booking> {
        let booking = self.load(id).await?;
        validator::check_ownership(booking.user_id, requester, "cannot access another user's booking")?;
        Ok(booking)
    }

    /// The requester's bookings, optionally narrowed to one status.
    pub async fn list_bookings(
        &self,
        requester: Uuid,
        status: Option<BookingStatus>,
    ) -> BookingResult<Vec<Booking>> {
        let mut bookings = self
            .store
            .list_by_user(requester)
            .await
            .map_err(BookingError::store)?;
        if let Some(status) = status {
            bookings.retain(|b| b.status == status);
        }
        Ok(bookings)
    }

    /// Booking plus resolved catalog names, departure countdown, and the
    /// derived invoice.
    pub async fn booking_detail(
        &self,
        id: Uuid,
        requester: Uuid,
        today: NaiveDate,
        issued_at: DateTime<Utc>,
    ) -> BookingResult<BookingDetail> {
        let booking = self.booking(id, requester).await?;
        let (destination, accommodation, package) = self.resolve_references(&booking).await?;

        let invoice = self
            .pricing
            .invoice(&booking, &destination, &accommodation, &package, issued_at);
        let countdown_days = countdown_days(&booking, today);

        Ok(BookingDetail {
            destination_name: destination.name,
            accommodation_name: accommodation.name,
            package_name: package.name,
            countdown_days,
            invoice,
            booking,
        })
    }

    /// Derived on demand; never persisted.
    pub async fn invoice(
        &self,
        id: Uuid,
        requester: Uuid,
        issued_at: DateTime<Utc>,
    ) -> BookingResult<Invoice> {
        let booking = self.booking(id, requester).await?;
        let (destination, accommodation, package) = self.resolve_references(&booking).await?;
        Ok(self
            .pricing
            .invoice(&booking, &destination, &accommodation, &package, issued_at))
    }

    /// Pre-booking price preview; unrelated to any stored booking total.
    pub async fn quote_package(
        &self,
        package_id: Uuid,
        destination_id: Uuid,
        duration_days: i64,
    ) -> BookingResult<PackageQuote> {
        if duration_days < 1 {
            return Err(BookingError::InvalidRange);
        }
        let package = self.require_package(package_id).await?;
        let destination = self
            .destination(destination_id)
            .await?
            .ok_or(BookingError::NotFound("Destination"))?;
        Ok(self.pricing.quote_package(&package, &destination, duration_days))
    }

    async fn load(&self, id: Uuid) -> BookingResult<Booking> {
        self.store
            .get(id)
            .await
            .map_err(BookingError::store)?
            .ok_or(BookingError::NotFound("Booking"))
    }

    /// Re-resolve a stored booking's references. The catalog and the store
    /// are separate backends with no shared transaction, so a stored
    /// reference can in principle dangle; that surfaces as `NotFound`.
    async fn resolve_references(
        &self,
        booking: &Booking,
    ) -> BookingResult<(Destination, Accommodation, Package)> {
        let destination = self
            .destination(booking.destination_id)
            .await?
            .ok_or(BookingError::NotFound("Destination"))?;
        let accommodation = self.require_accommodation(booking.accommodation_id).await?;
        let package = self.require_package(booking.package_id).await?;
        Ok((destination, accommodation, package))
    }

    async fn destination(&self, id: Uuid) -> BookingResult<Option<Destination>> {
        self.catalog
            .destination(id)
            .await
            .map_err(BookingError::store)
    }

    async fn accommodation(&self, id: Uuid) -> BookingResult<Option<Accommodation>> {
        self.catalog
            .accommodation(id)
            .await
            .map_err(BookingError::store)
    }

    async fn package(&self, id: Uuid) -> BookingResult<Option<Package>> {
        self.catalog.package(id).await.map_err(BookingError::store)
    }

    async fn require_accommodation(&self, id: Uuid) -> BookingResult<Accommodation> {
        self.accommodation(id)
            .await?
            .ok_or(BookingError::NotFound("Accommodation"))
    }

    async fn require_package(&self, id: Uuid) -> BookingResult<Package> {
        self.package(id)
            .await?
            .ok_or(BookingError::NotFound("Package"))
    }
}

/// Whole days until departure, clamped to 0 once the trip has departed.
pub fn countdown_days(booking: &Booking, today: NaiveDate) -> i64 {
    (booking.departure_date - today).num_days().max(0)
}
