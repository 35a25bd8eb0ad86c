use chrono::NaiveDate;
use stellar_core::{BookingError, BookingResult};
use stellar_domain::{
    Accommodation, Booking, CreateBookingRequest, Destination, Package, UpdateBookingRequest,
};
use uuid::Uuid;

/// Referential and business checks for a new booking. Pure: no lookups, no
/// writes; the caller resolves the referenced entities first.
pub fn validate_create(
    req: &CreateBookingRequest,
    destination: Option<&Destination>,
    accommodation: Option<&Accommodation>,
    package: Option<&Package>,
    requester: Uuid,
) -> BookingResult<()> {
    if destination.is_none() {
        return Err(BookingError::NotFound("Destination"));
    }
    let accommodation = accommodation.ok_or(BookingError::NotFound("Accommodation"))?;
    if package.is_none() {
        return Err(BookingError::NotFound("Package"));
    }

    check_ownership(req.user_id, requester, "cannot create booking for another user")?;
    check_accommodation_destination(accommodation, req.destination_id)?;
    check_date_order(req.departure_date, req.return_date)?;
    check_travelers(req.travelers)?;
    Ok(())
}

/// Re-validates only the fields present in a partial update. Absent fields
/// were valid when last written and keep their stored values. Date ordering
/// is checked against the merged (stored ⊕ update) pair whenever either
/// date changes; a changed accommodation is checked against the booking's
/// immutable destination.
pub fn validate_update(
    existing: &Booking,
    update: &UpdateBookingRequest,
    new_accommodation: Option<&Accommodation>,
) -> BookingResult<()> {
    if let Some(accommodation) = new_accommodation {
        check_accommodation_destination(accommodation, existing.destination_id)?;
    }

    if update.departure_date.is_some() || update.return_date.is_some() {
        let departure = update.departure_date.unwrap_or(existing.departure_date);
        let ret = update.return_date.unwrap_or(existing.return_date);
        check_date_order(departure, ret)?;
    }

    if let Some(travelers) = update.travelers {
        check_travelers(travelers)?;
    }
    Ok(())
}

/// I2: a booking is only ever visible to and mutable by its owner.
pub fn check_ownership(owner: Uuid, requester: Uuid, action: &'static str) -> BookingResult<()> {
    if owner != requester {
        return Err(BookingError::Forbidden(action));
    }
    Ok(())
}

/// I1: the accommodation must belong to the booking's destination.
pub fn check_accommodation_destination(
    accommodation: &Accommodation,
    destination_id: Uuid,
) -> BookingResult<()> {
    if accommodation.destination_id != destination_id {
        return Err(BookingError::RelationshipMismatch);
    }
    Ok(())
}

/// I3: return must be strictly after departure.
pub fn check_date_order(departure: NaiveDate, ret: NaiveDate) -> BookingResult<()> {
    if departure >= ret {
        return Err(BookingError::InvalidRange);
    }
    Ok(())
}

/// I4: at least one traveler.
pub fn check_travelers(travelers: i32) -> BookingResult<()> {
    if travelers < 1 {
        return Err(BookingError::InvalidQuantity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn destination(id: Uuid) -> Destination {
        Destination {
            id,
            name: "Luna Resort Belt".to_string(),
            description: "Low-orbit lunar resorts".to_string(),
            distance_km: 384_400.0,
            travel_time_hours: 72,
            features: vec!["Earthrise views".to_string()],
            price_factor: 1.5,
        }
    }

    fn accommodation(id: Uuid, destination_id: Uuid) -> Accommodation {
        Accommodation {
            id,
            destination_id,
            name: "Tranquility Suites".to_string(),
            kind: "Orbital Villa".to_string(),
            description: "Suites on the near side".to_string(),
            amenities: vec!["Gravity simulation".to_string()],
            price_per_night: 200,
            capacity: 4,
            rating: 4.8,
        }
    }

    fn package(id: Uuid) -> Package {
        Package {
            id,
            name: "Voyager".to_string(),
            tier: "Business".to_string(),
            base_price: 1000,
            features: vec!["Window seat".to_string()],
            capacity: 6,
        }
    }

    fn request(user_id: Uuid, destination_id: Uuid, accommodation_id: Uuid, package_id: Uuid) -> CreateBookingRequest {
        CreateBookingRequest {
            user_id,
            destination_id,
            accommodation_id,
            package_id,
            departure_date: date(2025, 4, 10),
            return_date: date(2025, 4, 15),
            travelers: 2,
            special_requests: None,
        }
    }

    fn stored_booking(user_id: Uuid, destination_id: Uuid) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id,
            destination_id,
            accommodation_id: Uuid::new_v4(),
            package_id: Uuid::new_v4(),
            departure_date: date(2025, 4, 10),
            return_date: date(2025, 4, 15),
            travelers: 2,
            special_requests: None,
            total_price: 6000,
            status: stellar_domain::BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn create_passes_with_consistent_references() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), dest.id);
        let pkg = package(Uuid::new_v4());
        let req = request(user, dest.id, acc.id, pkg.id);

        assert!(validate_create(&req, Some(&dest), Some(&acc), Some(&pkg), user).is_ok());
    }

    #[test]
    fn create_rejects_unresolved_references() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), dest.id);
        let pkg = package(Uuid::new_v4());
        let req = request(user, dest.id, acc.id, pkg.id);

        let err = validate_create(&req, None, Some(&acc), Some(&pkg), user).unwrap_err();
        assert!(matches!(err, BookingError::NotFound("Destination")));

        let err = validate_create(&req, Some(&dest), None, Some(&pkg), user).unwrap_err();
        assert!(matches!(err, BookingError::NotFound("Accommodation")));

        let err = validate_create(&req, Some(&dest), Some(&acc), None, user).unwrap_err();
        assert!(matches!(err, BookingError::NotFound("Package")));
    }

    #[test]
    fn create_rejects_accommodation_at_other_destination() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), Uuid::new_v4());
        let pkg = package(Uuid::new_v4());
        let req = request(user, dest.id, acc.id, pkg.id);

        let err = validate_create(&req, Some(&dest), Some(&acc), Some(&pkg), user).unwrap_err();
        assert!(matches!(err, BookingError::RelationshipMismatch));
    }

    #[test]
    fn create_rejects_other_users_id() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), dest.id);
        let pkg = package(Uuid::new_v4());
        let req = request(user, dest.id, acc.id, pkg.id);

        let err =
            validate_create(&req, Some(&dest), Some(&acc), Some(&pkg), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, BookingError::Forbidden(_)));
    }

    #[test]
    fn create_rejects_equal_dates() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), dest.id);
        let pkg = package(Uuid::new_v4());
        let mut req = request(user, dest.id, acc.id, pkg.id);
        req.departure_date = date(2025, 4, 10);
        req.return_date = date(2025, 4, 10);

        let err = validate_create(&req, Some(&dest), Some(&acc), Some(&pkg), user).unwrap_err();
        assert!(matches!(err, BookingError::InvalidRange));
    }

    #[test]
    fn create_rejects_zero_travelers() {
        let user = Uuid::new_v4();
        let dest = destination(Uuid::new_v4());
        let acc = accommodation(Uuid::new_v4(), dest.id);
        let pkg = package(Uuid::new_v4());
        let mut req = request(user, dest.id, acc.id, pkg.id);
        req.travelers = 0;

        let err = validate_create(&req, Some(&dest), Some(&acc), Some(&pkg), user).unwrap_err();
        assert!(matches!(err, BookingError::InvalidQuantity));
    }

    #[test]
    fn update_checks_merged_date_pair() {
        let user = Uuid::new_v4();
        let existing = stored_booking(user, Uuid::new_v4());

        // Moving departure past the stored return date must fail even though
        // the return date itself is untouched.
        let update = UpdateBookingRequest {
            departure_date: Some(date(2025, 4, 20)),
            ..Default::default()
        };
        let err = validate_update(&existing, &update, None).unwrap_err();
        assert!(matches!(err, BookingError::InvalidRange));

        // Moving both together is fine.
        let update = UpdateBookingRequest {
            departure_date: Some(date(2025, 4, 20)),
            return_date: Some(date(2025, 4, 25)),
            ..Default::default()
        };
        assert!(validate_update(&existing, &update, None).is_ok());
    }

    #[test]
    fn update_ignores_absent_fields() {
        let user = Uuid::new_v4();
        let existing = stored_booking(user, Uuid::new_v4());
        let update = UpdateBookingRequest {
            special_requests: Some("Window cabin".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&existing, &update, None).is_ok());
    }

    #[test]
    fn update_rechecks_changed_accommodation_against_destination() {
        let user = Uuid::new_v4();
        let existing = stored_booking(user, Uuid::new_v4());
        let foreign = accommodation(Uuid::new_v4(), Uuid::new_v4());

        let update = UpdateBookingRequest {
            accommodation_id: Some(foreign.id),
            ..Default::default()
        };
        let err = validate_update(&existing, &update, Some(&foreign)).unwrap_err();
        assert!(matches!(err, BookingError::RelationshipMismatch));

        let local = accommodation(Uuid::new_v4(), existing.destination_id);
        let update = UpdateBookingRequest {
            accommodation_id: Some(local.id),
            ..Default::default()
        };
        assert!(validate_update(&existing, &update, Some(&local)).is_ok());
    }
}
