use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Booking, BookingRequest, Place};
use crate::error::Error;
use crate::pricing::{
    compute_payment_allocation, PaymentAllocation, PriceQuote, PricingError, RideCapacity,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub origin: Place,
    pub destination: Place,
    pub departure: DateTime<Utc>,
    pub capacity: RideCapacity,
    pub base_price_per_seat: i64,
    pub luggage_fee: Option<i64>,
    pub is_interstate: bool,
    pub amenities: Vec<String>,
    pub description: Option<String>,
    pub status: Status,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Active,
    Full,
    Cancelled,
    Completed,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Active => "active".into(),
            Self::Full => "full".into(),
            Self::Cancelled => "cancelled".into(),
            Self::Completed => "completed".into(),
        }
    }
}

/// What a driver submits when posting a ride.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RideDetails {
    pub origin: Place,
    pub destination: Place,
    pub departure: DateTime<Utc>,
    pub total_seats: u32,
    pub base_price_per_seat: i64,
    #[serde(default)]
    pub luggage_fee: Option<i64>,
    #[serde(default)]
    pub is_interstate: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub seats: Option<u32>,
    /// Departure day, in UTC.
    pub date: Option<NaiveDate>,
    pub departure_after: Option<DateTime<Utc>>,
    pub is_interstate: Option<bool>,
    #[serde(default)]
    pub requires_luggage: bool,
}

impl Ride {
    pub fn new(driver_id: Uuid, details: RideDetails) -> Result<Self, Error> {
        let capacity = RideCapacity::new(details.total_seats)?;

        if details.base_price_per_seat < 0 {
            return Err(PricingError::InvalidPrice(details.base_price_per_seat).into());
        }

        if let Some(fee) = details.luggage_fee.filter(|fee| *fee < 0) {
            return Err(PricingError::InvalidPrice(fee).into());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            driver_id,
            origin: details.origin,
            destination: details.destination,
            departure: details.departure,
            capacity,
            base_price_per_seat: details.base_price_per_seat,
            luggage_fee: details.luggage_fee,
            is_interstate: details.is_interstate,
            amenities: details.amenities,
            description: details.description,
            status: Status::Active,
        })
    }

    pub fn is_bookable(&self) -> bool {
        matches!(self.status, Status::Active)
    }

    pub fn matches(&self, criteria: &SearchCriteria) -> bool {
        let seats = criteria.seats.unwrap_or(1);

        self.is_bookable()
            && self.capacity.available_seats() >= seats
            && criteria
                .origin
                .as_deref()
                .map_or(true, |query| self.origin.matches(query))
            && criteria
                .destination
                .as_deref()
                .map_or(true, |query| self.destination.matches(query))
            && criteria
                .date
                .map_or(true, |date| self.departure.date_naive() == date)
            && criteria
                .departure_after
                .map_or(true, |after| self.departure >= after)
            && criteria
                .is_interstate
                .map_or(true, |interstate| self.is_interstate == interstate)
            && (!criteria.requires_luggage || self.luggage_fee.is_some())
    }

    /// Live per-seat price at the current occupancy.
    pub fn quote(&self) -> Result<PriceQuote, Error> {
        Ok(PriceQuote::new(self.base_price_per_seat, &self.capacity)?)
    }

    pub fn luggage_surcharge(&self, has_luggage: bool) -> Result<i64, Error> {
        if !has_luggage {
            return Ok(0);
        }

        self.luggage_fee.ok_or_else(|| Error {
            code: crate::error::INVALID_INPUT,
            message: "ride does not accept luggage".into(),
        })
    }

    /// What booking `seats` seats would cost right now, without reserving them.
    pub fn preview_allocation(
        &self,
        seats: u32,
        has_luggage: bool,
        commission_rate: f64,
    ) -> Result<PaymentAllocation, Error> {
        let quote = self.quote()?;
        let luggage_fee = self.luggage_surcharge(has_luggage)?;

        Ok(compute_payment_allocation(
            quote.current_price_per_seat,
            seats,
            luggage_fee,
            commission_rate,
        )?)
    }

    /// Prices the request at the current occupancy, then reserves the seats.
    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn book(
        &mut self,
        passenger_id: Uuid,
        request: BookingRequest,
        commission_rate: f64,
    ) -> Result<Booking, Error> {
        if !self.is_bookable() {
            return Err(Error::invalid_invocation_error());
        }

        if passenger_id == self.driver_id {
            return Err(Error::invalid_input_error());
        }

        let price_per_seat = self.quote()?.current_price_per_seat;
        let allocation = self.preview_allocation(request.seats, request.has_luggage, commission_rate)?;

        self.reserve_seats(request.seats)?;

        Ok(Booking::new(
            self.id,
            passenger_id,
            request,
            price_per_seat,
            allocation,
        ))
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn reserve_seats(&mut self, seats: u32) -> Result<(), Error> {
        match self.status {
            Status::Active => {
                self.capacity.book(seats)?;

                if self.capacity.is_full() {
                    self.status = Status::Full;
                }

                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn release_seats(&mut self, seats: u32) -> Result<(), Error> {
        match self.status {
            Status::Active | Status::Full => {
                self.capacity.release(seats)?;
                self.status = Status::Active;

                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn cancel(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Active | Status::Full => {
                self.status = Status::Cancelled;
                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Active | Status::Full => {
                self.status = Status::Completed;
                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BookingStatus, Coordinates, PaymentStatus};
    use crate::error::{INVALID_CAPACITY, INVALID_INVOCATION, INVALID_PRICE};
    use crate::pricing::DEFAULT_COMMISSION_RATE;
    use chrono::TimeZone;

    fn place(area: &str, state: &str) -> Place {
        Place {
            landmark: format!("{} Junction", area),
            area: area.into(),
            state: state.into(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
        }
    }

    fn details(total_seats: u32, base_price_per_seat: i64) -> RideDetails {
        RideDetails {
            origin: place("Ikeja", "Lagos"),
            destination: place("Wuse", "Abuja FCT"),
            departure: Utc::now(),
            total_seats,
            base_price_per_seat,
            luggage_fee: Some(1000),
            is_interstate: true,
            amenities: vec!["AC".into()],
            description: None,
        }
    }

    fn request(seats: u32, has_luggage: bool) -> BookingRequest {
        BookingRequest {
            seats,
            has_luggage,
            luggage_description: None,
        }
    }

    #[test]
    fn new_ride_is_active_and_empty() {
        let ride = Ride::new(Uuid::new_v4(), details(4, 8500)).unwrap();

        assert_eq!(ride.status, Status::Active);
        assert_eq!(ride.capacity.booked_seats, 0);
        assert_eq!(ride.quote().unwrap().current_price_per_seat, 8500);
    }

    #[test]
    fn new_ride_rejects_bad_details() {
        let err = Ride::new(Uuid::new_v4(), details(0, 8500)).unwrap_err();
        assert_eq!(err.code, INVALID_CAPACITY);

        let err = Ride::new(Uuid::new_v4(), details(4, -1)).unwrap_err();
        assert_eq!(err.code, INVALID_PRICE);

        let mut negative_luggage = details(4, 8500);
        negative_luggage.luggage_fee = Some(-200);
        let err = Ride::new(Uuid::new_v4(), negative_luggage).unwrap_err();
        assert_eq!(err.code, INVALID_PRICE);
    }

    #[test]
    fn booking_uses_the_price_before_the_seats_are_taken() {
        let mut ride = Ride::new(Uuid::new_v4(), details(4, 8500)).unwrap();

        let first = ride
            .book(Uuid::new_v4(), request(2, true), DEFAULT_COMMISSION_RATE)
            .unwrap();
        assert_eq!(first.price_per_seat, 8500);
        assert_eq!(first.allocation.total_amount, 18000);
        assert_eq!(first.payment_status, PaymentStatus::Pending);
        assert_eq!(first.status, BookingStatus::Active);

        let second = ride
            .book(Uuid::new_v4(), request(1, false), DEFAULT_COMMISSION_RATE)
            .unwrap();
        assert_eq!(second.price_per_seat, 8300);
        assert_eq!(second.allocation.total_amount, 8300);

        assert_eq!(ride.capacity.booked_seats, 3);
        assert_eq!(ride.status, Status::Active);
    }

    #[test]
    fn filling_the_last_seat_closes_the_ride() {
        let mut ride = Ride::new(Uuid::new_v4(), details(2, 1000)).unwrap();

        ride.book(Uuid::new_v4(), request(2, false), DEFAULT_COMMISSION_RATE)
            .unwrap();
        assert_eq!(ride.status, Status::Full);
        assert!(!ride.is_bookable());

        let err = ride
            .book(Uuid::new_v4(), request(1, false), DEFAULT_COMMISSION_RATE)
            .unwrap_err();
        assert_eq!(err.code, INVALID_INVOCATION);

        ride.release_seats(1).unwrap();
        assert_eq!(ride.status, Status::Active);
        assert_eq!(ride.capacity.available_seats(), 1);
    }

    #[test]
    fn overbooking_leaves_the_ride_untouched() {
        let mut ride = Ride::new(Uuid::new_v4(), details(3, 1000)).unwrap();

        let err = ride
            .book(Uuid::new_v4(), request(4, false), DEFAULT_COMMISSION_RATE)
            .unwrap_err();
        assert_eq!(err.code, INVALID_CAPACITY);
        assert_eq!(ride.capacity.booked_seats, 0);
    }

    #[test]
    fn driver_cannot_book_own_ride() {
        let driver_id = Uuid::new_v4();
        let mut ride = Ride::new(driver_id, details(3, 1000)).unwrap();

        assert!(ride
            .book(driver_id, request(1, false), DEFAULT_COMMISSION_RATE)
            .unwrap_err()
            .is_invalid_input_error());
    }

    #[test]
    fn luggage_needs_a_ride_that_takes_it() {
        let mut no_luggage = details(3, 1000);
        no_luggage.luggage_fee = None;
        let mut ride = Ride::new(Uuid::new_v4(), no_luggage).unwrap();

        assert_eq!(ride.luggage_surcharge(false).unwrap(), 0);
        assert!(ride
            .book(Uuid::new_v4(), request(1, true), DEFAULT_COMMISSION_RATE)
            .unwrap_err()
            .is_invalid_input_error());
        assert_eq!(ride.capacity.booked_seats, 0);
    }

    #[test]
    fn preview_matches_settlement() {
        let mut ride = Ride::new(Uuid::new_v4(), details(4, 1000)).unwrap();
        ride.luggage_fee = Some(300);

        let preview = ride
            .preview_allocation(2, true, DEFAULT_COMMISSION_RATE)
            .unwrap();
        assert_eq!(preview.total_amount, 2300);
        assert_eq!(preview.platform_fee, 345);
        assert_eq!(preview.driver_earnings, 1955);

        let booking = ride
            .book(Uuid::new_v4(), request(2, true), DEFAULT_COMMISSION_RATE)
            .unwrap();
        assert_eq!(booking.allocation, preview);
    }

    #[test]
    fn lifecycle_transitions() {
        let mut ride = Ride::new(Uuid::new_v4(), details(3, 1000)).unwrap();

        ride.cancel().unwrap();
        assert_eq!(ride.status, Status::Cancelled);
        assert!(ride.cancel().is_err());
        assert!(ride.complete().is_err());
        assert!(ride.release_seats(1).is_err());

        let mut ride = Ride::new(Uuid::new_v4(), details(3, 1000)).unwrap();
        ride.complete().unwrap();
        assert_eq!(ride.status, Status::Completed);
        assert!(ride.reserve_seats(1).is_err());
    }

    #[test]
    fn search_matching() {
        let mut ride = Ride::new(Uuid::new_v4(), details(3, 1000)).unwrap();

        let criteria = SearchCriteria {
            origin: Some("lagos".into()),
            destination: Some("wuse".into()),
            seats: Some(3),
            ..Default::default()
        };
        assert!(ride.matches(&criteria));

        ride.reserve_seats(1).unwrap();
        assert!(!ride.matches(&criteria));

        assert!(ride.matches(&SearchCriteria::default()));
        assert!(!ride.matches(&SearchCriteria {
            origin: Some("Kano".into()),
            ..Default::default()
        }));
    }

    #[test]
    fn search_by_departure_and_trip_kind() {
        let mut ride_details = details(3, 1000);
        ride_details.departure = Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap();
        let ride = Ride::new(Uuid::new_v4(), ride_details).unwrap();

        let on_day = SearchCriteria {
            date: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..Default::default()
        };
        assert!(ride.matches(&on_day));
        assert!(!ride.matches(&SearchCriteria {
            date: NaiveDate::from_ymd_opt(2026, 10, 19),
            ..Default::default()
        }));

        assert!(ride.matches(&SearchCriteria {
            departure_after: Some(Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap()),
            ..Default::default()
        }));
        assert!(!ride.matches(&SearchCriteria {
            departure_after: Some(Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap()),
            ..Default::default()
        }));

        assert!(ride.matches(&SearchCriteria {
            is_interstate: Some(true),
            ..Default::default()
        }));
        assert!(!ride.matches(&SearchCriteria {
            is_interstate: Some(false),
            ..Default::default()
        }));
    }

    #[test]
    fn search_for_luggage_skips_rides_without_a_fee() {
        let mut no_luggage = details(3, 1000);
        no_luggage.luggage_fee = None;
        let ride = Ride::new(Uuid::new_v4(), no_luggage).unwrap();

        let criteria = SearchCriteria {
            requires_luggage: true,
            ..Default::default()
        };
        assert!(!ride.matches(&criteria));

        let ride = Ride::new(Uuid::new_v4(), details(3, 1000)).unwrap();
        assert!(ride.matches(&criteria));
    }

    #[test]
    fn status_serializes_with_name_tag() {
        let json = serde_json::to_value(Status::Full).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "full" }));
    }
}
