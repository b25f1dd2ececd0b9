use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{Booking, BookingRequest, Ride, RideDetails, SearchCriteria};
use crate::error::Error;
use crate::pricing::{LadderStep, PaymentAllocation, PriceQuote, PricingAdvice, RouteProfile};

/// A ride as shown in search results, with its live price.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RideListing {
    pub ride: Ride,
    pub quote: PriceQuote,
}

#[async_trait]
pub trait RideAPI {
    async fn create_ride(
        &self,
        user: User,
        driver_id: Uuid,
        details: RideDetails,
    ) -> Result<Ride, Error>;
    async fn find_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
    async fn find_driver_rides(&self, user: User, driver_id: Uuid) -> Result<Vec<Ride>, Error>;
    async fn search_rides(
        &self,
        user: User,
        criteria: SearchCriteria,
    ) -> Result<Vec<RideListing>, Error>;
    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn book_ride(
        &self,
        user: User,
        ride_id: Uuid,
        passenger_id: Uuid,
        request: BookingRequest,
    ) -> Result<Booking, Error>;
    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error>;
    async fn find_passenger_bookings(
        &self,
        user: User,
        passenger_id: Uuid,
    ) -> Result<Vec<Booking>, Error>;
    async fn confirm_payment(&self, user: User, id: Uuid) -> Result<Booking, Error>;
    async fn cancel_booking(&self, user: User, id: Uuid) -> Result<Booking, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn quote_ride(&self, user: User, ride_id: Uuid) -> Result<PriceQuote, Error>;
    async fn preview_allocation(
        &self,
        user: User,
        ride_id: Uuid,
        seats: u32,
        has_luggage: bool,
    ) -> Result<PaymentAllocation, Error>;
    async fn preview_earnings(&self, price_per_seat: i64) -> Result<i64, Error>;
    async fn price_ladder(
        &self,
        base_price_per_seat: i64,
        total_seats: u32,
    ) -> Result<Vec<LadderStep>, Error>;
    async fn pricing_advice(&self, route: RouteProfile) -> Result<PricingAdvice, Error>;
}

pub trait API: RideAPI + BookingAPI + QuoteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
