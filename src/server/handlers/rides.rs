use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{DynAPI, RideListing};
use crate::auth::User;
use crate::entities::{Booking, BookingRequest, Ride, RideDetails, SearchCriteria};
use crate::error::Error;
use crate::pricing::{PaymentAllocation, PriceQuote};

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    driver_id: Uuid,
    #[serde(flatten)]
    details: RideDetails,
}

#[derive(Serialize, Deserialize)]
pub struct BookParams {
    passenger_id: Uuid,
    #[serde(flatten)]
    request: BookingRequest,
}

#[derive(Serialize, Deserialize)]
pub struct AllocationParams {
    seats: u32,
    #[serde(default)]
    has_luggage: bool,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Ride>, Error> {
    let ride = api
        .create_ride(user, params.driver_id, params.details)
        .await?;

    Ok(ride.into())
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<Json<Vec<RideListing>>, Error> {
    let listings = api.search_rides(user, criteria).await?;

    Ok(listings.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.find_ride(user, id).await?;

    Ok(ride.into())
}

pub async fn find_for_driver(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.find_driver_rides(user, driver_id).await?;

    Ok(rides.into())
}

pub async fn cancel(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.cancel_ride(user, id).await?;

    Ok(ride.into())
}

pub async fn complete(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.complete_ride(user, id).await?;

    Ok(ride.into())
}

pub async fn quote(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<PriceQuote>, Error> {
    let quote = api.quote_ride(user, id).await?;

    Ok(quote.into())
}

pub async fn book(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(params): Json<BookParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api
        .book_ride(user, id, params.passenger_id, params.request)
        .await?;

    Ok(booking.into())
}

pub async fn preview_allocation(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(params): Json<AllocationParams>,
) -> Result<Json<PaymentAllocation>, Error> {
    let allocation = api
        .preview_allocation(user, id, params.seats, params.has_luggage)
        .await?;

    Ok(allocation.into())
}
