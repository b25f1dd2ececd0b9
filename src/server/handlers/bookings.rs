use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::auth::User;
use crate::entities::Booking;
use crate::error::Error;

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(user, id).await?;

    Ok(booking.into())
}

pub async fn find_for_passenger(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(passenger_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, Error> {
    let bookings = api.find_passenger_bookings(user, passenger_id).await?;

    Ok(bookings.into())
}

pub async fn pay(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.confirm_payment(user, id).await?;

    Ok(booking.into())
}

pub async fn cancel(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.cancel_booking(user, id).await?;

    Ok(booking.into())
}
