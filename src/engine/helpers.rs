use super::Database;

use futures::TryStreamExt;
use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::{Booking, Ride},
    error::Error,
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_ride_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Ride, Error> {
    let Json(ride): Json<Ride> = tx
        .fetch_optional(sqlx::query("SELECT data FROM rides WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(Error::not_found_error)?
        .try_get("data")?;

    Ok(ride)
}

#[tracing::instrument(skip(tx))]
pub async fn fetch_booking_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Booking, Error> {
    let Json(booking): Json<Booking> = tx
        .fetch_optional(
            sqlx::query("SELECT data FROM bookings WHERE id = $1 FOR UPDATE").bind(id),
        )
        .await?
        .ok_or_else(Error::not_found_error)?
        .try_get("data")?;

    Ok(booking)
}

#[tracing::instrument(skip(tx))]
pub async fn fetch_active_bookings_for_update(
    tx: &mut Transaction<'_, Database>,
    ride_id: &Uuid,
) -> Result<Vec<Booking>, Error> {
    let mut rows = tx.fetch(
        sqlx::query("SELECT data FROM bookings WHERE ride_id = $1 AND status = 'active' FOR UPDATE")
            .bind(ride_id),
    );

    let mut bookings = vec![];

    while let Some(row) = rows.try_next().await? {
        let Json(booking): Json<Booking> = row.try_get("data")?;
        bookings.push(booking);
    }

    Ok(bookings)
}

#[tracing::instrument(skip(tx))]
pub async fn insert_ride(tx: &mut Transaction<'_, Database>, ride: &Ride) -> Result<(), Error> {
    tx.execute(
        sqlx::query("INSERT INTO rides (id, status, data) VALUES ($1, $2, $3)")
            .bind(&ride.id)
            .bind(ride.status.name())
            .bind(Json(ride)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn update_ride(tx: &mut Transaction<'_, Database>, ride: &Ride) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE rides SET status = $2, data = $3 WHERE id = $1")
            .bind(&ride.id)
            .bind(ride.status.name())
            .bind(Json(ride)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn insert_booking(
    tx: &mut Transaction<'_, Database>,
    booking: &Booking,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query(
            "INSERT INTO bookings (id, ride_id, passenger_id, status, data) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&booking.id)
        .bind(&booking.ride_id)
        .bind(&booking.passenger_id)
        .bind(booking.status.name())
        .bind(Json(booking)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn update_booking(
    tx: &mut Transaction<'_, Database>,
    booking: &Booking,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE bookings SET status = $2, data = $3 WHERE id = $1")
            .bind(&booking.id)
            .bind(booking.status.name())
            .bind(Json(booking)),
    )
    .await?;

    Ok(())
}
