use super::helpers::{
    fetch_booking_for_update, fetch_ride_for_update, insert_booking, update_booking, update_ride,
};
use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::BookingAPI,
    auth::User,
    entities::{Booking, BookingRequest},
    error::Error,
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn book_ride(
        &self,
        user: User,
        ride_id: Uuid,
        passenger_id: Uuid,
        request: BookingRequest,
    ) -> Result<Booking, Error> {
        self.authorize(user.acts_for(&passenger_id))?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        // the ride row lock serialises concurrent bookings for the same seats
        let mut ride = fetch_ride_for_update(&mut tx, &ride_id).await?;

        let booking = ride.book(passenger_id, request, self.commission_rate)?;

        insert_booking(&mut tx, &booking).await?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(
            "booked {} seats on ride {} for {} ({} to driver)",
            booking.seats,
            ride.id,
            booking.allocation.total_amount,
            booking.allocation.driver_earnings
        );

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;

        let Json(booking): Json<Booking> = conn
            .fetch_optional(sqlx::query("SELECT data FROM bookings WHERE id = $1").bind(&id))
            .await?
            .ok_or_else(Error::not_found_error)?
            .try_get("data")?;

        self.authorize(user.acts_for(&booking.passenger_id))?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_passenger_bookings(
        &self,
        user: User,
        passenger_id: Uuid,
    ) -> Result<Vec<Booking>, Error> {
        self.authorize(user.acts_for(&passenger_id))?;

        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(
            sqlx::query(
                "SELECT data FROM bookings WHERE passenger_id = $1 ORDER BY data->>'booked_at' DESC",
            )
            .bind(&passenger_id),
        );

        let mut bookings = vec![];

        while let Some(row) = rows.try_next().await? {
            let Json(booking): Json<Booking> = row.try_get("data")?;
            bookings.push(booking);
        }

        Ok(bookings)
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_payment(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut booking = fetch_booking_for_update(&mut tx, &id).await?;

        self.authorize(user.acts_for(&booking.passenger_id))?;

        booking.mark_paid()?;

        update_booking(&mut tx, &booking).await?;

        tx.commit().await?;

        tracing::info!(
            "payment of {} confirmed for booking {}",
            booking.allocation.total_amount,
            booking.id
        );

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_booking(&self, user: User, id: Uuid) -> Result<Booking, Error> {
        let ride_id = self.find_booking(user.clone(), id).await?.ride_id;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        // lock the ride before the booking, in the same order as book_ride and cancel_ride
        let mut ride = fetch_ride_for_update(&mut tx, &ride_id).await?;
        let mut booking = fetch_booking_for_update(&mut tx, &id).await?;

        booking.cancel()?;
        ride.release_seats(booking.seats)?;

        update_booking(&mut tx, &booking).await?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(
            "booking {} cancelled, {} seats released on ride {}",
            booking.id,
            booking.seats,
            ride.id
        );

        Ok(booking)
    }
}
