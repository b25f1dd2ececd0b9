use super::helpers::{
    fetch_active_bookings_for_update, fetch_ride_for_update, insert_ride, update_booking,
    update_ride,
};
use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{RideAPI, RideListing},
    auth::User,
    entities::{Ride, RideDetails, SearchCriteria},
    error::Error,
};

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self, details))]
    async fn create_ride(
        &self,
        user: User,
        driver_id: Uuid,
        details: RideDetails,
    ) -> Result<Ride, Error> {
        self.authorize(user.acts_for(&driver_id))?;

        let ride = Ride::new(driver_id, details)?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        insert_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(
            "posted ride {} with {} seats at {} per seat",
            ride.id,
            ride.capacity.total_seats,
            ride.base_price_per_seat
        );

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn find_ride(&self, _user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;

        let Json(ride): Json<Ride> = conn
            .fetch_optional(sqlx::query("SELECT data FROM rides WHERE id = $1").bind(&id))
            .await?
            .ok_or_else(Error::not_found_error)?
            .try_get("data")?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn find_driver_rides(&self, user: User, driver_id: Uuid) -> Result<Vec<Ride>, Error> {
        self.authorize(user.acts_for(&driver_id))?;

        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(
            sqlx::query(
                "SELECT data FROM rides WHERE data->>'driver_id' = $1 ORDER BY data->>'departure' DESC",
            )
            .bind(driver_id.to_string()),
        );

        let mut rides = vec![];

        while let Some(row) = rows.try_next().await? {
            let Json(ride): Json<Ride> = row.try_get("data")?;
            rides.push(ride);
        }

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn search_rides(
        &self,
        _user: User,
        criteria: SearchCriteria,
    ) -> Result<Vec<RideListing>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(sqlx::query(
            "SELECT data FROM rides WHERE status = 'active' ORDER BY data->>'departure' ASC",
        ));

        let mut listings = vec![];

        while let Some(row) = rows.try_next().await? {
            let Json(ride): Json<Ride> = row.try_get("data")?;

            if !ride.matches(&criteria) {
                continue;
            }

            let quote = ride.quote()?;
            listings.push(RideListing { ride, quote });
        }

        tracing::debug!("search matched {} rides", listings.len());

        Ok(listings)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        self.authorize(user.acts_for(&ride.driver_id))?;

        ride.cancel()?;

        let bookings = fetch_active_bookings_for_update(&mut tx, &id).await?;

        for mut booking in bookings {
            booking.cancel()?;
            update_booking(&mut tx, &booking).await?;

            tracing::info!(
                "booking {} cancelled with ride, payment {:?}",
                booking.id,
                booking.payment_status
            );
        }

        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        self.authorize(user.acts_for(&ride.driver_id))?;

        ride.complete()?;

        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }
}
