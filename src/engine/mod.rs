mod booking_api;
mod helpers;
mod quote_api;
mod ride_api;

use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::API,
    error::Error,
    pricing::{is_valid_commission_rate, PricingError},
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    commission_rate: f64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip(pool))]
    pub async fn new(pool: Pool<Database>, commission_rate: f64) -> Result<Self, Error> {
        if !is_valid_commission_rate(commission_rate) {
            return Err(PricingError::InvalidPaymentInput(format!(
                "commission rate {} outside [0, 1]",
                commission_rate
            ))
            .into());
        }

        // ride service
        pool.execute("CREATE TABLE IF NOT EXISTS rides (id UUID PRIMARY KEY, status VARCHAR NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS rides_driver_id ON rides ((data->>'driver_id'))")
            .await?;

        // booking service
        pool.execute("CREATE TABLE IF NOT EXISTS bookings (id UUID PRIMARY KEY, ride_id UUID NOT NULL, passenger_id UUID NOT NULL, status VARCHAR NOT NULL, data JSONB NOT NULL, CONSTRAINT fk_booking_ride FOREIGN KEY(ride_id) REFERENCES rides(id))")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS bookings_ride_id ON bookings (ride_id)")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS bookings_passenger_id ON bookings (passenger_id)")
            .await?;

        tracing::info!("engine ready with commission rate {}", commission_rate);

        Ok(Self {
            pool,
            commission_rate,
        })
    }

    pub fn authorize(&self, allowed: bool) -> Result<(), Error> {
        if allowed {
            return Ok(());
        }

        Err(Error::unauthorized_error())
    }
}

impl API for Engine {}
