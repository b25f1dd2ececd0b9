use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{QuoteAPI, RideAPI},
    auth::User,
    error::Error,
    pricing::{
        compute_driver_advertised_earnings, price_ladder, pricing_advice, LadderStep,
        PaymentAllocation, PriceQuote, PricingAdvice, RouteProfile,
    },
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn quote_ride(&self, user: User, ride_id: Uuid) -> Result<PriceQuote, Error> {
        let ride = self.find_ride(user, ride_id).await?;

        ride.quote()
    }

    #[tracing::instrument(skip(self))]
    async fn preview_allocation(
        &self,
        user: User,
        ride_id: Uuid,
        seats: u32,
        has_luggage: bool,
    ) -> Result<PaymentAllocation, Error> {
        let ride = self.find_ride(user, ride_id).await?;

        ride.preview_allocation(seats, has_luggage, self.commission_rate)
    }

    #[tracing::instrument(skip(self))]
    async fn preview_earnings(&self, price_per_seat: i64) -> Result<i64, Error> {
        Ok(compute_driver_advertised_earnings(
            price_per_seat,
            self.commission_rate,
        )?)
    }

    #[tracing::instrument(skip(self))]
    async fn price_ladder(
        &self,
        base_price_per_seat: i64,
        total_seats: u32,
    ) -> Result<Vec<LadderStep>, Error> {
        Ok(price_ladder(
            base_price_per_seat,
            total_seats,
            self.commission_rate,
        )?)
    }

    #[tracing::instrument(skip(self))]
    async fn pricing_advice(&self, route: RouteProfile) -> Result<PricingAdvice, Error> {
        Ok(pricing_advice(route, self.commission_rate)?)
    }
}
