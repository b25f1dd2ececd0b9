use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::error::Error;
use crate::pricing::{LadderStep, PricingAdvice, RouteProfile};

#[derive(Serialize, Deserialize)]
pub struct EarningsParams {
    price_per_seat: i64,
}

#[derive(Serialize, Deserialize)]
pub struct EarningsPreview {
    price_per_seat: i64,
    advertised_earnings: i64,
}

#[derive(Serialize, Deserialize)]
pub struct LadderParams {
    base_price_per_seat: i64,
    total_seats: u32,
}

pub async fn earnings(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<EarningsParams>,
) -> Result<Json<EarningsPreview>, Error> {
    let advertised_earnings = api.preview_earnings(params.price_per_seat).await?;

    Ok(EarningsPreview {
        price_per_seat: params.price_per_seat,
        advertised_earnings,
    }
    .into())
}

pub async fn ladder(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<LadderParams>,
) -> Result<Json<Vec<LadderStep>>, Error> {
    let ladder = api
        .price_ladder(params.base_price_per_seat, params.total_seats)
        .await?;

    Ok(ladder.into())
}

pub async fn advice(
    Extension(api): Extension<DynAPI>,
    Json(route): Json<RouteProfile>,
) -> Result<Json<PricingAdvice>, Error> {
    let advice = api.pricing_advice(route).await?;

    Ok(advice.into())
}
