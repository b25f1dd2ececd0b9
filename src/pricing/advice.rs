use serde::{Deserialize, Serialize};

use super::{compute_driver_advertised_earnings, round_to_step, PricingError};

/// What a driver knows about a route before posting it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteProfile {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub is_interstate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    Economy,
    Standard,
    Premium,
}

impl TierKind {
    fn multiplier(&self, is_interstate: bool) -> f64 {
        match (self, is_interstate) {
            (Self::Economy, false) => 1.2,
            (Self::Economy, true) => 1.8,
            (Self::Standard, false) => 1.5,
            (Self::Standard, true) => 2.2,
            (Self::Premium, false) => 2.0,
            (Self::Premium, true) => 2.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub kind: TierKind,
    pub price_per_seat: i64,
    pub platform_fee: i64,
    pub advertised_earnings: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingAdvice {
    pub route: RouteProfile,
    pub tiers: Vec<PriceTier>,
}

impl PricingAdvice {
    pub fn tier(&self, kind: TierKind) -> Option<&PriceTier> {
        self.tiers.iter().find(|tier| tier.kind == kind)
    }
}

/// Suggested per-seat prices for a route, cheapest first.
///
/// Fuel cost runs at 15 per km (25 interstate) and driver time at 8 per minute
/// (15 interstate); each tier marks that cost up and rounds to the price step.
pub fn pricing_advice(
    route: RouteProfile,
    commission_rate: f64,
) -> Result<PricingAdvice, PricingError> {
    if !route.distance_km.is_finite() || route.distance_km < 0.0 {
        return Err(PricingError::InvalidRoute(format!(
            "distance {} km",
            route.distance_km
        )));
    }

    if !route.duration_minutes.is_finite() || route.duration_minutes < 0.0 {
        return Err(PricingError::InvalidRoute(format!(
            "duration {} minutes",
            route.duration_minutes
        )));
    }

    let (fuel_per_km, time_per_minute) = if route.is_interstate {
        (25.0, 15.0)
    } else {
        (15.0, 8.0)
    };
    let trip_cost = route.distance_km * fuel_per_km + route.duration_minutes * time_per_minute;

    let tiers = [TierKind::Economy, TierKind::Standard, TierKind::Premium]
        .into_iter()
        .map(|kind| {
            let price_per_seat = round_to_step(trip_cost * kind.multiplier(route.is_interstate));
            let advertised_earnings =
                compute_driver_advertised_earnings(price_per_seat, commission_rate)?;

            Ok(PriceTier {
                kind,
                price_per_seat,
                platform_fee: price_per_seat - advertised_earnings,
                advertised_earnings,
            })
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    Ok(PricingAdvice { route, tiers })
}
