//! Seat pricing and payment allocation.
//!
//! Pure functions over explicit inputs. Nothing here touches the database or
//! the request context.

mod advice;
mod allocation;
mod error;
mod occupancy;

pub use advice::{pricing_advice, PriceTier, PricingAdvice, RouteProfile, TierKind};
pub use allocation::{
    compute_driver_advertised_earnings, compute_payment_allocation, PaymentAllocation,
};
pub use error::PricingError;
pub use occupancy::{
    compute_current_price, discount_percentage, price_ladder, LadderStep, PriceQuote,
    RideCapacity,
};

/// Largest share of the base price that occupancy may take off a seat.
pub const MAX_DISCOUNT_RATE: f64 = 0.05;

/// Current prices are quoted in multiples of this many currency units.
pub const PRICE_ROUNDING_STEP: i64 = 50;

/// Share of every payment retained by the platform.
pub const DEFAULT_COMMISSION_RATE: f64 = 0.15;

/// Rounds to the nearest integer, halves towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();

    // the fractional part is exact, unlike `value + 0.5`
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds an amount to the nearest multiple of `PRICE_ROUNDING_STEP`.
pub(crate) fn round_to_step(amount: f64) -> i64 {
    round_half_up(amount / PRICE_ROUNDING_STEP as f64) as i64 * PRICE_ROUNDING_STEP
}

pub(crate) fn is_valid_commission_rate(rate: f64) -> bool {
    (0.0..=1.0).contains(&rate)
}

#[test]
fn round_half_up_breaks_ties_upwards() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(344.4), 344.0);
    assert_eq!(round_half_up(-1.96), -2.0);
    assert_eq!(round_half_up(0.49999999999999994), 0.0);
}

#[test]
fn round_to_step_rounds_halves_up() {
    assert_eq!(round_to_step(0.0), 0);
    assert_eq!(round_to_step(24.9), 0);
    assert_eq!(round_to_step(25.0), 50);
    assert_eq!(round_to_step(987.5), 1000);
    assert_eq!(round_to_step(8287.5), 8300);
}

#[test]
fn commission_rate_bounds() {
    assert!(is_valid_commission_rate(0.0));
    assert!(is_valid_commission_rate(DEFAULT_COMMISSION_RATE));
    assert!(is_valid_commission_rate(1.0));
    assert!(!is_valid_commission_rate(-0.01));
    assert!(!is_valid_commission_rate(1.5));
    assert!(!is_valid_commission_rate(f64::NAN));
}
