use serde::{Deserialize, Serialize};

use super::{is_valid_commission_rate, round_half_up, PricingError};

/// Split of a booking payment between the platform and the driver.
///
/// `platform_fee + driver_earnings == total_amount` always holds exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub base_amount: i64,
    pub luggage_fee: i64,
    pub total_amount: i64,
    pub platform_fee: i64,
    pub driver_earnings: i64,
}

/// Settles a booking of `seats_booked` seats at `price_per_seat`.
///
/// The luggage fee is charged once per booking and is subject to commission.
/// Driver earnings are the remainder after the rounded platform fee.
pub fn compute_payment_allocation(
    price_per_seat: i64,
    seats_booked: u32,
    luggage_flat_fee: i64,
    commission_rate: f64,
) -> Result<PaymentAllocation, PricingError> {
    if price_per_seat < 0 {
        return Err(PricingError::InvalidPaymentInput(format!(
            "negative price per seat {}",
            price_per_seat
        )));
    }

    if seats_booked == 0 {
        return Err(PricingError::InvalidPaymentInput(
            "at least one seat must be booked".into(),
        ));
    }

    if luggage_flat_fee < 0 {
        return Err(PricingError::InvalidPaymentInput(format!(
            "negative luggage fee {}",
            luggage_flat_fee
        )));
    }

    check_commission_rate(commission_rate)?;

    let base_amount = price_per_seat
        .checked_mul(seats_booked as i64)
        .ok_or_else(overflow)?;
    let total_amount = base_amount
        .checked_add(luggage_flat_fee)
        .ok_or_else(overflow)?;

    // f64 loses integer precision above 2^53, keep the fee inside the total
    let platform_fee =
        (round_half_up(total_amount as f64 * commission_rate) as i64).clamp(0, total_amount);
    let driver_earnings = total_amount - platform_fee;

    Ok(PaymentAllocation {
        base_amount,
        luggage_fee: luggage_flat_fee,
        total_amount,
        platform_fee,
        driver_earnings,
    })
}

/// Single-seat earnings estimate shown while a driver sets a price.
///
/// Rounds per seat, so multiplying it by a seat count can drift by a unit or
/// two from what `compute_payment_allocation` settles.
pub fn compute_driver_advertised_earnings(
    price_per_seat: i64,
    commission_rate: f64,
) -> Result<i64, PricingError> {
    if price_per_seat < 0 {
        return Err(PricingError::InvalidPaymentInput(format!(
            "negative price per seat {}",
            price_per_seat
        )));
    }

    check_commission_rate(commission_rate)?;

    let earnings = round_half_up(price_per_seat as f64 * (1.0 - commission_rate)) as i64;

    Ok(earnings.clamp(0, price_per_seat))
}

fn check_commission_rate(commission_rate: f64) -> Result<(), PricingError> {
    if !is_valid_commission_rate(commission_rate) {
        return Err(PricingError::InvalidPaymentInput(format!(
            "commission rate {} outside [0, 1]",
            commission_rate
        )));
    }

    Ok(())
}

fn overflow() -> PricingError {
    PricingError::InvalidPaymentInput("payment amount overflow".into())
}
