use serde::{Deserialize, Serialize};

use super::{
    compute_driver_advertised_earnings, round_half_up, round_to_step, PricingError,
    MAX_DISCOUNT_RATE,
};

/// How full a ride is at the moment it is priced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideCapacity {
    pub total_seats: u32,
    pub booked_seats: u32,
}

impl RideCapacity {
    pub fn new(total_seats: u32) -> Result<Self, PricingError> {
        Self::with_bookings(total_seats, 0)
    }

    pub fn with_bookings(total_seats: u32, booked_seats: u32) -> Result<Self, PricingError> {
        let capacity = Self {
            total_seats,
            booked_seats,
        };
        capacity.validate()?;

        Ok(capacity)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.total_seats == 0 || self.booked_seats > self.total_seats {
            return Err(PricingError::InvalidCapacity {
                total_seats: self.total_seats,
                booked_seats: self.booked_seats,
            });
        }

        Ok(())
    }

    /// Booked seats over total seats, in `[0, 1]`.
    pub fn occupancy_rate(&self) -> f64 {
        self.booked_seats as f64 / self.total_seats as f64
    }

    pub fn available_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.booked_seats)
    }

    pub fn is_full(&self) -> bool {
        self.booked_seats >= self.total_seats
    }

    pub fn book(&mut self, seats: u32) -> Result<(), PricingError> {
        if seats == 0 || seats > self.available_seats() {
            return Err(PricingError::InvalidCapacity {
                total_seats: self.total_seats,
                booked_seats: self.booked_seats.saturating_add(seats),
            });
        }

        self.booked_seats += seats;
        Ok(())
    }

    pub fn release(&mut self, seats: u32) -> Result<(), PricingError> {
        if seats == 0 || seats > self.booked_seats {
            return Err(PricingError::InvalidCapacity {
                total_seats: self.total_seats,
                booked_seats: self.booked_seats,
            });
        }

        self.booked_seats -= seats;
        Ok(())
    }
}

/// Live per-seat price of a ride. Derived on demand, never stored as truth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub base_price_per_seat: i64,
    pub occupancy_rate: f64,
    pub current_price_per_seat: i64,
    pub discount_percentage: i64,
}

impl PriceQuote {
    pub fn new(base_price_per_seat: i64, capacity: &RideCapacity) -> Result<Self, PricingError> {
        let current_price_per_seat = compute_current_price(
            base_price_per_seat,
            capacity.total_seats,
            capacity.booked_seats,
        )?;

        Ok(Self {
            base_price_per_seat,
            occupancy_rate: capacity.occupancy_rate(),
            current_price_per_seat,
            discount_percentage: discount_percentage(base_price_per_seat, current_price_per_seat),
        })
    }
}

/// Per-seat price after the occupancy discount.
///
/// The discount grows linearly with occupancy up to `MAX_DISCOUNT_RATE` on a
/// full ride. The result is rounded to the nearest `PRICE_ROUNDING_STEP`, which
/// can erase small discounts or land up to half a step outside
/// `[0.95 * base, base]`.
pub fn compute_current_price(
    base_price_per_seat: i64,
    total_seats: u32,
    booked_seats: u32,
) -> Result<i64, PricingError> {
    let capacity = RideCapacity::with_bookings(total_seats, booked_seats)?;

    if base_price_per_seat < 0 {
        return Err(PricingError::InvalidPrice(base_price_per_seat));
    }

    let discount_rate = capacity.occupancy_rate() * MAX_DISCOUNT_RATE;
    let raw_price = base_price_per_seat as f64 * (1.0 - discount_rate);

    Ok(round_to_step(raw_price))
}

/// Whole-percent saving of `current` against `base`, as shown on search badges.
pub fn discount_percentage(base_price_per_seat: i64, current_price_per_seat: i64) -> i64 {
    if base_price_per_seat <= 0 {
        return 0;
    }

    let savings = (base_price_per_seat - current_price_per_seat) as f64;
    round_half_up(savings / base_price_per_seat as f64 * 100.0) as i64
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderStep {
    pub booked_seats: u32,
    pub current_price_per_seat: i64,
    pub advertised_earnings: i64,
}

/// Price the next passenger pays at every occupancy level a ride can reach
/// before it is full.
pub fn price_ladder(
    base_price_per_seat: i64,
    total_seats: u32,
    commission_rate: f64,
) -> Result<Vec<LadderStep>, PricingError> {
    RideCapacity::new(total_seats)?;

    (0..total_seats)
        .map(|booked_seats| {
            let current_price_per_seat =
                compute_current_price(base_price_per_seat, total_seats, booked_seats)?;
            let advertised_earnings =
                compute_driver_advertised_earnings(current_price_per_seat, commission_rate)?;

            Ok(LadderStep {
                booked_seats,
                current_price_per_seat,
                advertised_earnings,
            })
        })
        .collect()
}
