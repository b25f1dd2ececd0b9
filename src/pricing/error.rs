use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("invalid capacity: {booked_seats} booked of {total_seats} seats")]
    InvalidCapacity { total_seats: u32, booked_seats: u32 },

    #[error("invalid price: {0}")]
    InvalidPrice(i64),

    #[error("invalid payment input: {0}")]
    InvalidPaymentInput(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),
}
