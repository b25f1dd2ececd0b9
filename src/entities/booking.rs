use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::pricing::PaymentAllocation;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub ride_id: Uuid,
    pub passenger_id: Uuid,
    pub seats: u32,
    pub has_luggage: bool,
    pub luggage_description: Option<String>,
    pub price_per_seat: i64,
    pub allocation: PaymentAllocation,
    pub payment_status: PaymentStatus,
    pub status: Status,
    pub booked_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingRequest {
    pub seats: u32,
    #[serde(default)]
    pub has_luggage: bool,
    #[serde(default)]
    pub luggage_description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Active,
    Cancelled,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Active => "active".into(),
            Self::Cancelled => "cancelled".into(),
        }
    }
}

impl Booking {
    pub fn new(
        ride_id: Uuid,
        passenger_id: Uuid,
        request: BookingRequest,
        price_per_seat: i64,
        allocation: PaymentAllocation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ride_id,
            passenger_id,
            seats: request.seats,
            has_luggage: request.has_luggage,
            luggage_description: request.luggage_description,
            price_per_seat,
            allocation,
            payment_status: PaymentStatus::Pending,
            status: Status::Active,
            booked_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, Status::Active)
    }

    #[tracing::instrument(skip(self), fields(booking_id = %self.id))]
    pub fn mark_paid(&mut self) -> Result<(), Error> {
        match (&self.status, self.payment_status) {
            (Status::Active, PaymentStatus::Pending) => {
                self.payment_status = PaymentStatus::Paid;
                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(booking_id = %self.id))]
    pub fn cancel(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Active => {
                self.status = Status::Cancelled;

                if self.payment_status == PaymentStatus::Paid {
                    self.payment_status = PaymentStatus::Refunded;
                }

                Ok(())
            }
            _ => Err(Error::invalid_invocation_error()),
        }
    }
}
