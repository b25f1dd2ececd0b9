pub mod bookings;
pub mod pricing;
pub mod rides;
