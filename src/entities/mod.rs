mod booking;
mod place;
mod ride;

pub use booking::{Booking, BookingRequest, PaymentStatus, Status as BookingStatus};
pub use place::{Coordinates, Place};
pub use ride::{Ride, RideDetails, SearchCriteria, Status as RideStatus};
