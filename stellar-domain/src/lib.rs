pub mod booking;
pub mod catalog;
pub mod invoice;

pub use booking::{
    Booking, BookingDetail, BookingStatus, CreateBookingRequest, UpdateBookingRequest,
};
pub use catalog::{Accommodation, Destination, Package};
pub use invoice::{Invoice, InvoiceCosts, PackageQuote};
