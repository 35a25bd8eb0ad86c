pub mod error;
pub mod repository;

pub use error::{BookingError, BookingResult};
pub use repository::{BookingStore, CatalogLookup};
