/// Error kinds produced by the booking engine. Every validation failure is
/// detected before any write reaches the store.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Selected accommodation is not available at the chosen destination")]
    RelationshipMismatch,

    #[error("Return date must be after departure date")]
    InvalidRange,

    #[error("Traveler count must be at least 1")]
    InvalidQuantity,

    #[error("Booking is cancelled and cannot be modified")]
    IllegalTransition,

    /// Persistence failure, surfaced unchanged and never retried here.
    #[error("Store operation failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    pub fn store(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        BookingError::Store(err)
    }
}
