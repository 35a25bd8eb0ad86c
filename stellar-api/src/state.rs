use std::sync::Arc;

use stellar_booking::BookingEngine;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BookingEngine>,
    pub auth: AuthConfig,
}
