//! Domain layer: pure assessment logic and models.

pub mod errors;
pub mod models;
pub mod ports;
