//! The module contains the errors the engine can throw.
//!
//! Validation errors are raised *before* any cost math runs: the calculator
//! either produces a complete [`TripResults`] or fails atomically.
//!
//! [`TripResults`]: super::results::TripResults
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid vehicle: {0}")]
    InvalidVehicle(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Vehicle in use: {0}")]
    VehicleInUse(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidVehicle(a), Self::InvalidVehicle(b)) => a == b,
            (Self::InvalidQuantity(a), Self::InvalidQuantity(b)) => a == b,
            (Self::VehicleInUse(a), Self::VehicleInUse(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
