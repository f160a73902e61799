//! Trip-budgeting engine.
//!
//! The heart of the crate is [`costing::calculate`], a pure function turning
//! a `(Trip, Vehicle, Settings)` triple into an itemized [`TripResults`].
//! Around it, [`Engine`] owns the sea-orm-backed CRUD for vehicles, trips,
//! and per-user settings, and the `calculate_trip` operation that feeds the
//! calculator from storage and persists its snapshot.

pub use currency::Currency;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use results::{CountryResult, TripResults};
pub use segments::CountrySegment;
pub use settings::{Settings, StayDefaults};
pub use stays::{Stay, StayType};
pub use trips::{SegmentDraft, StayDraft, Trip, TripAssumptions, TripDraft, TripHeader};
pub use vehicles::{FuelUnit, Vehicle};

pub mod costing;
mod currency;
mod error;
mod ops;
mod results;
mod segments;
mod settings;
mod stays;
mod trips;
mod vehicles;

type ResultEngine<T> = Result<T, EngineError>;
