// src/lib.rs
//
// Chrysler/Jeep/RAM vehicle profile resolution and low-speed steering
// alert hysteresis.
//
// Signal flow:
//   variant + firmware + fingerprint → params::resolve → ParameterSet (once)
//   VehicleSnapshot (per cycle) → CarInterface::update → Events

pub mod alerts;
pub mod config;
pub mod error;
pub mod interface;
pub mod params;
pub mod types;

pub use alerts::{AlertState, EventName, Events, HysteresisState};
pub use error::ConfigurationError;
pub use interface::{CarInterface, CycleOutput};
pub use params::{resolve, ParameterSet};
pub use types::{FirmwareRecord, Fingerprint, GearShifter, VehicleSnapshot, VehicleVariant};
