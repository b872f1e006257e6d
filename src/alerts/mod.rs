// src/alerts/mod.rs
//
// Per-cycle alert evaluation.
//
//   VehicleSnapshot → common events (collaborator) ─┐
//                   → hysteresis ───────────────────┼→ Events
//                   → min steer tracker (info only) ┘

pub mod events;
pub mod hysteresis;
pub mod min_steer;

pub use events::{CommonEvents, EventName, Events, GearEvents};
pub use hysteresis::{evaluate_cycle, update_low_speed_alert, AlertRule, AlertState, HysteresisState};
pub use min_steer::{MinSteerSpeedConfig, MinSteerSpeedTracker};
