// src/alerts/hysteresis.rs
//
// Low-speed steering alert.
//
//   NORMAL ──(speed < min_steer + 0.5)──▶ LOW_SPEED_ALERT
//   LOW_SPEED_ALERT ──(speed > min_steer + 1.0)──▶ NORMAL
//
// Between the two bands the state holds. Trucks use the enable-speed rule
// instead, where a non-drive gear forces the alert once the truck's
// enable speed is high enough.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::events::{EventName, Events};
use crate::params::ParameterSet;
use crate::types::{GearShifter, VehicleSnapshot};

pub const ALERT_ENTER_MARGIN: f64 = 0.5;
pub const ALERT_EXIT_MARGIN: f64 = 1.0;
/// Trucks with an enable speed at or above this alert whenever out of drive.
pub const TRUCK_GEAR_ALERT_ENABLE_SPEED: f64 = 14.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertState {
    Normal,
    LowSpeedAlert,
}

/// Session-scoped alert state. Starts in `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HysteresisState {
    pub low_speed_alert: bool,
}

impl HysteresisState {
    pub fn state(&self) -> AlertState {
        if self.low_speed_alert {
            AlertState::LowSpeedAlert
        } else {
            AlertState::Normal
        }
    }

    pub fn reset(&mut self) {
        self.low_speed_alert = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertRule {
    /// Trucks: driven by min enable speed and gear
    EnableSpeed,
    /// Everything else: driven by min steer speed with a dead zone
    SteerSpeed,
}

impl AlertRule {
    pub fn for_params(params: &ParameterSet) -> Self {
        if params.car_fingerprint.is_truck() {
            Self::EnableSpeed
        } else {
            Self::SteerSpeed
        }
    }
}

/// Advance the alert state by one cycle. Returns the post-transition state.
pub fn update_low_speed_alert(
    params: &ParameterSet,
    snapshot: &VehicleSnapshot,
    state: &mut HysteresisState,
) -> AlertState {
    let before = state.state();
    let v_ego = snapshot.v_ego;

    match AlertRule::for_params(params) {
        AlertRule::EnableSpeed => {
            if v_ego >= params.min_enable_speed {
                state.low_speed_alert = false;
            }
            // evaluated second so it overrides the speed check
            if params.min_enable_speed >= TRUCK_GEAR_ALERT_ENABLE_SPEED
                && snapshot.gear_shifter != GearShifter::Drive
            {
                state.low_speed_alert = true;
            }
        }
        AlertRule::SteerSpeed => {
            let min_steer = params.min_steer_speed;
            if min_steer > 0.0 && v_ego < min_steer + ALERT_ENTER_MARGIN {
                state.low_speed_alert = true;
            } else if v_ego > min_steer + ALERT_EXIT_MARGIN {
                state.low_speed_alert = false;
            }
        }
    }

    let after = state.state();
    if after != before {
        info!(
            "Low speed alert {:?} -> {:?} at {:.2} m/s ({:?})",
            before, after, v_ego, snapshot.gear_shifter
        );
    }
    after
}

/// One cycle of alert evaluation on top of the events the common
/// collaborator already produced. Common events stay first.
pub fn evaluate_cycle(
    params: &ParameterSet,
    snapshot: &VehicleSnapshot,
    state: &mut HysteresisState,
    common_events: Events,
) -> Events {
    let mut events = common_events;
    if update_low_speed_alert(params, snapshot, state) == AlertState::LowSpeedAlert {
        events.add(EventName::BelowSteerSpeed);
    }
    events
}
