// src/interface.rs
//
// Session object handed to the host's control loop. Owns the resolved
// parameters (shared, read-only) and the only mutable per-session state:
// the alert hysteresis and the min steer tracker.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::alerts::{
    evaluate_cycle, AlertState, CommonEvents, Events, GearEvents, HysteresisState,
    MinSteerSpeedConfig, MinSteerSpeedTracker,
};
use crate::error::ConfigurationError;
use crate::params::{resolve, ParameterSet};
use crate::types::{FirmwareRecord, Fingerprint, GearShifter, VehicleSnapshot, VehicleVariant};

/// Gears accepted as driving gears on top of `Drive`.
pub const EXTRA_GEARS: [GearShifter; 1] = [GearShifter::Low];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleOutput {
    pub frame: u64,
    pub events: Events,
    pub alert_state: AlertState,
    /// Informational; see [`MinSteerSpeedTracker`]
    pub effective_min_steer_speed: f64,
}

pub struct CarInterface {
    params: Arc<ParameterSet>,
    hysteresis: HysteresisState,
    min_steer: MinSteerSpeedTracker,
    common_events: Box<dyn CommonEvents + Send>,
    frame: u64,
}

impl CarInterface {
    pub fn new(params: Arc<ParameterSet>, min_steer_config: MinSteerSpeedConfig) -> Self {
        Self {
            params,
            hysteresis: HysteresisState::default(),
            min_steer: MinSteerSpeedTracker::new(min_steer_config),
            common_events: Box::new(GearEvents),
            frame: 0,
        }
    }

    /// Resolve and start a session in one step.
    pub fn from_identity(
        variant: VehicleVariant,
        car_fw: &[FirmwareRecord],
        fingerprint: &Fingerprint,
        min_steer_config: MinSteerSpeedConfig,
    ) -> Result<Self, ConfigurationError> {
        let params = resolve(variant, car_fw, fingerprint)?;
        Ok(Self::new(Arc::new(params), min_steer_config))
    }

    pub fn with_common_events(mut self, common_events: impl CommonEvents + Send + 'static) -> Self {
        self.common_events = Box::new(common_events);
        self
    }

    pub fn params(&self) -> &Arc<ParameterSet> {
        &self.params
    }

    pub fn hysteresis(&self) -> HysteresisState {
        self.hysteresis
    }

    /// Run one control cycle.
    pub fn update(&mut self, snapshot: &VehicleSnapshot) -> CycleOutput {
        let common = self
            .common_events
            .create_common_events(snapshot, &EXTRA_GEARS);
        let effective_min_steer_speed = self.min_steer.update(&self.params, snapshot.v_ego);
        let events = evaluate_cycle(&self.params, snapshot, &mut self.hysteresis, common);

        debug!(
            "frame {}: v_ego={:.2} gear={:?} events={:?}",
            self.frame,
            snapshot.v_ego,
            snapshot.gear_shifter,
            events.names()
        );

        let out = CycleOutput {
            frame: self.frame,
            alert_state: self.hysteresis.state(),
            events,
            effective_min_steer_speed,
        };
        self.frame += 1;
        out
    }

    /// Back to session-start state. Parameters are kept.
    pub fn reset(&mut self) {
        info!("Resetting alert state for {}", self.params.car_fingerprint);
        self.hysteresis.reset();
        self.min_steer.reset();
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::EventName;

    fn interface(variant: VehicleVariant) -> CarInterface {
        CarInterface::from_identity(
            variant,
            &[],
            &Fingerprint::default(),
            MinSteerSpeedConfig::stateless(),
        )
        .unwrap()
    }

    struct NoEvents;

    impl CommonEvents for NoEvents {
        fn create_common_events(&self, _: &VehicleSnapshot, _: &[GearShifter]) -> Events {
            Events::new()
        }
    }

    #[test]
    fn test_unsupported_variant_fails_before_cycles() {
        let result = CarInterface::from_identity(
            VehicleVariant::Mock,
            &[],
            &Fingerprint::default(),
            MinSteerSpeedConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_low_gear_is_driving_gear() {
        let mut ci = interface(VehicleVariant::Pacifica2018);
        let out = ci.update(&VehicleSnapshot::new(25.0, GearShifter::Low));
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_common_events_before_alert() {
        let mut ci = interface(VehicleVariant::Pacifica2020);
        let out = ci.update(&VehicleSnapshot::new(2.0, GearShifter::Reverse));
        assert_eq!(
            out.events.names(),
            &[EventName::WrongGear, EventName::ReverseGear, EventName::BelowSteerSpeed]
        );
        assert_eq!(out.alert_state, AlertState::LowSpeedAlert);
    }

    #[test]
    fn test_frames_and_reset() {
        let mut ci = interface(VehicleVariant::Pacifica2020).with_common_events(NoEvents);
        assert_eq!(ci.update(&VehicleSnapshot::new(5.0, GearShifter::Drive)).frame, 0);
        let out = ci.update(&VehicleSnapshot::new(5.0, GearShifter::Drive));
        assert_eq!(out.frame, 1);
        assert!(ci.hysteresis().low_speed_alert);

        ci.reset();
        assert!(!ci.hysteresis().low_speed_alert);
        assert_eq!(ci.update(&VehicleSnapshot::new(30.0, GearShifter::Drive)).frame, 0);
    }

    #[test]
    fn test_effective_min_steer_is_informational() {
        let mut ci = interface(VehicleVariant::Pacifica2020).with_common_events(NoEvents);
        let out = ci.update(&VehicleSnapshot::new(18.0, GearShifter::Drive));
        assert_eq!(out.effective_min_steer_speed, 13.0);
        // bands still use the resolved 17.5: 18.0 is inside the dead zone
        assert_eq!(out.alert_state, AlertState::Normal);
        assert_eq!(ci.params().min_steer_speed, 17.5);
    }
}
