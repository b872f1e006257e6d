// src/params/resolver.rs
//
// Vehicle profile resolution. Runs once at session start:
//
//   variant + EPS firmware + fingerprint → ParameterSet
//
// Order matters: the higher-min-steer flag is decided before the tuning
// branch, and the branch runs before the min steer speed is finalized
// because the RAM 1500 branch can drop it to zero.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::firmware::{allows_steer_to_zero, has_new_eps_firmware};
use super::flags::{CarFlags, SafetyModel, SafetyParam};
use super::platform;
use super::tuning::{configure_torque_tune, default_torque_tune, LateralTuning, PidTuning};
use crate::error::ConfigurationError;
use crate::types::{FirmwareRecord, Fingerprint, TruckDuty, VehicleVariant};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const STEER_ACTUATOR_DELAY: f64 = 0.1;
pub const SLOW_STEER_ACTUATOR_DELAY: f64 = 0.2;
pub const STEER_LIMIT_TIMER: f64 = 0.4;
pub const CENTER_TO_FRONT_RATIO: f64 = 0.44;
pub const HIGHER_MIN_STEER_SPEED: f64 = 17.5;
pub const RAM_1500_WHEELBASE: f64 = 3.88;
/// Blind-spot radar status message
pub const BSM_MESSAGE_ID: u32 = 720;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    pub safety_model: SafetyModel,
    pub safety_param: SafetyParam,
}

/// Everything downstream control needs to know about the car. Built once
/// per session by [`resolve`] and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub car_name: String,
    pub car_fingerprint: VehicleVariant,
    pub safety_config: SafetyConfig,
    pub flags: CarFlags,

    pub steer_actuator_delay: f64,
    pub steer_limit_timer: f64,
    pub min_steer_speed: f64,
    pub min_enable_speed: f64,

    pub mass: f64,
    pub wheelbase: f64,
    pub center_to_front: f64,
    pub steer_ratio: f64,

    pub lateral_tuning: LateralTuning,

    pub radar_unavailable: bool,
    pub custom_stock_long_available: bool,
    pub enable_bsm: bool,
}

impl ParameterSet {
    pub fn has_flag(&self, flag: CarFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// The four mutually exclusive tuning branches of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningBranch {
    /// Pacifica family and Durango
    MinivanSuv,
    /// Grand Cherokee
    SuvB,
    /// RAM 1500
    LightDutyTruck,
    /// RAM HD
    HeavyDutyTruck,
}

impl TuningBranch {
    /// `None` only for variants without a platform, which callers must
    /// treat as fatal.
    pub fn for_variant(variant: VehicleVariant) -> Option<Self> {
        match variant {
            VehicleVariant::PacificaHybrid2017
            | VehicleVariant::PacificaHybrid2018
            | VehicleVariant::PacificaHybrid2019
            | VehicleVariant::Pacifica2018
            | VehicleVariant::Pacifica2020
            | VehicleVariant::DodgeDurango2021 => Some(Self::MinivanSuv),
            VehicleVariant::JeepGrandCherokee | VehicleVariant::JeepGrandCherokee2019 => {
                Some(Self::SuvB)
            }
            VehicleVariant::Ram1500 => Some(Self::LightDutyTruck),
            VehicleVariant::RamHd => Some(Self::HeavyDutyTruck),
            VehicleVariant::Mock => None,
        }
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve the parameter set for `variant`.
///
/// Pure: identical inputs always give identical output.
pub fn resolve(
    variant: VehicleVariant,
    car_fw: &[FirmwareRecord],
    fingerprint: &Fingerprint,
) -> Result<ParameterSet, ConfigurationError> {
    let unsupported = || ConfigurationError::UnsupportedVariant(variant);
    let branch = TuningBranch::for_variant(variant).ok_or_else(unsupported)?;
    let specs = platform::specs(variant).ok_or_else(unsupported)?;
    let torque = platform::torque_data(variant).ok_or_else(unsupported)?;

    let mut safety_param = SafetyParam::default();
    match variant.truck_duty() {
        Some(TruckDuty::Heavy) => safety_param |= SafetyParam::RAM_HD,
        Some(TruckDuty::Light) => safety_param |= SafetyParam::RAM_DT,
        None => {}
    }

    let mut params = ParameterSet {
        car_name: "chrysler".to_string(),
        car_fingerprint: variant,
        safety_config: SafetyConfig {
            safety_model: SafetyModel::Chrysler,
            safety_param,
        },
        flags: CarFlags::default(),
        steer_actuator_delay: STEER_ACTUATOR_DELAY,
        steer_limit_timer: STEER_LIMIT_TIMER,
        min_steer_speed: specs.min_steer_speed,
        min_enable_speed: specs.min_enable_speed,
        mass: specs.mass,
        wheelbase: specs.wheelbase,
        center_to_front: 0.0,
        steer_ratio: specs.steer_ratio,
        lateral_tuning: default_torque_tune(torque),
        radar_unavailable: true,
        custom_stock_long_available: true,
        enable_bsm: false,
    };

    if !variant.is_truck() {
        let new_eps_platform = variant.has_new_eps_platform();
        let new_eps_firmware = has_new_eps_firmware(car_fw);
        debug!(
            "{}: new_eps_platform={} new_eps_firmware={}",
            variant, new_eps_platform, new_eps_firmware
        );
        if new_eps_platform || new_eps_firmware {
            params.flags |= CarFlags::HIGHER_MIN_STEERING_SPEED;
        }
    }

    match branch {
        TuningBranch::MinivanSuv => {
            params.lateral_tuning = LateralTuning::Pid(PidTuning::chrysler_stock());
        }
        TuningBranch::SuvB => {
            params.steer_actuator_delay = SLOW_STEER_ACTUATOR_DELAY;
            params.lateral_tuning = LateralTuning::Pid(PidTuning::chrysler_stock());
        }
        TuningBranch::LightDutyTruck => {
            params.steer_actuator_delay = SLOW_STEER_ACTUATOR_DELAY;
            params.wheelbase = RAM_1500_WHEELBASE;
            if allows_steer_to_zero(car_fw) {
                debug!("{}: older EPS firmware, steering allowed to zero", variant);
                params.min_steer_speed = 0.0;
            }
        }
        TuningBranch::HeavyDutyTruck => {
            params.steer_actuator_delay = SLOW_STEER_ACTUATOR_DELAY;
            params.lateral_tuning = configure_torque_tune(torque, 1.0, false);
        }
    }

    if params.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED) {
        params.min_steer_speed = HIGHER_MIN_STEER_SPEED;
    }

    params.center_to_front = params.wheelbase * CENTER_TO_FRONT_RATIO;
    params.enable_bsm = fingerprint.contains(0, BSM_MESSAGE_ID);

    info!(
        "Resolved {} ({:?}): min_steer={:.1} m/s, delay={:.1}s, bsm={}, safety={}/{}",
        variant,
        branch,
        params.min_steer_speed,
        params.steer_actuator_delay,
        params.enable_bsm,
        params.safety_config.safety_model.id(),
        params.safety_config.safety_param.0
    );

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eps(v: &str) -> Vec<FirmwareRecord> {
        vec![FirmwareRecord::new("eps", v)]
    }

    fn fp() -> Fingerprint {
        Fingerprint::from_ids(0, [256, 500, 720])
    }

    fn supported() -> impl Iterator<Item = VehicleVariant> {
        VehicleVariant::ALL
            .into_iter()
            .filter(|v| *v != VehicleVariant::Mock)
    }

    #[test]
    fn test_all_supported_variants_resolve() {
        for v in supported() {
            let p = resolve(v, &[], &fp()).unwrap();
            assert_eq!(p.car_fingerprint, v);
            assert_eq!(p.car_name, "chrysler");
            assert_eq!(p.safety_config.safety_model, SafetyModel::Chrysler);
            assert_eq!(p.steer_limit_timer, STEER_LIMIT_TIMER);
            assert!(p.radar_unavailable);
            assert!(p.custom_stock_long_available);
            assert!(p.wheelbase > 0.0);
        }
    }

    #[test]
    fn test_mock_is_fatal() {
        let err = resolve(VehicleVariant::Mock, &[], &fp()).unwrap_err();
        assert_eq!(err, ConfigurationError::UnsupportedVariant(VehicleVariant::Mock));
    }

    #[test]
    fn test_center_to_front_ratio() {
        for v in supported() {
            let p = resolve(v, &eps("68302212AC"), &fp()).unwrap();
            assert_eq!(p.center_to_front, p.wheelbase * 0.44);
        }
    }

    #[test]
    fn test_safety_flags_by_subgroup() {
        let hd = resolve(VehicleVariant::RamHd, &[], &fp()).unwrap();
        assert_eq!(hd.safety_config.safety_param, SafetyParam::RAM_HD);
        let dt = resolve(VehicleVariant::Ram1500, &[], &fp()).unwrap();
        assert_eq!(dt.safety_config.safety_param, SafetyParam::RAM_DT);
        let pac = resolve(VehicleVariant::Pacifica2018, &[], &fp()).unwrap();
        assert_eq!(pac.safety_config.safety_param, SafetyParam::default());
    }

    #[test]
    fn test_new_eps_firmware_sets_flag() {
        let v = VehicleVariant::Pacifica2018;
        let p = resolve(v, &eps("68410203AA"), &fp()).unwrap();
        assert!(p.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED));
        assert_eq!(p.min_steer_speed, HIGHER_MIN_STEER_SPEED);

        let p = resolve(v, &eps("68400000AA"), &fp()).unwrap();
        assert!(!p.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED));
        assert_eq!(p.min_steer_speed, 3.8);
    }

    #[test]
    fn test_new_eps_platform_sets_flag() {
        for v in [
            VehicleVariant::PacificaHybrid2019,
            VehicleVariant::Pacifica2020,
            VehicleVariant::JeepGrandCherokee2019,
            VehicleVariant::DodgeDurango2021,
        ] {
            let p = resolve(v, &[], &fp()).unwrap();
            assert!(p.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED), "{v}");
        }
    }

    #[test]
    fn test_trucks_never_get_higher_min_steer_flag() {
        for v in [VehicleVariant::Ram1500, VehicleVariant::RamHd] {
            let p = resolve(v, &eps("69000000AA"), &fp()).unwrap();
            assert!(!p.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED));
        }
    }

    #[test]
    fn test_pid_branches() {
        let pac = resolve(VehicleVariant::PacificaHybrid2017, &[], &fp()).unwrap();
        assert_eq!(pac.lateral_tuning, LateralTuning::Pid(PidTuning::chrysler_stock()));
        assert_eq!(pac.steer_actuator_delay, STEER_ACTUATOR_DELAY);

        let jeep = resolve(VehicleVariant::JeepGrandCherokee, &[], &fp()).unwrap();
        assert_eq!(jeep.lateral_tuning, LateralTuning::Pid(PidTuning::chrysler_stock()));
        assert_eq!(jeep.steer_actuator_delay, SLOW_STEER_ACTUATOR_DELAY);
    }

    #[test]
    fn test_ram_1500_steer_to_zero() {
        let old = resolve(VehicleVariant::Ram1500, &eps("68302212AC"), &fp()).unwrap();
        assert_eq!(old.min_steer_speed, 0.0);
        assert_eq!(old.wheelbase, RAM_1500_WHEELBASE);
        assert_eq!(old.steer_actuator_delay, SLOW_STEER_ACTUATOR_DELAY);
        assert!(old.lateral_tuning.as_torque().unwrap().use_steering_angle);

        let newer = resolve(VehicleVariant::Ram1500, &eps("68322222AA"), &fp()).unwrap();
        assert_eq!(newer.min_steer_speed, 14.5);
    }

    #[test]
    fn test_ram_hd_torque_tune() {
        let p = resolve(VehicleVariant::RamHd, &[], &fp()).unwrap();
        let torque = p.lateral_tuning.as_torque().unwrap();
        assert_eq!(torque.steering_angle_deadzone_deg, 1.0);
        assert!(!torque.use_steering_angle);
        assert_eq!(p.steer_actuator_delay, SLOW_STEER_ACTUATOR_DELAY);
    }

    #[test]
    fn test_bsm_from_fingerprint() {
        let with = resolve(VehicleVariant::Pacifica2020, &[], &fp()).unwrap();
        assert!(with.enable_bsm);
        let without =
            resolve(VehicleVariant::Pacifica2020, &[], &Fingerprint::from_ids(0, [256])).unwrap();
        assert!(!without.enable_bsm);
        // only bus 0 counts
        let other_bus =
            resolve(VehicleVariant::Pacifica2020, &[], &Fingerprint::from_ids(2, [720])).unwrap();
        assert!(!other_bus.enable_bsm);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let fw = eps("68410203AA");
        for v in supported() {
            assert_eq!(resolve(v, &fw, &fp()).unwrap(), resolve(v, &fw, &fp()).unwrap());
        }
    }

    #[test]
    fn test_every_variant_has_one_branch() {
        for v in VehicleVariant::ALL {
            assert_eq!(TuningBranch::for_variant(v).is_none(), v == VehicleVariant::Mock);
        }
    }
}
