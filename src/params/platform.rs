// src/params/platform.rs
//
// Static per-platform data. Branches in the resolver adjust these
// baselines; nothing here depends on firmware or fingerprint.

use crate::types::VehicleVariant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpecs {
    /// Curb weight plus driver, kg
    pub mass: f64,
    /// m
    pub wheelbase: f64,
    pub steer_ratio: f64,
    /// Below this speed the EPS refuses torque, m/s
    pub min_steer_speed: f64,
    /// Below this speed engagement is refused, m/s; negative means none
    pub min_enable_speed: f64,
}

impl PlatformSpecs {
    const fn chrysler(mass: f64, wheelbase: f64, steer_ratio: f64) -> Self {
        Self {
            mass,
            wheelbase,
            steer_ratio,
            min_steer_speed: 3.8,
            min_enable_speed: -1.0,
        }
    }
}

/// Measured lateral response used to seed the torque controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueData {
    /// m/s^2 of lateral accel per unit of normalized torque
    pub lat_accel_factor: f64,
    pub friction: f64,
}

const PACIFICA: PlatformSpecs = PlatformSpecs::chrysler(2242.0, 3.089, 16.2);

/// `None` for the `Mock` placeholder, which has no physical platform.
pub fn specs(variant: VehicleVariant) -> Option<PlatformSpecs> {
    let specs = match variant {
        VehicleVariant::PacificaHybrid2017
        | VehicleVariant::PacificaHybrid2018
        | VehicleVariant::PacificaHybrid2019
        | VehicleVariant::Pacifica2018
        | VehicleVariant::Pacifica2020 => PACIFICA,
        VehicleVariant::DodgeDurango2021 => PlatformSpecs::chrysler(2493.0, 3.022, 15.5),
        VehicleVariant::JeepGrandCherokee | VehicleVariant::JeepGrandCherokee2019 => {
            PlatformSpecs::chrysler(1778.0, 2.71, 16.7)
        }
        VehicleVariant::Ram1500 => PlatformSpecs {
            min_steer_speed: 14.5,
            min_enable_speed: 14.5,
            ..PlatformSpecs::chrysler(2493.0, 3.88, 16.3)
        },
        VehicleVariant::RamHd => PlatformSpecs {
            min_steer_speed: 16.0,
            min_enable_speed: 14.5,
            ..PlatformSpecs::chrysler(3405.0, 3.785, 15.61)
        },
        VehicleVariant::Mock => return None,
    };
    Some(specs)
}

pub fn torque_data(variant: VehicleVariant) -> Option<TorqueData> {
    let data = match variant {
        VehicleVariant::PacificaHybrid2017
        | VehicleVariant::PacificaHybrid2018
        | VehicleVariant::PacificaHybrid2019
        | VehicleVariant::Pacifica2018
        | VehicleVariant::Pacifica2020 => TorqueData {
            lat_accel_factor: 2.0,
            friction: 0.15,
        },
        VehicleVariant::DodgeDurango2021 => TorqueData {
            lat_accel_factor: 2.1,
            friction: 0.13,
        },
        VehicleVariant::JeepGrandCherokee | VehicleVariant::JeepGrandCherokee2019 => TorqueData {
            lat_accel_factor: 1.7,
            friction: 0.19,
        },
        VehicleVariant::Ram1500 => TorqueData {
            lat_accel_factor: 2.0,
            friction: 0.05,
        },
        VehicleVariant::RamHd => TorqueData {
            lat_accel_factor: 1.4,
            friction: 0.18,
        },
        VehicleVariant::Mock => return None,
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_real_platform_has_data() {
        for v in VehicleVariant::ALL {
            assert_eq!(specs(v).is_some(), v != VehicleVariant::Mock);
            assert_eq!(torque_data(v).is_some(), v != VehicleVariant::Mock);
        }
    }

    #[test]
    fn test_truck_baselines() {
        let ram = specs(VehicleVariant::Ram1500).unwrap();
        assert_eq!(ram.wheelbase, 3.88);
        assert_eq!(ram.min_steer_speed, 14.5);
        assert!(specs(VehicleVariant::Pacifica2020).unwrap().min_enable_speed < 0.0);
    }
}
