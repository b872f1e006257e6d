// src/params/tuning.rs

use serde::{Deserialize, Serialize};

use super::platform::TorqueData;

/// Gain schedule for the PID lateral controller. Breakpoints are speeds in
/// m/s; gains are interpolated between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidTuning {
    pub kp_bp: Vec<f64>,
    pub kp_v: Vec<f64>,
    pub ki_bp: Vec<f64>,
    pub ki_v: Vec<f64>,
    pub kf: f64,
}

impl PidTuning {
    /// Shared by the Pacifica, Durango and Grand Cherokee racks.
    pub fn chrysler_stock() -> Self {
        Self {
            kp_bp: vec![9.0, 20.0],
            kp_v: vec![0.15, 0.30],
            ki_bp: vec![9.0, 20.0],
            ki_v: vec![0.03, 0.05],
            kf: 0.00006,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueTuning {
    pub use_steering_angle: bool,
    pub kp: f64,
    pub ki: f64,
    pub friction: f64,
    pub lat_accel_factor: f64,
    pub lat_accel_offset: f64,
    pub steering_angle_deadzone_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LateralTuning {
    Pid(PidTuning),
    Torque(TorqueTuning),
}

impl LateralTuning {
    pub fn as_pid(&self) -> Option<&PidTuning> {
        match self {
            Self::Pid(pid) => Some(pid),
            Self::Torque(_) => None,
        }
    }

    pub fn as_torque(&self) -> Option<&TorqueTuning> {
        match self {
            Self::Torque(torque) => Some(torque),
            Self::Pid(_) => None,
        }
    }
}

/// Build the torque controller tune from a platform's measured response.
pub fn configure_torque_tune(
    data: TorqueData,
    steering_angle_deadzone_deg: f64,
    use_steering_angle: bool,
) -> LateralTuning {
    LateralTuning::Torque(TorqueTuning {
        use_steering_angle,
        kp: 1.0,
        ki: 0.1,
        friction: data.friction,
        lat_accel_factor: data.lat_accel_factor,
        lat_accel_offset: 0.0,
        steering_angle_deadzone_deg,
    })
}

/// Default torque tune every variant starts from.
pub fn default_torque_tune(data: TorqueData) -> LateralTuning {
    configure_torque_tune(data, 0.0, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> TorqueData {
        TorqueData {
            lat_accel_factor: 2.5,
            friction: 0.1,
        }
    }

    #[test]
    fn test_default_torque_tune() {
        let tune = default_torque_tune(data());
        let torque = tune.as_torque().unwrap();
        assert!(torque.use_steering_angle);
        assert_eq!(torque.steering_angle_deadzone_deg, 0.0);
        assert_eq!(torque.lat_accel_factor, 2.5);
        assert!(tune.as_pid().is_none());
    }

    #[test]
    fn test_stock_pid_schedule() {
        let pid = PidTuning::chrysler_stock();
        assert_eq!(pid.kp_bp, pid.ki_bp);
        assert_eq!(pid.kp_v, vec![0.15, 0.30]);
        assert_eq!(pid.ki_v, vec![0.03, 0.05]);
    }
}
