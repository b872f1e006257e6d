// src/alerts/min_steer.rs
//
// Informational tracking of the effective minimum steering speed on cars
// with the higher-min-steer EPS. Once speed has stayed above the
// threshold for `debounce_cycles` consecutive cycles the rack accepts
// torque down to the lower dynamic speed. The resolved parameter set and
// the alert bands are not touched by this.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{CarFlags, ParameterSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinSteerSpeedConfig {
    /// Speed that must be exceeded, m/s
    #[serde(rename = "dynamic_threshold")]
    pub threshold: f64,
    /// Effective min steer speed once the threshold has been held, m/s
    pub dynamic_min_steer_speed: f64,
    /// Consecutive cycles above threshold required
    #[serde(rename = "min_steer_debounce_cycles")]
    pub debounce_cycles: u32,
}

impl Default for MinSteerSpeedConfig {
    fn default() -> Self {
        Self {
            threshold: 17.5,
            dynamic_min_steer_speed: 13.0,
            debounce_cycles: 100, // 1s at 100Hz
        }
    }
}

impl MinSteerSpeedConfig {
    /// Single-cycle check: the first cycle above threshold switches over.
    pub fn stateless() -> Self {
        Self {
            debounce_cycles: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinSteerSpeedTracker {
    config: MinSteerSpeedConfig,
    cycles_above: u32,
}

impl MinSteerSpeedTracker {
    pub fn new(config: MinSteerSpeedConfig) -> Self {
        Self {
            config,
            cycles_above: 0,
        }
    }

    pub fn update(&mut self, params: &ParameterSet, v_ego: f64) -> f64 {
        if !params.has_flag(CarFlags::HIGHER_MIN_STEERING_SPEED) {
            self.cycles_above = 0;
            return params.min_steer_speed;
        }

        if v_ego > self.config.threshold {
            self.cycles_above = self.cycles_above.saturating_add(1);
        } else {
            if self.cycles_above > 0 {
                debug!(
                    "Speed {:.2} m/s dropped below {:.1} after {} cycles",
                    v_ego, self.config.threshold, self.cycles_above
                );
            }
            self.cycles_above = 0;
        }

        if self.is_sustained() {
            self.config.dynamic_min_steer_speed
        } else {
            params.min_steer_speed
        }
    }

    pub fn is_sustained(&self) -> bool {
        self.cycles_above >= self.config.debounce_cycles.max(1)
    }

    pub fn cycles_above(&self) -> u32 {
        self.cycles_above
    }

    pub fn reset(&mut self) {
        self.cycles_above = 0;
    }
}
