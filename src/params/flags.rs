// src/params/flags.rs

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Low-level actuation ruleset selector consumed by the safety layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SafetyModel {
    Chrysler,
}

impl SafetyModel {
    /// Wire id shared with the safety firmware.
    pub fn id(self) -> u16 {
        match self {
            Self::Chrysler => 9,
        }
    }
}

/// Safety-param bits understood by the chrysler safety model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafetyParam(pub u16);

impl SafetyParam {
    pub const RAM_DT: SafetyParam = SafetyParam(1);
    pub const RAM_HD: SafetyParam = SafetyParam(2);

    pub fn contains(self, other: SafetyParam) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SafetyParam {
    type Output = SafetyParam;
    fn bitor(self, rhs: SafetyParam) -> SafetyParam {
        SafetyParam(self.0 | rhs.0)
    }
}

impl BitOrAssign for SafetyParam {
    fn bitor_assign(&mut self, rhs: SafetyParam) {
        self.0 |= rhs.0;
    }
}

/// Platform behaviour flags carried on the parameter set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarFlags(pub u32);

impl CarFlags {
    pub const HIGHER_MIN_STEERING_SPEED: CarFlags = CarFlags(1);

    pub fn contains(self, other: CarFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CarFlags {
    type Output = CarFlags;
    fn bitor(self, rhs: CarFlags) -> CarFlags {
        CarFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CarFlags {
    fn bitor_assign(&mut self, rhs: CarFlags) {
        self.0 |= rhs.0;
    }
}
