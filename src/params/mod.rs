// src/params/mod.rs

pub mod firmware;
pub mod flags;
pub mod platform;
pub mod resolver;
pub mod tuning;

pub use flags::{CarFlags, SafetyModel, SafetyParam};
pub use resolver::{resolve, ParameterSet, SafetyConfig, TuningBranch};
pub use tuning::{LateralTuning, PidTuning, TorqueTuning};
