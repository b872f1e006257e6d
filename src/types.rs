// src/types.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

// ============================================================================
// VEHICLE IDENTITY
// ============================================================================

/// Platforms the fingerprinting collaborator can report for this make.
///
/// `Mock` is the placeholder the fingerprinter reports before a platform is
/// identified. It has no tuning branch and resolving it is a contract
/// violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VehicleVariant {
    PacificaHybrid2017,
    PacificaHybrid2018,
    PacificaHybrid2019,
    Pacifica2018,
    Pacifica2020,
    DodgeDurango2021,
    JeepGrandCherokee,
    JeepGrandCherokee2019,
    Ram1500,
    RamHd,
    Mock,
}

/// Which truck subgroup a variant belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckDuty {
    Light,
    Heavy,
}

impl VehicleVariant {
    pub const ALL: [VehicleVariant; 11] = [
        VehicleVariant::PacificaHybrid2017,
        VehicleVariant::PacificaHybrid2018,
        VehicleVariant::PacificaHybrid2019,
        VehicleVariant::Pacifica2018,
        VehicleVariant::Pacifica2020,
        VehicleVariant::DodgeDurango2021,
        VehicleVariant::JeepGrandCherokee,
        VehicleVariant::JeepGrandCherokee2019,
        VehicleVariant::Ram1500,
        VehicleVariant::RamHd,
        VehicleVariant::Mock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PacificaHybrid2017 => "CHRYSLER_PACIFICA_2017_HYBRID",
            Self::PacificaHybrid2018 => "CHRYSLER_PACIFICA_2018_HYBRID",
            Self::PacificaHybrid2019 => "CHRYSLER_PACIFICA_2019_HYBRID",
            Self::Pacifica2018 => "CHRYSLER_PACIFICA_2018",
            Self::Pacifica2020 => "CHRYSLER_PACIFICA_2020",
            Self::DodgeDurango2021 => "DODGE_DURANGO",
            Self::JeepGrandCherokee => "JEEP_GRAND_CHEROKEE",
            Self::JeepGrandCherokee2019 => "JEEP_GRAND_CHEROKEE_2019",
            Self::Ram1500 => "RAM_1500_5TH_GEN",
            Self::RamHd => "RAM_HD_5TH_GEN",
            Self::Mock => "MOCK",
        }
    }

    pub fn truck_duty(self) -> Option<TruckDuty> {
        match self {
            Self::Ram1500 => Some(TruckDuty::Light),
            Self::RamHd => Some(TruckDuty::Heavy),
            _ => None,
        }
    }

    pub fn is_truck(self) -> bool {
        self.truck_duty().is_some()
    }

    /// Platforms that shipped with the newer EPS rack from the factory.
    pub fn has_new_eps_platform(self) -> bool {
        matches!(
            self,
            Self::PacificaHybrid2019
                | Self::Pacifica2020
                | Self::JeepGrandCherokee2019
                | Self::DodgeDurango2021
        )
    }
}

impl fmt::Display for VehicleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleVariant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigurationError::UnknownVariantName(s.to_string()))
    }
}

impl TryFrom<String> for VehicleVariant {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VehicleVariant> for String {
    fn from(v: VehicleVariant) -> Self {
        v.name().to_string()
    }
}

// ============================================================================
// FIRMWARE & FINGERPRINT
// ============================================================================

/// Firmware identity reported by one ECU.
///
/// The version is an opaque byte token; see [`crate::params::firmware`] for
/// how it is compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareRecord {
    pub ecu: String,
    #[serde(with = "version_bytes")]
    pub version: Vec<u8>,
}

impl FirmwareRecord {
    pub fn new(ecu: &str, version: impl AsRef<[u8]>) -> Self {
        Self {
            ecu: ecu.to_string(),
            version: version.as_ref().to_vec(),
        }
    }

    pub fn is_eps(&self) -> bool {
        self.ecu == "eps"
    }
}

// Versions are ASCII part numbers, written to YAML as strings rather than
// byte arrays. Anything outside ASCII is rejected both ways so a version
// never changes on the way through.
mod version_bytes {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
        if !v.is_ascii() {
            return Err(<S::Error as ser::Error>::custom(format!(
                "firmware version is not ASCII: {:02x?}",
                v
            )));
        }
        // ASCII is always valid UTF-8
        s.serialize_str(std::str::from_utf8(v).map_err(<S::Error as ser::Error>::custom)?)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        if !s.is_ascii() {
            return Err(<D::Error as de::Error>::custom(format!(
                "firmware version is not ASCII: {:?}",
                s
            )));
        }
        Ok(s.into_bytes())
    }
}

/// Message ids seen per bus during the listening phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub buses: BTreeMap<u8, BTreeSet<u32>>,
}

impl Fingerprint {
    pub fn from_ids(bus: u8, ids: impl IntoIterator<Item = u32>) -> Self {
        let mut buses = BTreeMap::new();
        buses.insert(bus, ids.into_iter().collect());
        Self { buses }
    }

    pub fn contains(&self, bus: u8, id: u32) -> bool {
        self.buses.get(&bus).is_some_and(|ids| ids.contains(&id))
    }
}

// ============================================================================
// PER-CYCLE INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearShifter {
    #[default]
    Unknown,
    Park,
    Drive,
    Neutral,
    Reverse,
    Sport,
    Low,
    Brake,
    Eco,
    Manumatic,
}

/// Decoded car state for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Ego speed, m/s
    pub v_ego: f64,
    pub gear_shifter: GearShifter,
    #[serde(default)]
    pub standstill: bool,
    #[serde(default)]
    pub steering_pressed: bool,
}

impl VehicleSnapshot {
    pub fn new(v_ego: f64, gear_shifter: GearShifter) -> Self {
        Self {
            v_ego,
            gear_shifter,
            ..Default::default()
        }
    }
}
