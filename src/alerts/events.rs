// src/alerts/events.rs
//
// Per-cycle event list. Producers append; the control pipeline reads the
// list in insertion order.

use serde::{Deserialize, Serialize};

use crate::types::{GearShifter, VehicleSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    WrongGear,
    ReverseGear,
    BelowSteerSpeed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Events {
    names: Vec<EventName>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: EventName) {
        self.names.push(name);
    }

    pub fn contains(&self, name: EventName) -> bool {
        self.names.contains(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[EventName] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<EventName> {
        self.names
    }
}

impl From<Vec<EventName>> for Events {
    fn from(names: Vec<EventName>) -> Self {
        Self { names }
    }
}

/// Driving-state events shared by every make. Normally supplied by the
/// host's event collaborator; `extra_gears` lists gears this make treats
/// as valid for driving besides `Drive`.
pub trait CommonEvents {
    fn create_common_events(&self, snapshot: &VehicleSnapshot, extra_gears: &[GearShifter]) -> Events;
}

/// Gear checks only. Used when no richer collaborator is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct GearEvents;

impl CommonEvents for GearEvents {
    fn create_common_events(&self, snapshot: &VehicleSnapshot, extra_gears: &[GearShifter]) -> Events {
        let mut events = Events::new();
        let gear = snapshot.gear_shifter;
        if gear != GearShifter::Drive && !extra_gears.contains(&gear) {
            events.add(EventName::WrongGear);
        }
        if gear == GearShifter::Reverse {
            events.add(EventName::ReverseGear);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_events() {
        let drive = VehicleSnapshot::new(10.0, GearShifter::Drive);
        assert!(GearEvents.create_common_events(&drive, &[]).is_empty());

        let low = VehicleSnapshot::new(10.0, GearShifter::Low);
        assert!(GearEvents
            .create_common_events(&low, &[GearShifter::Low])
            .is_empty());
        assert!(GearEvents
            .create_common_events(&low, &[])
            .contains(EventName::WrongGear));

        let reverse = VehicleSnapshot::new(1.0, GearShifter::Reverse);
        let events = GearEvents.create_common_events(&reverse, &[GearShifter::Low]);
        assert_eq!(events.names(), &[EventName::WrongGear, EventName::ReverseGear]);
    }

    #[test]
    fn test_events_keep_order() {
        let mut events = Events::from(vec![EventName::ReverseGear]);
        events.add(EventName::BelowSteerSpeed);
        assert_eq!(
            events.into_vec(),
            vec![EventName::ReverseGear, EventName::BelowSteerSpeed]
        );
    }
}
