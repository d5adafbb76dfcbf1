//! A single recorded moment of kingdom state

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;
use crate::kingdom::{ArmyState, EconomyState, PopulationState, ResourceState};

/// Kingdom state captured at one point in time
///
/// Once stored in a [`crate::history::SnapshotStore`] a snapshot is only ever
/// handed out by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: Turn,
    pub population: u32,
    pub treasury: u32,
    pub soldiers: u32,
    pub morale: u32,
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub iron: u32,
    pub event_label: String,
}

impl Snapshot {
    /// Read the current state of every entity
    pub fn capture<P, E, A, R>(
        turn: Turn,
        population: &P,
        economy: &E,
        army: &A,
        resources: &R,
        event_label: impl Into<String>,
    ) -> Self
    where
        P: PopulationState + ?Sized,
        E: EconomyState + ?Sized,
        A: ArmyState + ?Sized,
        R: ResourceState + ?Sized,
    {
        Self {
            turn,
            population: population.total(),
            treasury: economy.treasury(),
            soldiers: army.soldiers(),
            morale: army.morale(),
            food: resources.food(),
            wood: resources.wood(),
            stone: resources.stone(),
            iron: resources.iron(),
            event_label: event_label.into(),
        }
    }

    /// Numeric fields in report order, paired with their display names
    pub fn metrics(&self) -> [(&'static str, u32); 8] {
        [
            ("Population", self.population),
            ("Treasury", self.treasury),
            ("Soldiers", self.soldiers),
            ("Morale", self.morale),
            ("Food", self.food),
            ("Wood", self.wood),
            ("Stone", self.stone),
            ("Iron", self.iron),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kingdom::Kingdom;

    #[test]
    fn test_capture_reads_all_entities() {
        let k = Kingdom::default();
        let snap =
            Snapshot::capture(3, &k.population, &k.economy, &k.army, &k.resources, "Harvest");

        assert_eq!(snap.turn, 3);
        assert_eq!(snap.population, 1000);
        assert_eq!(snap.treasury, 1000);
        assert_eq!(snap.soldiers, 20);
        assert_eq!(snap.morale, 70);
        assert_eq!(snap.food, 500);
        assert_eq!(snap.wood, 300);
        assert_eq!(snap.stone, 200);
        assert_eq!(snap.iron, 100);
        assert_eq!(snap.event_label, "Harvest");
    }

    #[test]
    fn test_metrics_order() {
        let k = Kingdom::default();
        let snap = Snapshot::capture(1, &k.population, &k.economy, &k.army, &k.resources, "");
        let names: Vec<_> = snap.metrics().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["Population", "Treasury", "Soldiers", "Morale", "Food", "Wood", "Stone", "Iron"]
        );
    }
}
