//! Snapshot store - the kingdom's running history

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Turn;
use crate::history::log::GrowableLog;
use crate::history::snapshot::Snapshot;
use crate::kingdom::{ArmyState, EconomyState, PopulationState, ResourceState};

/// Append-only snapshot history plus the turn counter it stamps snapshots with
///
/// Snapshots may be taken any number of times per turn; advancing the turn is
/// independent of how many were taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoreState")]
pub struct SnapshotStore {
    snapshots: GrowableLog<Snapshot>,
    current_turn: Turn,
}

#[derive(Deserialize)]
struct StoreState {
    snapshots: GrowableLog<Snapshot>,
    current_turn: Turn,
}

impl TryFrom<StoreState> for SnapshotStore {
    type Error = String;

    fn try_from(state: StoreState) -> std::result::Result<Self, Self::Error> {
        if state.current_turn < 1 {
            return Err(format!("current_turn ({}) must be at least 1", state.current_turn));
        }
        if let Some(late) = state.snapshots.iter().find(|s| s.turn > state.current_turn) {
            return Err(format!(
                "snapshot from turn {} is later than current turn {}",
                late.turn, state.current_turn
            ));
        }
        Ok(Self {
            snapshots: state.snapshots,
            current_turn: state.current_turn,
        })
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: GrowableLog::new(),
            current_turn: 1,
        }
    }

    /// Record the current kingdom state at the current turn
    pub fn take_snapshot<P, E, A, R>(
        &mut self,
        population: &P,
        economy: &E,
        army: &A,
        resources: &R,
        event_label: &str,
    ) where
        P: PopulationState + ?Sized,
        E: EconomyState + ?Sized,
        A: ArmyState + ?Sized,
        R: ResourceState + ?Sized,
    {
        let snapshot = Snapshot::capture(
            self.current_turn,
            population,
            economy,
            army,
            resources,
            event_label,
        );
        self.record(snapshot);
    }

    /// Append an already-built snapshot
    pub fn record(&mut self, snapshot: Snapshot) {
        tracing::info!(
            "Snapshot taken at turn {} ({})",
            snapshot.turn,
            snapshot.event_label
        );
        self.snapshots.append(snapshot);
    }

    pub fn advance_turn(&mut self) -> Turn {
        self.current_turn += 1;
        tracing::info!("Advanced to turn {}", self.current_turn);
        self.current_turn
    }

    pub fn current_turn(&self) -> Turn {
        self.current_turn
    }

    pub fn get(&self, index: usize) -> Result<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &GrowableLog<Snapshot> {
        &self.snapshots
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StrongholdError;
    use crate::kingdom::Kingdom;

    fn snap(store: &mut SnapshotStore, kingdom: &Kingdom, label: &str) {
        store.take_snapshot(
            &kingdom.population,
            &kingdom.economy,
            &kingdom.army,
            &kingdom.resources,
            label,
        );
    }

    #[test]
    fn test_new_store_starts_at_turn_one() {
        let store = SnapshotStore::new();
        assert_eq!(store.current_turn(), 1);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_snapshots_stamped_with_current_turn() {
        let mut store = SnapshotStore::new();
        let kingdom = Kingdom::default();

        snap(&mut store, &kingdom, "a");
        snap(&mut store, &kingdom, "b");
        store.advance_turn();
        snap(&mut store, &kingdom, "c");

        let turns: Vec<_> = store.iter().map(|s| s.turn).collect();
        assert_eq!(turns, vec![1, 1, 2]);
        assert_eq!(store.latest().unwrap().event_label, "c");
    }

    #[test]
    fn test_advance_without_snapshot() {
        let mut store = SnapshotStore::new();
        assert_eq!(store.advance_turn(), 2);
        assert_eq!(store.advance_turn(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_bounds_checked() {
        let mut store = SnapshotStore::new();
        snap(&mut store, &Kingdom::default(), "only");
        assert!(store.get(0).is_ok());
        assert!(matches!(
            store.get(1),
            Err(StrongholdError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_turn_zero_rejected_on_load() {
        let err = serde_json::from_str::<SnapshotStore>(r#"{"snapshots":[],"current_turn":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("current_turn"));
    }

    #[test]
    fn test_snapshot_from_future_turn_rejected_on_load() {
        let mut store = SnapshotStore::new();
        snap(&mut store, &Kingdom::default(), "a");
        store.advance_turn();
        snap(&mut store, &Kingdom::default(), "b");

        let mut value = serde_json::to_value(&store).unwrap();
        value["current_turn"] = serde_json::json!(1);
        assert!(serde_json::from_value::<SnapshotStore>(value).is_err());

        let json = serde_json::to_string(&store).unwrap();
        let back: SnapshotStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_turn(), 2);
        assert_eq!(back.len(), 2);
    }
}
