//! Game session - one kingdom, its advisor, and its history
//!
//! Every player or AI action goes through here so that snapshots are taken
//! consistently after the actions that change the kingdom.

use serde::{Deserialize, Serialize};

use crate::ai::{DecisionEngine, DecisionReport};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{ResourceKind, Turn};
use crate::history::{build_report, SnapshotStore};
use crate::kingdom::{
    ArmyState, AuditOutcome, EconomyState, EventKind, EventManager, Kingdom, PopulationState,
    RecruitOutcome, ResourceBundle,
};
use crate::score_log::ScoreLog;

/// Reports produced by one autonomous turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub taxation: DecisionReport,
    pub recruitment: DecisionReport,
    pub conflict: DecisionReport,
}

impl std::fmt::Display for TurnReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=========== AI Turn {} ===========", self.turn)?;
        writeln!(f, "{}\n", self.taxation)?;
        writeln!(f, "{}\n", self.recruitment)?;
        write!(f, "{}", self.conflict)
    }
}

/// Result of a manual tax collection and the bank audit that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCollection {
    pub revenue: u32,
    pub audit: AuditOutcome,
}

pub struct Game {
    pub kingdom: Kingdom,
    pub engine: DecisionEngine,
    pub history: SnapshotStore,
    events: EventManager,
    score_log: Option<ScoreLog>,
}

impl Game {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            kingdom: Kingdom::from_config(config),
            engine: DecisionEngine::new(),
            history: SnapshotStore::new(),
            events: EventManager::new(config.seed),
            score_log: None,
        }
    }

    /// Rebuild a session from saved parts, reseeding events from `seed`
    pub fn from_parts(
        kingdom: Kingdom,
        engine: DecisionEngine,
        history: SnapshotStore,
        seed: u64,
    ) -> Self {
        // Mix in the turn so a reloaded game does not replay the opening events
        let events = EventManager::new(seed ^ history.current_turn() as u64);
        Self {
            kingdom,
            engine,
            history,
            events,
            score_log: None,
        }
    }

    /// Record saves, loads, and resource changes to `log` from now on
    pub fn with_score_log(mut self, log: ScoreLog) -> Self {
        self.score_log = Some(log);
        self
    }

    pub fn take_score_log(&mut self) -> Option<ScoreLog> {
        self.score_log.take()
    }

    pub fn current_turn(&self) -> Turn {
        self.history.current_turn()
    }

    pub fn snapshot(&mut self, label: &str) {
        let k = &self.kingdom;
        self.history
            .take_snapshot(&k.population, &k.economy, &k.army, &k.resources, label);
    }

    /// Score logging never interrupts play; failures are only reported
    fn score(&self, write: impl FnOnce(&ScoreLog) -> Result<()>) {
        if let Some(log) = &self.score_log {
            if let Err(e) = write(log) {
                tracing::warn!("Could not write score log {}: {}", log.path().display(), e);
            }
        }
    }

    pub fn log_event(&self, event_type: &str, description: &str) {
        self.score(|log| log.log_event(event_type, description));
    }

    fn log_change(&self, resource: &str, old_value: u32, new_value: u32, action: &str) {
        if old_value != new_value {
            self.score(|log| log.log_resource_change(resource, old_value, new_value, action));
        }
    }

    fn log_stock_changes(&self, before: &[u32; 4], action: &str) {
        for (kind, old_value) in ResourceKind::ALL.iter().zip(before) {
            let new_value = self.kingdom.resources.get(*kind);
            self.log_change(kind.name(), *old_value, new_value, action);
        }
    }

    fn stock(&self) -> [u32; 4] {
        ResourceKind::ALL.map(|kind| self.kingdom.resources.get(kind))
    }

    pub fn simulate_population(&mut self) -> i64 {
        let delta = self.kingdom.population.simulate(self.events.rng());
        self.snapshot("Population simulation");
        delta
    }

    pub fn recruit(&mut self, count: u32) -> RecruitOutcome {
        let k = &mut self.kingdom;
        let outcome = k.army.recruit_and_train(&mut k.population, count);
        self.snapshot("Army recruitment");
        outcome
    }

    /// Collect taxes at the economy's own rate, then let the bank audit
    pub fn collect_taxes(&mut self) -> TaxCollection {
        let k = &mut self.kingdom;
        let before = k.economy.treasury();
        k.economy.tax_population(&k.population);
        let revenue = k.economy.treasury() - before;
        let audit = k.bank.audit_treasury(&mut k.economy, self.events.rng());

        let after = self.kingdom.economy.treasury();
        self.log_change("Treasury", before, after, "Tax collection");
        if let AuditOutcome::Fraud { lost } = audit {
            self.log_event("FRAUD", &format!("Audit found {} gold missing", lost));
        }
        self.snapshot("Tax collection");
        TaxCollection { revenue, audit }
    }

    pub fn gather(&mut self, bundle: ResourceBundle) {
        let before = self.stock();
        self.kingdom.resources.gather(bundle);
        self.log_stock_changes(&before, "Gathering");
        self.snapshot("Resource gathering");
    }

    pub fn consume(&mut self, bundle: ResourceBundle) -> bool {
        let before = self.stock();
        let consumed = self.kingdom.resources.consume(bundle);
        if consumed {
            self.log_stock_changes(&before, "Consumption");
            self.snapshot("Resource consumption");
        }
        consumed
    }

    /// Spend one kind of resource; returns what is left, or None if short
    pub fn use_resource(&mut self, kind: ResourceKind, amount: u32) -> Option<u32> {
        let before = self.kingdom.resources.get(kind);
        if !self.kingdom.resources.consume_fixed(kind, amount) {
            return None;
        }
        let left = self.kingdom.resources.get(kind);
        self.log_change(kind.name(), before, left, "Consumption");
        self.snapshot("Resource consumption");
        Some(left)
    }

    /// Move food from the stockpile into army rations
    pub fn resupply_army(&mut self, food: u32) -> bool {
        let before = self.kingdom.resources.get(ResourceKind::Food);
        if !self.kingdom.resources.consume_fixed(ResourceKind::Food, food) {
            return false;
        }
        self.kingdom.army.resupply(food);
        let after = self.kingdom.resources.get(ResourceKind::Food);
        self.log_change("Food", before, after, "Army resupply");
        self.snapshot("Army resupply");
        true
    }

    pub fn take_loan(&mut self, amount: u32) -> bool {
        let k = &mut self.kingdom;
        let before = k.economy.treasury();
        if !k.bank.issue_loan(&mut k.economy, amount) {
            return false;
        }
        let after = self.kingdom.economy.treasury();
        self.log_change("Treasury", before, after, "Royal loan");
        self.snapshot("Royal loan");
        true
    }

    /// Returns the gold actually repaid
    pub fn repay_loan(&mut self, amount: u32) -> u32 {
        let k = &mut self.kingdom;
        let before = k.economy.treasury();
        let repaid = k.bank.repay_loan(&mut k.economy, amount);
        if repaid > 0 {
            let after = self.kingdom.economy.treasury();
            self.log_change("Treasury", before, after, "Loan repayment");
            self.snapshot("Loan repayment");
        }
        repaid
    }

    /// Random event; stirs unrest and snapshots with the event's label
    pub fn trigger_event(&mut self) -> (EventKind, String) {
        let (kind, label) = self.events.trigger(&mut self.kingdom);
        self.engine.add_unrest(kind.unrest());
        self.log_event("EVENT", &label);
        self.snapshot(&label);
        (kind, label)
    }

    pub fn apply_leadership(&mut self) -> String {
        let k = &mut self.kingdom;
        k.leader.apply_policy(&mut k.economy, &mut k.army)
    }

    pub fn advance_turn(&mut self) -> Turn {
        self.history.advance_turn()
    }

    /// Let the AI run taxation, recruitment, and conflict, then close the turn
    pub fn run_ai_turn(&mut self) -> TurnReport {
        let turn = self.current_turn();
        let k = &mut self.kingdom;

        let taxation = self.engine.decide_taxation(&mut k.economy, &mut k.population);
        let recruitment = self
            .engine
            .decide_recruitment(&mut k.army, &mut k.population, &k.resources);
        let conflict = self
            .engine
            .decide_conflict_response(&k.population, &mut k.army, &mut k.economy);

        self.snapshot("AI turn actions");
        self.advance_turn();

        tracing::info!(
            "AI turn {} complete: population {}, treasury {}, soldiers {}",
            turn,
            self.kingdom.population.total(),
            self.kingdom.economy.treasury(),
            self.kingdom.army.soldiers()
        );

        TurnReport {
            turn,
            taxation,
            recruitment,
            conflict,
        }
    }

    pub fn history_report(&self) -> String {
        build_report(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kingdom::ResourceState;
    use crate::score_log::ScoreRecord;

    #[test]
    fn test_actions_take_snapshots() {
        let mut game = Game::new(&GameConfig::default());
        game.collect_taxes();
        game.recruit(10);
        game.simulate_population();

        let labels: Vec<_> = game.history.iter().map(|s| s.event_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Tax collection", "Army recruitment", "Population simulation"]
        );
    }

    #[test]
    fn test_ai_turn_snapshots_and_advances() {
        let mut game = Game::new(&GameConfig::default());
        let report = game.run_ai_turn();

        assert_eq!(report.turn, 1);
        assert_eq!(game.current_turn(), 2);
        assert_eq!(game.history.len(), 1);
        assert_eq!(game.history.latest().unwrap().event_label, "AI turn actions");
        assert_eq!(game.engine.decisions().len(), 3);
    }

    #[test]
    fn test_failed_consumption_takes_no_snapshot() {
        let mut game = Game::new(&GameConfig::default());
        let consumed = game.consume(ResourceBundle {
            iron: 10_000,
            ..Default::default()
        });
        assert!(!consumed);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_event_raises_unrest() {
        let mut game = Game::new(&GameConfig::default());
        let (kind, _) = game.trigger_event();
        assert_eq!(game.engine.conflict_level(), 3 + kind.unrest());
        assert_eq!(game.history.len(), 1);
    }

    #[test]
    fn test_tax_collection_is_audited() {
        let mut game = Game::new(&GameConfig::default());
        let mut fraud_seen = 0;
        for _ in 0..30 {
            let before = game.kingdom.economy.treasury();
            let collection = game.collect_taxes();
            let after = game.kingdom.economy.treasury();
            match collection.audit {
                AuditOutcome::Clean => assert_eq!(after, before + collection.revenue),
                AuditOutcome::Fraud { lost } => {
                    assert_eq!(after, before + collection.revenue - lost);
                    fraud_seen += 1;
                }
            }
        }
        assert_eq!(game.kingdom.bank.fraud_detected, fraud_seen);
    }

    #[test]
    fn test_resupply_moves_food_to_army() {
        let mut game = Game::new(&GameConfig::default());
        assert!(game.resupply_army(200));
        assert_eq!(game.kingdom.resources.food(), 300);
        assert_eq!(game.kingdom.army.food_supply, 300);

        assert!(!game.resupply_army(301));
        assert_eq!(game.kingdom.army.food_supply, 300);
        assert_eq!(game.history.len(), 1);
    }

    #[test]
    fn test_use_resource_reports_remainder() {
        let mut game = Game::new(&GameConfig::default());
        assert_eq!(game.use_resource(ResourceKind::Stone, 50), Some(150));
        assert_eq!(game.use_resource(ResourceKind::Stone, 151), None);
    }

    #[test]
    fn test_loans_move_treasury() {
        let mut game = Game::new(&GameConfig::default());
        assert!(game.take_loan(500));
        assert_eq!(game.kingdom.economy.treasury(), 1500);
        assert_eq!(game.repay_loan(200), 200);
        assert_eq!(game.kingdom.bank.outstanding, 300);
        assert_eq!(game.history.len(), 2);
    }

    #[test]
    fn test_resource_changes_reach_score_log() {
        let dir = std::env::temp_dir().join(format!("stronghold-game-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let log = ScoreLog::new(dir.join("score.jsonl"));

        let mut game = Game::new(&GameConfig::default()).with_score_log(log.clone());
        game.gather(ResourceBundle {
            wood: 25,
            ..Default::default()
        });
        game.log_event("GAME_SAVE", "saved");

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            &entries[0].record,
            ScoreRecord::Resource { resource, change: 25, .. } if resource == "Wood"
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
