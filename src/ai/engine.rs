//! Decision engine - the autonomous ruler's advisor
//!
//! Each `decide_*` call reads the kingdom, acts on it once, records a decision
//! code, and nudges the engine's adaptive parameters based on how the action
//! turned out. Calling a decision twice compounds its effects; every call is a
//! new turn's worth of policy.
//!
//! Parameter bounds:
//! - risk tolerance stays within [0.0, 1.0]
//! - conflict level stays within [0, 10]
//! - unit strength multipliers stay within [0.5, 2.0]
//! - resource priorities stay within [0, 100] and are renormalized toward a
//!   sum of 100 with integer truncation (the sum may land slightly under 100)

use serde::{Deserialize, Serialize};

use crate::ai::report::{DecisionReport, ReportBuilder};
use crate::core::error::{Result, StrongholdError};
use crate::core::types::{DecisionCode, UnitType};
use crate::history::log::GrowableLog;
use crate::kingdom::{ArmyState, EconomyState, PopulationState, RecruitOutcome, ResourceState};

/// Ordered trail of every decision the engine has made
pub type DecisionLog = GrowableLog<DecisionCode>;

pub const UNIT_TYPE_COUNT: usize = UnitType::ALL.len();
pub const RESOURCE_TYPE_COUNT: usize = 4;
/// Display names for the resource priority slots; slot 0 is the war chest
pub const PRIORITY_LABELS: [&str; RESOURCE_TYPE_COUNT] = ["Gold", "Food", "Wood", "Stone"];

// === TAXATION ===
const BASE_TAX_RATE: f32 = 0.10;
const LARGE_POPULATION: u32 = 1000;
const LARGE_POPULATION_TAX_ADJUSTMENT: f32 = 0.02;
const SMALL_POPULATION_TAX_ADJUSTMENT: f32 = 0.05;
const RISK_TAX_WEIGHT: f32 = 0.10;
/// Peasants, merchants, nobles
const SEGMENT_MULTIPLIERS: [(&str, f32); 3] =
    [("Peasants", 0.8), ("Merchants", 1.0), ("Nobles", 1.2)];
const EXCELLENT_REVENUE: i64 = 500;
const SATISFACTORY_REVENUE: i64 = 200;
const RISK_STEP: f32 = 0.1;

// === RECRUITMENT ===
const RECRUITMENT_FRACTION: f64 = 0.05;
const SMALL_ARMY: u32 = 100;
const SMALL_ARMY_FACTOR: f64 = 1.5;
const STRENGTH_REWARD: f32 = 0.10;
const STRENGTH_PENALTY: f32 = 0.05;
const WARTIME_MILITARY_BOOST: u32 = 10;
const WARTIME_CIVIL_CUT: u32 = 3;

// === CONFLICT ===
pub const MAX_CONFLICT_LEVEL: u32 = 10;
const POOR_TREASURY: u32 = 500;
const POOR_TREASURY_PRESSURE: u32 = 2;
const LARGE_POPULATION_PRESSURE: u32 = 1;
const MILITARY_RESPONSE_ABOVE: u32 = 7;
const ECONOMIC_RESPONSE_ABOVE: u32 = 4;
const MILITARY_MORALE_COST: u32 = 2;
const MILITARY_CONFLICT_RELIEF: u32 = 3;
const ECONOMIC_CONFLICT_RELIEF: u32 = 2;
const MONITOR_CONFLICT_RELIEF: u32 = 1;
const APPEASEMENT_BASE: u32 = 100;
const APPEASEMENT_PER_SEVERITY: u32 = 20;

pub const MIN_UNIT_STRENGTH: f32 = 0.5;
pub const MAX_UNIT_STRENGTH: f32 = 2.0;
pub const MAX_PRIORITY: i32 = 100;

const INITIAL_RISK_TOLERANCE: f32 = 0.5;
const INITIAL_CONFLICT_LEVEL: u32 = 3;
const INITIAL_PRIORITY: u32 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineState")]
pub struct DecisionEngine {
    risk_tolerance: f32,
    last_tax_collection: i64,
    last_army_size: u32,
    conflict_level: u32,
    unit_strengths: [f32; UNIT_TYPE_COUNT],
    resource_priorities: [u32; RESOURCE_TYPE_COUNT],
    decisions: DecisionLog,
}

/// Engine fields as read from a save, before bounds are checked
#[derive(Deserialize)]
struct EngineState {
    risk_tolerance: f32,
    last_tax_collection: i64,
    last_army_size: u32,
    conflict_level: u32,
    unit_strengths: [f32; UNIT_TYPE_COUNT],
    resource_priorities: [u32; RESOURCE_TYPE_COUNT],
    decisions: DecisionLog,
}

impl TryFrom<EngineState> for DecisionEngine {
    type Error = String;

    fn try_from(state: EngineState) -> std::result::Result<Self, Self::Error> {
        let engine = Self {
            risk_tolerance: state.risk_tolerance,
            last_tax_collection: state.last_tax_collection,
            last_army_size: state.last_army_size,
            conflict_level: state.conflict_level,
            unit_strengths: state.unit_strengths,
            resource_priorities: state.resource_priorities,
            decisions: state.decisions,
        };
        engine.validate()?;
        Ok(engine)
    }
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self {
            risk_tolerance: INITIAL_RISK_TOLERANCE,
            last_tax_collection: 0,
            last_army_size: 0,
            conflict_level: INITIAL_CONFLICT_LEVEL,
            unit_strengths: [1.0; UNIT_TYPE_COUNT],
            resource_priorities: [INITIAL_PRIORITY; RESOURCE_TYPE_COUNT],
            decisions: DecisionLog::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn risk_tolerance(&self) -> f32 {
        self.risk_tolerance
    }

    /// Treasury change measured by the last tax decision
    pub fn last_tax_collection(&self) -> i64 {
        self.last_tax_collection
    }

    /// Army size observed before the last recruitment decision
    pub fn last_army_size(&self) -> u32 {
        self.last_army_size
    }

    pub fn conflict_level(&self) -> u32 {
        self.conflict_level
    }

    pub fn unit_strengths(&self) -> &[f32; UNIT_TYPE_COUNT] {
        &self.unit_strengths
    }

    pub fn unit_strength(&self, unit: UnitType) -> f32 {
        self.unit_strengths[unit.index()]
    }

    pub fn resource_priorities(&self) -> &[u32; RESOURCE_TYPE_COUNT] {
        &self.resource_priorities
    }

    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }

    /// Check every adaptive parameter against its bounds
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.risk_tolerance) {
            return Err(format!(
                "risk_tolerance ({}) must be within 0.0-1.0",
                self.risk_tolerance
            ));
        }

        if self.conflict_level > MAX_CONFLICT_LEVEL {
            return Err(format!(
                "conflict_level ({}) must be within 0-{}",
                self.conflict_level, MAX_CONFLICT_LEVEL
            ));
        }

        for (unit, strength) in UnitType::ALL.iter().zip(self.unit_strengths.iter()) {
            if !(MIN_UNIT_STRENGTH..=MAX_UNIT_STRENGTH).contains(strength) {
                return Err(format!(
                    "{:?} strength ({}) must be within {}-{}",
                    unit, strength, MIN_UNIT_STRENGTH, MAX_UNIT_STRENGTH
                ));
            }
        }

        for (label, weight) in PRIORITY_LABELS.iter().zip(self.resource_priorities.iter()) {
            if *weight > MAX_PRIORITY as u32 {
                return Err(format!(
                    "{} priority ({}) must be within 0-{}",
                    label, weight, MAX_PRIORITY
                ));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Parameter tables
    // ------------------------------------------------------------------

    /// Set one unit type's strength multiplier, clamped to [0.5, 2.0]
    pub fn update_unit_strength(&mut self, unit_type: usize, strength: f32) -> Result<()> {
        if unit_type >= UNIT_TYPE_COUNT {
            return Err(StrongholdError::UnknownUnitType(unit_type));
        }
        if strength.is_nan() {
            return Err(StrongholdError::InvalidStrength(strength));
        }
        self.unit_strengths[unit_type] = strength.clamp(MIN_UNIT_STRENGTH, MAX_UNIT_STRENGTH);
        Ok(())
    }

    /// Set one resource priority (clamped to [0, 100]) and renormalize the table.
    ///
    /// Renormalization scales every weight by `100 / sum` with integer
    /// truncation, so the resulting sum can fall short of 100 by up to
    /// `RESOURCE_TYPE_COUNT - 1`. An all-zero table is left as is.
    pub fn set_resource_priority(&mut self, resource_type: usize, priority: i32) -> Result<()> {
        if resource_type >= RESOURCE_TYPE_COUNT {
            return Err(StrongholdError::UnknownResourceType(resource_type));
        }

        self.resource_priorities[resource_type] = priority.clamp(0, MAX_PRIORITY) as u32;

        let total: u32 = self.resource_priorities.iter().sum();
        if total != MAX_PRIORITY as u32 && total > 0 {
            for weight in self.resource_priorities.iter_mut() {
                *weight = *weight * MAX_PRIORITY as u32 / total;
            }
            tracing::debug!(
                "Resource priorities renormalized from sum {} to {:?}",
                total,
                self.resource_priorities
            );
        }
        Ok(())
    }

    /// Push conflict level up (events, unrest), clamped to 10
    pub fn add_unrest(&mut self, amount: u32) {
        self.conflict_level = (self.conflict_level + amount).min(MAX_CONFLICT_LEVEL);
    }

    fn relieve_conflict(&mut self, amount: u32) {
        self.conflict_level = self
            .conflict_level
            .saturating_sub(amount)
            .min(MAX_CONFLICT_LEVEL);
    }

    fn adjust_risk(&mut self, delta: f32) {
        self.risk_tolerance = (self.risk_tolerance + delta).clamp(0.0, 1.0);
    }

    fn adjust_strength(&mut self, unit: usize, delta: f32) {
        let strength = self.unit_strengths[unit] + delta;
        self.unit_strengths[unit] = strength.clamp(MIN_UNIT_STRENGTH, MAX_UNIT_STRENGTH);
    }

    fn record(&mut self, code: DecisionCode) {
        self.decisions.append(code);
        tracing::info!("AI decision recorded: {}", code);
    }

    // ------------------------------------------------------------------
    // Heuristics
    // ------------------------------------------------------------------

    /// Tax rate the engine advises for a population of this size
    pub fn advised_tax_rate(&self, population: u32) -> f32 {
        let population_adjustment = if population > LARGE_POPULATION {
            LARGE_POPULATION_TAX_ADJUSTMENT
        } else {
            SMALL_POPULATION_TAX_ADJUSTMENT
        };
        BASE_TAX_RATE + population_adjustment + self.risk_tolerance * RISK_TAX_WEIGHT
    }

    /// Recruits the engine wants: `floor(pop * 0.05 * army_factor * (1 + risk))`
    pub fn recruitment_target(&self, population: u32, soldiers: u32) -> u32 {
        let army_size_factor = if soldiers < SMALL_ARMY {
            SMALL_ARMY_FACTOR
        } else {
            1.0
        };
        let risk_factor = 1.0 + self.risk_tolerance as f64;
        (population as f64 * RECRUITMENT_FRACTION * army_size_factor * risk_factor).floor() as u32
    }

    /// Unrest severity on the 0-10 scale
    pub fn conflict_severity(&self, population: u32, treasury: u32) -> u32 {
        let treasury_pressure = if treasury < POOR_TREASURY {
            POOR_TREASURY_PRESSURE
        } else {
            0
        };
        let population_pressure = if population > LARGE_POPULATION {
            LARGE_POPULATION_PRESSURE
        } else {
            0
        };
        (self.conflict_level + treasury_pressure + population_pressure).min(MAX_CONFLICT_LEVEL)
    }

    // ------------------------------------------------------------------
    // Decisions
    // ------------------------------------------------------------------

    /// Collect taxes once and grade the revenue
    pub fn decide_taxation<E, P>(&mut self, economy: &mut E, population: &mut P) -> DecisionReport
    where
        E: EconomyState,
        P: PopulationState,
    {
        let mut report = ReportBuilder::default();
        report.line("Analyzing kingdom economic state...");

        let tax_rate = self.advised_tax_rate(population.total());
        let treasury_before = economy.treasury();

        // Segment rates are shown for context only; collection uses the economy's own rate
        report.line("Tax rate analysis by population segment:");
        for (segment, multiplier) in SEGMENT_MULTIPLIERS {
            report.line(format!("  {}: {}%", segment, percent(tax_rate * multiplier)));
        }
        report.line(format!("AI Decision: Setting tax rate to {}%", percent(tax_rate)));
        report.line("Reasoning: Based on population size and economic indicators");

        report.line("Resource allocation priorities:");
        for (label, weight) in PRIORITY_LABELS.iter().zip(self.resource_priorities.iter()) {
            report.line(format!("  {}: {}% priority", label, weight));
        }

        economy.tax_population(&*population);
        self.last_tax_collection = economy.treasury() as i64 - treasury_before as i64;
        report.line(format!(
            "Tax collection complete. Treasury increased by {} gold.",
            self.last_tax_collection
        ));

        let code = if self.last_tax_collection > EXCELLENT_REVENUE {
            report.line("Result: Excellent tax revenue generated!");
            DecisionCode::TaxExcellent
        } else if self.last_tax_collection > SATISFACTORY_REVENUE {
            report.line("Result: Satisfactory tax revenue.");
            DecisionCode::TaxSatisfactory
        } else {
            report.line("Result: Poor tax revenue. Will adjust strategy next time.");
            self.adjust_risk(RISK_STEP);
            DecisionCode::TaxPoor
        };

        self.record(code);
        report.finish("AI TAX DECISION", code)
    }

    /// Draft soldiers once and grade the turnout against the target
    pub fn decide_recruitment<A, P, R>(
        &mut self,
        army: &mut A,
        population: &mut P,
        _resources: &R,
    ) -> DecisionReport
    where
        A: ArmyState,
        P: PopulationState,
        R: ResourceState,
    {
        let mut report = ReportBuilder::default();
        report.line("Analyzing military needs and resources...");

        let before = army.soldiers();
        self.last_army_size = before;
        let target = self.recruitment_target(population.total(), before);

        report.line("Unit strength analysis:");
        for (unit, strength) in UnitType::ALL.iter().zip(self.unit_strengths.iter()) {
            report.line(format!("  {:?}: strength factor {:.2}", unit, strength));
        }

        report.line("Wartime allocation preview:");
        for (slot, label) in PRIORITY_LABELS.iter().enumerate() {
            let weight = self.resource_priorities[slot];
            let wartime = if slot == 0 {
                weight + WARTIME_MILITARY_BOOST
            } else {
                weight.saturating_sub(WARTIME_CIVIL_CUT)
            };
            report.line(format!("  {}: {}% -> {}%", label, weight, wartime));
        }

        report.line(format!("AI Decision: Recruiting {} new soldiers", target));
        report.line("Reasoning: Based on current threats and available population");

        match army.recruit_and_train(population, target) {
            RecruitOutcome::Recruited { food_used, .. } => {
                report.line(format!("Rations used: {}", food_used));
            }
            RecruitOutcome::InvalidRequest => {
                report.line("Recruitment order could not be filled from the population.");
            }
            RecruitOutcome::InsufficientFood { required, available } => {
                report.line(format!(
                    "Not enough rations: {} needed, {} available. Morale suffers.",
                    required, available
                ));
            }
        }

        let actual = army.soldiers().saturating_sub(before);
        report.line(format!(
            "Recruitment complete. Army increased by {} soldiers.",
            actual
        ));

        let infantry = UnitType::Infantry.index();
        let code = if actual >= target {
            report.line("Result: Recruitment goals met or exceeded.");
            self.adjust_strength(infantry, STRENGTH_REWARD);
            DecisionCode::RecruitmentMet
        } else if actual >= target / 2 {
            report.line("Result: Partial recruitment success.");
            DecisionCode::RecruitmentShort
        } else {
            report.line("Result: Failed to meet recruitment goals. Will adjust strategy.");
            tracing::warn!("Recruitment fell short: {} of {} soldiers", actual, target);
            self.adjust_risk(-RISK_STEP);
            self.adjust_strength(infantry, -STRENGTH_PENALTY);
            DecisionCode::RecruitmentShort
        };

        self.record(code);
        report.finish("AI ARMY DECISION", code)
    }

    /// Respond to internal unrest with force, money, or patience
    pub fn decide_conflict_response<P, A, E>(
        &mut self,
        population: &P,
        army: &mut A,
        economy: &mut E,
    ) -> DecisionReport
    where
        P: PopulationState,
        A: ArmyState,
        E: EconomyState,
    {
        let mut report = ReportBuilder::default();
        report.line("Assessing internal kingdom stability...");

        let severity = self.conflict_severity(population.total(), economy.treasury());
        report.line(format!("Detected conflict level: {}/{}", severity, MAX_CONFLICT_LEVEL));

        let code = if severity > MILITARY_RESPONSE_ABOVE {
            report.line("AI Decision: Deploying military to suppress unrest");
            report.line("Reasoning: High conflict level requires immediate action");
            army.lower_morale(MILITARY_MORALE_COST);
            self.relieve_conflict(MILITARY_CONFLICT_RELIEF);
            report.line("Military action taken. Conflict reduced but at cost to army morale.");
            DecisionCode::MilitaryAction
        } else if severity > ECONOMIC_RESPONSE_ABOVE {
            report.line("AI Decision: Distributing funds to appease population");
            report.line("Reasoning: Moderate conflict can be resolved with economic incentives");
            let cost = APPEASEMENT_BASE + severity * APPEASEMENT_PER_SEVERITY;
            if economy.spend(cost) {
                report.line(format!("Spent {} gold on public works and relief.", cost));
            } else {
                report.line(format!(
                    "Treasury could not cover {} gold; relief promised on credit.",
                    cost
                ));
            }
            self.relieve_conflict(ECONOMIC_CONFLICT_RELIEF);
            report.line("Conflict reduced through economic means.");
            DecisionCode::EconomicAction
        } else {
            report.line("AI Decision: Monitoring situation, no action needed");
            report.line("Reasoning: Conflict level is manageable");
            self.relieve_conflict(MONITOR_CONFLICT_RELIEF);
            report.line("Situation stable. Continuing to monitor.");
            DecisionCode::Monitor
        };

        self.record(code);
        report.line(format!(
            "Current conflict level after actions: {}/{}",
            self.conflict_level, MAX_CONFLICT_LEVEL
        ));
        report.finish("AI CONFLICT MANAGEMENT", code)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-number percentage, truncated
fn percent(rate: f32) -> i32 {
    (rate * 100.0) as i32
}
