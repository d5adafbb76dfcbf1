//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::StrongholdError;

/// Game turn counter (starts at 1)
pub type Turn = u32;

/// Outcome code recorded for every AI decision
///
/// Serialized as the bare integer so save files keep the audit trail compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DecisionCode {
    /// Conflict low enough to only watch
    Monitor,
    /// Funds distributed to calm unrest
    EconomicAction,
    /// Army deployed to suppress unrest
    MilitaryAction,
    /// Recruitment target met or exceeded
    RecruitmentMet,
    /// Recruitment fell short of target
    RecruitmentShort,
    /// Tax revenue above 500
    TaxExcellent,
    /// Tax revenue above 200
    TaxSatisfactory,
    /// Tax revenue of 200 or less
    TaxPoor,
}

impl DecisionCode {
    pub fn code(self) -> u8 {
        match self {
            DecisionCode::Monitor => 1,
            DecisionCode::EconomicAction => 2,
            DecisionCode::MilitaryAction => 3,
            DecisionCode::RecruitmentMet => 10,
            DecisionCode::RecruitmentShort => 11,
            DecisionCode::TaxExcellent => 20,
            DecisionCode::TaxSatisfactory => 21,
            DecisionCode::TaxPoor => 22,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DecisionCode::Monitor => "monitoring",
            DecisionCode::EconomicAction => "economic action taken",
            DecisionCode::MilitaryAction => "military action taken",
            DecisionCode::RecruitmentMet => "recruitment goals met",
            DecisionCode::RecruitmentShort => "recruitment goals missed",
            DecisionCode::TaxExcellent => "tax collection excellent",
            DecisionCode::TaxSatisfactory => "tax collection satisfactory",
            DecisionCode::TaxPoor => "tax collection poor",
        }
    }
}

impl From<DecisionCode> for u8 {
    fn from(code: DecisionCode) -> Self {
        code.code()
    }
}

impl TryFrom<u8> for DecisionCode {
    type Error = StrongholdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DecisionCode::Monitor),
            2 => Ok(DecisionCode::EconomicAction),
            3 => Ok(DecisionCode::MilitaryAction),
            10 => Ok(DecisionCode::RecruitmentMet),
            11 => Ok(DecisionCode::RecruitmentShort),
            20 => Ok(DecisionCode::TaxExcellent),
            21 => Ok(DecisionCode::TaxSatisfactory),
            22 => Ok(DecisionCode::TaxPoor),
            other => Err(StrongholdError::UnknownDecisionCode(other)),
        }
    }
}

impl std::fmt::Display for DecisionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// Military unit types tracked by the decision engine's strength table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Infantry,
    Cavalry,
    Archers,
    Siege,
    Special,
}

impl UnitType {
    pub const ALL: [UnitType; 5] = [
        UnitType::Infantry,
        UnitType::Cavalry,
        UnitType::Archers,
        UnitType::Siege,
        UnitType::Special,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Stockpiled resources held by the kingdom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Food,
    Wood,
    Stone,
    Iron,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Food,
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Iron,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Food => "Food",
            ResourceKind::Wood => "Wood",
            ResourceKind::Stone => "Stone",
            ResourceKind::Iron => "Iron",
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = StrongholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "food" => Ok(ResourceKind::Food),
            "wood" => Ok(ResourceKind::Wood),
            "stone" => Ok(ResourceKind::Stone),
            "iron" => Ok(ResourceKind::Iron),
            _ => Err(StrongholdError::Config(format!("unknown resource '{}'", s))),
        }
    }
}
