//! Game configuration with documented starting values
//!
//! Everything that seeds a new kingdom lives here. Decision-engine thresholds
//! are deliberately NOT configurable; they are named constants in
//! [`crate::ai::engine`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StrongholdError};
use crate::kingdom::leader::LeadershipPolicy;

/// Top-level configuration, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the random event generator
    pub seed: u64,
    /// Where `save`/`load` read and write the game state
    pub save_path: PathBuf,
    /// Append-only, timestamped log of saves, loads, and resource changes
    pub score_log_path: PathBuf,
    pub population: PopulationConfig,
    pub economy: EconomyConfig,
    pub army: ArmyConfig,
    pub resources: ResourceConfig,
    pub leader: LeaderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub peasants: u32,
    pub merchants: u32,
    pub nobles: u32,
    /// Food held by the populace itself (separate from the resource stockpile)
    pub food_stock: u32,
    /// 0.0 - 1.0
    pub happiness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub treasury: u32,
    /// Fraction of per-capita income collected when taxing (0.0 - 1.0)
    pub tax_rate: f32,
    /// Fraction of revenue lost to inflation (0.0 - 1.0)
    pub inflation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmyConfig {
    pub soldiers: u32,
    /// 0 - 100
    pub morale: u32,
    /// Army rations; training one recruit costs 2
    pub food_supply: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub iron: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderConfig {
    pub name: String,
    pub policy: LeadershipPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            save_path: PathBuf::from("game_save.json"),
            score_log_path: PathBuf::from("score_log.jsonl"),
            population: PopulationConfig::default(),
            economy: EconomyConfig::default(),
            army: ArmyConfig::default(),
            resources: ResourceConfig::default(),
            leader: LeaderConfig::default(),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            peasants: 700,
            merchants: 200,
            nobles: 100,
            food_stock: 2000,
            happiness: 0.6,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            treasury: 1000,
            tax_rate: 0.15,
            inflation: 0.02,
        }
    }
}

impl Default for ArmyConfig {
    fn default() -> Self {
        Self {
            soldiers: 20,
            morale: 70,
            food_supply: 100,
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            food: 500,
            wood: 300,
            stone: 200,
            iron: 100,
        }
    }
}

impl Default for LeaderConfig {
    fn default() -> Self {
        Self {
            name: "King Aldric".to_string(),
            policy: LeadershipPolicy::Monarchy,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate().map_err(StrongholdError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.army.morale > 100 {
            return Err(format!("army.morale ({}) must be within 0-100", self.army.morale));
        }

        if !(0.0..=1.0).contains(&self.economy.tax_rate) {
            return Err(format!(
                "economy.tax_rate ({}) must be within 0.0-1.0",
                self.economy.tax_rate
            ));
        }

        if !(0.0..=1.0).contains(&self.economy.inflation) {
            return Err(format!(
                "economy.inflation ({}) must be within 0.0-1.0",
                self.economy.inflation
            ));
        }

        if !(0.0..=1.0).contains(&self.population.happiness) {
            return Err(format!(
                "population.happiness ({}) must be within 0.0-1.0",
                self.population.happiness
            ));
        }

        if self.leader.name.trim().is_empty() {
            return Err("leader.name must not be empty".into());
        }

        Ok(())
    }
}
