//! Save games - JSON persistence of a whole session

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::DecisionEngine;
use crate::core::error::{Result, StrongholdError};
use crate::game::Game;
use crate::history::SnapshotStore;
use crate::kingdom::Kingdom;

pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Everything needed to resume a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub kingdom: Kingdom,
    pub engine: DecisionEngine,
    pub history: SnapshotStore,
}

impl SaveGame {
    pub fn capture(game: &Game) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            kingdom: game.kingdom.clone(),
            engine: game.engine.clone(),
            history: game.history.clone(),
        }
    }

    pub fn into_game(self, seed: u64) -> Game {
        Game::from_parts(self.kingdom, self.engine, self.history, seed)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a save; engine and history bounds are checked while decoding,
    /// kingdom ranges and the format version right after
    pub fn from_json(json: &str) -> Result<Self> {
        let save: Self = serde_json::from_str(json)?;
        save.validate().map_err(StrongholdError::Config)?;
        Ok(save)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.version > SAVE_FORMAT_VERSION {
            return Err(format!(
                "save format version {} is newer than supported version {}",
                self.version, SAVE_FORMAT_VERSION
            ));
        }
        self.kingdom.validate()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("Game saved to {}", path.display());
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let save = Self::from_json(&fs::read_to_string(path)?)?;
        tracing::info!("Game loaded from {}", path.display());
        Ok(save)
    }
}
