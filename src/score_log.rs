//! Score log - timestamped, append-only record of notable game events
//!
//! One JSON object per line. Entries are only ever appended; the file
//! survives across sessions and save/load cycles.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreRecord {
    Event {
        event_type: String,
        description: String,
    },
    Resource {
        resource: String,
        old_value: u32,
        new_value: u32,
        change: i64,
        action: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: ScoreRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let entry = ScoreEntry {
            timestamp: Utc::now(),
            record,
        };
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    pub fn log_event(&self, event_type: &str, description: &str) -> Result<()> {
        self.append(ScoreRecord::Event {
            event_type: event_type.to_string(),
            description: description.to_string(),
        })
    }

    pub fn log_resource_change(
        &self,
        resource: &str,
        old_value: u32,
        new_value: u32,
        action: &str,
    ) -> Result<()> {
        self.append(ScoreRecord::Resource {
            resource: resource.to_string(),
            old_value,
            new_value,
            change: new_value as i64 - old_value as i64,
            action: action.to_string(),
        })
    }

    /// Every readable entry, oldest first; malformed lines are skipped
    pub fn read_all(&self) -> Vec<ScoreEntry> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }
}
