//! Human-readable account of one AI decision

use serde::{Deserialize, Serialize};

use crate::core::types::DecisionCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub title: String,
    pub code: DecisionCode,
    pub lines: Vec<String>,
}

impl DecisionReport {
    /// True if any line contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl std::fmt::Display for DecisionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "Decision code: {}", self.code)
    }
}

/// Collects report lines while a decision is being worked out
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    lines: Vec<String>,
}

impl ReportBuilder {
    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn finish(self, title: &str, code: DecisionCode) -> DecisionReport {
        DecisionReport {
            title: title.to_string(),
            code,
            lines: self.lines,
        }
    }
}
