//! Kingdom history report
//!
//! Renders every snapshot as a table row, then a first-vs-last change summary.
//! Rendering only reads the store.

use std::borrow::Cow;
use std::fmt;

use crate::history::snapshot::Snapshot;
use crate::history::store::SnapshotStore;

/// The whole report when no snapshot has been taken
pub const NO_DATA_MESSAGE: &str = "No historical data available.";

/// Labels longer than this are shortened for display
pub const MAX_LABEL_WIDTH: usize = 30;
const TRUNCATED_LABEL_CHARS: usize = 27;
const ELLIPSIS: &str = "...";

const RULE: &str = "===============================================";

/// Shorten an event label for the table; the stored label is untouched
pub fn display_label(label: &str) -> Cow<'_, str> {
    if label.chars().count() > MAX_LABEL_WIDTH {
        let head: String = label.chars().take(TRUNCATED_LABEL_CHARS).collect();
        Cow::Owned(head + ELLIPSIS)
    } else {
        Cow::Borrowed(label)
    }
}

/// `first -> last (signed delta)`
pub fn format_change(first: u32, last: u32) -> String {
    let delta = last as i64 - first as i64;
    format!("{} -> {} ({:+})", first, last, delta)
}

/// Read-only view of a store that renders the trend report
pub struct HistoryReporter<'a> {
    store: &'a SnapshotStore,
}

impl<'a> HistoryReporter<'a> {
    pub fn new(store: &'a SnapshotStore) -> Self {
        Self { store }
    }

    pub fn build_report(&self) -> String {
        self.to_string()
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Turn | Population | Treasury | Soldiers | Morale | Food | Wood | Stone | Iron | Event"
        )?;
        writeln!(
            f,
            "-----|------------|----------|----------|--------|------|------|-------|------|-------"
        )?;
        for snap in self.store.iter() {
            write_row(f, snap)?;
        }
        Ok(())
    }

    fn write_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
        first: &Snapshot,
        last: &Snapshot,
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "              CHANGE SUMMARY")?;
        writeln!(f, "{}", RULE)?;
        for ((name, before), (_, after)) in first.metrics().iter().zip(last.metrics().iter()) {
            writeln!(f, "{}: {}", name, format_change(*before, *after))?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, snap: &Snapshot) -> fmt::Result {
    writeln!(
        f,
        "{:>4} | {:>10} | {:>8} | {:>8} | {:>6} | {:>4} | {:>4} | {:>5} | {:>4} | {}",
        snap.turn,
        snap.population,
        snap.treasury,
        snap.soldiers,
        snap.morale,
        snap.food,
        snap.wood,
        snap.stone,
        snap.iron,
        display_label(&snap.event_label)
    )
}

impl fmt::Display for HistoryReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = match (self.store.first(), self.store.latest()) {
            (Some(first), Some(last)) => (first, last),
            _ => return write!(f, "{}", NO_DATA_MESSAGE),
        };

        writeln!(f, "{}", RULE)?;
        writeln!(f, "           KINGDOM HISTORY REPORT")?;
        writeln!(f, "{}", RULE)?;
        self.write_table(f)?;
        self.write_summary(f, first, last)?;
        writeln!(f)?;
        writeln!(f, "End of Kingdom History Report")?;
        write!(f, "{}", RULE)
    }
}

/// Render the full history report for `store`
pub fn build_report(store: &SnapshotStore) -> String {
    HistoryReporter::new(store).build_report()
}
