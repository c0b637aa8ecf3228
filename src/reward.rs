//! Granting a building when a focus session completes.

use crate::constants::{REWARD_PLOT_H, REWARD_PLOT_W};
use crate::storage::{BuildingRepository, StorageError};
use crate::types::{BuildingKind, BuildingRecord};
use rand::Rng;

/// Area of the board new reward buildings are dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPlot {
    /// Columns, starting at column 0
    pub width: i32,
    /// Rows, starting at row 0
    pub height: i32,
}

impl Default for RewardPlot {
    fn default() -> Self {
        Self {
            width: REWARD_PLOT_W,
            height: REWARD_PLOT_H,
        }
    }
}

/// Result of [`grant_reward`].
#[derive(Debug, Clone, PartialEq)]
pub struct RewardOutcome {
    /// The full building list after the grant, including the new record
    pub records: Vec<BuildingRecord>,
    /// The record that was appended
    pub granted: BuildingRecord,
    /// Whether the list was written back successfully
    pub persisted: bool,
}

/// Picks an id for a new record from the current time in milliseconds.
///
/// Falls back to one past the largest existing id when the clock would collide.
pub fn next_record_id(existing: &[BuildingRecord], now_ms: i64) -> i64 {
    match existing.iter().map(|record| record.id).max() {
        Some(max) if now_ms <= max => max.saturating_add(1),
        _ => now_ms,
    }
}

/// Creates a record of `kind` on a uniformly random cell of `plot`.
///
/// Cells may already be occupied; two buildings can share a cell.
pub fn place_reward<R: Rng + ?Sized>(
    kind: BuildingKind,
    plot: RewardPlot,
    id: i64,
    rng: &mut R,
) -> BuildingRecord {
    let x = rng.random_range(0..plot.width.max(1));
    let y = rng.random_range(0..plot.height.max(1));
    BuildingRecord::new(id, kind, x, y)
}

/// Appends one building of `kind` to the stored list.
///
/// Unparseable stored data starts a fresh list. Any other load failure leaves the
/// stored list untouched: nothing is saved and the outcome holds only the new
/// building. A failed save is logged and the returned list still contains the new
/// building.
pub fn grant_reward<R: Rng + ?Sized>(
    repository: &mut dyn BuildingRepository,
    kind: BuildingKind,
    plot: RewardPlot,
    now_ms: i64,
    rng: &mut R,
) -> RewardOutcome {
    let mut records = match repository.load() {
        Ok(records) => records,
        Err(StorageError::Parse(err)) => {
            log::error!("Stored buildings are unreadable, starting a new list: {err}");
            Vec::new()
        }
        Err(err) => {
            log::error!("Failed to load buildings, skipping save: {err}");
            let granted = place_reward(kind, plot, now_ms, rng);
            return RewardOutcome {
                records: vec![granted.clone()],
                granted,
                persisted: false,
            };
        }
    };
    let id = next_record_id(&records, now_ms);
    let granted = place_reward(kind, plot, id, rng);
    records.push(granted.clone());

    let persisted = match repository.save(&records) {
        Ok(()) => {
            log::info!(
                "Granted {} at ({}, {}), city now has {} buildings",
                granted.kind,
                granted.x,
                granted.y,
                records.len()
            );
            true
        }
        Err(err) => {
            log::error!("Failed to save buildings: {err}");
            false
        }
    };

    RewardOutcome {
        records,
        granted,
        persisted,
    }
}

/// Milliseconds since the Unix epoch, used for record ids.
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
