//! Aggregate statistics, high scores and badge ownership
//!
//! Persisted to LocalStorage as one record. The session engine exposes a
//! read-only [`SessionSummary`] when it reaches the result state;
//! [`Statistics::record_session`] folds that into the record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::badges::{self, BADGES, MASTER_BADGE_IDS};
use crate::sim::{GameMode, SessionSummary};

/// Per-mode best scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    /// Best score per practiced times table
    pub practice: BTreeMap<u8, u64>,
    pub stage: u64,
    pub challenge: u64,
}

/// A problem the player keeps missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakProblem {
    /// Stable problem key ("3x4")
    pub problem: String,
    pub wrong_count: u32,
}

/// The persisted statistics record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_games_played: u32,
    pub total_correct_answers: u32,
    pub total_wrong_answers: u32,
    pub high_scores: HighScores,
    /// Owned badge ids
    pub badges: BTreeSet<String>,
    pub weak_problems: Vec<WeakProblem>,
}

impl Statistics {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "multiplication-rain-stats";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished session into the record: totals, per-mode high
    /// scores, badge unlocks and weak-problem counts. Returns the ids of
    /// badges newly unlocked by this session.
    pub fn record_session(&mut self, summary: &SessionSummary) -> Vec<&'static str> {
        self.total_games_played += 1;
        self.total_correct_answers += summary.correct_count;
        self.total_wrong_answers += summary.wrong_count;

        match summary.mode {
            GameMode::Practice => {
                let best = self.high_scores.practice.entry(summary.stage).or_insert(0);
                *best = (*best).max(summary.score);
            }
            GameMode::Stage => {
                self.high_scores.stage = self.high_scores.stage.max(summary.score);
            }
            GameMode::Challenge => {
                self.high_scores.challenge = self.high_scores.challenge.max(summary.score);
            }
            // Summaries report the played mode, never Menu or Result
            GameMode::Menu | GameMode::Result => {}
        }

        let mut unlocked = Vec::new();
        for badge in BADGES {
            if !self.badges.contains(badge.id) && badges::check_unlock(summary, badge.id) {
                self.badges.insert(badge.id.to_string());
                unlocked.push(badge.id);
                log::info!("badge unlocked: {}", badge.id);
            }
        }
        // all-master is derived from the owned set
        if !self.badges.contains("all-master")
            && MASTER_BADGE_IDS.iter().all(|id| self.badges.contains(*id))
        {
            self.badges.insert("all-master".to_string());
            unlocked.push("all-master");
            log::info!("badge unlocked: all-master");
        }

        for problem in &summary.missed_problems {
            self.note_weak_problem(&problem.key());
        }

        unlocked
    }

    /// Bump the miss count for a problem, keeping the list sorted by
    /// descending miss count
    fn note_weak_problem(&mut self, key: &str) {
        match self.weak_problems.iter_mut().find(|w| w.problem == key) {
            Some(entry) => entry.wrong_count += 1,
            None => self.weak_problems.push(WeakProblem {
                problem: key.to_string(),
                wrong_count: 1,
            }),
        }
        self.weak_problems
            .sort_by(|a, b| b.wrong_count.cmp(&a.wrong_count));
    }

    /// Load statistics from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(stats) = serde_json::from_str::<Statistics>(&json) {
                    log::info!(
                        "Loaded statistics ({} games played)",
                        stats.total_games_played
                    );
                    return stats;
                }
            }
        }

        log::info!("No statistics found, starting fresh");
        Self::new()
    }

    /// Save statistics to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Statistics saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
