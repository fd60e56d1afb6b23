//! Badge catalog and unlock checks
//!
//! Badges are granted from a finished session's summary when the
//! statistics record is updated.

use serde::Serialize;

use crate::consts::STAGE_CLEAR_REQUIREMENT;
use crate::sim::{GameMode, SessionSummary};

/// A badge definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// All badges, in display order
pub const BADGES: [Badge; 7] = [
    Badge {
        id: "first-stage",
        name: "Times-table rookie",
        description: "Clear your first stage",
        icon: "🌱",
    },
    Badge {
        id: "stage-2-master",
        name: "2s master",
        description: "30-answer streak in 2s practice",
        icon: "🥉",
    },
    Badge {
        id: "stage-5-master",
        name: "5s master",
        description: "30-answer streak in 5s practice",
        icon: "🥈",
    },
    Badge {
        id: "stage-9-master",
        name: "9s master",
        description: "30-answer streak in 9s practice",
        icon: "🥇",
    },
    Badge {
        id: "all-master",
        name: "Times-table genius",
        description: "Earn every practice master badge",
        icon: "🏆",
    },
    Badge {
        id: "perfectionist",
        name: "Perfectionist",
        description: "Clear a stage without a single miss",
        icon: "💎",
    },
    Badge {
        id: "combo-king",
        name: "Combo king",
        description: "Reach a 50 combo",
        icon: "🔥",
    },
];

/// Practice stages that carry a master badge
pub const MASTER_BADGE_IDS: [&str; 3] = ["stage-2-master", "stage-5-master", "stage-9-master"];

/// Does this finished session unlock the given badge?
///
/// `all-master` is derived from the owned badge set, not from a single
/// session; see `Statistics::record_session`.
pub fn check_unlock(summary: &SessionSummary, badge_id: &str) -> bool {
    match badge_id {
        // Advancing past the first stage means at least one was cleared
        "first-stage" => summary.mode == GameMode::Stage && summary.stage > 2,
        "stage-2-master" => practice_streak(summary, 2),
        "stage-5-master" => practice_streak(summary, 5),
        "stage-9-master" => practice_streak(summary, 9),
        "perfectionist" => {
            summary.wrong_count == 0 && summary.correct_count >= STAGE_CLEAR_REQUIREMENT
        }
        "combo-king" => summary.max_combo >= 50,
        _ => false,
    }
}

fn practice_streak(summary: &SessionSummary, stage: u8) -> bool {
    summary.mode == GameMode::Practice && summary.stage == stage && summary.max_combo >= 30
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn summary(mode: GameMode, stage: u8) -> SessionSummary {
        SessionSummary {
            mode,
            difficulty: Difficulty::Normal,
            stage,
            score: 0,
            correct_count: 0,
            wrong_count: 0,
            max_combo: 0,
            total_spawned: 0,
            start_time: Some(0.0),
            end_time: Some(1.0),
            missed_problems: Vec::new(),
        }
    }

    #[test]
    fn test_first_stage_requires_stage_mode_progress() {
        let mut s = summary(GameMode::Stage, 3);
        assert!(check_unlock(&s, "first-stage"));
        s.stage = 2;
        assert!(!check_unlock(&s, "first-stage"));
        s.mode = GameMode::Practice;
        s.stage = 5;
        assert!(!check_unlock(&s, "first-stage"));
    }

    #[test]
    fn test_practice_master_needs_streak_and_stage() {
        let mut s = summary(GameMode::Practice, 5);
        s.max_combo = 30;
        assert!(check_unlock(&s, "stage-5-master"));
        assert!(!check_unlock(&s, "stage-2-master"));
        s.max_combo = 29;
        assert!(!check_unlock(&s, "stage-5-master"));
    }

    #[test]
    fn test_perfectionist_and_combo_king() {
        let mut s = summary(GameMode::Stage, 4);
        s.correct_count = 10;
        assert!(check_unlock(&s, "perfectionist"));
        s.wrong_count = 1;
        assert!(!check_unlock(&s, "perfectionist"));

        s.max_combo = 50;
        assert!(check_unlock(&s, "combo-king"));
    }

    #[test]
    fn test_unknown_badge_never_unlocks() {
        let s = summary(GameMode::Stage, 9);
        assert!(!check_unlock(&s, "no-such-badge"));
    }
}
