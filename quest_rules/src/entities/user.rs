//! The per-device user progress record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::AchievementRecord;
use crate::mechanics::{level_for_total_xp, xp_within_level, XP_PER_LEVEL};

/// Identity given to the single local profile.
pub const DEFAULT_IDENTITY: &str = "1";
/// Display name of a fresh profile.
pub const DEFAULT_DISPLAY_NAME: &str = "Code Apprentice";
/// Avatar of a fresh profile.
pub const DEFAULT_AVATAR: &str = "🧙‍♂️";

/// Everything the app remembers about the learner.
///
/// Field names on the wire follow the browser record (`totalXp`, `completedLessons`, ...),
/// so profiles saved by earlier builds decode unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(rename = "id")]
    pub identity: String,
    #[serde(rename = "name")]
    pub display_name: String,

    // Derived from total_xp; stored for readers of the raw record.
    pub level: u64,
    pub xp: u64,
    #[serde(rename = "totalXp")]
    pub total_xp: u64,

    #[serde(rename = "avatar")]
    pub avatar_glyph: String,

    /// Unlock order, unique by id.
    #[serde(rename = "achievements")]
    pub unlocked_achievements: Vec<AchievementRecord>,
    #[serde(rename = "completedKingdoms")]
    pub completed_kingdom_ids: BTreeSet<String>,
    #[serde(rename = "completedLessons")]
    pub completed_lesson_ids: BTreeSet<String>,
    #[serde(rename = "completedChallenges")]
    pub completed_challenge_ids: BTreeSet<String>,

    #[serde(rename = "currentStreak")]
    pub current_streak_days: u32,
    #[serde(rename = "bestStreak")]
    pub best_streak_days: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            identity: DEFAULT_IDENTITY.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            level: 1,
            xp: 0,
            total_xp: 0,
            avatar_glyph: DEFAULT_AVATAR.to_string(),
            unlocked_achievements: Vec::new(),
            completed_kingdom_ids: BTreeSet::new(),
            completed_lesson_ids: BTreeSet::new(),
            completed_challenge_ids: BTreeSet::new(),
            current_streak_days: 0,
            best_streak_days: 0,
        }
    }
}

impl UserProgress {
    /// Add experience and recompute level and in-level xp. Saturates at `u64::MAX`.
    pub fn add_experience(&mut self, amount: u64) {
        self.total_xp = self.total_xp.saturating_add(amount);
        self.level = level_for_total_xp(self.total_xp);
        self.xp = xp_within_level(self.total_xp);
    }

    /// Experience still needed to reach the next level.
    pub fn xp_to_next_level(&self) -> u64 {
        XP_PER_LEVEL - xp_within_level(self.total_xp)
    }

    /// Check that level and xp agree with total_xp.
    pub fn is_consistent(&self) -> bool {
        self.level == level_for_total_xp(self.total_xp)
            && self.xp == xp_within_level(self.total_xp)
    }

    /// Mark a lesson complete. Returns false if it already was.
    pub fn mark_lesson_complete(&mut self, lesson_id: &str) -> bool {
        if self.completed_lesson_ids.contains(lesson_id) {
            return false;
        }
        self.completed_lesson_ids.insert(lesson_id.to_string())
    }

    /// Mark a kingdom complete. Returns false if it already was.
    pub fn mark_kingdom_complete(&mut self, kingdom_id: &str) -> bool {
        if self.completed_kingdom_ids.contains(kingdom_id) {
            return false;
        }
        self.completed_kingdom_ids.insert(kingdom_id.to_string())
    }

    /// Mark a challenge solved. Returns false if it already was.
    pub fn mark_challenge_complete(&mut self, challenge_id: &str) -> bool {
        if self.completed_challenge_ids.contains(challenge_id) {
            return false;
        }
        self.completed_challenge_ids.insert(challenge_id.to_string())
    }

    pub fn has_completed_lesson(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.contains(lesson_id)
    }

    pub fn has_completed_kingdom(&self, kingdom_id: &str) -> bool {
        self.completed_kingdom_ids.contains(kingdom_id)
    }

    /// Check if an achievement with this id has been unlocked.
    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.unlocked_achievements
            .iter()
            .any(|a| a.id == achievement_id)
    }

    /// Append an unlocked achievement. Returns false, leaving the list untouched,
    /// if one with the same id is already present.
    pub fn push_achievement(&mut self, record: AchievementRecord) -> bool {
        if self.has_achievement(&record.id) {
            return false;
        }
        self.unlocked_achievements.push(record);
        true
    }

    /// Set the current streak, raising the best streak if it was beaten.
    pub fn set_streak(&mut self, current_days: u32) {
        self.current_streak_days = current_days;
        self.best_streak_days = self.best_streak_days.max(current_days);
    }
}
