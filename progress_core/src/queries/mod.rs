//! Derived read-only queries over the catalog and a progress record.
//!
//! Nothing here is stored; every value is recomputed from the current record.

use quest_rules::{
    AchievementDefinition, AchievementRecord, Catalog, Kingdom, Lesson, Rarity, UserProgress,
    XP_PER_LEVEL,
};

/// Percentage (0-100) of a kingdom's lessons the user has completed.
///
/// A kingdom without lessons reports 0.
pub fn kingdom_progress(kingdom: &Kingdom, user: &UserProgress) -> f64 {
    let completed = kingdom
        .lessons
        .iter()
        .filter(|l| user.has_completed_lesson(&l.id))
        .count();
    completed as f64 / kingdom.lessons.len().max(1) as f64 * 100.0
}

/// Check if the lesson at `index` is locked.
///
/// The first lesson is never locked; any later lesson is locked until the one before
/// it is complete. Out-of-range indices are reported locked.
pub fn is_lesson_locked(kingdom: &Kingdom, index: usize, user: &UserProgress) -> bool {
    if index >= kingdom.lessons.len() {
        return true;
    }
    index > 0 && !user.has_completed_lesson(&kingdom.lessons[index - 1].id)
}

/// Lock and completion state of one lesson in a kingdom listing.
#[derive(Debug, Clone, Copy)]
pub struct LessonState<'a> {
    pub lesson: &'a Lesson,
    pub locked: bool,
    pub completed: bool,
}

/// Every lesson of a kingdom, in order, with its lock and completion state.
pub fn lesson_states<'a>(kingdom: &'a Kingdom, user: &UserProgress) -> Vec<LessonState<'a>> {
    kingdom
        .lessons
        .iter()
        .enumerate()
        .map(|(index, lesson)| LessonState {
            lesson,
            locked: is_lesson_locked(kingdom, index, user),
            completed: user.has_completed_lesson(&lesson.id),
        })
        .collect()
}

/// The lessons before and after `lesson_id`, for previous/next navigation.
///
/// Returns `None` if the lesson is not in this kingdom.
pub fn adjacent_lessons<'a>(
    kingdom: &'a Kingdom,
    lesson_id: &str,
) -> Option<(Option<&'a Lesson>, Option<&'a Lesson>)> {
    let index = kingdom.lesson_index(lesson_id)?;
    let previous = index.checked_sub(1).and_then(|i| kingdom.lessons.get(i));
    let next = kingdom.lessons.get(index + 1);
    Some((previous, next))
}

/// Percentage (0-100) of the way through the current level.
pub fn level_progress(user: &UserProgress) -> f64 {
    (user.total_xp % XP_PER_LEVEL) as f64 / XP_PER_LEVEL as f64 * 100.0
}

/// Experience still needed for the next level.
pub fn xp_to_next_level(user: &UserProgress) -> u64 {
    user.xp_to_next_level()
}

/// Up to `limit` achievements, newest first.
///
/// Achievements unlocked at the same instant keep reverse unlock order.
pub fn recent_achievements(user: &UserProgress, limit: usize) -> Vec<&AchievementRecord> {
    let mut records: Vec<_> = user.unlocked_achievements.iter().rev().collect();
    // Stable sort keeps the reversed unlock order for ties.
    records.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
    records.truncate(limit);
    records
}

/// Catalog achievements the user has not unlocked yet, in catalog order.
pub fn locked_achievements<'a>(
    catalog: &'a Catalog,
    user: &UserProgress,
) -> Vec<&'a AchievementDefinition> {
    catalog
        .achievements()
        .iter()
        .filter(|a| !user.has_achievement(&a.id))
        .collect()
}

/// Headline numbers for the achievements page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub completion_percent: u32,
    pub legendary: usize,
}

/// Summarize unlocked achievements against the catalog.
pub fn achievement_summary(catalog: &Catalog, user: &UserProgress) -> AchievementSummary {
    let unlocked = user.unlocked_achievements.len();
    let total = catalog.achievements().len();
    let completion_percent = if total == 0 {
        0
    } else {
        (unlocked as f64 / total as f64 * 100.0).round() as u32
    };
    let legendary = user
        .unlocked_achievements
        .iter()
        .filter(|a| a.rarity == Rarity::Legendary)
        .count();

    AchievementSummary {
        unlocked,
        total,
        completion_percent,
        legendary,
    }
}

/// Headline numbers for the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStats {
    pub level: u64,
    pub total_xp: u64,
    pub achievements: usize,
    pub lessons_completed: usize,
    pub challenges_solved: usize,
    pub current_streak_days: u32,
}

pub fn profile_stats(user: &UserProgress) -> ProfileStats {
    ProfileStats {
        level: user.level,
        total_xp: user.total_xp,
        achievements: user.unlocked_achievements.len(),
        lessons_completed: user.completed_lesson_ids.len(),
        challenges_solved: user.completed_challenge_ids.len(),
        current_streak_days: user.current_streak_days,
    }
}
