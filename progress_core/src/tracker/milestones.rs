//! Milestone policy - decides which achievements a user has earned.

use quest_rules::{AchievementDefinition, Catalog, UnlockRule, UserProgress};

/// Check whether `rule` holds for `user`.
pub fn rule_satisfied(rule: &UnlockRule, catalog: &Catalog, user: &UserProgress) -> bool {
    match *rule {
        UnlockRule::LessonsCompleted(n) => user.completed_lesson_ids.len() >= n,
        UnlockRule::KingdomsCompleted(n) => user.completed_kingdom_ids.len() >= n,
        UnlockRule::LevelReached(level) => user.level >= level,
        UnlockRule::AllKingdomsCompleted => {
            !catalog.kingdoms().is_empty()
                && catalog
                    .kingdoms()
                    .iter()
                    .all(|k| user.has_completed_kingdom(&k.id))
        }
        UnlockRule::ChallengesCompleted(n) => user.completed_challenge_ids.len() >= n,
        UnlockRule::StreakDays(days) => user.best_streak_days >= days,
        UnlockRule::Manual => false,
    }
}

/// Achievements whose rule is satisfied but which are not unlocked yet, in catalog order.
pub fn pending_milestones<'a>(
    catalog: &'a Catalog,
    user: &UserProgress,
) -> Vec<&'a AchievementDefinition> {
    catalog
        .achievements()
        .iter()
        .filter(|a| !user.has_achievement(&a.id))
        .filter(|a| rule_satisfied(&a.rule, catalog, user))
        .collect()
}
