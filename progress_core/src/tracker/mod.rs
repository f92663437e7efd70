//! Progress tracker - owns the user's progress record and applies every change to it.
//!
//! Each transition works the same way:
//! 1. **Compute**: build the next record from the current one
//! 2. **Persist**: write the full record through the store
//! 3. **Install**: make the next record current
//!
//! A failed write does not fail the transition. The in-memory record stays
//! authoritative for the running session and the failure is logged and counted.

mod milestones;

pub use milestones::*;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use quest_rules::{AchievementRecord, Catalog, UserProgress};

use crate::config::TrackerConfig;
use crate::queries;
use crate::store::{ProgressStore, StorageBackend};

/// What finishing a lesson changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonOutcome {
    /// Experience awarded. Zero when the lesson was unknown or already complete.
    pub xp_gained: u64,
    pub levels_gained: u64,
    /// The lesson's kingdom became complete with this lesson.
    pub kingdom_completed: bool,
    /// Achievements unlocked as a result, in unlock order.
    pub unlocked: Vec<AchievementRecord>,
}

impl LessonOutcome {
    /// Check whether anything changed.
    pub fn is_empty(&self) -> bool {
        self.xp_gained == 0 && !self.kingdom_completed && self.unlocked.is_empty()
    }
}

/// The single owner of a device's progress.
///
/// Built from the catalog and an injected store; the catalog has to exist first so
/// achievement ids can be resolved.
pub struct ProgressTracker<B> {
    catalog: Arc<Catalog>,
    store: ProgressStore<B>,
    current: UserProgress,
    auto_milestones: bool,
    recent_limit: usize,
    persistence_failures: u64,
}

impl<B: StorageBackend> ProgressTracker<B> {
    /// Load the stored record (or the default one) and start tracking.
    pub fn new(catalog: Arc<Catalog>, store: ProgressStore<B>) -> Self {
        Self::with_config(catalog, store, &TrackerConfig::default())
    }

    /// Like [`ProgressTracker::new`], taking behavior switches from the configuration.
    pub fn with_config(
        catalog: Arc<Catalog>,
        store: ProgressStore<B>,
        config: &TrackerConfig,
    ) -> Self {
        let current = store.load();
        tracing::debug!(
            level = current.level,
            total_xp = current.total_xp,
            lessons = current.completed_lesson_ids.len(),
            "progress tracker ready"
        );
        Self {
            catalog,
            store,
            current,
            auto_milestones: config.auto_milestones,
            recent_limit: config.recent_achievement_limit,
            persistence_failures: 0,
        }
    }

    /// The current progress record.
    pub fn current_user(&self) -> &UserProgress {
        &self.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore<B> {
        &mut self.store
    }

    /// The most recently unlocked achievements, up to the configured limit.
    pub fn recent_achievements(&self) -> Vec<&AchievementRecord> {
        queries::recent_achievements(&self.current, self.recent_limit)
    }

    /// Number of writes that failed since the tracker was created.
    pub fn persistence_failures(&self) -> u64 {
        self.persistence_failures
    }

    /// Persist `next` and make it the current record.
    fn commit(&mut self, next: UserProgress) {
        if let Err(e) = self.store.save(&next) {
            self.persistence_failures += 1;
            tracing::warn!(
                key = %self.store.key(),
                error = %e,
                "failed to persist progress; keeping in-memory state"
            );
        }
        self.current = next;
    }

    /// Add experience, recomputing level and in-level xp.
    pub fn add_experience(&mut self, amount: u64) -> &UserProgress {
        let mut next = self.current.clone();
        next.add_experience(amount);

        tracing::debug!(amount, total_xp = next.total_xp, level = next.level, "experience added");
        if next.level > self.current.level {
            tracing::info!(from = self.current.level, to = next.level, "level up");
        }

        self.commit(next);
        &self.current
    }

    /// Mark a lesson complete. Grants no experience.
    ///
    /// Returns false, without writing anything, if the lesson was already complete.
    pub fn complete_lesson(&mut self, lesson_id: &str) -> bool {
        let mut next = self.current.clone();
        if !next.mark_lesson_complete(lesson_id) {
            return false;
        }
        tracing::debug!(lesson_id, "lesson completed");
        self.commit(next);
        true
    }

    /// Mark a kingdom complete. Ids not in the catalog are ignored.
    pub fn complete_kingdom(&mut self, kingdom_id: &str) -> bool {
        if self.catalog.kingdom(kingdom_id).is_none() {
            tracing::debug!(kingdom_id, "ignoring unknown kingdom");
            return false;
        }
        let mut next = self.current.clone();
        if !next.mark_kingdom_complete(kingdom_id) {
            return false;
        }
        tracing::info!(kingdom_id, "kingdom completed");
        self.commit(next);
        true
    }

    /// Mark a challenge solved.
    pub fn complete_challenge(&mut self, challenge_id: &str) -> bool {
        let mut next = self.current.clone();
        if !next.mark_challenge_complete(challenge_id) {
            return false;
        }
        tracing::debug!(challenge_id, "challenge completed");
        self.commit(next);
        true
    }

    /// Store the caller's current streak count and raise the best streak if beaten.
    pub fn record_streak(&mut self, current_days: u32) {
        let mut next = self.current.clone();
        next.set_streak(current_days);
        if next == self.current {
            return;
        }
        tracing::debug!(current_days, best = next.best_streak_days, "streak recorded");
        self.commit(next);
    }

    /// Unlock an achievement now. See [`ProgressTracker::unlock_achievement_at`].
    pub fn unlock_achievement(&mut self, achievement_id: &str) -> Option<AchievementRecord> {
        self.unlock_achievement_at(achievement_id, Utc::now())
    }

    /// Unlock an achievement with an explicit timestamp.
    ///
    /// Returns `None` if the id is not in the catalog or was already unlocked.
    pub fn unlock_achievement_at(
        &mut self,
        achievement_id: &str,
        at: DateTime<Utc>,
    ) -> Option<AchievementRecord> {
        let Some(definition) = self.catalog.achievement(achievement_id) else {
            tracing::debug!(achievement_id, "ignoring unknown achievement");
            return None;
        };
        if self.current.has_achievement(achievement_id) {
            return None;
        }

        let record = AchievementRecord::unlocked(definition, at);
        let mut next = self.current.clone();
        next.push_achievement(record.clone());

        tracing::info!(achievement_id, rarity = %record.rarity, "achievement unlocked");
        self.commit(next);
        Some(record)
    }

    /// Unlock every achievement whose milestone rule is now satisfied.
    pub fn unlock_pending_milestones(&mut self) -> Vec<AchievementRecord> {
        let pending: Vec<String> = pending_milestones(&self.catalog, &self.current)
            .into_iter()
            .map(|a| a.id.clone())
            .collect();

        let now = Utc::now();
        pending
            .iter()
            .filter_map(|id| self.unlock_achievement_at(id, now))
            .collect()
    }

    /// Award a lesson's experience and mark it complete, then settle the kingdom and
    /// milestone consequences.
    ///
    /// Experience and completion stay two separate transitions, applied in that
    /// order. Unknown or already completed lessons give an empty outcome.
    pub fn finish_lesson(&mut self, kingdom_id: &str, lesson_id: &str) -> LessonOutcome {
        let catalog = Arc::clone(&self.catalog);
        let Some(kingdom) = catalog.kingdom(kingdom_id) else {
            tracing::debug!(kingdom_id, "ignoring lesson in unknown kingdom");
            return LessonOutcome::default();
        };
        let Some(lesson) = kingdom.lesson(lesson_id) else {
            tracing::debug!(kingdom_id, lesson_id, "ignoring unknown lesson");
            return LessonOutcome::default();
        };
        if self.current.has_completed_lesson(lesson_id) {
            return LessonOutcome::default();
        }

        let level_before = self.current.level;
        self.add_experience(lesson.xp_reward);
        self.complete_lesson(lesson_id);

        let mut outcome = LessonOutcome {
            xp_gained: lesson.xp_reward,
            levels_gained: self.current.level - level_before,
            ..Default::default()
        };

        let kingdom_done = kingdom
            .lessons
            .iter()
            .all(|l| self.current.has_completed_lesson(&l.id));
        if kingdom_done {
            outcome.kingdom_completed = self.complete_kingdom(kingdom_id);
        }

        if self.auto_milestones {
            outcome.unlocked = self.unlock_pending_milestones();
        }
        outcome
    }

    /// Replace the record with the default one and persist it.
    pub fn reset_progress(&mut self) {
        tracing::info!(
            total_xp = self.current.total_xp,
            achievements = self.current.unlocked_achievements.len(),
            "resetting progress"
        );
        self.commit(UserProgress::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::error::StoreError;
    use crate::queries::kingdom_progress;
    use crate::store::MemoryStorage;
    use chrono::TimeZone;
    use quest_rules::{Difficulty, Kingdom, KingdomIcon, Lesson, Rarity};

    fn tracker() -> ProgressTracker<MemoryStorage> {
        ProgressTracker::new(
            Arc::new(Catalog::builtin()),
            ProgressStore::new(MemoryStorage::new()),
        )
    }

    fn stored(tracker: &ProgressTracker<MemoryStorage>) -> Option<String> {
        tracker.store().backend().get(DEFAULT_STORAGE_KEY).unwrap()
    }

    fn lesson(id: &str, xp_reward: u64) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            content: String::new(),
            code_example: None,
            challenges: Vec::new(),
            xp_reward,
            estimated_minutes: 10,
        }
    }

    fn three_lesson_catalog() -> Arc<Catalog> {
        let kingdom = Kingdom {
            id: "loops".to_string(),
            name: "Loops".to_string(),
            description: String::new(),
            icon: KingdomIcon::Zap,
            difficulty: Difficulty::Beginner,
            is_unlocked: true,
            lessons: vec![lesson("l0", 40), lesson("l1", 40), lesson("l2", 40)],
            total_xp: 120,
        };
        let builtin = Catalog::builtin();
        Arc::new(Catalog::new(vec![kingdom], builtin.achievements().to_vec()).unwrap())
    }

    #[test]
    fn test_starts_from_default() {
        let tracker = tracker();
        assert_eq!(tracker.current_user(), &UserProgress::default());
        assert!(stored(&tracker).is_none());
    }

    #[test]
    fn test_starts_from_stored_record() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        let mut user = UserProgress::default();
        user.add_experience(130);
        store.save(&user).unwrap();

        let tracker = ProgressTracker::new(Arc::new(Catalog::builtin()), store);
        assert_eq!(tracker.current_user().total_xp, 130);
        assert_eq!(tracker.current_user().level, 2);
    }

    #[test]
    fn test_add_experience_scenario() {
        let mut tracker = tracker();
        let user = tracker.add_experience(250);
        assert_eq!(user.total_xp, 250);
        assert_eq!(user.level, 3);
        assert_eq!(user.xp, 50);
    }

    #[test]
    fn test_add_experience_arithmetic() {
        for start in [0u64, 1, 99, 100, 457] {
            for amount in [0u64, 1, 49, 100, 1234] {
                let mut tracker = tracker();
                tracker.add_experience(start);
                tracker.add_experience(amount);

                let user = tracker.current_user();
                assert_eq!(user.total_xp, start + amount);
                assert_eq!(user.level, (start + amount) / 100 + 1);
                assert_eq!(user.xp, (start + amount) % 100);
            }
        }
    }

    #[test]
    fn test_add_experience_persists_and_keeps_other_fields() {
        let mut tracker = tracker();
        tracker.complete_lesson("variables");
        tracker.add_experience(75);

        let reloaded = tracker.store().load();
        assert_eq!(&reloaded, tracker.current_user());
        assert!(reloaded.has_completed_lesson("variables"));
        assert_eq!(reloaded.display_name, "Code Apprentice");
    }

    #[test]
    fn test_complete_lesson_twice() {
        let mut tracker = tracker();
        assert!(tracker.complete_lesson("variables"));
        let once = tracker.current_user().completed_lesson_ids.clone();
        let stored_once = stored(&tracker);

        assert!(!tracker.complete_lesson("variables"));
        assert_eq!(tracker.current_user().completed_lesson_ids, once);
        assert_eq!(stored(&tracker), stored_once);
    }

    #[test]
    fn test_complete_lesson_grants_no_experience() {
        let mut tracker = tracker();
        tracker.complete_lesson("variables");
        assert_eq!(tracker.current_user().total_xp, 0);
    }

    #[test]
    fn test_unlock_first_steps() {
        let mut tracker = tracker();
        let record = tracker.unlock_achievement("first-steps").unwrap();
        assert_eq!(record.title, "First Steps");
        assert_eq!(record.rarity, Rarity::Common);

        assert!(tracker.unlock_achievement("first-steps").is_none());
        let matching = tracker
            .current_user()
            .unlocked_achievements
            .iter()
            .filter(|a| a.id == "first-steps")
            .count();
        assert_eq!(matching, 1);
        assert!(tracker.store().load().has_achievement("first-steps"));
    }

    #[test]
    fn test_unlock_unknown_achievement() {
        let mut tracker = tracker();
        tracker.unlock_achievement("first-steps");
        let before = tracker.current_user().unlocked_achievements.clone();

        assert!(tracker.unlock_achievement("does-not-exist").is_none());
        assert_eq!(tracker.current_user().unlocked_achievements, before);
    }

    #[test]
    fn test_unlock_order_is_kept() {
        let mut tracker = tracker();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        tracker.unlock_achievement_at("code-master", t1);
        tracker.unlock_achievement_at("first-steps", t2);

        let ids: Vec<_> = tracker
            .current_user()
            .unlocked_achievements
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["code-master", "first-steps"]);
        assert_eq!(tracker.current_user().unlocked_achievements[1].unlocked_at, t2);
    }

    #[test]
    fn test_reset_progress() {
        let mut tracker = tracker();
        tracker.add_experience(420);
        tracker.complete_lesson("variables");
        tracker.complete_challenge("bug-1");
        tracker.unlock_achievement("first-steps");
        tracker.record_streak(3);

        tracker.reset_progress();
        assert_eq!(tracker.current_user(), &UserProgress::default());
        assert_eq!(tracker.store().load(), UserProgress::default());
    }

    #[test]
    fn test_complete_lesson_then_kingdom_progress() {
        let mut tracker = tracker();
        tracker.complete_lesson("variables");

        let location = tracker.catalog().find_lesson("variables").unwrap();
        assert_eq!(location.kingdom.lessons.len(), 1);
        let progress = kingdom_progress(location.kingdom, tracker.current_user());
        assert!((progress - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_complete_kingdom_ignores_unknown_ids() {
        let mut tracker = tracker();
        assert!(!tracker.complete_kingdom("atlantis"));
        assert!(tracker.complete_kingdom("fundamentals"));
        assert!(!tracker.complete_kingdom("fundamentals"));
        assert!(tracker.current_user().has_completed_kingdom("fundamentals"));
    }

    #[test]
    fn test_record_streak() {
        let mut tracker = tracker();
        tracker.record_streak(4);
        tracker.record_streak(2);
        assert_eq!(tracker.current_user().current_streak_days, 2);
        assert_eq!(tracker.current_user().best_streak_days, 4);
        assert_eq!(tracker.store().load().best_streak_days, 4);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut backend = MemoryStorage::new();
        backend.set_available(false);
        let mut tracker = ProgressTracker::new(Arc::new(Catalog::builtin()), ProgressStore::new(backend));

        tracker.add_experience(150);
        assert!(tracker.unlock_achievement("first-steps").is_some());

        assert_eq!(tracker.current_user().level, 2);
        assert!(tracker.current_user().has_achievement("first-steps"));
        assert_eq!(tracker.persistence_failures(), 2);

        // Nothing reached storage, so a fresh start sees the default record.
        tracker.store_mut().backend_mut().set_available(true);
        assert_eq!(tracker.store().load(), UserProgress::default());
    }

    #[test]
    fn test_quota_failure_is_not_fatal() {
        let mut tracker = ProgressTracker::new(
            Arc::new(Catalog::builtin()),
            ProgressStore::new(MemoryStorage::with_quota(16)),
        );
        tracker.add_experience(10);
        assert_eq!(tracker.current_user().total_xp, 10);
        assert_eq!(tracker.persistence_failures(), 1);
        assert!(matches!(
            tracker.store_mut().save(&UserProgress::default()),
            Err(StoreError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn test_finish_lesson() {
        let mut tracker = tracker();
        let outcome = tracker.finish_lesson("fundamentals", "variables");

        assert_eq!(outcome.xp_gained, 50);
        assert_eq!(outcome.levels_gained, 0);
        assert!(outcome.kingdom_completed);
        let unlocked: Vec<_> = outcome.unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unlocked, vec!["first-steps", "kingdom-conqueror"]);

        let user = tracker.current_user();
        assert_eq!(user.total_xp, 50);
        assert!(user.has_completed_lesson("variables"));
        assert!(user.has_completed_kingdom("fundamentals"));
        assert_eq!(&tracker.store().load(), user);
    }

    #[test]
    fn test_finish_lesson_twice_awards_once() {
        let mut tracker = tracker();
        tracker.finish_lesson("fundamentals", "variables");
        let outcome = tracker.finish_lesson("fundamentals", "variables");

        assert!(outcome.is_empty());
        assert_eq!(tracker.current_user().total_xp, 50);
        assert_eq!(tracker.current_user().unlocked_achievements.len(), 2);
    }

    #[test]
    fn test_finish_unknown_lesson() {
        let mut tracker = tracker();
        assert!(tracker.finish_lesson("fundamentals", "nope").is_empty());
        assert!(tracker.finish_lesson("nowhere", "variables").is_empty());
        assert_eq!(tracker.current_user(), &UserProgress::default());
    }

    #[test]
    fn test_finish_lesson_levels_and_partial_kingdom() {
        let mut tracker = ProgressTracker::new(three_lesson_catalog(), ProgressStore::new(MemoryStorage::new()));
        tracker.add_experience(90);

        let outcome = tracker.finish_lesson("loops", "l0");
        assert_eq!(outcome.levels_gained, 1);
        assert!(!outcome.kingdom_completed);
        assert_eq!(outcome.unlocked.len(), 1);

        tracker.finish_lesson("loops", "l1");
        let outcome = tracker.finish_lesson("loops", "l2");
        assert!(outcome.kingdom_completed);
        let unlocked: Vec<_> = outcome.unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unlocked, vec!["kingdom-conqueror", "java-legend"]);
    }

    #[test]
    fn test_finish_lesson_without_auto_milestones() {
        let config = TrackerConfig {
            auto_milestones: false,
            ..Default::default()
        };
        let mut tracker = ProgressTracker::with_config(
            Arc::new(Catalog::builtin()),
            ProgressStore::new(MemoryStorage::new()),
            &config,
        );
        let outcome = tracker.finish_lesson("fundamentals", "variables");
        assert!(outcome.unlocked.is_empty());
        assert!(tracker.current_user().unlocked_achievements.is_empty());
    }

    #[test]
    fn test_recent_achievements_respects_config_limit() {
        let config = TrackerConfig {
            recent_achievement_limit: 2,
            ..Default::default()
        };
        let mut tracker = ProgressTracker::with_config(
            Arc::new(Catalog::builtin()),
            ProgressStore::new(MemoryStorage::new()),
            &config,
        );
        let day = |d| Utc.with_ymd_and_hms(2024, 2, d, 8, 0, 0).unwrap();
        tracker.unlock_achievement_at("first-steps", day(1));
        tracker.unlock_achievement_at("code-master", day(2));
        tracker.unlock_achievement_at("bug-slayer", day(3));

        let recent: Vec<_> = tracker
            .recent_achievements()
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(recent, vec!["bug-slayer", "code-master"]);
    }

    #[test]
    fn test_invariants_hold_after_every_transition() {
        let mut tracker = tracker();
        tracker.add_experience(37);
        assert!(tracker.current_user().is_consistent());
        tracker.finish_lesson("fundamentals", "variables");
        assert!(tracker.current_user().is_consistent());
        tracker.add_experience(913);
        tracker.unlock_pending_milestones();
        assert!(tracker.current_user().is_consistent());
        assert!(tracker.current_user().has_achievement("code-master"));
        tracker.reset_progress();
        assert!(tracker.current_user().is_consistent());
    }
}
