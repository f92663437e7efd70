//! Content catalog - the read-only course material: kingdoms, lessons, and achievements.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::mechanics::{AchievementIcon, ChallengeDifficulty, Difficulty, KingdomIcon, Rarity, UnlockRule};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two entries of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// A test case for a coding challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    pub description: String,
}

/// A coding exercise attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: ChallengeDifficulty,
    pub starting_code: String,
    pub solution: String,
    pub test_cases: Vec<TestCase>,
    pub xp_reward: u64,
    pub hints: Vec<String>,
}

/// One unit of course content inside a kingdom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// One-line summary shown in lesson lists.
    pub description: String,
    /// Markdown body.
    pub content: String,
    #[serde(default)]
    pub code_example: Option<String>,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    pub xp_reward: u64,
    #[serde(rename = "estimatedTime")]
    pub estimated_minutes: u32,
}

/// A learning path: an ordered run of lessons on one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kingdom {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: KingdomIcon,
    pub difficulty: Difficulty,
    pub is_unlocked: bool,
    pub lessons: Vec<Lesson>,
    pub total_xp: u64,
}

impl Kingdom {
    /// Get a lesson of this kingdom by id.
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    /// Position of a lesson within this kingdom.
    pub fn lesson_index(&self, lesson_id: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == lesson_id)
    }

    pub fn contains_lesson(&self, lesson_id: &str) -> bool {
        self.lesson_index(lesson_id).is_some()
    }
}

/// Catalog entry describing an achievement that can be unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub rarity: Rarity,
    /// When the milestone policy unlocks this achievement.
    pub rule: UnlockRule,
}

/// Where a lesson lives in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct LessonLocation<'a> {
    pub kingdom: &'a Kingdom,
    pub index: usize,
    pub lesson: &'a Lesson,
}

/// The complete, immutable course catalog.
///
/// Kingdom and achievement order is display order and is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    kingdoms: Vec<Kingdom>,
    achievements: Vec<AchievementDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate kingdom, lesson, or achievement ids.
    ///
    /// Lesson ids must be unique across the whole catalog since progress records
    /// store them without their kingdom.
    pub fn new(
        kingdoms: Vec<Kingdom>,
        achievements: Vec<AchievementDefinition>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            kingdoms,
            achievements,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The course shipped with the app.
    pub fn builtin() -> Self {
        Self {
            kingdoms: builtin::kingdoms(),
            achievements: builtin::achievements(),
        }
    }

    /// Load a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut kingdom_ids = HashSet::new();
        let mut lesson_ids = HashSet::new();
        for kingdom in &self.kingdoms {
            if !kingdom_ids.insert(kingdom.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "kingdom",
                    id: kingdom.id.clone(),
                });
            }
            for lesson in &kingdom.lessons {
                if !lesson_ids.insert(lesson.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        kind: "lesson",
                        id: lesson.id.clone(),
                    });
                }
            }
        }

        let mut achievement_ids = HashSet::new();
        for achievement in &self.achievements {
            if !achievement_ids.insert(achievement.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "achievement",
                    id: achievement.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn kingdoms(&self) -> &[Kingdom] {
        &self.kingdoms
    }

    pub fn achievements(&self) -> &[AchievementDefinition] {
        &self.achievements
    }

    /// Get kingdom by ID.
    pub fn kingdom(&self, kingdom_id: &str) -> Option<&Kingdom> {
        self.kingdoms.iter().find(|k| k.id == kingdom_id)
    }

    /// Get achievement definition by ID.
    pub fn achievement(&self, achievement_id: &str) -> Option<&AchievementDefinition> {
        self.achievements.iter().find(|a| a.id == achievement_id)
    }

    /// Get a lesson addressed by kingdom and lesson id.
    pub fn lesson(&self, kingdom_id: &str, lesson_id: &str) -> Option<&Lesson> {
        self.kingdom(kingdom_id)?.lesson(lesson_id)
    }

    /// Find a lesson anywhere in the catalog.
    pub fn find_lesson(&self, lesson_id: &str) -> Option<LessonLocation<'_>> {
        self.kingdoms.iter().find_map(|kingdom| {
            kingdom.lesson_index(lesson_id).map(|index| LessonLocation {
                kingdom,
                index,
                lesson: &kingdom.lessons[index],
            })
        })
    }

    /// Number of lessons across all kingdoms.
    pub fn lesson_count(&self) -> usize {
        self.kingdoms.iter().map(|k| k.lessons.len()).sum()
    }
}
