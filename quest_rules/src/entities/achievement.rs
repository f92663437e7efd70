//! Unlocked achievement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::AchievementDefinition;
use crate::mechanics::{AchievementIcon, Rarity};

/// An achievement as recorded in a user's progress at the moment it was unlocked.
///
/// The record copies the catalog fields so a stored profile stays readable even if
/// the catalog wording changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub rarity: Rarity,
    pub unlocked_at: DateTime<Utc>,
}

impl AchievementRecord {
    /// Record an unlock of `definition` at time `at`.
    pub fn unlocked(definition: &AchievementDefinition, at: DateTime<Utc>) -> Self {
        Self {
            id: definition.id.clone(),
            title: definition.title.clone(),
            description: definition.description.clone(),
            icon: definition.icon,
            rarity: definition.rarity,
            unlocked_at: at,
        }
    }
}
