//! Progression mechanics: leveling arithmetic, rarity tiers, difficulties, icons, unlock rules.

use serde::{Deserialize, Serialize};

/// Experience required to advance one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Level reached after earning `total_xp` experience. Levels start at 1.
pub fn level_for_total_xp(total_xp: u64) -> u64 {
    total_xp / XP_PER_LEVEL + 1
}

/// Experience accumulated inside the current level, always below [`XP_PER_LEVEL`].
pub fn xp_within_level(total_xp: u64) -> u64 {
    total_xp % XP_PER_LEVEL
}

/// Rarity tier of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Lowercase label as shown on badges.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Accent colour name used when rendering the tier.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Rarity::Common => "gray",
            Rarity::Rare => "blue",
            Rarity::Epic => "purple",
            Rarity::Legendary => "yellow",
        }
    }

    /// Badge icon shown next to achievements of this tier.
    pub fn badge_icon(&self) -> AchievementIcon {
        match self {
            Rarity::Common => AchievementIcon::Award,
            Rarity::Rare => AchievementIcon::Star,
            Rarity::Epic => AchievementIcon::Trophy,
            Rarity::Legendary => AchievementIcon::Crown,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Difficulty of a kingdom (learning path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Difficulty of a single coding challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeDifficulty {
    Easy,
    Medium,
    Hard,
}

/// Icons attached to achievements. Serialized by icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementIcon {
    Award,
    Crown,
    Bug,
    Star,
    Trophy,
    Flame,
    Building,
}

impl AchievementIcon {
    /// Icon name as understood by the icon set.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementIcon::Award => "Award",
            AchievementIcon::Crown => "Crown",
            AchievementIcon::Bug => "Bug",
            AchievementIcon::Star => "Star",
            AchievementIcon::Trophy => "Trophy",
            AchievementIcon::Flame => "Flame",
            AchievementIcon::Building => "Building",
        }
    }

    /// Plain-text stand-in for terminals and logs.
    pub fn glyph(&self) -> &'static str {
        match self {
            AchievementIcon::Award => "🏅",
            AchievementIcon::Crown => "👑",
            AchievementIcon::Bug => "🐛",
            AchievementIcon::Star => "⭐",
            AchievementIcon::Trophy => "🏆",
            AchievementIcon::Flame => "🔥",
            AchievementIcon::Building => "🏗",
        }
    }
}

/// Icons attached to kingdoms. Serialized by icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KingdomIcon {
    BookOpen,
    Boxes,
    GitBranch,
    Database,
    Shield,
    Zap,
}

impl KingdomIcon {
    pub fn name(&self) -> &'static str {
        match self {
            KingdomIcon::BookOpen => "BookOpen",
            KingdomIcon::Boxes => "Boxes",
            KingdomIcon::GitBranch => "GitBranch",
            KingdomIcon::Database => "Database",
            KingdomIcon::Shield => "Shield",
            KingdomIcon::Zap => "Zap",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            KingdomIcon::BookOpen => "📖",
            KingdomIcon::Boxes => "📦",
            KingdomIcon::GitBranch => "🌿",
            KingdomIcon::Database => "🗄",
            KingdomIcon::Shield => "🛡",
            KingdomIcon::Zap => "⚡",
        }
    }
}

/// Condition under which an achievement is unlocked automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum UnlockRule {
    /// At least this many lessons completed.
    LessonsCompleted(usize),
    /// At least this many kingdoms completed.
    KingdomsCompleted(usize),
    /// Current level at or above this value.
    LevelReached(u64),
    /// Every kingdom in the catalog completed.
    AllKingdomsCompleted,
    /// At least this many challenges solved.
    ChallengesCompleted(usize),
    /// Best streak at or above this many days.
    StreakDays(u32),
    /// Never fires on its own; unlocked by an explicit call.
    Manual,
}
