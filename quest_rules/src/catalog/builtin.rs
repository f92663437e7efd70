//! Built-in course content.

use super::{AchievementDefinition, Kingdom, Lesson};
use crate::mechanics::{AchievementIcon, Difficulty, KingdomIcon, Rarity, UnlockRule};

const VARIABLES_CONTENT: &str = r#"# Variables and Data Types in Java

In Java, variables are containers that store data values. Think of them as labeled boxes where you can store different types of information.

## Primitive Data Types

Java has 8 primitive data types:

### Numeric Types
- **byte**: 8-bit signed integer (-128 to 127)
- **short**: 16-bit signed integer (-32,768 to 32,767)
- **int**: 32-bit signed integer (-2^31 to 2^31-1)
- **long**: 64-bit signed integer (-2^63 to 2^63-1)
- **float**: 32-bit floating point
- **double**: 64-bit floating point

### Other Types
- **char**: 16-bit Unicode character
- **boolean**: true or false

## Variable Declaration

Variables must be declared before use:

```java
int age;           // Declaration
age = 25;          // Assignment
int score = 100;   // Declaration + Assignment
```

## Best Practices
- Use meaningful names: `studentAge` instead of `a`
- Follow camelCase convention
- Initialize variables before use
- Choose appropriate data types"#;

const VARIABLES_CODE: &str = r#"public class VariablesExample {
    public static void main(String[] args) {
        // Numeric variables
        int health = 100;
        double damage = 15.5;
        long experience = 1250000L;

        // Character and boolean
        char grade = 'A';
        boolean isAlive = true;

        // String (reference type)
        String playerName = "CodeWarrior";

        System.out.println("Player: " + playerName);
        System.out.println("Health: " + health);
        System.out.println("Damage: " + damage);
        System.out.println("Experience: " + experience);
        System.out.println("Grade: " + grade);
        System.out.println("Is Alive: " + isAlive);
    }
}"#;

pub(super) fn kingdoms() -> Vec<Kingdom> {
    vec![
        Kingdom {
            id: "fundamentals".to_string(),
            name: "Kingdom of Fundamentals".to_string(),
            description: "Master the basics: variables, data types, operators, and control structures"
                .to_string(),
            icon: KingdomIcon::BookOpen,
            difficulty: Difficulty::Beginner,
            is_unlocked: true,
            lessons: vec![Lesson {
                id: "variables".to_string(),
                title: "Variables and Data Types".to_string(),
                description: "Learn about Java variables, primitive types, and memory management"
                    .to_string(),
                content: VARIABLES_CONTENT.to_string(),
                code_example: Some(VARIABLES_CODE.to_string()),
                challenges: Vec::new(),
                xp_reward: 50,
                estimated_minutes: 15,
            }],
            total_xp: 500,
        },
        locked_kingdom(
            "oop-basics",
            "Realm of Objects",
            "Enter the world of Object-Oriented Programming: classes, objects, and methods",
            KingdomIcon::Boxes,
            Difficulty::Intermediate,
            750,
        ),
        locked_kingdom(
            "inheritance",
            "Dynasty of Inheritance",
            "Master inheritance, polymorphism, and the power of code reusability",
            KingdomIcon::GitBranch,
            Difficulty::Intermediate,
            600,
        ),
        locked_kingdom(
            "collections",
            "Archive of Collections",
            "Organize data with Lists, Sets, Maps, and advanced collection operations",
            KingdomIcon::Database,
            Difficulty::Intermediate,
            550,
        ),
        locked_kingdom(
            "exceptions",
            "Fortress of Exception Handling",
            "Defend your code against errors and handle exceptions gracefully",
            KingdomIcon::Shield,
            Difficulty::Advanced,
            400,
        ),
        locked_kingdom(
            "advanced",
            "Temple of Advanced Concepts",
            "Explore generics, lambdas, streams, and advanced Java features",
            KingdomIcon::Zap,
            Difficulty::Advanced,
            800,
        ),
    ]
}

/// Kingdoms whose lessons are not written yet.
fn locked_kingdom(
    id: &str,
    name: &str,
    description: &str,
    icon: KingdomIcon,
    difficulty: Difficulty,
    total_xp: u64,
) -> Kingdom {
    Kingdom {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon,
        difficulty,
        is_unlocked: false,
        lessons: Vec::new(),
        total_xp,
    }
}

pub(super) fn achievements() -> Vec<AchievementDefinition> {
    vec![
        achievement(
            "first-steps",
            "First Steps",
            "Complete your first lesson",
            AchievementIcon::Award,
            Rarity::Common,
            UnlockRule::LessonsCompleted(1),
        ),
        achievement(
            "kingdom-conqueror",
            "Kingdom Conqueror",
            "Complete your first kingdom",
            AchievementIcon::Crown,
            Rarity::Rare,
            UnlockRule::KingdomsCompleted(1),
        ),
        achievement(
            "bug-slayer",
            "Bug Slayer",
            "Fix 10 bugs in Bug Battle challenges",
            AchievementIcon::Bug,
            Rarity::Rare,
            UnlockRule::ChallengesCompleted(10),
        ),
        achievement(
            "code-master",
            "Code Master",
            "Reach level 10",
            AchievementIcon::Star,
            Rarity::Epic,
            UnlockRule::LevelReached(10),
        ),
        achievement(
            "java-legend",
            "Java Legend",
            "Complete all kingdoms",
            AchievementIcon::Trophy,
            Rarity::Legendary,
            UnlockRule::AllKingdomsCompleted,
        ),
        achievement(
            "streak-warrior",
            "Streak Warrior",
            "Maintain a 7-day learning streak",
            AchievementIcon::Flame,
            Rarity::Rare,
            UnlockRule::StreakDays(7),
        ),
        // Projects are not tracked yet, so this one is only unlocked explicitly.
        achievement(
            "project-builder",
            "Project Builder",
            "Complete 5 projects",
            AchievementIcon::Building,
            Rarity::Epic,
            UnlockRule::Manual,
        ),
    ]
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    icon: AchievementIcon,
    rarity: Rarity,
    rule: UnlockRule,
) -> AchievementDefinition {
    AchievementDefinition {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon,
        rarity,
        rule,
    }
}
