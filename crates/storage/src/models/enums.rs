use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use utoipa::ToSchema;

/// Returned when a string does not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not a valid value, expected one of: {}",
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// Display/FromStr through the `LABELS` table each enum carries.
macro_rules! text_conversions {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                Self::LABELS[*self as usize]
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        value: s.to_string(),
                        expected: &Self::LABELS,
                    })
            }
        }
    )+};
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "exercise_category")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Sports,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Strength, Self::Cardio, Self::Flexibility, Self::Sports];
    const LABELS: [&'static str; 4] = ["Strength", "Cardio", "Flexibility", "Sports"];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "muscle_group")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    #[serde(rename = "Full Body")]
    #[sqlx(rename = "Full Body")]
    FullBody,
    Cardio,
}

impl MuscleGroup {
    pub const ALL: [Self; 8] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::FullBody,
        Self::Cardio,
    ];
    const LABELS: [&'static str; 8] = [
        "Chest",
        "Back",
        "Legs",
        "Shoulders",
        "Arms",
        "Core",
        "Full Body",
        "Cardio",
    ];
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "equipment")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    #[default]
    Bodyweight,
    #[serde(rename = "Cardio Equipment")]
    #[sqlx(rename = "Cardio Equipment")]
    CardioEquipment,
    Other,
}

impl Equipment {
    pub const ALL: [Self; 6] = [
        Self::Barbell,
        Self::Dumbbell,
        Self::Machine,
        Self::Bodyweight,
        Self::CardioEquipment,
        Self::Other,
    ];
    const LABELS: [&'static str; 6] = [
        "Barbell",
        "Dumbbell",
        "Machine",
        "Bodyweight",
        "Cardio Equipment",
        "Other",
    ];
}

/// Shared by exercises and workouts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "difficulty")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];
    const LABELS: [&'static str; 3] = ["Beginner", "Intermediate", "Advanced"];
}

/// Muscles a workout can target. Unlike [`MuscleGroup`] there is no `Cardio`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "target_muscle", no_pg_array)]
pub enum TargetMuscle {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    #[serde(rename = "Full Body")]
    #[sqlx(rename = "Full Body")]
    FullBody,
}

impl TargetMuscle {
    pub const ALL: [Self; 7] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::FullBody,
    ];
    const LABELS: [&'static str; 7] = [
        "Chest",
        "Back",
        "Legs",
        "Shoulders",
        "Arms",
        "Core",
        "Full Body",
    ];
}

impl PgHasArrayType for TargetMuscle {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_target_muscle")
    }
}

text_conversions!(Category, MuscleGroup, Equipment, Difficulty, TargetMuscle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_serde_names() {
        for muscle in MuscleGroup::ALL {
            let json = serde_json::to_string(&muscle).unwrap();
            assert_eq!(json, format!("\"{}\"", muscle.as_str()));
        }
        for equipment in Equipment::ALL {
            let json = serde_json::to_string(&equipment).unwrap();
            assert_eq!(json, format!("\"{}\"", equipment.as_str()));
        }
        for muscle in TargetMuscle::ALL {
            let json = serde_json::to_string(&muscle).unwrap();
            assert_eq!(json, format!("\"{}\"", muscle.as_str()));
        }
    }

    #[test]
    fn test_from_str_round_trips_every_variant() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("strength".parse::<Category>().is_err());
        assert!("Full body".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn test_unknown_variant_lists_expected_values() {
        let err = "Yoga".parse::<Category>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "`Yoga` is not a valid value, expected one of: Strength, Cardio, Flexibility, Sports"
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_value() {
        let result: Result<Equipment, _> = serde_json::from_str("\"Kettlebell\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_target_muscles_have_no_cardio() {
        let result: Result<TargetMuscle, _> = serde_json::from_str("\"Cardio\"");
        assert!(result.is_err());
        let muscle: MuscleGroup = serde_json::from_str("\"Cardio\"").unwrap();
        assert_eq!(muscle, MuscleGroup::Cardio);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Equipment::default(), Equipment::Bodyweight);
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
    }
}
