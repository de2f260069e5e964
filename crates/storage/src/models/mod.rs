pub mod enums;
pub mod exercise;
pub mod progress;
pub mod workout;

pub use enums::{Category, Difficulty, Equipment, MuscleGroup, TargetMuscle, UnknownVariant};
pub use exercise::{Exercise, ExerciseSummary, NewExercise};
pub use progress::{NewProgress, Progress};
pub use workout::{NewWorkout, Workout, WorkoutExercise, WorkoutSummary};
