use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::common::parse_datetime;
use crate::error::{Result, StorageError};
use crate::models::{
    Category, Difficulty, Equipment, MuscleGroup, NewExercise, NewProgress, NewWorkout,
    TargetMuscle, WorkoutExercise,
};
use crate::repository::exercise::ExerciseRepository;
use crate::repository::progress::ProgressRepository;
use crate::repository::workout::WorkoutRepository;

struct ExerciseData {
    name: &'static str,
    category: Category,
    muscle_group: MuscleGroup,
    equipment: Equipment,
    difficulty: Difficulty,
    instructions: &'static str,
    calories_per_minute: f64,
}

/// `exercise` indexes into [`EXERCISES`]
struct EntryData {
    exercise: usize,
    sets: f64,
    reps: f64,
    weight: f64,
}

struct WorkoutData {
    name: &'static str,
    description: &'static str,
    duration: f64,
    difficulty: Difficulty,
    target_muscles: &'static [TargetMuscle],
    exercises: &'static [EntryData],
}

/// `workout` indexes into [`WORKOUTS`]
struct ProgressData {
    workout: usize,
    date: &'static str,
    duration: f64,
    calories_burned: f64,
    rating: i32,
    notes: &'static str,
}

const EXERCISES: &[ExerciseData] = &[
    ExerciseData {
        name: "Bench Press",
        category: Category::Strength,
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Intermediate,
        instructions: "Lie on bench, lower bar to chest, press up",
        calories_per_minute: 8.0,
    },
    ExerciseData {
        name: "Squats",
        category: Category::Strength,
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Intermediate,
        instructions: "Lower hips, keep back straight, drive through heels",
        calories_per_minute: 10.0,
    },
    ExerciseData {
        name: "Deadlift",
        category: Category::Strength,
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Barbell,
        difficulty: Difficulty::Advanced,
        instructions: "Lift bar from ground, keep back neutral",
        calories_per_minute: 12.0,
    },
    ExerciseData {
        name: "Pull-ups",
        category: Category::Strength,
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Bodyweight,
        difficulty: Difficulty::Intermediate,
        instructions: "Hang from bar, pull up until chin over bar",
        calories_per_minute: 9.0,
    },
    ExerciseData {
        name: "Push-ups",
        category: Category::Strength,
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Bodyweight,
        difficulty: Difficulty::Beginner,
        instructions: "Lower body, keep core tight, push up",
        calories_per_minute: 7.0,
    },
    ExerciseData {
        name: "Running",
        category: Category::Cardio,
        muscle_group: MuscleGroup::Cardio,
        equipment: Equipment::CardioEquipment,
        difficulty: Difficulty::Beginner,
        instructions: "Maintain steady pace, focus on breathing",
        calories_per_minute: 10.0,
    },
    ExerciseData {
        name: "Plank",
        category: Category::Strength,
        muscle_group: MuscleGroup::Core,
        equipment: Equipment::Bodyweight,
        difficulty: Difficulty::Beginner,
        instructions: "Hold body straight in push-up position",
        calories_per_minute: 5.0,
    },
    ExerciseData {
        name: "Dumbbell Rows",
        category: Category::Strength,
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Dumbbell,
        difficulty: Difficulty::Beginner,
        instructions: "Bend at waist, pull dumbbell to hip",
        calories_per_minute: 7.0,
    },
    ExerciseData {
        name: "Shoulder Press",
        category: Category::Strength,
        muscle_group: MuscleGroup::Shoulders,
        equipment: Equipment::Dumbbell,
        difficulty: Difficulty::Beginner,
        instructions: "Press dumbbells overhead from shoulders",
        calories_per_minute: 6.0,
    },
    ExerciseData {
        name: "Lunges",
        category: Category::Strength,
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Bodyweight,
        difficulty: Difficulty::Beginner,
        instructions: "Step forward, lower hips, return to start",
        calories_per_minute: 8.0,
    },
];

const BENCH_PRESS: usize = 0;
const SQUATS: usize = 1;
const DEADLIFT: usize = 2;
const PULL_UPS: usize = 3;
const PUSH_UPS: usize = 4;
const RUNNING: usize = 5;
const PLANK: usize = 6;
const DUMBBELL_ROWS: usize = 7;
const SHOULDER_PRESS: usize = 8;
const LUNGES: usize = 9;

const WORKOUTS: &[WorkoutData] = &[
    WorkoutData {
        name: "Full Body Beginner",
        description: "A complete full body workout for beginners",
        duration: 45.0,
        difficulty: Difficulty::Beginner,
        target_muscles: &[
            TargetMuscle::Chest,
            TargetMuscle::Back,
            TargetMuscle::Legs,
            TargetMuscle::Core,
        ],
        exercises: &[
            EntryData { exercise: PUSH_UPS, sets: 3.0, reps: 10.0, weight: 0.0 },
            EntryData { exercise: DUMBBELL_ROWS, sets: 3.0, reps: 12.0, weight: 20.0 },
            EntryData { exercise: LUNGES, sets: 3.0, reps: 10.0, weight: 0.0 },
            // 30 second holds
            EntryData { exercise: PLANK, sets: 3.0, reps: 30.0, weight: 0.0 },
        ],
    },
    WorkoutData {
        name: "Upper Body Strength",
        description: "Intense upper body workout",
        duration: 60.0,
        difficulty: Difficulty::Intermediate,
        target_muscles: &[
            TargetMuscle::Chest,
            TargetMuscle::Back,
            TargetMuscle::Shoulders,
            TargetMuscle::Arms,
        ],
        exercises: &[
            EntryData { exercise: BENCH_PRESS, sets: 4.0, reps: 8.0, weight: 135.0 },
            EntryData { exercise: PULL_UPS, sets: 4.0, reps: 8.0, weight: 0.0 },
            EntryData { exercise: SHOULDER_PRESS, sets: 3.0, reps: 10.0, weight: 30.0 },
            EntryData { exercise: DUMBBELL_ROWS, sets: 3.0, reps: 12.0, weight: 35.0 },
        ],
    },
    WorkoutData {
        name: "Leg Day",
        description: "Heavy leg workout",
        duration: 50.0,
        difficulty: Difficulty::Intermediate,
        target_muscles: &[TargetMuscle::Legs],
        exercises: &[
            EntryData { exercise: SQUATS, sets: 5.0, reps: 5.0, weight: 185.0 },
            EntryData { exercise: DEADLIFT, sets: 5.0, reps: 5.0, weight: 225.0 },
            EntryData { exercise: LUNGES, sets: 3.0, reps: 12.0, weight: 0.0 },
        ],
    },
    WorkoutData {
        name: "Quick Cardio",
        description: "30 minute cardio session",
        duration: 30.0,
        difficulty: Difficulty::Beginner,
        target_muscles: &[TargetMuscle::FullBody],
        exercises: &[
            // 30 minutes
            EntryData { exercise: RUNNING, sets: 1.0, reps: 30.0, weight: 0.0 },
        ],
    },
    WorkoutData {
        name: "Core Blaster",
        description: "Core focused workout",
        duration: 20.0,
        difficulty: Difficulty::Beginner,
        target_muscles: &[TargetMuscle::Core],
        exercises: &[
            EntryData { exercise: PLANK, sets: 4.0, reps: 60.0, weight: 0.0 },
            EntryData { exercise: PUSH_UPS, sets: 3.0, reps: 15.0, weight: 0.0 },
        ],
    },
];

const PROGRESS_LOGS: &[ProgressData] = &[
    ProgressData {
        workout: 0,
        date: "2024-01-15",
        duration: 45.0,
        calories_burned: 320.0,
        rating: 4,
        notes: "Felt good, push-ups getting easier",
    },
    ProgressData {
        workout: 0,
        date: "2024-01-18",
        duration: 42.0,
        calories_burned: 310.0,
        rating: 5,
        notes: "Great workout!",
    },
    ProgressData {
        workout: 1,
        date: "2024-01-16",
        duration: 65.0,
        calories_burned: 450.0,
        rating: 4,
        notes: "Tough but good",
    },
    ProgressData {
        workout: 2,
        date: "2024-01-17",
        duration: 55.0,
        calories_burned: 500.0,
        rating: 5,
        notes: "New PR on squats!",
    },
    ProgressData {
        workout: 3,
        date: "2024-01-19",
        duration: 30.0,
        calories_burned: 300.0,
        rating: 3,
        notes: "Tired today",
    },
    ProgressData {
        workout: 4,
        date: "2024-01-20",
        duration: 20.0,
        calories_burned: 150.0,
        rating: 4,
        notes: "Core is sore!",
    },
    ProgressData {
        workout: 0,
        date: "2024-01-22",
        duration: 45.0,
        calories_burned: 330.0,
        rating: 5,
        notes: "Increasing reps next time",
    },
    ProgressData {
        workout: 1,
        date: "2024-01-23",
        duration: 60.0,
        calories_burned: 440.0,
        rating: 4,
        notes: "Good pump",
    },
    ProgressData {
        workout: 2,
        date: "2024-01-24",
        duration: 50.0,
        calories_burned: 480.0,
        rating: 5,
        notes: "Feeling strong",
    },
    ProgressData {
        workout: 3,
        date: "2024-01-26",
        duration: 32.0,
        calories_burned: 320.0,
        rating: 4,
        notes: "Good cardio session",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The exercise catalog already had documents; nothing was written
    AlreadySeeded,
    Seeded {
        exercises: usize,
        workouts: usize,
        progress_logs: usize,
    },
}

/// Insert the sample catalog when the exercises table is empty.
///
/// Only the exercise count is consulted, so a database holding workouts or
/// progress logs but no exercises is seeded again.
pub async fn seed_if_empty(pool: &PgPool) -> Result<SeedOutcome> {
    let exercise_repo = ExerciseRepository::new(pool);

    if exercise_repo.count().await? > 0 {
        info!("Database already seeded, skipping");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    info!("Seeding database with sample data");

    let mut exercise_ids = Vec::with_capacity(EXERCISES.len());
    for doc in exercise_documents() {
        let exercise = exercise_repo.create(&doc).await?;
        exercise_ids.push(exercise.id);
    }

    let workout_repo = WorkoutRepository::new(pool);
    let mut workout_ids = Vec::with_capacity(WORKOUTS.len());
    for doc in workout_documents(&exercise_ids)? {
        let workout = workout_repo.create(&doc).await?;
        workout_ids.push(workout.id);
    }

    let progress_repo = ProgressRepository::new(pool);
    for doc in progress_documents(&workout_ids)? {
        progress_repo.create(&doc).await?;
    }

    let outcome = SeedOutcome::Seeded {
        exercises: exercise_ids.len(),
        workouts: workout_ids.len(),
        progress_logs: PROGRESS_LOGS.len(),
    };
    info!(
        exercises = exercise_ids.len(),
        workouts = workout_ids.len(),
        progress_logs = PROGRESS_LOGS.len(),
        "Database seeded"
    );

    Ok(outcome)
}

fn exercise_documents() -> Vec<NewExercise> {
    EXERCISES
        .iter()
        .map(|data| NewExercise {
            name: data.name.to_string(),
            category: data.category,
            muscle_group: data.muscle_group,
            equipment: data.equipment,
            difficulty: data.difficulty,
            instructions: data.instructions.to_string(),
            calories_per_minute: data.calories_per_minute,
        })
        .collect()
}

fn workout_documents(exercise_ids: &[Uuid]) -> Result<Vec<NewWorkout>> {
    WORKOUTS
        .iter()
        .map(|data| -> Result<NewWorkout> {
            let exercises = data
                .exercises
                .iter()
                .map(|entry| -> Result<WorkoutExercise> {
                    Ok(WorkoutExercise {
                        exercise_id: resolve(exercise_ids, entry.exercise, "exercise")?,
                        sets: entry.sets,
                        reps: entry.reps,
                        weight: entry.weight,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(NewWorkout {
                name: data.name.to_string(),
                description: data.description.to_string(),
                duration: data.duration,
                exercises,
                difficulty: data.difficulty,
                target_muscles: data.target_muscles.to_vec(),
                is_active: true,
            })
        })
        .collect()
}

fn progress_documents(workout_ids: &[Uuid]) -> Result<Vec<NewProgress>> {
    PROGRESS_LOGS
        .iter()
        .map(|data| -> Result<NewProgress> {
            Ok(NewProgress {
                workout_id: resolve(workout_ids, data.workout, "workout")?,
                date: parse_datetime(data.date).map_err(StorageError::Seed)?,
                duration: data.duration,
                calories_burned: data.calories_burned,
                notes: data.notes.to_string(),
                rating: data.rating,
                completed: true,
            })
        })
        .collect()
}

fn resolve(ids: &[Uuid], index: usize, kind: &str) -> Result<Uuid> {
    ids.get(index)
        .copied()
        .ok_or_else(|| StorageError::Seed(format!("no {kind} at index {index}")))
}
