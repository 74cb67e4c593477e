// gym-domain library entry point
pub mod error;
pub mod exercise;
pub mod routine;
pub mod settings;

pub use error::DomainError;
pub use exercise::{Exercise, ExerciseCatalog, InMemoryExerciseCatalog, Media, MediaKind};
pub use routine::{Routine, RoutineExercise, Series, SeriesType, SetType, TrackingType, WorkoutSet};
pub use settings::Settings;
