//! Pasos: la unidad atómica y plana de una sesión.
//!
//! Una rutina se aplana una sola vez en un `StepPlan` inmutable. La
//! navegación sólo mueve un índice sobre esa lista. Este módulo define:
//! - `Step` y `StepKind`: suma etiquetada (ejercicio o descanso).
//! - `generate_steps`: función pura Routine → StepPlan.

mod generator;
mod types;

pub use generator::generate_steps;
pub use types::{ExerciseTarget, RepTarget, RestKind, Step, StepKind, StepPlan};
