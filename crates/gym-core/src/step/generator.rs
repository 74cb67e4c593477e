//! Generador de pasos: Routine → StepPlan.
//!
//! Recorre series, ejercicios y sets en el orden de la rutina. Tras cada set
//! se decide, como mucho, un descanso:
//! - `SetRest` entre sets del mismo ejercicio (`rest_after_set > 0`).
//! - `ExerciseRest` al cambiar de ejercicio dentro de una serie estándar,
//!   con la duración del propio ejercicio (`rest_after_set`).
//! - `SerieRest` tras el último set del último ejercicio (`rest_after_serie > 0`).
//!
//! En una superserie los ejercicios van encadenados: nunca se emite
//! `ExerciseRest`. Un descanso de duración 0 no genera paso.
use gym_domain::{Routine, RoutineExercise, Series, SetType, WorkoutSet};

use super::types::{ExerciseTarget, RepTarget, RestKind, Step, StepKind, StepPlan};

pub fn generate_steps(routine: &Routine) -> StepPlan {
    let mut steps: Vec<Step> = Vec::with_capacity(routine.total_sets() * 2);
    for series in &routine.series {
        push_series(&mut steps, series);
    }
    log::debug!("routine {} flattened into {} steps", routine.id, steps.len());
    StepPlan::new(steps)
}

fn push_series(steps: &mut Vec<Step>, series: &Series) {
    // Ejercicios sin sets no producen pasos; el "último ejercicio" es el
    // último que sí aporta alguno.
    let Some(last_exercise) = series.exercises.iter().rposition(|e| !e.sets.is_empty()) else {
        return;
    };

    for (ex_idx, exercise) in series.exercises.iter().enumerate() {
        let last_set = exercise.sets.len().saturating_sub(1);
        for (set_idx, set) in exercise.sets.iter().enumerate() {
            push_step(steps, series, exercise, set, exercise_kind(series, exercise, ex_idx, set));

            let is_last_set = set_idx == last_set;
            let is_last_exercise = ex_idx == last_exercise;

            if !is_last_set {
                if exercise.rest_after_set > 0 {
                    push_step(steps, series, exercise, set, rest(RestKind::SetRest, exercise.rest_after_set));
                }
            } else if !is_last_exercise {
                if exercise.rest_after_set > 0 && !series.is_superset() {
                    push_step(steps, series, exercise, set, rest(RestKind::ExerciseRest, exercise.rest_after_set));
                }
            } else if series.rest_after_serie > 0 {
                push_step(steps, series, exercise, set, rest(RestKind::SerieRest, series.rest_after_serie));
            }
        }
    }
}

fn exercise_kind(series: &Series, exercise: &RoutineExercise, ex_idx: usize, set: &WorkoutSet) -> StepKind {
    let target_reps = match set.set_type {
        SetType::Failure => Some(RepTarget::ToFailure),
        SetType::Working => set.reps.map(RepTarget::Count),
    };
    StepKind::Exercise(ExerciseTarget { exercise_index_in_series: ex_idx,
                                        target_weight: set.weight.unwrap_or(0.0),
                                        target_reps,
                                        target_time: set.time,
                                        tracking_type: exercise.tracking_type,
                                        set_type: set.set_type,
                                        is_superset: series.is_superset() })
}

fn rest(rest_kind: RestKind, rest_time: u32) -> StepKind {
    StepKind::Rest { rest_kind, rest_time }
}

fn push_step(steps: &mut Vec<Step>, series: &Series, exercise: &RoutineExercise, set: &WorkoutSet, kind: StepKind) {
    steps.push(Step { series_id: series.id.clone(),
                      exercise_id: exercise.exercise_id.clone(),
                      set_id: set.id.clone(),
                      step_index: steps.len(),
                      kind });
}
