//! Calculadora de progreso: proyección de sólo lectura sobre la lista de
//! pasos.
//!
//! Para un paso cualquiera deriva su posición dentro de la jerarquía
//! serie / ejercicio / set, sin mutar nada. Los descansos sólo heredan el
//! progreso de serie.
use indexmap::IndexSet;
use serde::Serialize;

use crate::step::{Step, StepPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// 1-based.
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub series: Counter,
    pub exercise: Option<Counter>,
    pub set: Option<Counter>,
}

impl StepProgress {
    /// Etiqueta "Set N of M" para pasos de ejercicio.
    pub fn set_label(&self) -> Option<String> {
        self.set.map(|c| format!("Set {} of {}", c.current, c.total))
    }
}

/// Progreso del paso `index`; `None` si el índice está fuera de rango.
pub fn compute_progress(steps: &[Step], index: usize) -> Option<StepProgress> {
    let step = steps.get(index)?;

    let all_series: IndexSet<&str> = steps.iter().map(|s| s.series_id.as_str()).collect();
    let seen_series: IndexSet<&str> = steps[..=index].iter().map(|s| s.series_id.as_str()).collect();
    let series = Counter { current: seen_series.len(),
                           total: all_series.len() };

    let Some(target) = step.exercise() else {
        return Some(StepProgress { series, exercise: None, set: None });
    };

    let in_series = || {
        steps.iter()
             .filter(move |s| s.series_id == step.series_id)
             .filter_map(|s| s.exercise().map(|t| (s, t.exercise_index_in_series)))
    };

    let exercises: IndexSet<usize> = in_series().map(|(_, idx)| idx).collect();
    let exercise = exercises.get_index_of(&target.exercise_index_in_series)
                            .map(|pos| Counter { current: pos + 1,
                                                 total: exercises.len() });

    let sets: Vec<usize> = in_series().filter(|(_, idx)| *idx == target.exercise_index_in_series)
                                      .map(|(s, _)| s.step_index)
                                      .collect();
    let set = sets.iter()
                  .position(|i| *i == step.step_index)
                  .map(|pos| Counter { current: pos + 1,
                                       total: sets.len() });

    Some(StepProgress { series, exercise, set })
}

/// Pasos de ejercicio estrictamente posteriores a `index`.
pub fn remaining_exercise_steps(steps: &[Step], index: usize) -> usize {
    steps.iter()
         .skip(index.saturating_add(1))
         .filter(|s| !s.is_rest())
         .count()
}

/// Tabla de progreso precalculada para un plan, memoizada por `plan_hash`.
#[derive(Debug, Clone)]
pub struct ProgressTable {
    plan_hash: String,
    entries: Vec<StepProgress>,
}

impl ProgressTable {
    pub fn build(plan: &StepPlan) -> Self {
        let entries = (0..plan.len()).filter_map(|i| compute_progress(plan.steps(), i))
                                     .collect();
        Self { plan_hash: plan.plan_hash().to_string(),
               entries }
    }

    /// `true` si la tabla fue construida para este plan.
    pub fn matches(&self, plan: &StepPlan) -> bool {
        self.plan_hash == plan.plan_hash()
    }

    pub fn get(&self, index: usize) -> Option<StepProgress> {
        self.entries.get(index).copied()
    }
}
