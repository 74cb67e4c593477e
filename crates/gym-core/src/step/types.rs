use gym_domain::{SetType, TrackingType};
use serde::{Deserialize, Serialize};

use crate::constants::{EXERCISE_TIMER, REST_TIMER};
use crate::hashing::plan_hash;

/// Objetivo de repeticiones. `ToFailure` es el centinela "infinito" de los
/// sets al fallo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepTarget {
    Count(u32),
    ToFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// Entre dos sets del mismo ejercicio.
    SetRest,
    /// Entre dos ejercicios distintos de la misma serie.
    ExerciseRest,
    /// Tras el último set del último ejercicio de la serie.
    SerieRest,
}

impl RestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestKind::SetRest => "set_rest",
            RestKind::ExerciseRest => "exercise_rest",
            RestKind::SerieRest => "serie_rest",
        }
    }
}

/// Datos que un paso de ejercicio necesita para mostrarse y saber cuándo
/// termina.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTarget {
    /// Distingue ejercicios repetidos dentro de una misma serie.
    pub exercise_index_in_series: usize,
    pub target_weight: f64,
    pub target_reps: Option<RepTarget>,
    pub target_time: Option<u32>,
    pub tracking_type: TrackingType,
    pub set_type: SetType,
    pub is_superset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Exercise(ExerciseTarget),
    Rest { rest_kind: RestKind, rest_time: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub series_id: String,
    pub exercise_id: String,
    pub set_id: String,
    /// Índice denso (0..n-1); único criterio de orden.
    pub step_index: usize,
    pub kind: StepKind,
}

impl Step {
    /// Nombre del tipo tal como lo ve la UI.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            StepKind::Exercise(_) => "exercise",
            StepKind::Rest { rest_kind, .. } => rest_kind.as_str(),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, StepKind::Rest { .. })
    }

    pub fn exercise(&self) -> Option<&ExerciseTarget> {
        match &self.kind {
            StepKind::Exercise(target) => Some(target),
            StepKind::Rest { .. } => None,
        }
    }

    pub fn rest_kind(&self) -> Option<RestKind> {
        match &self.kind {
            StepKind::Rest { rest_kind, .. } => Some(*rest_kind),
            StepKind::Exercise(_) => None,
        }
    }

    /// Duración objetivo en segundos, si el paso puede terminar solo.
    /// Los ejercicios por repeticiones nunca tienen una.
    pub fn target_duration(&self) -> Option<u32> {
        let target = match &self.kind {
            StepKind::Rest { rest_time, .. } => Some(*rest_time),
            StepKind::Exercise(t) => match t.tracking_type {
                TrackingType::Time => t.target_time,
                TrackingType::Reps => None,
            },
        };
        target.filter(|secs| *secs > 0)
    }

    /// Timer cuyo valor se compara con `target_duration`.
    pub fn tracking_timer(&self) -> Option<&'static str> {
        match &self.kind {
            StepKind::Rest { .. } => Some(REST_TIMER),
            StepKind::Exercise(t) if t.tracking_type == TrackingType::Time => Some(EXERCISE_TIMER),
            StepKind::Exercise(_) => None,
        }
    }

    pub fn is_timed_exercise(&self) -> bool {
        matches!(&self.kind, StepKind::Exercise(t) if t.tracking_type == TrackingType::Time)
    }
}

/// Lista inmutable de pasos más su hash estable.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    steps: Vec<Step>,
    plan_hash: String,
}

impl StepPlan {
    pub fn new(steps: Vec<Step>) -> Self {
        let plan_hash = plan_hash(&steps);
        Self { steps, plan_hash }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn plan_hash(&self) -> &str {
        &self.plan_hash
    }

    /// Cantidad de pasos de ejercicio (los descansos no cuentan).
    pub fn exercise_step_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_rest()).count()
    }
}
