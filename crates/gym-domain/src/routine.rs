//! Modelo de rutina: Routine → Series → RoutineExercise → WorkoutSet.
//!
//! Estas estructuras son la entrada (sólo lectura) del motor de sesión. Se
//! deserializan desde el JSON camelCase que produce el constructor de rutinas
//! (`restAfterSerie`, `trackingType`, ...). Los ids pueden llegar como número
//! o como string; internamente siempre se guardan como `String`.
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Acepta ids numéricos o string y los normaliza a `String`.
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AnyId {
        Num(u64),
        Str(String),
    }
    Ok(match AnyId::deserialize(deserializer)? {
        AnyId::Num(n) => n.to_string(),
        AnyId::Str(s) => s,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Standard,
    Superset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackingType {
    #[default]
    Reps,
    Time,
}

/// `Failure` significa "sin objetivo fijo, hasta el fallo".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    #[default]
    Working,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub set_type: SetType,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    /// Duración objetivo en segundos.
    #[serde(default)]
    pub time: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    /// Clave foránea al catálogo de ejercicios.
    #[serde(deserialize_with = "id_from_any")]
    pub exercise_id: String,
    #[serde(default)]
    pub tracking_type: TrackingType,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
    /// Descanso (segundos) entre sets de este ejercicio.
    #[serde(default)]
    pub rest_after_set: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub series_type: SeriesType,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
    /// Descanso (segundos) al terminar la serie completa.
    #[serde(default)]
    pub rest_after_serie: u32,
}

impl Series {
    pub fn is_superset(&self) -> bool {
        self.series_type == SeriesType::Superset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub series: Vec<Series>,
}

impl Routine {
    /// Parsea una rutina desde JSON.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let routine: Routine = serde_json::from_str(raw)?;
        if routine.name.trim().is_empty() {
            return Err(DomainError::Validation(format!("routine {} has an empty name", routine.id)));
        }
        Ok(routine)
    }

    /// Número total de sets en todas las series.
    pub fn total_sets(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.exercises.iter())
            .map(|e| e.sets.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_are_accepted() {
        let raw = r#"{
            "id": 7, "name": "Push",
            "series": [{
                "id": "s1", "type": "superset", "restAfterSerie": 60,
                "exercises": [{
                    "id": 1, "exerciseId": 42, "trackingType": "time", "restAfterSet": 0,
                    "sets": [{ "id": "a", "type": "failure", "weight": 20.5, "time": 30 }]
                }]
            }]
        }"#;
        let routine = Routine::from_json(raw).expect("valid routine");
        assert_eq!(routine.id, "7");
        let serie = &routine.series[0];
        assert!(serie.is_superset());
        assert_eq!(serie.exercises[0].exercise_id, "42");
        assert_eq!(serie.exercises[0].tracking_type, TrackingType::Time);
        assert_eq!(serie.exercises[0].sets[0].set_type, SetType::Failure);
        assert_eq!(serie.exercises[0].sets[0].reps, None);
        assert_eq!(routine.total_sets(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Routine::from_json(r#"{ "id": "r", "name": "  ", "series": [] }"#).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negative_rest_does_not_parse() {
        let raw = r#"{ "id": "r", "name": "x", "series": [{ "id": "s", "restAfterSerie": -5 }] }"#;
        assert!(matches!(Routine::from_json(raw), Err(DomainError::Serialization(_))));
    }
}
