//! Catálogo de ejercicios (colaborador externo del motor).
//!
//! El motor de sesión sólo necesita resolver `exercise_id -> Exercise` para
//! mostrar título y media; un fallo de búsqueda nunca es un error.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Youtube,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(deserialize_with = "crate::routine::id_from_any")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// Búsqueda por id en el catálogo de ejercicios.
pub trait ExerciseCatalog {
    fn find_exercise_by_id(&self, id: &str) -> Option<&Exercise>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryExerciseCatalog {
    inner: HashMap<String, Exercise>,
}

impl InMemoryExerciseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, exercise: Exercise) {
        self.inner.insert(exercise.id.clone(), exercise);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Carga un catálogo desde un arreglo JSON de ejercicios.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let list: Vec<Exercise> = serde_json::from_str(raw)?;
        Ok(list.into_iter().collect())
    }
}

impl FromIterator<Exercise> for InMemoryExerciseCatalog {
    fn from_iter<I: IntoIterator<Item = Exercise>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for exercise in iter {
            catalog.insert(exercise);
        }
        catalog
    }
}

impl ExerciseCatalog for InMemoryExerciseCatalog {
    fn find_exercise_by_id(&self, id: &str) -> Option<&Exercise> {
        self.inner.get(id)
    }
}
