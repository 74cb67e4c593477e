//! Preferencias persistidas que el motor lee al iniciar la sesión.
//!
//! La persistencia en sí es externa; aquí sólo vive la forma del documento y
//! la regla de mezcla: un JSON parcial se aplica sobre los valores por
//! defecto (claves ausentes conservan el default).
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_TIMER_SOUND: &str = "bell";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_next: bool,
    pub timer_sound_enabled: bool,
    /// `bell`, `level`, `next`, `ring` o `custom`.
    pub timer_sound_id: String,
    /// Data URI del sonido subido por el usuario (sólo con `custom`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_timer_sound: Option<String>,
    pub voice_countdown_enabled: bool,
    #[serde(rename = "voiceCountdownVoiceURI", skip_serializing_if = "Option::is_none")]
    pub voice_countdown_voice_uri: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { auto_next: false,
               timer_sound_enabled: true,
               timer_sound_id: DEFAULT_TIMER_SOUND.to_string(),
               custom_timer_sound: None,
               voice_countdown_enabled: false,
               voice_countdown_voice_uri: None }
    }
}

impl Settings {
    /// Mezcla un documento JSON (posiblemente parcial) sobre los defaults.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let s = Settings::from_json(r#"{ "autoNext": true, "voiceCountdownVoiceURI": "urn:es" }"#).unwrap();
        assert!(s.auto_next);
        assert!(s.timer_sound_enabled);
        assert_eq!(s.timer_sound_id, "bell");
        assert_eq!(s.voice_countdown_voice_uri.as_deref(), Some("urn:es"));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }
}
