//! Síntesis de voz (colaborador externo).
//!
//! Al arrancar, la sesión consulta las voces del host y le indica cuál usar
//! (`select_voice`); después sólo llama a `speak`.

use crate::errors::CueError;

pub trait SpeechSynthesizer {
    fn is_supported(&self) -> bool;
    fn speak(&mut self, text: &str) -> Result<(), CueError>;

    /// Voces instaladas en el host.
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    /// Idioma preferido del host (BCP-47), si lo conoce.
    fn language(&self) -> Option<String> {
        None
    }

    /// Fija la voz de los anuncios siguientes.
    fn use_voice(&mut self, _voice: &Voice) {}
}

/// Host sin síntesis de voz.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

impl SpeechSynthesizer for SilentSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str) -> Result<(), CueError> {
        Err(CueError::SpeechUnavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub uri: String,
    pub name: String,
    /// BCP-47, p.ej. `es-ES`.
    pub lang: String,
}

/// Elige voz: la preferida por URI, luego coincidencia exacta de idioma,
/// luego por prefijo (`es` → `es-MX`) y por último la primera disponible.
pub fn select_voice<'a>(voices: &'a [Voice], language: Option<&str>, preferred_uri: Option<&str>) -> Option<&'a Voice> {
    if let Some(v) = preferred_uri.and_then(|uri| voices.iter().find(|v| v.uri == uri)) {
        return Some(v);
    }
    if let Some(lang) = language.map(str::to_lowercase) {
        let exact = voices.iter().find(|v| v.lang.to_lowercase() == lang);
        let prefix = || voices.iter().find(|v| v.lang.to_lowercase().starts_with(&lang));
        if let Some(v) = exact.or_else(prefix) {
            return Some(v);
        }
    }
    voices.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![Voice { uri: "urn:en".into(), name: "Daniel".into(), lang: "en-GB".into() },
             Voice { uri: "urn:mx".into(), name: "Paulina".into(), lang: "es-MX".into() },
             Voice { uri: "urn:es".into(), name: "Monica".into(), lang: "es-ES".into() }]
    }

    #[test]
    fn preferred_uri_wins() {
        let v = voices();
        assert_eq!(select_voice(&v, Some("es-ES"), Some("urn:en")).unwrap().uri, "urn:en");
    }

    #[test]
    fn exact_language_then_prefix_then_first() {
        let v = voices();
        assert_eq!(select_voice(&v, Some("ES-es"), None).unwrap().uri, "urn:es");
        assert_eq!(select_voice(&v, Some("es"), None).unwrap().uri, "urn:mx");
        assert_eq!(select_voice(&v, Some("fr"), Some("urn:missing")).unwrap().uri, "urn:en");
        assert!(select_voice(&[], Some("es"), None).is_none());
    }

    #[test]
    fn silent_speech_reports_unsupported() {
        let mut s = SilentSpeech;
        assert!(!s.is_supported());
        assert_eq!(s.speak("hola"), Err(CueError::SpeechUnavailable));
    }
}
