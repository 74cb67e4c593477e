//! Colaboradores de consola: sin dispositivo de audio ni sintetizador, los
//! avisos se escriben en la terminal.
use std::fmt::Write as _;

use gym_core::cue::{PlaybackHandle, SoundSource, Voice};
use gym_core::{AudioOutput, CueError, SessionView, SpeechSynthesizer};

/// "Reproduce" sonidos emitiendo la campana de la terminal. La campana no
/// dura: cada reproducción se reporta como terminada en la siguiente
/// consulta.
#[derive(Debug, Default)]
pub struct ConsoleAudio {
    next_handle: u64,
    finished: Vec<PlaybackHandle>,
}

impl AudioOutput for ConsoleAudio {
    fn play(&mut self, source: &SoundSource) -> Result<PlaybackHandle, CueError> {
        self.next_handle += 1;
        match source {
            SoundSource::Asset(path) => log::info!("timer sound {path}"),
            SoundSource::DataUri(_) => log::info!("timer sound (custom upload)"),
        }
        print!("\x07");
        let handle = PlaybackHandle(self.next_handle);
        self.finished.push(handle);
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) {
        log::trace!("stop sound {}", handle.0);
    }

    fn take_finished(&mut self) -> Vec<PlaybackHandle> {
        std::mem::take(&mut self.finished)
    }
}

/// Voces de la consola: sólo cambian la etiqueta con la que se imprime cada
/// anuncio.
pub fn console_voices() -> Vec<Voice> {
    [("console:en", "English", "en-US"), ("console:es", "Español", "es-ES"), ("console:uk", "Українська", "uk-UA")]
        .into_iter()
        .map(|(uri, name, lang)| Voice { uri: uri.into(), name: name.into(), lang: lang.into() })
        .collect()
}

/// Convierte un locale POSIX (`es_ES.UTF-8`) a BCP-47 (`es-ES`). `C` y
/// `POSIX` no indican idioma.
pub fn locale_to_language(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next().unwrap_or_default().trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

/// Anuncia la cuenta atrás como texto.
#[derive(Debug, Default)]
pub struct ConsoleSpeech {
    language: Option<String>,
    voice: Option<Voice>,
}

impl ConsoleSpeech {
    pub fn new(language: Option<String>) -> Self {
        Self { language, voice: None }
    }

    /// Idioma a partir de `LANG`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("LANG").ok().as_deref().and_then(locale_to_language))
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }
}

impl SpeechSynthesizer for ConsoleSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(&mut self, text: &str) -> Result<(), CueError> {
        match &self.voice {
            Some(voice) => println!("  >> [{}] {text}", voice.name),
            None => println!("  >> {text}"),
        }
        Ok(())
    }

    fn voices(&self) -> Vec<Voice> {
        console_voices()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn use_voice(&mut self, voice: &Voice) {
        self.voice = Some(voice.clone());
    }
}

/// Bloque de texto con el estado del paso actual.
pub fn render_view(view: &SessionView) -> String {
    let mut out = String::new();
    let badge = if view.is_superset { " [superset]" } else { "" };
    let _ = writeln!(out,
                     "[{}/{}] {}{}{}",
                     view.step_number,
                     view.total_steps,
                     if view.is_resting { "Rest before " } else { "" },
                     view.title,
                     badge);

    if let Some(progress) = &view.progress {
        let _ = write!(out, "  Series {}/{}", progress.series.current, progress.series.total);
        if let Some(label) = &view.set_label {
            let _ = write!(out, " · {label}");
        }
        let _ = writeln!(out, " · {}", view.remaining_label);
    }

    if let Some(reps) = &view.reps_label {
        let _ = writeln!(out, "  Reps: {reps}");
    }
    if let Some(media) = &view.media {
        let _ = writeln!(out, "  Media: {}", media.url);
    }

    let target = view.target_clock.as_deref().map(|t| format!(" / {t}")).unwrap_or_default();
    let _ = writeln!(out,
                     "  Step {}{} · Total {} · Auto-next {}",
                     view.step_clock,
                     target,
                     view.total_clock,
                     if view.auto_next { "on" } else { "off" });
    let _ = write!(out, "  [Enter] {} · [p] Previous · [a] Auto-next · [q] Quit", view.action_label);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gym_core::{generate_steps, SessionBuilder};
    use gym_domain::{InMemoryExerciseCatalog, Routine, Settings};

    fn timed_set(seconds: u32) -> Routine {
        Routine::from_json(&format!(r#"{{ "id": "p", "name": "Plank", "series": [
            {{ "id": "s1", "exercises": [
                {{ "id": "e1", "exerciseId": "plank", "trackingType": "time", "sets": [{{ "id": "a", "time": {seconds} }}] }}
            ] }}
        ] }}"#)).unwrap()
    }

    #[test]
    fn renders_title_progress_and_action() {
        let routine = Routine::from_json(r#"{ "id": "r", "name": "Bench", "series": [
            { "id": "s1", "exercises": [
                { "id": "e1", "exerciseId": "bench", "restAfterSet": 30,
                  "sets": [{ "id": "a", "reps": 8 }, { "id": "b", "type": "failure" }] }
            ] }
        ] }"#).unwrap();
        let catalog = InMemoryExerciseCatalog::from_json(r#"[{ "id": "bench", "title": "Bench press" }]"#).unwrap();
        let mut session = SessionBuilder::from_plan("r", generate_steps(&routine)).start().unwrap();

        let text = render_view(&session.view(&catalog));
        assert!(text.starts_with("[1/3] Bench press"));
        assert!(text.contains("Set 1 of 2"));
        assert!(text.contains("Reps: 8"));
        assert!(text.contains("[Enter] Next Set"));

        session.next();
        session.next();
        let last = render_view(&session.view(&catalog));
        assert!(last.contains("Reps: Fail"));
        assert!(last.contains("[Enter] Finish Workout"));
    }

    #[test]
    fn console_audio_hands_out_distinct_handles() {
        let mut audio = ConsoleAudio::default();
        let a = audio.play(&SoundSource::Asset("audios/ring.mp3")).unwrap();
        let b = audio.play(&SoundSource::Asset("audios/ring.mp3")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn console_bell_is_released_after_it_rings() {
        let mut session = SessionBuilder::new(&timed_set(2)).audio(ConsoleAudio::default()).start().unwrap();
        session.advance_by(Duration::from_secs(60));
        assert_eq!(session.cue_player().output().next_handle, 1);
        assert!(!session.cue_player().is_playing());
    }

    #[test]
    fn preferred_voice_uri_reaches_console_speech() {
        let settings = Settings { voice_countdown_enabled: true,
                                  voice_countdown_voice_uri: Some("console:uk".into()),
                                  ..Settings::default() };
        let session = SessionBuilder::new(&timed_set(30)).settings(settings)
                                                          .speech(ConsoleSpeech::new(Some("es-ES".into())))
                                                          .start()
                                                          .unwrap();
        assert_eq!(session.speech().voice().map(|v| v.uri.as_str()), Some("console:uk"));
    }

    #[test]
    fn console_speech_falls_back_to_locale() {
        let settings = Settings { voice_countdown_enabled: true, ..Settings::default() };
        let session = SessionBuilder::new(&timed_set(30)).settings(settings)
                                                          .speech(ConsoleSpeech::new(locale_to_language("es_ES.UTF-8")))
                                                          .start()
                                                          .unwrap();
        assert_eq!(session.speech().voice().map(|v| v.lang.as_str()), Some("es-ES"));
    }

    #[test]
    fn posix_locales_map_to_bcp47() {
        assert_eq!(locale_to_language("uk_UA.UTF-8").as_deref(), Some("uk-UA"));
        assert_eq!(locale_to_language("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(locale_to_language("C"), None);
        assert_eq!(locale_to_language(""), None);
    }
}
