//! Sonidos de fin de timer.
//!
//! `CuePlayer` resuelve un id lógico a una fuente reproducible, detiene
//! cualquier aviso en curso antes de empezar otro y libera el recurso cuando
//! la reproducción termina o es reemplazada.
use crate::errors::CueError;

/// Sonidos predefinidos (id, recurso).
pub const TIMER_SOUNDS: [(&str, &str); 4] = [("ring", "audios/bell-www.mp3"),
                                             ("level", "audios/next-level.mp3"),
                                             ("next", "audios/simple-next.mp3"),
                                             ("bell", "audios/simplebell-ring.mp3")];

/// Id que selecciona el sonido subido por el usuario.
pub const CUSTOM_SOUND_ID: &str = "custom";

const FALLBACK_SOUND_ID: &str = "bell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// Recurso empaquetado con la aplicación.
    Asset(&'static str),
    /// Audio personalizado (data URI base64).
    DataUri(String),
}

fn asset_for(sound_id: &str) -> Option<&'static str> {
    TIMER_SOUNDS.iter().find(|(id, _)| *id == sound_id).map(|(_, path)| *path)
}

/// Resuelve el id a una fuente. Ids desconocidos (o `custom` sin audio)
/// caen en `bell`.
pub fn resolve_sound(sound_id: &str, custom: Option<&str>) -> SoundSource {
    if sound_id == CUSTOM_SOUND_ID {
        if let Some(uri) = custom.filter(|u| !u.is_empty()) {
            return SoundSource::DataUri(uri.to_string());
        }
    }
    match asset_for(sound_id) {
        Some(path) => SoundSource::Asset(path),
        None => SoundSource::Asset(asset_for(FALLBACK_SOUND_ID).unwrap_or("audios/simplebell-ring.mp3")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(pub u64);

/// Backend de audio del host.
pub trait AudioOutput {
    /// Empieza a reproducir; puede ser rechazado por la plataforma.
    fn play(&mut self, source: &SoundSource) -> Result<PlaybackHandle, CueError>;
    /// Detiene y libera una reproducción en curso.
    fn stop(&mut self, handle: PlaybackHandle);
    /// Reproducciones que terminaron solas desde la última consulta. Un host
    /// sin aviso de fin devuelve siempre vacío.
    fn take_finished(&mut self) -> Vec<PlaybackHandle> {
        Vec::new()
    }
}

/// Backend mudo: acepta todo y no suena.
#[derive(Debug, Default)]
pub struct NoAudio {
    next: u64,
}

impl AudioOutput for NoAudio {
    fn play(&mut self, _source: &SoundSource) -> Result<PlaybackHandle, CueError> {
        self.next += 1;
        Ok(PlaybackHandle(self.next))
    }

    fn stop(&mut self, _handle: PlaybackHandle) {}
}

/// Reproductor exclusivo: como mucho un aviso sonando.
#[derive(Debug)]
pub struct CuePlayer<O: AudioOutput> {
    output: O,
    current: Option<PlaybackHandle>,
}

impl<O: AudioOutput> CuePlayer<O> {
    pub fn new(output: O) -> Self {
        Self { output, current: None }
    }

    /// Reproduce el sonido de timer, cortando el que estuviera sonando.
    pub fn play_timer_sound(&mut self, sound_id: &str, custom: Option<&str>) -> Result<PlaybackHandle, CueError> {
        let source = resolve_sound(sound_id, custom);
        self.stop();
        let handle = self.output.play(&source)?;
        self.current = Some(handle);
        Ok(handle)
    }

    /// Detiene el aviso en curso, si hay.
    pub fn stop(&mut self) {
        if let Some(handle) = self.current.take() {
            self.output.stop(handle);
        }
    }

    /// Notificación del host: la reproducción `handle` terminó.
    pub fn on_playback_ended(&mut self, handle: PlaybackHandle) {
        if self.current == Some(handle) {
            self.current = None;
        }
    }

    /// Libera los avisos que el host reporta como terminados.
    pub fn collect_finished(&mut self) {
        for handle in self.output.take_finished() {
            self.on_playback_ended(handle);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn available_sounds(&self) -> Vec<&'static str> {
        TIMER_SOUNDS.iter().map(|(id, _)| *id).collect()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
