//! Avisos de audio y voz.
//!
//! - `countdown`: selección pura del aviso de cuenta atrás y su dedup por paso.
//! - `sound`: resolución de sonidos de timer y reproducción exclusiva.
//! - `voice`: contrato de síntesis de voz y elección de voz.

pub mod countdown;
pub mod sound;
pub mod voice;

pub use countdown::{select_cue, AnnouncedCues, CountdownCue, SECOND_CHECKPOINTS};
pub use sound::{resolve_sound, AudioOutput, CuePlayer, NoAudio, PlaybackHandle, SoundSource, CUSTOM_SOUND_ID, TIMER_SOUNDS};
pub use voice::{select_voice, SilentSpeech, SpeechSynthesizer, Voice};
