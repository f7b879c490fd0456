use std::collections::HashMap;

use color_realm_core::Cue;
use color_realm_rendering::AudioOutput;
use tracing::debug;

/// Audio sink that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SilentAudio;

impl AudioOutput for SilentAudio {
    fn play_cue(&mut self, cue: Cue) {
        debug!(?cue, "audio unavailable; cue skipped");
    }
}

/// Plays cues through macroquad's mixer.
#[cfg(feature = "audio")]
pub(crate) struct MacroquadAudio {
    sounds: HashMap<Cue, macroquad::audio::Sound>,
}

#[cfg(feature = "audio")]
impl AudioOutput for MacroquadAudio {
    fn play_cue(&mut self, cue: Cue) {
        match self.sounds.get(&cue) {
            Some(sound) => macroquad::audio::play_sound_once(*sound),
            None => debug!(?cue, "no sound loaded for cue"),
        }
    }
}

/// Decodes the provided cue sounds, falling back to silence when any fails.
///
/// Must be awaited from inside the macroquad window future.
#[cfg(feature = "audio")]
pub(crate) async fn open(cues: Option<&HashMap<Cue, Vec<u8>>>) -> Box<dyn AudioOutput> {
    let Some(cues) = cues else {
        return Box::new(SilentAudio);
    };

    let mut sounds = HashMap::with_capacity(cues.len());
    for (cue, bytes) in cues {
        match macroquad::audio::load_sound_from_bytes(bytes).await {
            Ok(sound) => {
                let _ = sounds.insert(*cue, sound);
            }
            Err(error) => {
                tracing::warn!(
                    ?cue,
                    %error,
                    "failed to decode sound; the game will run without sound effects"
                );
                return Box::new(SilentAudio);
            }
        }
    }
    Box::new(MacroquadAudio { sounds })
}

/// Returns a silent sink; this build was compiled without audio playback.
#[cfg(not(feature = "audio"))]
pub(crate) async fn open(cues: Option<&HashMap<Cue, Vec<u8>>>) -> Box<dyn AudioOutput> {
    if cues.is_some() {
        debug!("sound assets provided but audio playback is not compiled in");
    }
    Box::new(SilentAudio)
}
