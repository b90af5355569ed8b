//! Raylib audio thread and the startup preload of every sound.
//!
//! The thread owns the audio device and all `Music` / `Sound` handles. It
//! drains [`AudioCmd`]s, answers with [`AudioMessage`]s and keeps looped
//! music streaming until [`AudioCmd::Shutdown`].

use std::path::Path;
use std::time::Duration;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

use zombieknight::events::audio::{AudioCmd, AudioMessage, FX_FILES, MUSIC_FILE, MUSIC_LEVEL};
use zombieknight::resources::audio::AudioBridge;

use super::assets::AssetError;

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            // Keep answering loads so startup reports a proper error.
            for cmd in rx_cmd.iter() {
                match cmd {
                    AudioCmd::LoadMusic { id, .. } => {
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                    AudioCmd::LoadFx { id, .. } => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                    AudioCmd::Shutdown => break,
                    _ => {}
                }
            }
            return;
        }
    };
    debug!("Audio thread starting");

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("Music '{}' loaded from {}", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::PauseMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.pause_stream();
                        playing.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::ResumeMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.resume_stream();
                        playing.insert(id.clone());
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("Sound '{}' loaded from {}", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => match sounds.get(&id) {
                    Some(sound) => sound.play(),
                    None => warn!("Sound '{}' is not loaded", id),
                },
                AudioCmd::Shutdown => break 'run,
            }
        }

        // Streams need regular pumping; finished looped tracks restart.
        for id in playing.iter() {
            let Some(music) = musics.get(id) else {
                continue;
            };
            if music.is_stream_playing() {
                music.update_stream();
            } else if looped.contains(id)
                && music.get_time_played() >= music.get_time_length() - 0.01
            {
                music.seek_stream(0.0);
                music.play_stream();
            }
        }

        std::thread::sleep(Duration::from_millis(10));
    }

    sounds.clear();
    musics.clear();
    debug!("Audio thread exiting");
}

/// Ask the audio thread to load the music and every effect, and wait until
/// each one has answered. A failed or missing answer is fatal.
pub fn preload_sounds(world: &World, assets_dir: &Path) -> Result<(), AssetError> {
    let bridge = world.resource::<AudioBridge>();
    let path = |rel: &str| assets_dir.join(rel).to_string_lossy().into_owned();

    bridge.send(AudioCmd::LoadMusic {
        id: MUSIC_LEVEL.to_string(),
        path: path(MUSIC_FILE),
    });
    for (id, file) in FX_FILES {
        bridge.send(AudioCmd::LoadFx {
            id: id.to_string(),
            path: path(file),
        });
    }

    for _ in 0..=FX_FILES.len() {
        let reply = bridge
            .rx_msg
            .recv_timeout(LOAD_TIMEOUT)
            .map_err(|e| AssetError::Sound {
                id: "<audio thread>".to_string(),
                reason: e.to_string(),
            })?;
        match reply {
            AudioMessage::MusicLoadFailed { id, error }
            | AudioMessage::FxLoadFailed { id, error } => {
                return Err(AssetError::Sound { id, reason: error });
            }
            other => debug!("Preload: {:?}", other),
        }
    }
    info!("Loaded {} sounds", FX_FILES.len() + 1);
    Ok(())
}
