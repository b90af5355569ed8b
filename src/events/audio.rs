//! Audio command and feedback messages.
//!
//! Gameplay systems write [`AudioCmd`] messages; `forward_audio_cmds` hands
//! them to the audio thread when one is running. The thread answers with
//! [`AudioMessage`]s, which the frontend uses to confirm that every sound
//! loaded before play starts.

use bevy_ecs::message::Message;

pub const FX_JUMP: &str = "jump";
pub const FX_SLASH: &str = "slash";
pub const FX_PORTAL: &str = "portal";
pub const FX_PLAYER_HIT: &str = "player_hit";
pub const FX_ZOMBIE_HIT: &str = "zombie_hit";
pub const FX_ZOMBIE_KICK: &str = "zombie_kick";
pub const FX_RUBY_PICKUP: &str = "ruby_pickup";
pub const MUSIC_LEVEL: &str = "level_music";

/// Sound effect ids and their files under the assets directory.
pub const FX_FILES: [(&str, &str); 7] = [
    (FX_JUMP, "sounds/jump_sound.wav"),
    (FX_SLASH, "sounds/slash_sound.wav"),
    (FX_PORTAL, "sounds/portal_sound.wav"),
    (FX_PLAYER_HIT, "sounds/player_hit.wav"),
    (FX_ZOMBIE_HIT, "sounds/zombie_hit.wav"),
    (FX_ZOMBIE_KICK, "sounds/zombie_kick.wav"),
    (FX_RUBY_PICKUP, "sounds/ruby_pickup.wav"),
];

pub const MUSIC_FILE: &str = "sounds/level_music.wav";

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    PauseMusic { id: String },
    ResumeMusic { id: String },
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

impl AudioCmd {
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }

    pub fn play_level_music() -> Self {
        AudioCmd::PlayMusic {
            id: MUSIC_LEVEL.to_string(),
            looped: true,
        }
    }
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}
