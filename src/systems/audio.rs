//! Systems bridging gameplay audio messages with the audio thread.
//!
//! Gameplay writes [`AudioCmd`] messages. Once per frame:
//!
//! - [`forward_audio_cmds`] hands them to the audio thread when an
//!   [`AudioBridge`] exists; headless runs simply drop them
//! - [`poll_audio_messages`] drains the thread's replies into
//!   [`Messages<AudioMessage>`] without blocking
//! - [`log_audio_messages`] reports failed loads
//! - [`update_bevy_audio_cmds`] and [`update_bevy_audio_messages`] advance
//!   both message queues
//!
//! The thread itself belongs to the frontend; see
//! [`crate::resources::audio::setup_audio`].

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;

pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Mark everything read so the queue does not pile up.
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        bridge.send(cmd.clone());
    }
}

pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoadFailed { id, error } | AudioMessage::FxLoadFailed { id, error } => {
                warn!("Audio '{}' failed to load: {}", id, error);
            }
            other => debug!("Audio: {:?}", other),
        }
    }
}

pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}
