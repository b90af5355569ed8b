//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`]. Call [`shutdown_audio`] during teardown to
//! stop the thread and free audio resources. Without a bridge (headless runs,
//! tests) audio commands are still written as messages but go nowhere.

use crate::events::audio::{AudioCmd, AudioMessage};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{info, warn};

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: Option<std::thread::JoinHandle<()>>,
}

impl AudioBridge {
    /// Send a command, ignoring a thread that already exited.
    pub fn send(&self, cmd: AudioCmd) {
        if self.tx_cmd.send(cmd).is_err() {
            warn!("Audio thread is gone, dropping command");
        }
    }
}

/// Spawn the audio thread running `thread_main` and register the bridge.
pub fn setup_audio<F>(world: &mut World, thread_main: F)
where
    F: FnOnce(Receiver<AudioCmd>, Sender<AudioMessage>) + Send + 'static,
{
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || thread_main(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle: Some(handle),
    });
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(mut bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        if let Some(handle) = bridge.handle.take() {
            if handle.join().is_err() {
                warn!("Audio thread panicked");
            }
        }
        info!("Audio thread stopped");
    }
}
