//! Simulation clock resource.
//!
//! Time advances in whole ticks, one per rendered frame, and only while the
//! game is playing. Durations such as the zombie dead timer and the round
//! countdown are counted against [`WorldTime::ticks_per_second`].

use bevy_ecs::prelude::Resource;

pub const TICKS_PER_SECOND: u32 = 60;

/// Fixed-step simulation clock. One tick per rendered frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Ticks simulated since startup, paused ticks excluded.
    pub ticks: u64,
    pub ticks_per_second: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            ticks: 0,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}
