//! Simulation clock.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! by one fixed tick. Only scheduled while playing, so paused overlays do not
//! count toward elapsed time.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

pub fn advance_world_time(mut time: ResMut<WorldTime>) {
    time.ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_run() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(advance_world_time);
        for _ in 0..90 {
            schedule.run(&mut world);
        }
        let time = world.resource::<WorldTime>();
        assert_eq!(time.ticks, 90);
    }
}
