//! Animation cursor and clip addressing.
//!
//! Every animated entity carries an [`Animation`] cursor: the clip it is
//! currently showing and a fractional frame index. Clips themselves live in
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) and are
//! addressed by a [`ClipKey`] made of the actor, the action being played and
//! the facing. One cursor is shared by every clip an entity plays, so an
//! overlay clip (jump, attack) continues from wherever the base clip left it.

use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Right only while moving right; standing still counts as facing left.
    pub fn from_velocity(vx: f32) -> Self {
        if vx > 0.0 { Facing::Right } else { Facing::Left }
    }

    /// Facing from a horizontal direction sign (`-1` or `1`).
    pub fn from_direction(direction: i32) -> Self {
        if direction < 0 { Facing::Left } else { Facing::Right }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Run,
    Jump,
    Attack,
    Walk,
    Die,
    Rise,
    /// Decorative loop (portals, spawner, pickup) or a single still frame.
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZombieKind {
    Boy,
    Girl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalColor {
    Green,
    Purple,
}

/// Which sprite sheet family a clip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Player,
    Zombie(ZombieKind),
    Projectile,
    Pickup,
    Portal(PortalColor),
    Spawner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipKey {
    pub actor: Actor,
    pub action: Action,
    pub facing: Facing,
}

impl ClipKey {
    pub const fn new(actor: Actor, action: Action, facing: Facing) -> Self {
        Self {
            actor,
            action,
            facing,
        }
    }

    /// Clip without a facing variant.
    pub const fn looping(actor: Actor) -> Self {
        Self::new(actor, Action::Loop, Facing::Right)
    }
}

/// Playback cursor: current clip and fractional frame index.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Animation {
    pub clip: ClipKey,
    pub index: f32,
}

impl Animation {
    pub fn new(clip: ClipKey) -> Self {
        Self { clip, index: 0.0 }
    }

    pub fn with_index(mut self, index: f32) -> Self {
        self.index = index;
        self
    }

    /// Switch to `clip` (keeping the index) and advance it by `speed`.
    ///
    /// Returns `true` when the clip completed this tick.
    pub fn play(&mut self, clip: ClipKey, len: usize, speed: f32) -> bool {
        self.clip = clip;
        self.advance(len, speed)
    }

    /// Advance the cursor by `speed` frames.
    ///
    /// While the index is below the last frame it grows by `speed`; once it
    /// has reached the last frame the next call wraps it to zero and reports
    /// completion. An empty clip never completes.
    pub fn advance(&mut self, len: usize, speed: f32) -> bool {
        if len == 0 {
            return false;
        }
        let last = (len - 1) as f32;
        if self.index < last {
            self.index += speed;
            false
        } else {
            self.index = 0.0;
            true
        }
    }

    /// Pin the cursor to the last frame of a clip of `len` frames.
    pub fn freeze_on_last(&mut self, len: usize) {
        self.index = len.saturating_sub(1) as f32;
    }

    pub fn restart(&mut self) {
        self.index = 0.0;
    }

    /// Frame to display: the index truncated toward zero and kept inside the clip.
    pub fn frame(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.index.max(0.0) as usize).min(len - 1)
    }
}
