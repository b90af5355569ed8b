//! Frame description for the rendering collaborator.
//!
//! [`build_render_queue`] rewrites [`RenderQueue`] every frame. While playing
//! it emits, back to front: the background, the level tiles, every animated
//! entity ordered by [`ZIndex`] and the HUD. On a pause overlay it emits a
//! black fill and the two overlay lines instead.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::components::animation::Animation;
use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::zindex::ZIndex;
use crate::resources::animationstore::{AnimationStore, BACKGROUND_TEXTURE, tile_texture};
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::level::LevelGeometry;
use crate::resources::renderqueue::{
    BLACK, DrawCmd, FontKind, GREEN, RenderQueue, TextAnchor, WHITE,
};
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;

pub const TITLE_TEXT: &str = "Zombie Knight";

/// Overlay lines shown while `state` is paused.
pub fn overlay_text(state: &GameStates) -> Option<(String, String)> {
    match state {
        GameStates::Title => Some((
            TITLE_TEXT.to_string(),
            "Press 'Enter' to Begin".to_string(),
        )),
        GameStates::RoundComplete => Some((
            "You survived the night!".to_string(),
            "Press 'Enter' to continue...".to_string(),
        )),
        GameStates::GameOver { final_score } => Some((
            format!("Game Over! Final Score: {final_score}"),
            "Press 'Enter' to play again...".to_string(),
        )),
        GameStates::Playing | GameStates::Quitting => None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn build_render_queue(
    mut queue: ResMut<RenderQueue>,
    state: Res<GameState>,
    screen: Res<ScreenSize>,
    geometry: Res<LevelGeometry>,
    store: Res<AnimationStore>,
    session: Res<Session>,
    sprites: Query<(&MapPosition, &BoxCollider, &Animation, &ZIndex)>,
    players: Query<&Player>,
) {
    queue.clear();

    if let Some((main, sub)) = overlay_text(state.get()) {
        let (cx, cy) = (screen.half_width(), screen.half_height());
        queue.push(DrawCmd::Fill { color: BLACK });
        queue.push(text(main, FontKind::Title, GREEN, TextAnchor::Center, cx, cy));
        queue.push(text(sub, FontKind::Title, WHITE, TextAnchor::Center, cx, cy + 64));
        return;
    }

    queue.push(DrawCmd::Image {
        texture: Arc::from(BACKGROUND_TEXTURE),
        dest: Aabb::new(0, 0, screen.w, screen.h),
        flip_x: false,
    });

    for tile in &geometry.ground {
        queue.push(DrawCmd::Image {
            texture: Arc::from(tile_texture(1)),
            dest: tile.aabb,
            flip_x: false,
        });
    }
    for platform in &geometry.platforms {
        queue.push(DrawCmd::Image {
            texture: Arc::from(tile_texture(platform.variant + 1)),
            dest: platform.aabb,
            flip_x: false,
        });
    }

    let mut to_draw: Vec<(ZIndex, Aabb, &Animation)> = sprites
        .iter()
        .map(|(position, collider, animation, z)| (*z, collider.aabb(position.pos), animation))
        .collect();
    to_draw.sort_by_key(|(z, _, _)| *z);
    for (_, dest, animation) in to_draw {
        if let Some(frame) = store.frame(&animation.clip, animation.index) {
            queue.push(DrawCmd::Image {
                texture: frame.texture.clone(),
                dest,
                flip_x: frame.flip_x,
            });
        }
    }

    let health = players.iter().next().map_or(0, |p| p.health);
    push_hud(&mut queue, &screen, &session, health);
}

fn push_hud(queue: &mut RenderQueue, screen: &ScreenSize, session: &Session, health: i32) {
    let (w, h) = (screen.w, screen.h);
    let hud = |s: String, anchor, at: IVec2| text(s, FontKind::Hud, WHITE, anchor, at.x, at.y);
    queue.push(hud(
        format!("Score: {}", session.score),
        TextAnchor::TopLeft,
        IVec2::new(10, h - 50),
    ));
    queue.push(hud(
        format!("Health: {health}"),
        TextAnchor::TopLeft,
        IVec2::new(10, h - 25),
    ));
    queue.push(text(
        TITLE_TEXT.to_string(),
        FontKind::Title,
        GREEN,
        TextAnchor::Center,
        w / 2,
        h - 25,
    ));
    queue.push(hud(
        format!("Night: {}", session.round),
        TextAnchor::TopRight,
        IVec2::new(w - 10, h - 50),
    ));
    queue.push(hud(
        format!("Sunrise In: {}", session.round_time),
        TextAnchor::TopRight,
        IVec2::new(w - 10, h - 25),
    ));
}

fn text(text: String, font: FontKind, color: [u8; 4], anchor: TextAnchor, x: i32, y: i32) -> DrawCmd {
    DrawCmd::Text {
        text,
        font,
        color,
        anchor,
        x,
        y,
    }
}
