//! Draw commands produced by the simulation for the rendering collaborator.
//!
//! `systems::render::build_render_queue` rebuilds the queue every frame in
//! back-to-front order. The frontend replays it without further sorting.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;

use crate::components::boxcollider::Aabb;

pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const GREEN: Rgba = [25, 200, 25, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Large title font, 48 px.
    Title,
    /// HUD font, 24 px.
    Hud,
}

impl FontKind {
    pub fn size(&self) -> i32 {
        match self {
            FontKind::Title => 48,
            FontKind::Hud => 24,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            FontKind::Title => "fonts/Poultrygeist.ttf",
            FontKind::Hud => "fonts/Pixel.ttf",
        }
    }
}

/// Which point of the text box sits at the command's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopRight,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole screen.
    Fill { color: Rgba },
    /// Draw an image scaled into `dest`.
    Image {
        texture: Arc<str>,
        dest: Aabb,
        flip_x: bool,
    },
    Text {
        text: String,
        font: FontKind,
        color: Rgba,
        anchor: TextAnchor,
        x: i32,
        y: i32,
    },
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RenderQueue {
    pub cmds: Vec<DrawCmd>,
}

impl RenderQueue {
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    /// Text of every text command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
