//! Replays the [`RenderQueue`] with raylib.

use raylib::prelude::*;

use zombieknight::resources::renderqueue::{DrawCmd, Rgba, RenderQueue, TextAnchor};

use super::assets::{FontStore, TextureStore};

const TEXT_SPACING: f32 = 1.0;

fn color(rgba: Rgba) -> Color {
    Color::new(rgba[0], rgba[1], rgba[2], rgba[3])
}

pub fn draw_queue(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    textures: &TextureStore,
    fonts: &FontStore,
    queue: &RenderQueue,
) {
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::BLACK);

    for cmd in queue.iter() {
        match cmd {
            DrawCmd::Fill { color: fill } => d.clear_background(color(*fill)),
            DrawCmd::Image {
                texture,
                dest,
                flip_x,
            } => {
                let Some(tex) = textures.get(texture) else {
                    continue;
                };
                let (w, h) = (tex.width as f32, tex.height as f32);
                // A negative source width mirrors the image.
                let src = Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: if *flip_x { -w } else { w },
                    height: h,
                };
                let dest = Rectangle {
                    x: dest.x as f32,
                    y: dest.y as f32,
                    width: dest.w as f32,
                    height: dest.h as f32,
                };
                d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            }
            DrawCmd::Text {
                text,
                font,
                color: tint,
                anchor,
                x,
                y,
            } => {
                let f = fonts.get(*font);
                let size = font.size() as f32;
                let extent = raylib::core::text::measure_text_ex(f, text, size, TEXT_SPACING);
                let (x, y) = (*x as f32, *y as f32);
                let position = match anchor {
                    TextAnchor::TopLeft => Vector2::new(x, y),
                    TextAnchor::TopRight => Vector2::new(x - extent.x, y),
                    TextAnchor::Center => Vector2::new(x - extent.x / 2.0, y - extent.y / 2.0),
                };
                d.draw_text_ex(f, text, position, size, TEXT_SPACING, color(*tint));
            }
        }
    }
}
