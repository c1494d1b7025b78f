use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{HudBar, RenderableKind, SceneWorld, Vec2};

use super::transform::{playfield_fit, PlayfieldFit};
use super::{world_to_screen, Viewport};

const LETTERBOX_COLOR: [u8; 4] = [12, 14, 20, 255];
const PLAYFIELD_COLOR: [u8; 4] = [222, 201, 150, 255];
const ORDER_MARKER_COLOR: [u8; 4] = [255, 120, 120, 255];
const HUD_TRACK_COLOR: [u8; 4] = [40, 40, 48, 255];
const ORDER_MARKER_HALF_SIZE_WORLD: f32 = 6.0;
const ORDER_LABEL_GAP_PX: i32 = 2;
const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
// 3x5 digits, one row per byte, high bit on the left.
const DIGIT_GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];
const SHAKE_AMPLITUDE_WORLD: f32 = 4.0;
const HUD_MARGIN_PX: i32 = 8;
const HUD_BAR_HEIGHT_PX: i32 = 8;
const HUD_BAR_GAP_PX: i32 = 4;
const HUD_BAR_WIDTH_FRACTION: f32 = 0.3;

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render_world(&mut self, world: &SceneWorld) -> Result<(), Error> {
        let viewport = self.viewport;
        let Some(fit) = playfield_fit(world.playfield(), viewport) else {
            return Ok(());
        };
        let frame = self.pixels.frame_mut();
        draw_frame(frame, viewport, fit, world);
        self.pixels.render()
    }
}

fn draw_frame(frame: &mut [u8], viewport: Viewport, fit: PlayfieldFit, world: &SceneWorld) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&LETTERBOX_COLOR);
    }

    let playfield = world.playfield();
    fill_rect(
        frame,
        viewport,
        fit.offset_x.round() as i32,
        fit.offset_y.round() as i32,
        (fit.offset_x + playfield.x * fit.scale).round() as i32,
        (fit.offset_y + playfield.y * fit.scale).round() as i32,
        PLAYFIELD_COLOR,
    );

    let shake = world.camera_fx().shake_offset(SHAKE_AMPLITUDE_WORLD);
    let to_screen = |position: Vec2| {
        world_to_screen(
            Vec2::new(position.x + shake.x, position.y + shake.y),
            playfield,
            viewport,
        )
    };
    for entity in world.entities() {
        let RenderableKind::Solid { rgba } = entity.renderable.kind;
        let (cx, cy) = to_screen(entity.transform.position);
        let half = (entity.renderable.half_extent * fit.scale).round() as i32;
        fill_rect(frame, viewport, cx - half, cy - half, cx + half, cy + half, rgba);
    }

    // Each marker is labelled with its 1-based place in the queue.
    let marker_half = (ORDER_MARKER_HALF_SIZE_WORLD * fit.scale).round() as i32;
    let glyph_scale = (fit.scale.round() as i32).max(1);
    for (index, marker) in world.order_markers().iter().enumerate() {
        let (cx, cy) = to_screen(*marker);
        draw_square_outline(frame, viewport, cx, cy, marker_half, ORDER_MARKER_COLOR);
        draw_number(
            frame,
            viewport,
            cx + marker_half + ORDER_LABEL_GAP_PX,
            cy - marker_half,
            index + 1,
            glyph_scale,
            ORDER_MARKER_COLOR,
        );
    }

    draw_hud_bars(frame, viewport, fit, playfield, world.hud_bars());

    let fade = world.camera_fx().fade_alpha();
    if fade > 0.0 {
        darken(frame, fade);
    }
}

fn draw_number(
    frame: &mut [u8],
    viewport: Viewport,
    left: i32,
    top: i32,
    value: usize,
    scale: i32,
    color: [u8; 4],
) {
    let digits: Vec<usize> = value
        .to_string()
        .bytes()
        .map(|digit| usize::from(digit - b'0'))
        .collect();
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (slot, digit) in digits.into_iter().enumerate() {
        let glyph_left = left + slot as i32 * advance;
        for (row, bits) in DIGIT_GLYPHS[digit].iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    continue;
                }
                let x = glyph_left + column * scale;
                let y = top + row as i32 * scale;
                fill_rect(frame, viewport, x, y, x + scale - 1, y + scale - 1, color);
            }
        }
    }
}

fn draw_hud_bars(
    frame: &mut [u8],
    viewport: Viewport,
    fit: PlayfieldFit,
    playfield: Vec2,
    bars: &[HudBar],
) {
    let left = fit.offset_x.round() as i32 + HUD_MARGIN_PX;
    let width = (playfield.x * fit.scale * HUD_BAR_WIDTH_FRACTION).round() as i32;
    let mut top = fit.offset_y.round() as i32 + HUD_MARGIN_PX;
    for bar in bars {
        let bottom = top + HUD_BAR_HEIGHT_PX;
        fill_rect(frame, viewport, left, top, left + width, bottom, HUD_TRACK_COLOR);
        let filled = (width as f32 * bar.fraction.clamp(0.0, 1.0)).round() as i32;
        if filled > 0 {
            fill_rect(frame, viewport, left, top, left + filled, bottom, bar.rgba);
        }
        top = bottom + HUD_BAR_GAP_PX;
    }
}

fn darken(frame: &mut [u8], alpha: f32) {
    let keep = 1.0 - alpha.clamp(0.0, 1.0);
    for chunk in frame.chunks_exact_mut(4) {
        for channel in &mut chunk[..3] {
            *channel = (*channel as f32 * keep).round() as u8;
        }
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x as usize >= width {
        return;
    }
    let Some(pixel_offset) = (y as usize)
        .checked_mul(width)
        .and_then(|row| row.checked_add(x as usize))
    else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

fn fill_rect(
    frame: &mut [u8],
    viewport: Viewport,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    color: [u8; 4],
) {
    let left = left.max(0);
    let top = top.max(0);
    let right = right.min(viewport.width as i32 - 1);
    let bottom = bottom.min(viewport.height as i32 - 1);
    for y in top..=bottom {
        for x in left..=right {
            write_pixel_rgba_clipped(frame, viewport.width as usize, x, y, color);
        }
    }
}

fn draw_square_outline(
    frame: &mut [u8],
    viewport: Viewport,
    cx: i32,
    cy: i32,
    half_size: i32,
    color: [u8; 4],
) {
    let width = viewport.width as usize;
    let left = cx - half_size;
    let right = cx + half_size;
    let top = cy - half_size;
    let bottom = cy + half_size;

    for x in left..=right {
        write_pixel_rgba_clipped(frame, width, x, top, color);
        write_pixel_rgba_clipped(frame, width, x, bottom, color);
    }
    for y in top..=bottom {
        write_pixel_rgba_clipped(frame, width, left, y, color);
        write_pixel_rgba_clipped(frame, width, right, y, color);
    }
}
