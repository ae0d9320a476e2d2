//! Renderer capability
//!
//! The simulation never draws itself; it hands an immutable state to a
//! [`Renderer`] once per frame.

use glam::Vec2;

use crate::sim::{GameState, HostileKind};

/// RGBA colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
            a: 0xFF,
        }
    }

    pub const SKY: Color = Color::rgb(0x87CEEB);
    pub const PLAYER: Color = Color::rgb(0x1E90FF);
    pub const CHICKEN: Color = Color::rgb(0xFFD700);
    pub const ELITE_CHICKEN: Color = Color::rgb(0xD2042D);
    pub const BANANA: Color = Color::rgb(0xFFE135);
}

/// Drawing surface provided by the host
pub trait Renderer {
    fn clear(&mut self);
    /// `pos` is the top-left corner
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// `pos` is the centre
    fn draw_circle(&mut self, pos: Vec2, radius: f32, color: Color);
    fn present(&mut self);
}

/// Draw one frame of the side-scroller
pub fn draw_state<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    renderer.clear();

    let player = &state.player;
    renderer.draw_rect(player.pos, Vec2::splat(player.size), Color::PLAYER);

    for hostile in state.pool.hostiles.iter() {
        let color = match hostile.kind {
            HostileKind::Normal => Color::CHICKEN,
            HostileKind::Elite => Color::ELITE_CHICKEN,
        };
        renderer.draw_rect(hostile.pos, Vec2::splat(hostile.size), color);
    }

    for projectile in state.pool.projectiles.iter() {
        renderer.draw_circle(projectile.pos, projectile.radius, Color::BANANA);
    }

    renderer.present();
}

/// Renderer that records draw calls; used by tests and the headless runner
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub rects: Vec<(Vec2, Vec2, Color)>,
    pub circles: Vec<(Vec2, f32, Color)>,
    pub frames: u64,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.rects.clear();
        self.circles.clear();
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.rects.push((pos, size, color));
    }

    fn draw_circle(&mut self, pos: Vec2, radius: f32, color: Color) {
        self.circles.push((pos, radius, color));
    }

    fn present(&mut self) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} rects, {} circles",
            self.frames,
            self.rects.len(),
            self.circles.len()
        );
    }
}
