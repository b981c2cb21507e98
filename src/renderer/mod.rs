//! Rendering contract
//!
//! The simulation only ever asks for filled rectangles. Backends implement
//! `Renderer`; entities describe themselves through `Renders`.

pub mod recorder;

pub use recorder::{DrawCommand, FrameRecorder};

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::sim::{Bullet, Enemy, EntityView, HasBoundingBox, Platform, Player, Rect, SessionState};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Frame background
pub const BACKGROUND: Color = Color::BLACK;

/// A drawing backend
pub trait Renderer {
    /// Start a frame filled with `color`
    fn clear(&mut self, color: Color) -> Result<(), PlatformError>;
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError>;
    /// Finish and show the frame
    fn present(&mut self) -> Result<(), PlatformError>;
}

/// Something that draws itself as its bounding box
pub trait Renders: HasBoundingBox {
    fn color(&self) -> Color;

    fn draw(&self, renderer: &mut dyn Renderer) -> Result<(), PlatformError> {
        renderer.draw_rect(self.bounds(), self.color())
    }
}

impl Renders for Player {
    fn color(&self) -> Color {
        Color::BLUE
    }
}

impl Renders for Platform {
    fn color(&self) -> Color {
        Color::GREEN
    }
}

impl Renders for Bullet {
    fn color(&self) -> Color {
        Color::RED
    }
}

impl Renders for Enemy {
    fn color(&self) -> Color {
        Color::WHITE
    }
}

impl Renders for EntityView<'_> {
    fn color(&self) -> Color {
        match self {
            EntityView::Player(p) => p.color(),
            EntityView::Platform(p) => p.color(),
            EntityView::Bullet(b) => b.color(),
            EntityView::Enemy(e) => e.color(),
        }
    }
}

/// Draw one frame: clear, every entity back-to-front, present
pub fn render_frame(
    state: &SessionState,
    renderer: &mut dyn Renderer,
) -> Result<(), PlatformError> {
    renderer.clear(BACKGROUND)?;
    for entity in state.iter_draw_order() {
        entity.draw(renderer)?;
    }
    renderer.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityId;
    use glam::Vec2;

    #[test]
    fn test_render_frame_draw_order() {
        let mut state = SessionState::new();
        state.player_shoot(Vec2::new(0.0, 0.0), 1000);
        let mut recorder = FrameRecorder::default();

        render_frame(&state, &mut recorder).unwrap();

        let frame = recorder.last_frame().unwrap();
        assert_eq!(frame.first(), Some(&DrawCommand::Clear(BACKGROUND)));
        let colors: Vec<_> = frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rect { color, .. } => Some(*color),
                DrawCommand::Clear(_) => None,
            })
            .collect();
        assert_eq!(
            colors,
            vec![
                Color::BLUE,
                Color::GREEN,
                Color::GREEN,
                Color::GREEN,
                Color::WHITE,
                Color::RED,
            ]
        );
        assert_eq!(recorder.frames_presented(), 1);
    }

    #[test]
    fn test_entity_draws_its_bounds() {
        let platform = Platform::new(EntityId(9), 10.0, 20.0, 30.0, 5.0);
        let mut recorder = FrameRecorder::default();
        recorder.clear(BACKGROUND).unwrap();
        platform.draw(&mut recorder).unwrap();
        recorder.present().unwrap();

        assert_eq!(
            recorder.last_frame().unwrap()[1],
            DrawCommand::Rect {
                rect: Rect::new(10.0, 20.0, 30.0, 5.0),
                color: Color::GREEN,
            }
        );
    }
}
