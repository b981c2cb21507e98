//! Headless renderer that records draw calls
//!
//! Used by the native binary (no window) and by tests to inspect frames.

use super::{Color, Renderer};
use crate::error::PlatformError;
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect { rect: Rect, color: Color },
}

/// Keeps the frame in progress and the last presented frame
#[derive(Debug, Default)]
pub struct FrameRecorder {
    current: Vec<DrawCommand>,
    last: Option<Vec<DrawCommand>>,
    frames: u64,
    /// Fail `present` once this many frames were shown (simulates a lost device)
    fail_after: Option<u64>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose `present` errors after `frames` successful frames
    pub fn failing_after(frames: u64) -> Self {
        Self {
            fail_after: Some(frames),
            ..Self::default()
        }
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.last.as_deref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Renderer for FrameRecorder {
    fn clear(&mut self, color: Color) -> Result<(), PlatformError> {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        self.current.push(DrawCommand::Rect { rect, color });
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        if self.fail_after.is_some_and(|limit| self.frames >= limit) {
            return Err(PlatformError::Render(format!(
                "surface lost after {} frames",
                self.frames
            )));
        }
        self.last = Some(std::mem::take(&mut self.current));
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_rotates_frames() {
        let mut recorder = FrameRecorder::new();
        assert!(recorder.last_frame().is_none());

        recorder.clear(Color::BLACK).unwrap();
        recorder.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED).unwrap();
        recorder.present().unwrap();
        assert_eq!(recorder.last_frame().unwrap().len(), 2);

        // A new frame replaces the old one only once presented
        recorder.clear(Color::BLACK).unwrap();
        assert_eq!(recorder.last_frame().unwrap().len(), 2);
        recorder.present().unwrap();
        assert_eq!(recorder.last_frame().unwrap(), &[DrawCommand::Clear(Color::BLACK)]);
        assert_eq!(recorder.frames_presented(), 2);
    }

    #[test]
    fn test_failing_after() {
        let mut recorder = FrameRecorder::failing_after(1);
        assert!(recorder.present().is_ok());
        assert!(matches!(recorder.present(), Err(PlatformError::Render(_))));
    }
}
