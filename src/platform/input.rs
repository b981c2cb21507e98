//! Scripted input: replays a fixed sequence of per-tick frames

use std::collections::VecDeque;

use glam::Vec2;

use super::{InputEvent, InputSource, Key, KeySet, PointerButton};
use crate::error::PlatformError;

/// Input for one tick
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub held: KeySet,
}

impl InputFrame {
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            events: Vec::new(),
            held: keys.iter().copied().collect(),
        }
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn click(self, pos: Vec2) -> Self {
        self.with_event(InputEvent::PointerButtonDown {
            button: PointerButton::Primary,
            pos,
        })
    }
}

/// Replays frames one poll at a time; requests Quit once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    held: KeySet,
    polls: u64,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            held: KeySet::new(),
            polls: 0,
        }
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError> {
        self.polls += 1;
        match self.frames.pop_front() {
            Some(frame) => {
                self.held = frame.held;
                Ok(frame.events)
            }
            None => {
                self.held.clear();
                Ok(vec![InputEvent::Quit])
            }
        }
    }

    fn pressed_keys(&mut self) -> Result<KeySet, PlatformError> {
        Ok(self.held.clone())
    }
}
