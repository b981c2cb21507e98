//! Loop driver
//!
//! Owns the collaborators and the running flag, and cycles
//! start screen -> session -> end screen until quit.

use crate::error::PlatformError;
use crate::platform::{Clock, InputEvent, InputSource, Key, PointerButton, held_keys};
use crate::renderer::{Renderer, render_frame};
use crate::sim::{Action, SessionEnd, SessionState, SessionStats, TickInput, tick};

/// Top-level app state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    NotRunning,
    ShowingStartScreen,
    Playing,
    ShowingEndScreen,
}

/// Outcome of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub stats: SessionStats,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub sessions: Vec<SessionSummary>,
}

impl GameSummary {
    pub fn total_ticks(&self) -> u64 {
        self.sessions.iter().map(|s| s.stats.ticks).sum()
    }
}

/// Game instance holding the collaborators
pub struct Game<I, R, C> {
    input: I,
    renderer: R,
    clock: C,
    running: bool,
    state: AppState,
    #[cfg(test)]
    transitions: Vec<AppState>,
}

impl<I: InputSource, R: Renderer, C: Clock> Game<I, R, C> {
    pub fn new(input: I, renderer: R, clock: C) -> Self {
        Self {
            input,
            renderer,
            clock,
            running: false,
            state: AppState::NotRunning,
            #[cfg(test)]
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    fn set_state(&mut self, state: AppState) {
        if self.state != state {
            log::debug!("App state {:?} -> {:?}", self.state, state);
            self.state = state;
            #[cfg(test)]
            self.transitions.push(state);
        }
    }

    /// Play sessions until quit. Collaborator errors abort the run.
    pub fn run(&mut self) -> Result<GameSummary, PlatformError> {
        self.running = true;
        let mut summary = GameSummary::default();

        let result = self.run_sessions(&mut summary);

        self.running = false;
        self.set_state(AppState::NotRunning);
        result.map(|()| summary)
    }

    fn run_sessions(&mut self, summary: &mut GameSummary) -> Result<(), PlatformError> {
        while self.running {
            self.show_start_screen();
            let session = self.run_session()?;
            summary.sessions.push(session);
            self.show_end_screen(&session);
        }
        Ok(())
    }

    // Start and end screens have no content yet
    fn show_start_screen(&mut self) {
        self.set_state(AppState::ShowingStartScreen);
    }

    fn show_end_screen(&mut self, _summary: &SessionSummary) {
        self.set_state(AppState::ShowingEndScreen);
    }

    /// Play one session on a fresh scene until it ends
    pub fn run_session(&mut self) -> Result<SessionSummary, PlatformError> {
        self.set_state(AppState::Playing);
        let mut session = SessionState::new();
        log::info!("Session started");

        while session.playing {
            self.clock.wait_for_next_tick()?;

            let mut input = TickInput::default();
            for event in self.input.poll_events()? {
                match event {
                    InputEvent::Quit => {
                        session.end_session(SessionEnd::Quit);
                        self.running = false;
                    }
                    InputEvent::KeyDown(Key::Space) => input.actions.push(Action::Jump),
                    InputEvent::PointerButtonDown {
                        button: PointerButton::Primary,
                        pos,
                    } => input.actions.push(Action::Shoot { at: pos }),
                    _ => {}
                }
            }
            input.held = held_keys(&self.input.pressed_keys()?);

            tick(&mut session, &input, self.clock.now_ms());

            render_frame(&session, &mut self.renderer)?;
        }

        // Loop only exits once a reason is recorded
        let end = session.end.unwrap_or(SessionEnd::Quit);
        let summary = SessionSummary {
            end,
            stats: session.stats,
        };
        log::info!(
            "Session over ({:?}) after {} ticks: {} shots, {} enemies destroyed",
            end,
            summary.stats.ticks,
            summary.stats.bullets_fired,
            summary.stats.enemies_destroyed
        );
        Ok(summary)
    }
}
