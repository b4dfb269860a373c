//! Screen/phase state machine
//!
//! Every one-shot input event goes through the single transition table in
//! [`transition`]. Input adapters only produce [`InputEvent`]s; they never
//! inspect or change the phase themselves.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Discrete one-shot input, already resolved from raw keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    NavigateUp,
    NavigateDown,
    /// Confirm the highlighted menu entry / continue
    Select,
    /// Leave the current screen (escape)
    Back,
    TogglePause,
    Restart,
    /// Switch between physics and arcade controls
    ToggleMode,
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Start,
    Controls,
    Quit,
}

impl MenuItem {
    pub fn up(self) -> Self {
        match self {
            MenuItem::Start | MenuItem::Controls => MenuItem::Start,
            MenuItem::Quit => MenuItem::Controls,
        }
    }

    pub fn down(self) -> Self {
        match self {
            MenuItem::Start => MenuItem::Controls,
            MenuItem::Controls | MenuItem::Quit => MenuItem::Quit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Controls => "Controls",
            MenuItem::Quit => "Quit",
        }
    }
}

/// What the orchestrator must do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCommand {
    /// Event has no meaning in this phase
    Ignore,
    /// Highlight another menu entry
    Cursor(MenuItem),
    /// Switch screens without touching the run
    Enter(GamePhase),
    /// Discard the run, build a fresh one and start playing
    StartRun,
    /// Flip the movement mode, phase unchanged
    ToggleMode,
    /// Stop the step loop
    Quit,
}

/// The transition table, keyed by (phase, event)
pub fn transition(phase: GamePhase, event: InputEvent, cursor: MenuItem) -> PhaseCommand {
    use GamePhase::*;
    use InputEvent::*;

    match (phase, event) {
        (_, ToggleMode) => PhaseCommand::ToggleMode,

        (Menu, NavigateUp) => PhaseCommand::Cursor(cursor.up()),
        (Menu, NavigateDown) => PhaseCommand::Cursor(cursor.down()),
        (Menu, Select) => match cursor {
            MenuItem::Start => PhaseCommand::StartRun,
            MenuItem::Controls => PhaseCommand::Enter(Controls),
            MenuItem::Quit => PhaseCommand::Quit,
        },
        (Menu, Back) => PhaseCommand::Quit,

        (Controls, Select | Back) => PhaseCommand::Enter(Menu),

        (Playing, TogglePause | Back) => PhaseCommand::Enter(Paused),
        (Playing, Restart) => PhaseCommand::StartRun,

        (Paused, TogglePause | Select) => PhaseCommand::Enter(Playing),
        (Paused, Back) => PhaseCommand::Enter(Menu),
        (Paused, Restart) => PhaseCommand::StartRun,

        (GameOver, Select | Restart) => PhaseCommand::StartRun,
        (GameOver, Back) => PhaseCommand::Quit,

        _ => PhaseCommand::Ignore,
    }
}

/// Current phase plus menu cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMachine {
    pub phase: GamePhase,
    pub cursor: MenuItem,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self {
            phase: GamePhase::Menu,
            cursor: MenuItem::Start,
        }
    }
}

impl PhaseMachine {
    /// Apply an event; screen changes and cursor moves are handled here, the
    /// rest is returned for the orchestrator
    pub fn handle(&mut self, event: InputEvent) -> PhaseCommand {
        let command = transition(self.phase, event, self.cursor);
        match command {
            PhaseCommand::Cursor(item) => self.cursor = item,
            PhaseCommand::Enter(phase) => {
                log::debug!("Phase {:?} -> {:?}", self.phase, phase);
                self.phase = phase;
            }
            PhaseCommand::StartRun => {
                log::debug!("Phase {:?} -> {:?} (new run)", self.phase, GamePhase::Playing);
                self.phase = GamePhase::Playing;
            }
            PhaseCommand::Ignore | PhaseCommand::ToggleMode | PhaseCommand::Quit => {}
        }
        command
    }

    /// Collision ended the run
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
        }
    }
}
