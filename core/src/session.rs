use alloc::format;
use alloc::string::{String, ToString};
use smallvec::{SmallVec, smallvec};

use crate::protocol::{
    ClickReply, Endpoint, RANKING_PATH, ScoreSubmission, StateReply, SubmitReply,
};
use crate::*;

/// Delay between drawing the winning board and opening the blocking name prompt.
pub const PAINT_DEFER_MS: u32 = 100;

const MOVE_FAILED: &str = "An error occurred during your move. Please try again.";
const SCORE_NOT_SAVED: &str =
    "You won, but your score was not saved because no name was provided.";
const SUBMIT_ERROR: &str = "An error occurred while submitting your score.";
const RESET_FAILED: &str = "Failed to reset game. Please try again.";

pub fn win_prompt(moves: u32) -> String {
    format!(
        "Congratulations! You won in {} moves!\nEnter your name for the leaderboard:",
        moves
    )
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Idle,
    Pending,
    Won { moves: u32 },
    Submitting { moves: u32 },
    Redirecting,
    /// Initial load failed, nothing was rendered.
    Halted,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Redirecting)
    }
}

/// One round-trip the driver has to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    GameState,
    Click(Coord2),
    Reset,
    SubmitScore(ScoreSubmission),
}

impl Request {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::GameState => Endpoint::GameState,
            Self::Click((row, col)) => Endpoint::Click(*row, *col),
            Self::Reset => Endpoint::Reset,
            Self::SubmitScore(_) => Endpoint::SubmitScore,
        }
    }
}

/// Side effect requested by a transition, executed by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Fetch(Request),
    /// Let the winning frame paint, then ask for a name and report back with [`Event::NamePrompted`].
    PromptAfterPaint { moves: u32, delay_ms: u32 },
    Alert(String),
    Navigate(&'static str),
}

pub type Effects = SmallVec<[Effect; 2]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Start,
    GameStateLoaded(core::result::Result<StateReply, ApiError>),
    CellClicked(Coord2),
    ClickReplied(core::result::Result<ClickReply, ApiError>),
    /// Outcome of the win prompt, `None` when the user cancelled.
    NamePrompted { name: Option<String>, moves: u32 },
    ScoreSubmitted(core::result::Result<SubmitReply, ApiError>),
    ResetClicked,
    ResetReplied(core::result::Result<StateReply, ApiError>),
}

/// Client game session: mirrors the server board and gates user input while round-trips are in flight.
#[derive(Clone, Debug)]
pub struct Session {
    model: BoardModel,
    frame: Option<Frame>,
    phase: Phase,
    reset_pending: bool,
    size: Coord2,
    paint_defer_ms: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl Session {
    pub fn new(size: Coord2) -> Self {
        Self {
            model: BoardModel::new(),
            frame: None,
            phase: Phase::Uninitialized,
            reset_pending: false,
            size,
            paint_defer_ms: PAINT_DEFER_MS,
        }
    }

    pub fn with_paint_defer(mut self, delay_ms: u32) -> Self {
        self.paint_defer_ms = delay_ms;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn model(&self) -> &BoardModel {
        &self.model
    }

    /// Last frame that projected successfully.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    /// Board accepts clicks only while idle.
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_reset_enabled(&self) -> bool {
        !self.reset_pending
    }

    /// Move count to display, absent until the first reply arrived.
    pub fn move_counter(&self) -> Option<u32> {
        self.model.is_loaded().then(|| self.model.moves())
    }

    pub fn handle(&mut self, event: Event) -> Effects {
        use Event::*;

        match event {
            Start => self.start(),
            GameStateLoaded(result) => self.on_game_state(result),
            CellClicked(coords) => self.click(coords),
            ClickReplied(result) => self.on_click_reply(result),
            NamePrompted { name, moves } => self.on_name(name, moves),
            ScoreSubmitted(result) => self.on_submit_reply(result),
            ResetClicked => self.reset(),
            ResetReplied(result) => self.on_reset_reply(result),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase.is_terminal() {
            log::debug!("phase: staying {:?}, ignoring {:?}", self.phase, phase);
            return;
        }
        if self.phase != phase {
            log::debug!("phase: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn apply(&mut self, board: crate::protocol::WireBoard, moves: u32) {
        self.model.apply(board, moves);
        match Frame::project(&self.model, self.size) {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => log::error!("not rendering board: {}", err),
        }
    }

    fn start(&mut self) -> Effects {
        if self.phase != Phase::Uninitialized {
            log::warn!("session already started");
            return Effects::new();
        }
        smallvec![Effect::Fetch(Request::GameState)]
    }

    fn on_game_state(&mut self, result: core::result::Result<StateReply, ApiError>) -> Effects {
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Error fetching initial game state: {}", err);
                self.set_phase(Phase::Halted);
                return Effects::new();
            }
        };

        let (Some(on), Some(off)) = (reply.light_on_char, reply.light_off_char) else {
            log::error!("Error fetching initial game state: reply carries no glyph legend");
            self.set_phase(Phase::Halted);
            return Effects::new();
        };

        self.model.capture_legend(Legend { on, off });
        self.apply(reply.board, reply.moves);
        self.set_phase(Phase::Idle);
        Effects::new()
    }

    fn click(&mut self, coords: Coord2) -> Effects {
        if !self.is_interactive() {
            log::trace!("click at {:?} ignored while {:?}", coords, self.phase);
            return Effects::new();
        }
        let coords = match validate_coords(coords, self.size) {
            Ok(coords) => coords,
            Err(err) => {
                log::warn!("click at {:?}: {}", coords, err);
                return Effects::new();
            }
        };

        log::debug!("click cell: {:?}", coords);
        self.set_phase(Phase::Pending);
        smallvec![Effect::Fetch(Request::Click(coords))]
    }

    fn on_click_reply(&mut self, result: core::result::Result<ClickReply, ApiError>) -> Effects {
        match result {
            Ok(reply) => {
                self.apply(reply.board, reply.moves);
                if reply.win {
                    log::info!("won in {} moves", reply.moves);
                    self.set_phase(Phase::Won { moves: reply.moves });
                    smallvec![Effect::PromptAfterPaint {
                        moves: reply.moves,
                        delay_ms: self.paint_defer_ms,
                    }]
                } else {
                    self.set_phase(Phase::Idle);
                    Effects::new()
                }
            }
            Err(err) => {
                log::error!("Error during cell click: {}", err);
                self.set_phase(Phase::Idle);
                smallvec![Effect::Alert(MOVE_FAILED.to_string())]
            }
        }
    }

    fn on_name(&mut self, name: Option<String>, moves: u32) -> Effects {
        if matches!(self.phase, Phase::Halted | Phase::Redirecting) {
            return Effects::new();
        }

        // a click issued after a reset may own the gate by now
        let owns_gate = matches!(self.phase, Phase::Won { .. } | Phase::Idle);

        let name = name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            if owns_gate {
                self.set_phase(Phase::Idle);
            }
            return smallvec![Effect::Alert(SCORE_NOT_SAVED.to_string())];
        }

        if owns_gate {
            self.set_phase(Phase::Submitting { moves });
        }
        smallvec![Effect::Fetch(Request::SubmitScore(ScoreSubmission {
            name: name.to_string(),
            moves,
        }))]
    }

    fn on_submit_reply(&mut self, result: core::result::Result<SubmitReply, ApiError>) -> Effects {
        let refusal = match result {
            Ok(SubmitReply {
                success: true,
                message,
            }) => {
                self.set_phase(Phase::Redirecting);
                return smallvec![
                    Effect::Alert(format!(
                        "{}\nYou will now be redirected to the ranking page.",
                        message
                    )),
                    Effect::Navigate(RANKING_PATH),
                ];
            }
            Ok(SubmitReply { message, .. }) => message,
            Err(err) => match err.detail() {
                Some(detail) => {
                    log::warn!("score refused with {}: {}", err, detail);
                    detail.to_string()
                }
                None => {
                    log::error!("Error submitting score: {}", err);
                    self.release_submit_gate();
                    return smallvec![Effect::Alert(SUBMIT_ERROR.to_string())];
                }
            },
        };

        let refusal = if refusal.is_empty() {
            "Unknown error"
        } else {
            refusal.as_str()
        };
        self.release_submit_gate();
        smallvec![Effect::Alert(format!("Failed to submit score: {}", refusal))]
    }

    fn release_submit_gate(&mut self) {
        if matches!(self.phase, Phase::Submitting { .. }) {
            self.set_phase(Phase::Idle);
        }
    }

    fn reset(&mut self) -> Effects {
        if self.reset_pending || self.phase.is_terminal() {
            log::trace!("reset ignored");
            return Effects::new();
        }
        log::debug!("reset game");
        self.reset_pending = true;
        smallvec![Effect::Fetch(Request::Reset)]
    }

    fn on_reset_reply(&mut self, result: core::result::Result<StateReply, ApiError>) -> Effects {
        self.reset_pending = false;
        let effects = match result {
            Ok(reply) => {
                self.apply(reply.board, reply.moves);
                Effects::new()
            }
            Err(err) => {
                log::error!("Error resetting game: {}", err);
                smallvec![Effect::Alert(RESET_FAILED.to_string())]
            }
        };
        self.set_phase(Phase::Idle);
        effects
    }
}
