use crate::ai::{minimax, Heuristic};
use crate::error::MatchError;

use super::{GameOutcome, GameState, MoveError, Player};

/// Result of a finished set, as seen by the match controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Won(Player),
    Draw,
}

/// Where the match currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// A set is in progress and the given side is to move.
    AwaitingMove(Player),
    /// A set just ended; waiting for [`MatchState::begin_next_set`].
    SetComplete(SetOutcome),
    /// The match is decided. Terminal; no further moves accepted.
    MatchComplete(Player),
}

/// What happened as a result of one committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    MoveApplied { row: usize, col: usize, side: Player },
    SetWon(Player),
    SetDrawn,
    MatchWon(Player),
}

/// Best-of-N match controller: turn alternation, set scoring, match
/// completion, starting-side rotation, and the turn gate that keeps
/// human submissions out while the computer side is thinking.
///
/// The controller owns the authoritative [`GameState`]; every committed
/// move flows through the same apply/win-check path regardless of which
/// side produced it.
#[derive(Debug, Clone)]
pub struct MatchState {
    game: GameState,
    best_of: usize,
    set_wins: [usize; 2],
    /// Side that started the current set. Flips every set, win or draw.
    set_starter: Player,
    /// The computer-controlled side, if any.
    ai_side: Option<Player>,
    /// True from the moment the turn passes to the AI side until its
    /// move is committed. Human submissions are rejected, not queued.
    ai_thinking: bool,
    phase: MatchPhase,
}

impl MatchState {
    /// Start a best-of-N match. `best_of` must be odd and at least 1.
    /// `ai_side` is `None` for a human-vs-human match.
    pub fn new(
        best_of: usize,
        starting_side: Player,
        ai_side: Option<Player>,
    ) -> Result<Self, MatchError> {
        if best_of == 0 || best_of % 2 == 0 {
            return Err(MatchError::InvalidBestOf(best_of));
        }
        let mut state = MatchState {
            game: GameState::new(starting_side),
            best_of,
            set_wins: [0, 0],
            set_starter: starting_side,
            ai_side,
            ai_thinking: false,
            phase: MatchPhase::AwaitingMove(starting_side),
        };
        state.ai_thinking = state.is_ai_turn();
        Ok(state)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn best_of(&self) -> usize {
        self.best_of
    }

    /// Set wins for the given side.
    pub fn set_wins(&self, side: Player) -> usize {
        self.set_wins[side.index()]
    }

    /// Sets needed to take the match: more than half of `best_of`.
    pub fn sets_to_win(&self) -> usize {
        self.best_of / 2 + 1
    }

    pub fn ai_side(&self) -> Option<Player> {
        self.ai_side
    }

    /// True while the computer side is to move and its search has not
    /// committed yet.
    pub fn ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    fn is_ai_turn(&self) -> bool {
        matches!(
            (self.phase, self.ai_side),
            (MatchPhase::AwaitingMove(side), Some(ai)) if side == ai
        )
    }

    /// Submit a human move for the side to move.
    ///
    /// Rejected with [`MatchError::NotYourTurn`] while the AI gate is up
    /// or once the current set (or the match) is over; rejected with
    /// [`MatchError::IllegalMove`] for out-of-range or full columns. A
    /// rejected move leaves the match untouched.
    pub fn submit_move(&mut self, column: usize) -> Result<Vec<MatchEvent>, MatchError> {
        if self.ai_thinking || !matches!(self.phase, MatchPhase::AwaitingMove(_)) {
            return Err(MatchError::NotYourTurn);
        }
        self.commit_move(column)
    }

    /// Run the search for the computer side over the current board and
    /// commit the chosen column, returning it with the resulting events.
    ///
    /// The search is pure and synchronous over a board snapshot; by the
    /// time this returns the gate is down again. [`MatchError::NoLegalMove`]
    /// is reported if the board is already full, which a correctly
    /// sequenced match cannot reach (the set would already be a draw).
    pub fn request_ai_move(
        &mut self,
        depth: usize,
        heuristic: &dyn Heuristic,
    ) -> Result<(usize, Vec<MatchEvent>), MatchError> {
        let side = match self.phase {
            MatchPhase::AwaitingMove(side) if Some(side) == self.ai_side => side,
            _ => return Err(MatchError::NotYourTurn),
        };

        let column = minimax::best_move(self.game.board(), depth, side, heuristic)
            .ok_or(MatchError::NoLegalMove)?;
        let events = self.commit_move(column)?;
        Ok((column, events))
    }

    /// Reset the board for the next set and hand the first move to the
    /// alternated starting side. Only valid from `SetComplete`.
    pub fn begin_next_set(&mut self) -> Result<(), MatchError> {
        if !matches!(self.phase, MatchPhase::SetComplete(_)) {
            return Err(MatchError::NotYourTurn);
        }
        // Alternation is independent of who won the previous set
        self.set_starter = self.set_starter.other();
        self.game = GameState::new(self.set_starter);
        self.phase = MatchPhase::AwaitingMove(self.set_starter);
        self.ai_thinking = self.is_ai_turn();
        Ok(())
    }

    fn commit_move(&mut self, column: usize) -> Result<Vec<MatchEvent>, MatchError> {
        let side = match self.phase {
            MatchPhase::AwaitingMove(side) => side,
            _ => return Err(MatchError::NotYourTurn),
        };

        let row = self.game.apply_move_mut(column).map_err(|e| match e {
            MoveError::ColumnFull | MoveError::InvalidColumn => MatchError::IllegalMove(column),
            MoveError::GameOver => MatchError::NotYourTurn,
        })?;

        let mut events = vec![MatchEvent::MoveApplied { row, col: column, side }];

        match self.game.outcome() {
            None => {
                self.phase = MatchPhase::AwaitingMove(side.other());
            }
            Some(GameOutcome::Winner(winner)) => {
                self.set_wins[winner.index()] += 1;
                events.push(MatchEvent::SetWon(winner));
                if self.set_wins[winner.index()] >= self.sets_to_win() {
                    self.phase = MatchPhase::MatchComplete(winner);
                    events.push(MatchEvent::MatchWon(winner));
                } else {
                    self.phase = MatchPhase::SetComplete(SetOutcome::Won(winner));
                }
            }
            Some(GameOutcome::Draw) => {
                events.push(MatchEvent::SetDrawn);
                self.phase = MatchPhase::SetComplete(SetOutcome::Draw);
            }
        }

        self.ai_thinking = self.is_ai_turn();
        Ok(events)
    }
}
