use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::ai::CenterColumnHeuristic;
use crate::config::{GameConfig, GameMode};
use crate::error::MatchError;
use crate::game::{MatchEvent, MatchPhase, MatchState, Player, SetOutcome};

/// The side the computer controls in PvAI mode; the human plays Red.
const AI_SIDE: Player = Player::Yellow;

pub struct App {
    match_state: MatchState,
    config: GameConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self, MatchError> {
        let ai_side = match config.mode {
            GameMode::Pvai => Some(AI_SIDE),
            GameMode::Pvp => None,
        };
        let match_state =
            MatchState::new(config.best_of, config.starting_side.to_player(), ai_side)?;
        Ok(App {
            match_state,
            config,
            selected_column: 3, // Start in middle
            should_quit: false,
            message: None,
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.match_state.ai_thinking() {
                // The frame above already shows the committed human move;
                // the delay is pacing only and may be zero.
                if self.config.ai_move_delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(self.config.ai_move_delay_ms));
                }
                self.play_ai_move();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < 6 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('n') => {
                self.next_set();
            }
            KeyCode::Char('r') => {
                self.restart_match();
            }
            _ => {}
        }
    }

    /// Submit the human move in the selected column.
    fn drop_piece(&mut self) {
        match self.match_state.submit_move(self.selected_column) {
            Ok(events) => self.show_events(&events),
            Err(MatchError::IllegalMove(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MatchError::NotYourTurn) => {
                self.message = Some(match self.match_state.phase() {
                    MatchPhase::SetComplete(_) => "Set over - press 'n' for the next set.".into(),
                    MatchPhase::MatchComplete(_) => {
                        "Match over! Press 'r' for a rematch.".into()
                    }
                    MatchPhase::AwaitingMove(_) => "Wait - the computer is thinking.".into(),
                });
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn play_ai_move(&mut self) {
        let h = CenterColumnHeuristic;
        match self.match_state.request_ai_move(self.config.search_depth, &h) {
            Ok((_, events)) => self.show_events(&events),
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn next_set(&mut self) {
        match self.match_state.begin_next_set() {
            Ok(()) => {
                self.selected_column = 3;
                self.message = Some(format!(
                    "Set {} - {} starts.",
                    self.sets_played() + 1,
                    self.current_player_name()
                ));
            }
            Err(_) => {
                self.message = Some("No set waiting to be started.".to_string());
            }
        }
    }

    fn restart_match(&mut self) {
        if let Ok(fresh) = App::new(self.config.clone()) {
            *self = fresh;
            self.message = Some("New match started!".to_string());
        }
    }

    fn show_events(&mut self, events: &[MatchEvent]) {
        // The last event is the most significant one
        self.message = events.iter().rev().find_map(|event| match *event {
            MatchEvent::MatchWon(side) => Some(format!("{} WINS THE MATCH!", side.name())),
            MatchEvent::SetWon(side) => Some(format!(
                "{} WON THE SET! Press 'n' to continue...",
                side.name()
            )),
            MatchEvent::SetDrawn => {
                Some("The set is a draw. Press 'n' to continue...".to_string())
            }
            MatchEvent::MoveApplied { .. } => None,
        });
    }

    fn sets_played(&self) -> usize {
        self.match_state.set_wins(Player::Red) + self.match_state.set_wins(Player::Yellow)
    }

    fn current_player_name(&self) -> &'static str {
        match self.match_state.phase() {
            MatchPhase::AwaitingMove(side) => side.name(),
            MatchPhase::SetComplete(SetOutcome::Won(side)) => side.name(),
            MatchPhase::SetComplete(SetOutcome::Draw) => "Nobody",
            MatchPhase::MatchComplete(side) => side.name(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.match_state,
            self.selected_column,
            &self.message,
        );
    }
}
