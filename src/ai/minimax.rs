//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search enumerates columns in ascending order everywhere, which
//! fixes the tie-break: of two equally scored moves the leftmost one is
//! chosen, and repeated invocations on the same board return the same
//! column. Its terminal test scans the whole board for any existing
//! four-in-a-row (see [`Board::has_any_win`]), unlike the live-move path
//! which only checks the placed cell.

use crate::game::{Board, GameState, Player, COLS, ROWS};

use super::agent::Agent;

/// Trait for evaluating a board position from a player's perspective.
/// More positive is strictly better for `player`.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Baseline heuristic: +3 for every own piece in the center column.
/// Central control dominates Connect Four; richer positional terms can
/// slot in behind the same trait without touching the search.
pub struct CenterColumnHeuristic;

/// Center column index on the 7-wide board.
const CENTER_COL: usize = 3;

impl Heuristic for CenterColumnHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own = player.to_cell();
        let mut score = 0;
        for row in 0..ROWS {
            if board.get(row, CENTER_COL) == own {
                score += 3;
            }
        }
        score
    }
}

/// Score for a decided position, far outside any heuristic's range. A
/// small depth term prefers faster wins and later losses.
const WIN_SCORE: i32 = 1_000_000;

/// Pick the best column for `side` searching `depth` plies ahead.
///
/// Returns `None` only when the board has no legal column left; callers
/// should treat that as "no move possible" (a correctly sequenced match
/// reaches a draw before this can happen).
pub fn best_move(
    board: &Board,
    depth: usize,
    side: Player,
    heuristic: &dyn Heuristic,
) -> Option<usize> {
    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best_score = i32::MIN;
    let mut best_col = None;

    for col in board.legal_columns() {
        let mut child = *board;
        child
            .drop_piece(col, side.to_cell())
            .expect("legal_columns only yields droppable columns");
        let score = search(&child, depth.saturating_sub(1), false, alpha, beta, side, heuristic);

        // The first column evaluated is the default answer; strict
        // comparison keeps the earliest column on ties.
        if best_col.is_none() || score > best_score {
            best_score = score;
            best_col = Some(col);
        }
        alpha = alpha.max(score);
    }

    best_col
}

/// One minimax level. `maximizing` is true when `root_side` is to move;
/// alpha and beta travel by value down the recursion.
fn search(
    board: &Board,
    depth: usize,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    root_side: Player,
    heuristic: &dyn Heuristic,
) -> i32 {
    // The terminal test deliberately rescans the whole board: inside the
    // search there is no single "last move" to anchor an incremental
    // check on once positions are revisited at different depths.
    if board.has_any_win() {
        return decided_score(board, depth, root_side);
    }
    if depth == 0 || board.is_full() {
        return heuristic.evaluate(board, root_side);
    }

    let to_move = if maximizing { root_side } else { root_side.other() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for col in board.legal_columns() {
        let mut child = *board;
        child
            .drop_piece(col, to_move.to_cell())
            .expect("legal_columns only yields droppable columns");
        let score = search(&child, depth - 1, !maximizing, alpha, beta, root_side, heuristic);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

/// Score a position that already contains a four-in-a-row. The line can
/// only belong to the side that just moved, but identifying it from the
/// grid is cheaper than threading move history through the recursion.
fn decided_score(board: &Board, depth: usize, root_side: Player) -> i32 {
    if winning_side_is(board, root_side) {
        WIN_SCORE + depth as i32
    } else {
        -WIN_SCORE - depth as i32
    }
}

fn winning_side_is(board: &Board, side: Player) -> bool {
    let own = side.to_cell();
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.get(row, col) == own && board.check_win(row, col) {
                return true;
            }
        }
    }
    false
}

/// Minimax opponent with a fixed heuristic. Depth stays a per-call
/// parameter of [`best_move`]; the agent form just carries a default for
/// use behind the [`Agent`] seam.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(CenterColumnHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { depth, heuristic }
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> usize {
        best_move(
            state.board(),
            self.depth,
            state.current_player(),
            self.heuristic.as_ref(),
        )
        .expect("select_action called on a full board")
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{Cell, GameOutcome, GameState};

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        let h = CenterColumnHeuristic;
        assert_eq!(h.evaluate(&board, Player::Red), 0);
        assert_eq!(h.evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_counts_own_center_pieces_only() {
        let mut board = Board::new();
        board.drop_piece(3, Cell::Red).unwrap();
        board.drop_piece(3, Cell::Red).unwrap();
        board.drop_piece(3, Cell::Yellow).unwrap();
        board.drop_piece(0, Cell::Red).unwrap();

        let h = CenterColumnHeuristic;
        assert_eq!(h.evaluate(&board, Player::Red), 6);
        assert_eq!(h.evaluate(&board, Player::Yellow), 3);
    }

    // --- Search tests ---

    /// Bottom row `[., R, R, R, . , . , .]` with Yellow parked high in
    /// column 6. Red to move can complete the line at 0 or 4.
    fn three_in_a_row_board() -> Board {
        let mut board = Board::new();
        for col in 1..4 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        for _ in 0..3 {
            board.drop_piece(6, Cell::Yellow).unwrap();
        }
        board
    }

    #[test]
    fn completes_the_line_at_the_leftmost_option() {
        let board = three_in_a_row_board();
        let h = CenterColumnHeuristic;

        for depth in 1..=4 {
            let col = best_move(&board, depth, Player::Red, &h).unwrap();
            assert_eq!(col, 0, "depth {depth}: expected the leftmost completion");
        }

        let mut board = board;
        let row = board.drop_piece(0, Cell::Red).unwrap();
        assert!(board.check_win(row, 0), "applying the move must win");
    }

    #[test]
    fn blocks_opponent_win() {
        // Yellow threatens [0,1,2] on the bottom row; Red must answer 3
        let mut state = GameState::new(Player::Red);
        state.apply_move_mut(6).unwrap(); // Red
        state.apply_move_mut(0).unwrap(); // Yellow
        state.apply_move_mut(6).unwrap(); // Red
        state.apply_move_mut(1).unwrap(); // Yellow
        state.apply_move_mut(5).unwrap(); // Red
        state.apply_move_mut(2).unwrap(); // Yellow

        let h = CenterColumnHeuristic;
        let col = best_move(state.board(), 2, Player::Red, &h).unwrap();
        assert_eq!(col, 3, "should block the winning threat at column 3");
    }

    #[test]
    fn prefers_win_over_block() {
        // Red and Yellow both have open threes through column 3; the
        // side to move takes its own win instead of blocking
        let mut state = GameState::new(Player::Red);
        for col in 0..3 {
            state.apply_move_mut(col).unwrap(); // Red (bottom row)
            state.apply_move_mut(col).unwrap(); // Yellow (row above)
        }
        let h = CenterColumnHeuristic;
        let col = best_move(state.board(), 4, Player::Red, &h).unwrap();
        assert_eq!(col, 3, "should take the win, not merely block");
    }

    #[test]
    fn best_move_none_only_on_full_board() {
        let mut board = Board::new();
        for col in 0..7 {
            for _ in 0..6 {
                let cell = if (col + 1) % 3 == 0 { Cell::Red } else { Cell::Yellow };
                board.drop_piece(col, cell).unwrap();
            }
        }
        assert!(board.is_full());
        let h = CenterColumnHeuristic;
        assert_eq!(best_move(&board, 4, Player::Red, &h), None);
    }

    #[test]
    fn deterministic_across_invocations() {
        let board = three_in_a_row_board();
        let h = CenterColumnHeuristic;
        let first = best_move(&board, 4, Player::Yellow, &h);
        for _ in 0..10 {
            assert_eq!(best_move(&board, 4, Player::Yellow, &h), first);
        }
    }

    // --- Pruning equivalence ---

    /// Plain minimax without pruning, used as the reference decision.
    fn plain_search(board: &Board, depth: usize, maximizing: bool, root_side: Player) -> i32 {
        if board.has_any_win() {
            return decided_score(board, depth, root_side);
        }
        if depth == 0 || board.is_full() {
            return CenterColumnHeuristic.evaluate(board, root_side);
        }
        let to_move = if maximizing { root_side } else { root_side.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for col in board.legal_columns() {
            let mut child = *board;
            child.drop_piece(col, to_move.to_cell()).unwrap();
            let score = plain_search(&child, depth - 1, !maximizing, root_side);
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }

    fn plain_best_move(board: &Board, depth: usize, side: Player) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for col in board.legal_columns() {
            let mut child = *board;
            child.drop_piece(col, side.to_cell()).unwrap();
            let score = plain_search(&child, depth - 1, false, side);
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((col, score)),
            }
        }
        best
    }

    #[test]
    fn pruning_never_changes_the_decision() {
        let h = CenterColumnHeuristic;

        // A spread of positions: empty, midgame, tactical
        let mut boards = vec![Board::new(), three_in_a_row_board()];
        let mut mid = GameState::new(Player::Red);
        for col in [3, 3, 2, 4, 4, 1, 0, 3] {
            mid.apply_move_mut(col).unwrap();
        }
        boards.push(*mid.board());

        for board in &boards {
            for side in [Player::Red, Player::Yellow] {
                for depth in 1..=4 {
                    let pruned = best_move(board, depth, side, &h);
                    let reference = plain_best_move(board, depth, side);
                    assert_eq!(
                        pruned,
                        reference.map(|(col, _)| col),
                        "depth {depth}, side {side:?}"
                    );
                }
            }
        }
    }

    // --- Agent seam ---

    #[test]
    fn agent_selects_legal_action() {
        let mut agent = MinimaxAgent::new(4);
        let state = GameState::new(Player::Red);
        let action = agent.select_action(&state);
        assert!(state.legal_actions().contains(&action));
        assert_eq!(agent.name(), "Minimax");
    }

    #[test]
    fn beats_random_agent() {
        let mut minimax_wins = 0;
        let games = 10;

        for _ in 0..games {
            let mut minimax = MinimaxAgent::new(4);
            let mut random = RandomAgent::new();
            let mut state = GameState::new(Player::Red);

            while !state.is_terminal() {
                let action = if state.current_player() == Player::Red {
                    minimax.select_action(&state)
                } else {
                    random.select_action(&state)
                };
                state.apply_move_mut(action).unwrap();
            }

            if state.outcome() == Some(GameOutcome::Winner(Player::Red)) {
                minimax_wins += 1;
            }
        }

        assert!(
            minimax_wins * 2 > games,
            "minimax should beat random most of the time, won {minimax_wins}/{games}"
        );
    }
}
