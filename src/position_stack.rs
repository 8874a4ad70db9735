use anyhow::Context;
use shakmaty::{
    uci::UciMove,
    zobrist::{Zobrist64, ZobristHash},
    Chess, Color, EnPassantMode, Move, Position,
};
use std::fmt;

pub type HashKey = Zobrist64;

/// Why a game ended in a draw (other than stalemate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

/// Whether the game is over at the current position, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameState {
    pub fn is_over(&self) -> bool {
        *self != GameState::Ongoing
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Checkmate => write!(f, "checkmate"),
            GameState::Stalemate => write!(f, "stalemate"),
            GameState::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            GameState::Draw(DrawReason::SeventyFiveMoves) => write!(f, "draw by 75-move rule"),
            GameState::Draw(DrawReason::FivefoldRepetition) => {
                write!(f, "draw by fivefold repetition")
            }
        }
    }
}

struct State {
    /// The position at this ply
    /// shakmaty is copy-make, so undoing a move is dropping the top entry
    pos: Chess,
    /// Hash of `pos`, for repetition detection
    key: HashKey,
}

impl State {
    fn new(pos: Chess) -> Self {
        let key = pos.zobrist_hash(EnPassantMode::Legal);
        State { pos, key }
    }
}

/// Stack of positions giving make/unmake semantics on top of shakmaty.
/// The bottom entry is the root position, every entry above it is the
/// result of one move played from the entry below.
pub struct PositionStack {
    stack: Vec<State>,
}

impl PositionStack {
    pub fn new(pos: Chess) -> Self {
        PositionStack {
            stack: vec![State::new(pos)],
        }
    }

    /// Clears the stack and sets the position
    pub fn reset(&mut self, pos: Chess) {
        self.stack.clear();
        self.stack.push(State::new(pos));
    }

    /// Sets the position and plays the given moves from it.
    /// The played moves are kept as history for repetition detection.
    /// On error the stack is left untouched.
    pub fn reset_with_moves(&mut self, pos: Chess, moves: &[UciMove]) -> anyhow::Result<()> {
        let mut next = PositionStack::new(pos);

        for uci in moves {
            let mov = uci
                .to_move(next.get())
                .with_context(|| format!("illegal move {} at ply {}", uci, next.ply()))?;
            next.do_move(&mov);
        }

        *self = next;
        Ok(())
    }

    /// Get current chess position
    pub fn get(&self) -> &Chess {
        // the root entry is never popped
        &self.stack[self.stack.len() - 1].pos
    }

    /// Number of moves played since the root position
    pub fn ply(&self) -> usize {
        self.stack.len() - 1
    }

    /// Hash of the current position
    pub fn hash_key(&self) -> HashKey {
        self.stack[self.stack.len() - 1].key
    }

    /// Makes a move. The move is assumed to be legal.
    pub fn do_move(&mut self, mov: &Move) {
        let mut pos = self.get().clone();
        pos.play_unchecked(mov);
        self.stack.push(State::new(pos));
    }

    /// Undoes the last move
    pub fn undo_move(&mut self) {
        debug_assert!(self.stack.len() > 1, "undo_move on the root position");
        self.stack.pop();
    }

    /// How many times the current position occurred since the last
    /// irreversible move, counting the current one
    pub fn repetitions(&self) -> usize {
        let key = self.hash_key();
        let window = (self.get().halfmoves() as usize).min(self.ply());

        self.stack
            .iter()
            .rev()
            .take(window + 1)
            .step_by(2) // same side to move
            .filter(|state| state.key == key)
            .count()
    }

    /// Checks if the game is over at the current position
    pub fn game_state(&self) -> GameState {
        let pos = self.get();

        if pos.is_checkmate() {
            GameState::Checkmate
        } else if pos.is_stalemate() {
            GameState::Stalemate
        } else if pos.is_insufficient_material() {
            GameState::Draw(DrawReason::InsufficientMaterial)
        } else if pos.halfmoves() >= 150 {
            GameState::Draw(DrawReason::SeventyFiveMoves)
        } else if self.repetitions() >= 5 {
            GameState::Draw(DrawReason::FivefoldRepetition)
        } else {
            GameState::Ongoing
        }
    }

    /// Number of legal moves `color` would have if it were to move
    pub fn legal_move_count(&self, color: Color) -> usize {
        legal_move_count(self.get(), color)
    }
}

/// Number of legal moves `color` would have in `pos` if it were to move.
///
/// For the side not to move this is counted on a side-swapped copy, so `pos`
/// is never touched. When the copy is not a legal position (the side to move
/// is in check, so the other side could capture the king) the count is 0.
pub fn legal_move_count(pos: &Chess, color: Color) -> usize {
    if pos.turn() == color {
        pos.legal_moves().len()
    } else {
        pos.clone()
            .swap_turn()
            .map_or(0, |view| view.legal_moves().len())
    }
}
