use crate::{
    defs::{Value, DRAW_SCORE, INFINITY, MATE_SCORE, STALEMATE_SCORE},
    eval::{Evaluator, PositionEvaluator},
    limits::SearchLimits,
    position_stack::{GameState, PositionStack},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use shakmaty::{uci::UciMove, Chess, Color, Move, Position};
use std::time::Instant;
use tracing::{debug, trace};

/// Score of a searched position and the move leading to it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub score: Value,
    /// Absent at the horizon and at positions without moves
    pub best_move: Option<Move>,
}

impl SearchResult {
    fn leaf(score: Value) -> Self {
        SearchResult {
            score,
            best_move: None,
        }
    }
}

/// Fixed depth minimax search with alpha-beta pruning
pub struct Search<E = Evaluator, R = StdRng> {
    /// Current position
    pos: PositionStack,
    /// Scores the leaves
    evaluator: E,
    /// Picks a move when none improves on the initial bound
    rng: R,

    /// Number of nodes searched
    pub nodes: usize,
    /// Number of evals computed
    pub evals: usize,
}

impl Search {
    pub fn new() -> Self {
        Search::with_parts(Evaluator::default(), StdRng::from_entropy())
    }

    /// Search whose random choices are reproducible
    pub fn seeded(seed: u64) -> Self {
        Search::with_parts(Evaluator::default(), StdRng::seed_from_u64(seed))
    }
}

impl Default for Search {
    fn default() -> Self {
        Search::new()
    }
}

impl<E, R> Search<E, R>
where
    E: PositionEvaluator,
    R: Rng,
{
    pub fn with_parts(evaluator: E, rng: R) -> Self {
        Search {
            pos: PositionStack::new(Chess::default()),
            evaluator,
            rng,
            nodes: 0,
            evals: 0,
        }
    }

    pub fn position(&self) -> &PositionStack {
        &self.pos
    }

    /// Set the position to search from, dropping any history
    pub fn reset(&mut self, position: Chess) {
        self.pos.reset(position);
    }

    /// Set the position to search from and the moves played from it
    pub fn set_position(&mut self, position: Chess, moves: &[UciMove]) -> anyhow::Result<()> {
        self.pos.reset_with_moves(position, moves)
    }

    /// Searches the current position for the side to move
    pub fn go(&mut self, limits: &SearchLimits) -> SearchResult {
        self.nodes = 0;
        self.evals = 0;

        let start_time = Instant::now();
        let maximizing = self.pos.get().turn() == Color::White;
        let result = self.minimax(limits.depth, -INFINITY, INFINITY, maximizing);

        debug!(
            depth = limits.depth,
            nodes = self.nodes,
            evals = self.evals,
            score = result.score,
            elapsed = ?start_time.elapsed(),
            "search finished"
        );

        result
    }

    /// Picks a move for the side to move in `position`.
    /// Returns None only if the game is already over
    pub fn choose_move(&mut self, position: &Chess, depth: u32) -> Option<Move> {
        self.reset(position.clone());
        self.go(&SearchLimits::depth(depth)).best_move
    }

    pub fn minimax(
        &mut self,
        depth: u32,
        mut alpha: Value,
        mut beta: Value,
        maximizing: bool,
    ) -> SearchResult {
        // increment the number of nodes searched
        self.nodes += 1;

        match self.pos.game_state() {
            GameState::Ongoing => {}
            GameState::Checkmate => {
                // the side to move has been mated
                return SearchResult::leaf(if self.pos.get().turn() == Color::White {
                    -MATE_SCORE
                } else {
                    MATE_SCORE
                });
            }
            GameState::Stalemate => return SearchResult::leaf(STALEMATE_SCORE),
            GameState::Draw(_) => return SearchResult::leaf(DRAW_SCORE),
        }

        if depth == 0 {
            return SearchResult::leaf(self.evaluate());
        }

        let moves = self.pos.get().legal_moves();

        if moves.is_empty() {
            // not reachable with a game over check above, but score it anyway
            return SearchResult::leaf(self.evaluate());
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for move_ in &moves {
            self.pos.do_move(move_);
            let score = self.minimax(depth - 1, alpha, beta, !maximizing).score;
            self.pos.undo_move();

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(move_.clone());
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(move_.clone());
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                trace!(depth, alpha, beta, "cutoff");
                break;
            }
        }

        if best_move.is_none() {
            // every move scored the initial bound
            best_move = moves.choose(&mut self.rng).cloned();
        }

        SearchResult {
            score: best_score,
            best_move,
        }
    }

    fn evaluate(&mut self) -> Value {
        self.evals += 1;
        self.evaluator.eval(self.pos.get())
    }
}
